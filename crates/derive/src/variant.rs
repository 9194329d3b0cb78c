////////////////////////////////////////////////////////////////////////////////
// This file is part of "Ad Astra", an embeddable scripting programming       //
// language platform.                                                         //
//                                                                            //
// This work is proprietary software with source-available code.              //
//                                                                            //
// To copy, use, distribute, or contribute to this work, you must agree to    //
// the terms of the General License Agreement:                                //
//                                                                            //
// https://github.com/Eliah-Lakhin/ad-astra/blob/master/EULA.md               //
//                                                                            //
// The agreement grants a Basic Commercial License, allowing you to use       //
// this work in non-commercial and limited commercial products with a total   //
// gross revenue cap. To remove this commercial limit for one of your         //
// products, you must acquire a Full Commercial License.                      //
//                                                                            //
// If you contribute to the source code, documentation, or related materials, //
// you must grant me an exclusive license to these contributions.             //
// Contributions are governed by the "Contributions" section of the General   //
// License Agreement.                                                         //
//                                                                            //
// Copying the work in parts is strictly forbidden, except as permitted       //
// under the General License Agreement.                                       //
//                                                                            //
// If you do not or cannot agree to the terms of this Agreement,              //
// do not use this work.                                                      //
//                                                                            //
// This work is provided "as is", without any warranties, express or implied, //
// except where such disclaimers are legally invalid.                         //
//                                                                            //
// Copyright (c) 2024 Ilya Lakhin (Илья Александрович Лахин).                 //
// All rights reserved.                                                       //
////////////////////////////////////////////////////////////////////////////////

use proc_macro2::TokenStream;
use quote::quote_spanned;
use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    Data,
    DeriveInput,
    Error,
    Fields,
    Ident,
    Result,
    Type,
};

use crate::facade::Facade;

pub struct VariantItem(TokenStream);

impl Parse for VariantItem {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<DeriveInput>()?;

        if let Some(param) = item.generics.params.first() {
            return Err(Error::new(
                param.span(),
                "Generic enums are not supported. Use the VariantN types instead.",
            ));
        }

        let data = match &item.data {
            Data::Enum(data) => data,

            Data::Struct(data) => {
                return Err(Error::new(
                    data.struct_token.span,
                    "Only enum types can be sum types.",
                ))
            }

            Data::Union(data) => {
                return Err(Error::new(
                    data.union_token.span,
                    "Only enum types can be sum types.",
                ))
            }
        };

        if data.variants.is_empty() {
            return Err(Error::new(
                item.ident.span(),
                "A sum type requires at least one alternative.",
            ));
        }

        let alternatives = data
            .variants
            .iter()
            .map(Alternative::from_variant)
            .collect::<Result<Vec<_>>>()?;

        let ident = &item.ident;
        let span = ident.span();
        let core = ident.face_core();
        let option = ident.face_option();
        let result = ident.face_result();

        let names = alternatives.iter().map(|alternative| {
            let caster = alternative.caster(&core);
            let span = alternative.span();

            quote_spanned!(span=> <#caster as #core::cast::TypeCaster>::name())
        });

        let loads = alternatives.iter().map(|alternative| {
            let caster = alternative.caster(&core);
            let span = alternative.span();
            let construct = alternative.construct(quote_spanned!(span=> value));

            quote_spanned!(span=>
                if let #option::Some(value) = #core::cast::try_alternative::<#caster>(
                    src,
                    flags,
                    cleanup,
                ) {
                    return #result::Ok(#construct);
                }
            )
        });

        let dumps = alternatives.iter().map(|alternative| {
            let caster = alternative.caster(&core);
            let span = alternative.span();
            let owned = alternative.pattern(quote_spanned!(span=> value));
            let owned_value = alternative.value(false);
            let borrowed_value = alternative.value(true);

            quote_spanned!(span=>
                #core::cast::Source::Owned(#owned) => {
                    <#caster as #core::cast::TypeCaster>::to_dynamic(
                        #core::cast::Source::Owned(#owned_value),
                        policy,
                        cleanup,
                    )
                }

                #core::cast::Source::Borrowed(#owned) => {
                    <#caster as #core::cast::TypeCaster>::to_dynamic(
                        #core::cast::Source::Borrowed(#borrowed_value),
                        policy,
                        cleanup,
                    )
                }
            )
        });

        Ok(Self(quote_spanned!(span=>
            impl #core::casters::Alternatives for #ident {
                #[inline(always)]
                fn name() -> #core::cast::TypeName {
                    #core::cast::TypeName::union([#(#names),*])
                }

                fn load(
                    src: &#core::runtime::Object,
                    flags: #core::cast::CastFlags,
                    cleanup: &mut #core::cast::CleanupList,
                ) -> #core::cast::CastResult<Self> {
                    #(#loads)*

                    #result::Err(#core::cast::CastFailure)
                }

                fn dump(
                    src: #core::cast::Source<'_, Self>,
                    policy: #core::cast::Policy,
                    cleanup: &mut #core::cast::CleanupList,
                ) -> #option<#core::runtime::Object> {
                    match src {
                        #(#dumps)*
                    }
                }
            }

            impl #core::cast::Cast for #ident {
                type Caster = #core::casters::VariantCaster<Self>;
            }
        )))
    }
}

impl From<VariantItem> for proc_macro::TokenStream {
    #[inline(always)]
    fn from(value: VariantItem) -> Self {
        value.0.into()
    }
}

enum Alternative {
    Unit { ident: Ident },
    Unnamed { ident: Ident, ty: Type },
    Named { ident: Ident, field: Ident, ty: Type },
}

impl Alternative {
    fn from_variant(variant: &syn::Variant) -> Result<Self> {
        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(Error::new(
                discriminant.span(),
                "Explicit discriminants are not supported in sum types.",
            ));
        }

        let ident = variant.ident.clone();

        match &variant.fields {
            Fields::Unit => Ok(Self::Unit { ident }),

            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let ty = fields.unnamed[0].ty.clone();

                Ok(Self::Unnamed { ident, ty })
            }

            Fields::Named(fields) if fields.named.len() == 1 => {
                let field = &fields.named[0];

                let Some(field_ident) = field.ident.clone() else {
                    return Err(Error::new(field.span(), "Missing field name."));
                };

                Ok(Self::Named {
                    ident,
                    field: field_ident,
                    ty: field.ty.clone(),
                })
            }

            fields => Err(Error::new(
                fields.span(),
                "A sum type alternative must have exactly one field, or no fields.",
            )),
        }
    }

    fn span(&self) -> proc_macro2::Span {
        match self {
            Self::Unit { ident } => ident.span(),
            Self::Unnamed { ty, .. } => ty.span(),
            Self::Named { ty, .. } => ty.span(),
        }
    }

    fn caster(&self, core: &TokenStream) -> TokenStream {
        let span = self.span();

        match self {
            Self::Unit { .. } => quote_spanned!(span=> #core::casters::UnitCaster),

            Self::Unnamed { ty, .. } | Self::Named { ty, .. } => {
                quote_spanned!(span=> <#ty as #core::cast::Cast>::Caster)
            }
        }
    }

    fn construct(&self, value: TokenStream) -> TokenStream {
        let span = self.span();

        match self {
            Self::Unit { ident } => quote_spanned!(span=> { let () = #value; Self::#ident }),
            Self::Unnamed { ident, .. } => quote_spanned!(span=> Self::#ident(#value)),
            Self::Named { ident, field, .. } => quote_spanned!(span=> Self::#ident { #field: #value }),
        }
    }

    fn pattern(&self, binding: TokenStream) -> TokenStream {
        let span = self.span();

        match self {
            Self::Unit { ident } => quote_spanned!(span=> Self::#ident),
            Self::Unnamed { ident, .. } => quote_spanned!(span=> Self::#ident(#binding)),
            Self::Named { ident, field, .. } => {
                quote_spanned!(span=> Self::#ident { #field: #binding })
            }
        }
    }

    fn value(&self, borrowed: bool) -> TokenStream {
        let span = self.span();

        match (self, borrowed) {
            (Self::Unit { .. }, false) => quote_spanned!(span=> ()),
            (Self::Unit { .. }, true) => quote_spanned!(span=> &()),
            (Self::Unnamed { .. } | Self::Named { .. }, _) => quote_spanned!(span=> value),
        }
    }
}
