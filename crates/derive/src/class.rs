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
use quote::{quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    Attribute,
    Data,
    DeriveInput,
    Error,
    LitStr,
    Path,
    Result,
};

use crate::facade::Facade;

pub struct ClassItem(TokenStream);

impl Parse for ClassItem {
    fn parse(input: ParseStream) -> Result<Self> {
        let item = input.parse::<DeriveInput>()?;

        if let Some(param) = item.generics.params.first() {
            return Err(Error::new(
                param.span(),
                "Generic types cannot be bound to runtime classes.",
            ));
        }

        if let Data::Union(data) = &item.data {
            return Err(Error::new(
                data.union_token.span,
                "Union types cannot be bound to runtime classes.",
            ));
        }

        let config = ClassConfig::from_attrs(&item.attrs)?;

        let ident = &item.ident;
        let span = ident.span();
        let core = ident.face_core();
        let option = ident.face_option();

        let name = match config.name {
            Some(name) => name,
            None => LitStr::new(&ident.to_string(), span),
        };

        let implicit = config.implicit.map(|path| {
            let span = path.span();

            quote_spanned!(span=>
                #[inline(always)]
                fn implicit(src: &#core::runtime::Object) -> #option<Self> {
                    #path(src)
                }
            )
        });

        Ok(Self(quote_spanned!(span=>
            impl #core::runtime::Class for #ident {
                const NAME: &'static str = #name;

                #implicit
            }

            impl #core::cast::Cast for #ident {
                type Caster = #core::casters::ClassCaster<Self>;
            }
        )))
    }
}

impl From<ClassItem> for proc_macro::TokenStream {
    #[inline(always)]
    fn from(value: ClassItem) -> Self {
        value.0.into()
    }
}

#[derive(Default)]
struct ClassConfig {
    name: Option<LitStr>,
    implicit: Option<Path>,
}

impl ClassConfig {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut config = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("class") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if config.name.is_some() {
                        return Err(meta.error("Duplicate class name."));
                    }

                    let name = meta.value()?.parse::<LitStr>()?;

                    if name.value().is_empty() {
                        return Err(Error::new(name.span(), "Class name cannot be empty."));
                    }

                    config.name = Some(name);

                    return Ok(());
                }

                if meta.path.is_ident("implicit") {
                    if config.implicit.is_some() {
                        return Err(meta.error("Duplicate implicit conversion function."));
                    }

                    config.implicit = Some(meta.value()?.parse::<Path>()?);

                    return Ok(());
                }

                Err(meta.error(format!(
                    "Unknown class option {:?}. Expected \"name\" or \"implicit\".",
                    meta.path.to_token_stream().to_string(),
                )))
            })?;
        }

        Ok(config)
    }
}
