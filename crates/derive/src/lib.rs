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

//! # Astra Cast Derive Macros
//!
//! This is a helper crate of the [astra-cast](https://docs.rs/astra-cast)
//! type-caster composition framework.
//!
//! The [Class] derive macro binds a Rust type to a dynamic runtime class, and
//! the [Variant] derive macro turns a Rust enum into a sum type whose
//! alternatives are decoded in declaration order.
//!
//! Normally, you don't need to depend on this crate directly: the main crate
//! re-exports both macros.

mod class;
mod facade;
mod variant;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use crate::{class::ClassItem, variant::VariantItem};

/// Binds a Rust type to a dynamic runtime class.
///
/// The macro implements the `Class` trait for the type and assigns the
/// class-bound `ClassCaster` to it. The type must implement [Clone], and it
/// must not have generic parameters.
///
/// ```
/// use astra_cast::{cast::CastConfig, runtime::Object, Class};
///
/// #[derive(Class, Clone, Debug, PartialEq)]
/// #[class(name = "Celsius", implicit = Celsius::from_number)]
/// struct Celsius(f64);
///
/// impl Celsius {
///     fn from_number(src: &Object) -> Option<Self> {
///         src.as_float().or(src.as_int().map(|value| value as f64)).map(Self)
///     }
/// }
///
/// let config = CastConfig::new();
///
/// let object = config.dump(Celsius(36.6)).unwrap();
///
/// assert_eq!(object.type_name(), "Celsius");
/// assert_eq!(config.load::<Celsius>(&object).unwrap(), Celsius(36.6));
///
/// // Implicit conversions are allowed by default.
/// assert_eq!(config.load::<Celsius>(&Object::int(20)).unwrap(), Celsius(20.0));
///
/// // And rejected by the strict configuration.
/// assert!(CastConfig::strict().load::<Celsius>(&Object::int(20)).is_err());
/// ```
///
/// ## Options
///
/// - `#[class(name = "...")]` sets the runtime class name. By default, the
///   name is the Rust type name.
/// - `#[class(implicit = path::to::function)]` sets a function
///   `fn(&Object) -> Option<Self>` that implicitly converts other dynamic
///   objects into values of this class.
#[proc_macro_derive(Class, attributes(class))]
pub fn class(input: TokenStream) -> TokenStream {
    parse_macro_input!(input as ClassItem).into()
}

/// Turns a Rust enum into a sum type.
///
/// Every variant of the enum is an alternative of the sum type:
///
/// - A unit variant `Foo` is the "no value" alternative, and accepts the
///   dynamic none singleton only.
/// - A variant with exactly one field `Foo(T)` or `Foo { field: T }` is
///   decoded and projected by the caster of `T`.
///
/// Decoding tries the alternatives in declaration order, and returns the first
/// one that accepts the dynamic object.
///
/// ```
/// use astra_cast::{
///     cast::{load, Cast, TypeCaster},
///     runtime::Object,
///     Variant,
/// };
///
/// #[derive(Variant, Debug, PartialEq)]
/// enum Limit {
///     Unlimited,
///     Count(u32),
///     Named { label: String },
/// }
///
/// assert_eq!(<Limit as Cast>::Caster::name().as_str(), "Union[None, int, str]");
///
/// assert_eq!(load::<Limit>(&Object::none()).unwrap(), Limit::Unlimited);
/// assert_eq!(load::<Limit>(&Object::int(10)).unwrap(), Limit::Count(10));
///
/// assert_eq!(
///     load::<Limit>(&Object::str("max")).unwrap(),
///     Limit::Named { label: String::from("max") },
/// );
///
/// assert!(load::<Limit>(&Object::int(-1)).is_err());
/// ```
#[proc_macro_derive(Variant)]
pub fn variant(input: TokenStream) -> TokenStream {
    parse_macro_input!(input as VariantItem).into()
}
