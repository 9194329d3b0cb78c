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

//! # Astra Cast
//!
//! A type-caster composition framework for the boundary between native Rust
//! code and a dynamically typed object runtime.
//!
//! Every native type that crosses the boundary has a
//! [TypeCaster](cast::TypeCaster): an object that decodes dynamic
//! [Objects](runtime::Object) into native values and projects native values
//! back into new dynamic objects. Casters of composite types are built from
//! the casters of their element types:
//!
//! - Native sets ([HashSet](std::collections::HashSet),
//!   [BTreeSet](std::collections::BTreeSet), [AHashSet](ahash::AHashSet)) are
//!   decoded from any dynamic iterable by the [SetCaster](casters::SetCaster).
//! - Sum types ([Variant2](casters::Variant2) and friends, or your own enums
//!   with the [Variant] derive macro) try their alternatives in declaration
//!   order with the [VariantCaster](casters::VariantCaster).
//! - The unit type `()` is the "no value" alternative that maps to the none
//!   singleton.
//!
//! The casters of the types bound to runtime classes (see the [Class] derive
//! macro) are "class-bound": the composite casters automatically forbid the
//! none singleton for their plain-value elements, while nullable
//! [pointers](runtime::Ptr) may still decode it into null.
//!
//! ```
//! use std::collections::HashSet;
//!
//! use astra_cast::{
//!     cast::CastConfig,
//!     casters::Variant2,
//!     runtime::Object,
//! };
//!
//! let config = CastConfig::new();
//!
//! let object = Object::tuple([Object::int(1), Object::int(2), Object::int(2), Object::int(3)]);
//!
//! assert_eq!(config.load::<HashSet<i64>>(&object).unwrap(), HashSet::from([1, 2, 3]));
//!
//! type MaybeInt = Variant2<(), i64>;
//!
//! assert_eq!(config.load::<MaybeInt>(&Object::none()).unwrap(), Variant2::V1(()));
//! assert_eq!(config.load::<MaybeInt>(&Object::int(42)).unwrap(), Variant2::V2(42));
//! assert!(config.dump(MaybeInt::V1(())).unwrap().is_none());
//! ```
//!
//! ## Logging
//!
//! The crate reports suppressed runtime errors and failed top-level
//! conversions through the [log](https://docs.rs/log) facade. Failure reasons
//! never change the outcome of a conversion, so they are only visible on the
//! `debug` and `trace` levels.

extern crate self as astra_cast;

pub mod cast;
pub mod casters;
pub mod runtime;

pub use astra_cast_derive::{Class, Variant};
