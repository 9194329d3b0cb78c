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

//! Built-in casters of the standard Rust types and the composite casters.
//!
//! The scalar casters ([bool], integers, floats, [String]), the "no value"
//! [UnitCaster] and the pass-through [ObjectCaster] are the leaves of the
//! conversion chains. The [ClassCaster] and the [PtrCaster] are the
//! class-bound casters of the types bound to runtime
//! [classes](crate::runtime::Class).
//!
//! The composite casters delegate to the casters of their element types:
//!
//! - [SetCaster] converts between dynamic iterables and native sets.
//! - [VariantCaster] converts between dynamic objects and native sum types:
//!   the [Variant2] - [Variant8] enums and the enums annotated with the
//!   [Variant derive macro](crate::Variant).
//! - [OptionCaster] maps the none singleton to [None].

mod class;
mod object;
mod option;
mod scalar;
mod set;
mod unit;
mod variant;

pub use crate::casters::{
    class::{ClassCaster, PtrCaster},
    object::ObjectCaster,
    option::OptionCaster,
    scalar::{BoolCaster, FloatCaster, IntCaster, StrCaster},
    set::{SetCaster, SetContainer},
    unit::UnitCaster,
    variant::{
        Alternatives,
        Variant2,
        Variant3,
        Variant4,
        Variant5,
        Variant6,
        Variant7,
        Variant8,
        VariantCaster,
    },
};
