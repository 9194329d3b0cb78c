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

//! The caster capability and its composition helpers.
//!
//! Every native type that can cross the native/dynamic boundary has a
//! [TypeCaster], and the [Cast] trait maps the type to it. Composite casters
//! build on the casters of their element types: they derive the element flags
//! with [CastFlags::for_caster], decode elements with [decode] or
//! [try_alternative], and forward the [Source] and [Policy] of projected
//! elements.
//!
//! The [CastConfig] object (and the [load] and [dump] shortcuts) runs
//! top-level conversions and owns their [CleanupList].

mod caster;
mod cleanup;
mod config;
mod delegate;
mod flags;
mod name;

pub use crate::cast::{
    caster::{Cast, CastFailure, CastResult, Policy, Source, TypeCaster},
    cleanup::CleanupList,
    config::{dump, load, CastConfig},
    delegate::{decode, try_alternative},
    flags::CastFlags,
    name::TypeName,
};
