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

use log::debug;

use crate::{
    cast::{Cast, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster},
    runtime::Object,
};

/// A configuration of the top-level conversion calls.
///
/// This object is the entry point into the framework for code that does not
/// implement casters itself: it owns the [CleanupList] of each conversion,
/// passes the configured flags and policy to the outermost caster, and
/// releases the cleanup list once the conversion returns.
///
/// ```
/// use std::collections::BTreeSet;
///
/// use astra_cast::{cast::CastConfig, runtime::Object};
///
/// let config = CastConfig::new();
///
/// let object = config.dump(BTreeSet::from([1i64, 2, 3])).unwrap();
///
/// assert!(object.contains(&Object::int(2)).unwrap());
///
/// let set = config.load::<BTreeSet<i64>>(&object).unwrap();
///
/// assert_eq!(set, BTreeSet::from([1, 2, 3]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[non_exhaustive]
pub struct CastConfig {
    /// If set to true, the casters are allowed to perform implicit
    /// conversions (the [CONVERT](CastFlags::CONVERT) flag).
    ///
    /// The default value is true.
    pub convert: bool,

    /// The ownership policy of the projected objects.
    ///
    /// The default value is [Policy::Automatic].
    pub policy: Policy,
}

impl Default for CastConfig {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl CastConfig {
    /// The default constructor for this configuration object.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            convert: true,
            policy: Policy::Automatic,
        }
    }

    /// A configuration that disallows implicit conversions.
    #[inline(always)]
    pub const fn strict() -> Self {
        Self {
            convert: false,
            policy: Policy::Automatic,
        }
    }

    /// Returns the top-level conversion flags of this configuration.
    #[inline(always)]
    pub const fn flags(&self) -> CastFlags {
        match self.convert {
            true => CastFlags::CONVERT,
            false => CastFlags::EMPTY,
        }
    }

    /// Decodes the `src` object into a native value of type `T`.
    pub fn load<T: Cast>(&self, src: &Object) -> CastResult<T> {
        let mut cleanup = CleanupList::new();
        let mut caster = T::Caster::default();

        let result = caster
            .from_dynamic(src, self.flags(), &mut cleanup)
            .and_then(|()| caster.into_value());

        let _ = cleanup.release();

        if result.is_err() {
            debug!(
                "Failed to convert '{}' object to {}.",
                src.type_name(),
                T::Caster::name(),
            );
        }

        result
    }

    /// Projects the native `value` into a new dynamic object by move.
    ///
    /// Returns None if the projection fails.
    #[inline(always)]
    pub fn dump<T: Cast>(&self, value: T) -> Option<Object> {
        self.project::<T>(Source::Owned(value))
    }

    /// Projects the native `value` into a new dynamic object by reference.
    ///
    /// Returns None if the projection fails.
    #[inline(always)]
    pub fn dump_ref<T: Cast>(&self, value: &T) -> Option<Object> {
        self.project::<T>(Source::Borrowed(value))
    }

    fn project<T: Cast>(&self, src: Source<'_, T>) -> Option<Object> {
        let mut cleanup = CleanupList::new();

        let result = T::Caster::to_dynamic(src, self.policy, &mut cleanup);

        let _ = cleanup.release();

        if result.is_none() {
            debug!("Failed to project {} value.", T::Caster::name());
        }

        result
    }
}

/// Decodes the `src` object into a native value of type `T` using the
/// [default configuration](CastConfig::new).
#[inline(always)]
pub fn load<T: Cast>(src: &Object) -> CastResult<T> {
    CastConfig::new().load(src)
}

/// Projects the native `value` into a new dynamic object using the
/// [default configuration](CastConfig::new).
#[inline(always)]
pub fn dump<T: Cast>(value: T) -> Option<Object> {
    CastConfig::new().dump(value)
}
