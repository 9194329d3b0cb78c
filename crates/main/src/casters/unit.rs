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

use crate::{
    cast::{Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A caster of the "no value" type `()`: `None`.
///
/// The caster accepts the runtime's none singleton only, and projects the
/// unit value into the same singleton.
///
/// Sum types use it as the alternative for an explicit empty state:
///
/// ```
/// use astra_cast::{cast::CastConfig, casters::Variant2, runtime::Object};
///
/// let config = CastConfig::new();
///
/// assert_eq!(
///     config.load::<Variant2<(), i64>>(&Object::none()).unwrap(),
///     Variant2::V1(()),
/// );
///
/// assert!(config.dump(Variant2::<(), i64>::V1(())).unwrap().is_none());
/// ```
#[derive(Default)]
pub struct UnitCaster {
    decoded: bool,
}

impl TypeCaster for UnitCaster {
    type Value = ();

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new("None")
    }

    #[inline(always)]
    fn from_dynamic(
        &mut self,
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> CastResult {
        self.decoded = src.is_none();

        match self.decoded {
            true => Ok(()),
            false => Err(CastFailure),
        }
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<()> {
        match self.decoded {
            true => Ok(()),
            false => Err(CastFailure),
        }
    }

    #[inline(always)]
    fn to_dynamic(
        _src: Source<'_, ()>,
        _policy: Policy,
        _cleanup: &mut CleanupList,
    ) -> Option<Object> {
        Some(Object::none())
    }
}

impl Cast for () {
    type Caster = UnitCaster;
}

#[cfg(test)]
mod tests {
    use crate::{
        cast::{load, CastConfig, CastFailure, CastFlags, CleanupList, TypeCaster},
        casters::UnitCaster,
        runtime::Object,
    };

    #[test]
    fn test_unit_caster() {
        assert_eq!(load::<()>(&Object::none()), Ok(()));
        assert_eq!(load::<()>(&Object::int(0)), Err(CastFailure));
        assert_eq!(load::<()>(&Object::tuple([])), Err(CastFailure));

        let mut cleanup = CleanupList::new();
        let mut caster = UnitCaster::default();

        assert!(caster
            .from_dynamic(&Object::none(), CastFlags::NONE_DISALLOWED, &mut cleanup)
            .is_ok());
        assert!(caster.into_value().is_ok());

        assert!(CastConfig::new().dump(()).unwrap().is(&Object::none()));
    }
}
