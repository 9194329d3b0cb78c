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
    cast::{decode, Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A caster of the [Option] type: `Optional[T]`.
///
/// The none singleton decodes into [None] regardless of the
/// [NONE_DISALLOWED](CastFlags::NONE_DISALLOWED) flag. Any other object is
/// delegated to the caster of `T`.
pub struct OptionCaster<T> {
    value: Option<Option<T>>,
}

impl<T> Default for OptionCaster<T> {
    #[inline(always)]
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Cast> TypeCaster for OptionCaster<T> {
    type Value = Option<T>;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::generic("Optional", [T::Caster::name()])
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> CastResult {
        self.value = None;

        if src.is_none() {
            self.value = Some(None);
            return Ok(());
        }

        let value = decode::<T::Caster>(src, flags.for_caster::<T::Caster>(), cleanup)?;

        self.value = Some(Some(value));

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<Option<T>> {
        self.value.ok_or(CastFailure)
    }

    fn to_dynamic(
        src: Source<'_, Option<T>>,
        policy: Policy,
        cleanup: &mut CleanupList,
    ) -> Option<Object> {
        match src {
            Source::Owned(Some(value)) => T::Caster::to_dynamic(Source::Owned(value), policy, cleanup),
            Source::Borrowed(Some(value)) => {
                T::Caster::to_dynamic(Source::Borrowed(value), policy, cleanup)
            }
            Source::Owned(None) | Source::Borrowed(None) => Some(Object::none()),
        }
    }
}

impl<T: Cast> Cast for Option<T> {
    type Caster = OptionCaster<T>;
}

#[cfg(test)]
mod tests {
    use crate::{
        cast::{load, CastConfig, CastFailure, Cast, TypeCaster},
        runtime::Object,
    };

    #[test]
    fn test_option_caster() {
        assert_eq!(load::<Option<i64>>(&Object::none()), Ok(None));
        assert_eq!(load::<Option<i64>>(&Object::int(4)), Ok(Some(4)));
        assert_eq!(load::<Option<i64>>(&Object::str("4")), Err(CastFailure));

        assert_eq!(<Option<String> as Cast>::Caster::name().as_str(), "Optional[str]");

        let config = CastConfig::new();

        assert!(config.dump(Option::<i64>::None).unwrap().is_none());
        assert_eq!(config.dump_ref(&Some(5i64)), Some(Object::int(5)));
    }
}
