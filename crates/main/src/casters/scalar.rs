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

use std::result::Result as StdResult;

use log::trace;

use crate::{
    cast::{Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A caster of the [bool] type: `bool`.
#[derive(Default)]
pub struct BoolCaster(Option<bool>);

impl TypeCaster for BoolCaster {
    type Value = bool;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new("bool")
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> CastResult {
        self.0 = Some(src.as_bool().ok_or(CastFailure)?);

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<bool> {
        self.0.ok_or(CastFailure)
    }

    #[inline(always)]
    fn to_dynamic(
        src: Source<'_, bool>,
        _policy: Policy,
        _cleanup: &mut CleanupList,
    ) -> Option<Object> {
        Some(Object::bool(*src.as_ref()))
    }
}

impl Cast for bool {
    type Caster = BoolCaster;
}

/// A caster of the primitive integer types: `int`.
///
/// The dynamic runtime stores integers as 64-bit signed numbers. The caster
/// rejects values that do not fit into the target type, and fails to project
/// native values that do not fit into the runtime's integers.
#[derive(Default)]
pub struct IntCaster<T>(Option<T>);

macro_rules! impl_int {
    ($($ty:ty),+ $(,)?) => {
        $(
        impl TypeCaster for IntCaster<$ty> {
            type Value = $ty;

            #[inline(always)]
            fn name() -> TypeName {
                TypeName::new("int")
            }

            fn from_dynamic(
                &mut self,
                src: &Object,
                _flags: CastFlags,
                _cleanup: &mut CleanupList,
            ) -> CastResult {
                self.0 = None;

                let value = src.as_int().ok_or(CastFailure)?;

                let Some(value) = narrow::<i64, $ty>(value) else {
                    trace!("Integer {value} is out of {} range.", stringify!($ty));
                    return Err(CastFailure);
                };

                self.0 = Some(value);

                Ok(())
            }

            #[inline(always)]
            fn into_value(self) -> CastResult<$ty> {
                self.0.ok_or(CastFailure)
            }

            #[inline(always)]
            fn to_dynamic(
                src: Source<'_, $ty>,
                _policy: Policy,
                _cleanup: &mut CleanupList,
            ) -> Option<Object> {
                Some(Object::int(narrow::<$ty, i64>(*src.as_ref())?))
            }
        }

        impl Cast for $ty {
            type Caster = IntCaster<$ty>;
        }
        )+
    };
}

impl_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A caster of the primitive floating-point types: `float`.
///
/// Integer objects are accepted only if the
/// [CONVERT](CastFlags::CONVERT) flag is set.
#[derive(Default)]
pub struct FloatCaster<T>(Option<T>);

macro_rules! impl_float {
    ($($ty:ty),+ $(,)?) => {
        $(
        impl TypeCaster for FloatCaster<$ty> {
            type Value = $ty;

            #[inline(always)]
            fn name() -> TypeName {
                TypeName::new("float")
            }

            fn from_dynamic(
                &mut self,
                src: &Object,
                flags: CastFlags,
                _cleanup: &mut CleanupList,
            ) -> CastResult {
                self.0 = None;

                let value = match (src.as_float(), src.as_int()) {
                    (Some(value), _) => narrow::<f64, $ty>(value),
                    (None, Some(value)) if flags.convert() => narrow::<i64, $ty>(value),
                    _ => None,
                };

                self.0 = Some(value.ok_or(CastFailure)?);

                Ok(())
            }

            #[inline(always)]
            fn into_value(self) -> CastResult<$ty> {
                self.0.ok_or(CastFailure)
            }

            #[inline(always)]
            fn to_dynamic(
                src: Source<'_, $ty>,
                _policy: Policy,
                _cleanup: &mut CleanupList,
            ) -> Option<Object> {
                Some(Object::float(narrow::<$ty, f64>(*src.as_ref())?))
            }
        }

        impl Cast for $ty {
            type Caster = FloatCaster<$ty>;
        }
        )+
    };
}

impl_float!(f32, f64);

/// A caster of the [String] type: `str`.
#[derive(Default)]
pub struct StrCaster(Option<String>);

impl TypeCaster for StrCaster {
    type Value = String;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new("str")
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> CastResult {
        self.0 = Some(String::from(src.as_str().ok_or(CastFailure)?));

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<String> {
        self.0.ok_or(CastFailure)
    }

    #[inline(always)]
    fn to_dynamic(
        src: Source<'_, String>,
        _policy: Policy,
        _cleanup: &mut CleanupList,
    ) -> Option<Object> {
        Some(Object::str(src.as_ref().as_str()))
    }
}

impl Cast for String {
    type Caster = StrCaster;
}

#[inline(always)]
fn narrow<S, T>(value: S) -> Option<T>
where
    T: cast::From<S>,
    <T as cast::From<S>>::Output: Narrowed<T>,
{
    <T as cast::From<S>>::cast(value).checked()
}

// The `cast` crate returns either a plain value or a Result depending on
// whether the conversion between the two types is lossless.
trait Narrowed<T> {
    fn checked(self) -> Option<T>;
}

macro_rules! impl_narrowed {
    ($($ty:ty),+ $(,)?) => {
        $(
        impl Narrowed<$ty> for $ty {
            #[inline(always)]
            fn checked(self) -> Option<$ty> {
                Some(self)
            }
        }

        impl Narrowed<$ty> for StdResult<$ty, cast::Error> {
            #[inline(always)]
            fn checked(self) -> Option<$ty> {
                self.ok()
            }
        }
        )+
    };
}

impl_narrowed!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use crate::{
        cast::{load, CastConfig, CastFailure},
        runtime::Object,
    };

    #[test]
    fn test_integer_ranges() {
        assert_eq!(load::<u8>(&Object::int(255)), Ok(255));
        assert_eq!(load::<u8>(&Object::int(256)), Err(CastFailure));
        assert_eq!(load::<u64>(&Object::int(-1)), Err(CastFailure));
        assert_eq!(load::<i16>(&Object::int(-300)), Ok(-300));
        assert_eq!(load::<i64>(&Object::float(1.0)), Err(CastFailure));
        assert_eq!(load::<i64>(&Object::bool(true)), Err(CastFailure));

        assert!(CastConfig::new().dump(u64::MAX).is_none());
        assert_eq!(CastConfig::new().dump(7u16), Some(Object::int(7)));
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(load::<f64>(&Object::float(0.5)), Ok(0.5));
        assert_eq!(load::<f32>(&Object::int(3)), Ok(3.0));
        assert_eq!(CastConfig::strict().load::<f64>(&Object::int(3)), Err(CastFailure));
        assert_eq!(CastConfig::new().dump(1.5f32), Some(Object::float(1.5)));
    }

    #[test]
    fn test_strings_and_booleans() {
        assert_eq!(load::<String>(&Object::str("foo")), Ok(String::from("foo")));
        assert_eq!(load::<String>(&Object::int(1)), Err(CastFailure));
        assert_eq!(load::<bool>(&Object::bool(false)), Ok(false));
        assert_eq!(load::<bool>(&Object::none()), Err(CastFailure));

        assert_eq!(
            CastConfig::new().dump_ref(&String::from("bar")),
            Some(Object::str("bar")),
        );
    }
}
