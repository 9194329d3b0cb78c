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

use std::sync::Arc;

use log::trace;

use crate::{
    cast::{Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::{Class, Object, Ptr},
};

/// A class-bound caster of the plain values of a [Class] type.
///
/// Decoding accepts instances of the class, and copies the native value out
/// of the instance. If the [CONVERT](CastFlags::CONVERT) flag is set, other
/// objects are passed to the class's [implicit](Class::implicit) conversion.
///
/// A plain value cannot represent a missing instance. When the
/// [NONE_DISALLOWED](CastFlags::NONE_DISALLOWED) flag is set, the none
/// singleton is rejected before any implicit conversion is tried.
///
/// Projection creates a new instance that owns the native value: owned
/// sources are moved into the instance and borrowed sources are copied.
/// The [Policy::None] policy makes the projection fail.
///
/// This caster is assigned to the type by the [Class derive macro](crate::Class).
pub struct ClassCaster<T> {
    value: Option<T>,
}

impl<T> Default for ClassCaster<T> {
    #[inline(always)]
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Class> TypeCaster for ClassCaster<T> {
    type Value = T;

    const IS_CLASS: bool = true;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new(T::NAME)
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> CastResult {
        self.value = None;

        if src.is_none() && flags.none_disallowed() {
            return Err(CastFailure);
        }

        if let Some(instance) = src.instance_of::<T>() {
            self.value = Some(T::clone(&instance));
            return Ok(());
        }

        if !flags.convert() {
            return Err(CastFailure);
        }

        let Some(value) = T::implicit(src) else {
            trace!(
                "'{}' object is not implicitly convertible to {}.",
                src.type_name(),
                T::NAME,
            );

            return Err(CastFailure);
        };

        self.value = Some(value);

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<T> {
        self.value.ok_or(CastFailure)
    }

    fn to_dynamic(src: Source<'_, T>, policy: Policy, _cleanup: &mut CleanupList) -> Option<Object> {
        if policy == Policy::None {
            trace!("{} value cannot be projected without an owner.", T::NAME);
            return None;
        }

        Some(Object::instance(Arc::new(src.into_owned())))
    }
}

/// A class-bound pointer caster of the [Ptr] type.
///
/// Decoding an instance of the class shares the instance's native allocation.
/// The none singleton decodes into a [null](Ptr::null) pointer unless the
/// [NONE_DISALLOWED](CastFlags::NONE_DISALLOWED) flag is set.
///
/// If the [CONVERT](CastFlags::CONVERT) flag is set, other objects are passed
/// to the class's [implicit](Class::implicit) conversion. The instance
/// created by the conversion is registered in the [CleanupList], so it stays
/// alive until the outermost conversion completes.
///
/// Projection of a null pointer produces the none singleton. Otherwise the
/// new instance shares the pointer's allocation, except under the
/// [Policy::Copy] policy that copies the pointed value. The [Policy::None]
/// policy makes the projection of a non-null pointer fail.
///
/// ```
/// use astra_cast::{
///     cast::CastConfig,
///     runtime::{Object, Ptr},
///     Class,
/// };
///
/// #[derive(Class, Clone, Debug)]
/// struct Counter(usize);
///
/// let config = CastConfig::new();
///
/// let counter = Ptr::new(Counter(10));
/// let object = config.dump_ref(&counter).unwrap();
///
/// assert_eq!(config.load::<Ptr<Counter>>(&object).unwrap(), counter);
/// assert!(config.load::<Ptr<Counter>>(&Object::none()).unwrap().is_null());
/// ```
pub struct PtrCaster<T> {
    value: Option<Ptr<T>>,
}

impl<T> Default for PtrCaster<T> {
    #[inline(always)]
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T: Class> TypeCaster for PtrCaster<T> {
    type Value = Ptr<T>;

    const IS_CLASS: bool = true;

    const IS_POINTER: bool = true;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new(T::NAME)
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> CastResult {
        self.value = None;

        if src.is_none() {
            if flags.none_disallowed() {
                return Err(CastFailure);
            }

            self.value = Some(Ptr::null());
            return Ok(());
        }

        if let Some(instance) = src.instance_of::<T>() {
            self.value = Some(Ptr::from(instance));
            return Ok(());
        }

        if !flags.convert() {
            return Err(CastFailure);
        }

        let Some(value) = T::implicit(src) else {
            return Err(CastFailure);
        };

        let value = Arc::new(value);

        cleanup.push(Object::instance(value.clone()));

        self.value = Some(Ptr::from(value));

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<Ptr<T>> {
        self.value.ok_or(CastFailure)
    }

    fn to_dynamic(
        src: Source<'_, Ptr<T>>,
        policy: Policy,
        _cleanup: &mut CleanupList,
    ) -> Option<Object> {
        let Some(value) = src.as_ref().as_arc() else {
            return Some(Object::none());
        };

        match policy {
            Policy::None => {
                trace!("{} pointer cannot be projected without an owner.", T::NAME);
                None
            }

            Policy::Copy => Some(Object::instance(Arc::new(T::clone(value.as_ref())))),

            _ => Some(Object::instance(value.clone())),
        }
    }
}

impl<T: Class> Cast for Ptr<T> {
    type Caster = PtrCaster<T>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        cast::{CastConfig, CastFailure, CastFlags, CleanupList, Policy, TypeCaster},
        casters::{ClassCaster, PtrCaster},
        runtime::{Class, Object, Ptr},
    };

    #[derive(Clone, Debug, PartialEq)]
    struct Meters(i64);

    impl Class for Meters {
        const NAME: &'static str = "Meters";

        fn implicit(src: &Object) -> Option<Self> {
            match src.is_none() {
                true => Some(Self(0)),
                false => src.as_int().map(Self),
            }
        }
    }

    impl crate::cast::Cast for Meters {
        type Caster = ClassCaster<Self>;
    }

    #[test]
    fn test_class_values() {
        let config = CastConfig::new();

        let object = config.dump(Meters(3)).unwrap();

        assert_eq!(object.type_name(), "Meters");
        assert_eq!(config.load::<Meters>(&object), Ok(Meters(3)));
        assert_eq!(config.load::<Meters>(&Object::int(7)), Ok(Meters(7)));
        assert_eq!(config.load::<Meters>(&Object::none()), Ok(Meters(0)));
        assert_eq!(config.load::<Meters>(&Object::str("7")), Err(CastFailure));

        assert_eq!(
            CastConfig::strict().load::<Meters>(&Object::int(7)),
            Err(CastFailure),
        );

        let mut cleanup = CleanupList::new();
        let mut caster = ClassCaster::<Meters>::default();

        assert!(caster
            .from_dynamic(
                &Object::none(),
                CastFlags::CONVERT | CastFlags::NONE_DISALLOWED,
                &mut cleanup,
            )
            .is_err());
        assert!(caster.into_value().is_err());

        let mut config = CastConfig::new();
        config.policy = Policy::None;

        assert!(config.dump(Meters(1)).is_none());
    }

    #[test]
    fn test_class_pointers() {
        let config = CastConfig::new();

        let value = Arc::new(Meters(5));
        let object = Object::instance(value.clone());

        let ptr = config.load::<Ptr<Meters>>(&object).unwrap();

        assert!(Arc::ptr_eq(ptr.as_arc().unwrap(), &value));
        assert!(config.load::<Ptr<Meters>>(&Object::none()).unwrap().is_null());

        let shared = config.dump_ref(&ptr).unwrap();

        assert_eq!(shared, object);
        assert!(config.dump(Ptr::<Meters>::null()).unwrap().is_none());

        let mut copy = CastConfig::new();
        copy.policy = Policy::Copy;

        let copied = copy.dump_ref(&ptr).unwrap();

        assert_ne!(copied, object);
        assert_eq!(copy.load::<Meters>(&copied), Ok(Meters(5)));

        let mut cleanup = CleanupList::new();
        let mut caster = PtrCaster::<Meters>::default();

        assert!(caster
            .from_dynamic(&Object::none(), CastFlags::NONE_DISALLOWED, &mut cleanup)
            .is_err());
    }

    #[test]
    fn test_implicit_pointer_lifetime() {
        let mut cleanup = CleanupList::new();
        let mut caster = PtrCaster::<Meters>::default();

        caster
            .from_dynamic(&Object::int(9), CastFlags::CONVERT, &mut cleanup)
            .unwrap();

        let ptr = caster.into_value().unwrap();

        assert_eq!(ptr.get(), Some(&Meters(9)));
        assert_eq!(cleanup.len(), 1);
        assert_eq!(Arc::strong_count(ptr.as_arc().unwrap()), 2);
        assert_eq!(cleanup.release(), 1);
        assert_eq!(Arc::strong_count(ptr.as_arc().unwrap()), 1);
    }
}
