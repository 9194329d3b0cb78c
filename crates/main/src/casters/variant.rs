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
    cast::{try_alternative, Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A sum type with an ordered list of alternatives, each represented by a
/// native type with its own caster.
///
/// The [VariantCaster] delegates to this trait. You don't need to implement
/// it manually: the [Variant2] - [Variant8] enums implement it for generic
/// alternatives, and the [Variant derive macro](crate::Variant) implements it
/// for your own enums.
pub trait Alternatives: Sized {
    /// The display name of the sum type: `Union[A, B, ...]`.
    fn name() -> TypeName;

    /// Tries the alternatives against the `src` object in declaration order,
    /// and returns the first one that accepts it.
    ///
    /// Each alternative should be tried with the [try_alternative] function,
    /// which derives the alternative's own flags from the `flags` argument.
    fn load(src: &Object, flags: CastFlags, cleanup: &mut CleanupList) -> CastResult<Self>;

    /// Projects the active alternative with its own caster.
    fn dump(src: Source<'_, Self>, policy: Policy, cleanup: &mut CleanupList) -> Option<Object>;
}

/// A caster of the [sum types](Alternatives): `Union[A, B, ...]`.
///
/// Decoding tries every alternative in declaration order, and stops at the
/// first alternative that accepts the object. The alternatives that are
/// class-bound casters of plain values receive the caller's flags plus
/// [NONE_DISALLOWED](CastFlags::NONE_DISALLOWED). Other alternatives receive
/// the caller's flags unchanged.
///
/// In particular, a unit alternative `()` placed before a class alternative
/// is the only way for the sum type to accept the none singleton:
///
/// ```
/// use astra_cast::{
///     cast::{load, Cast, TypeCaster},
///     casters::Variant3,
///     runtime::Object,
/// };
///
/// type Value = Variant3<(), i64, String>;
///
/// assert_eq!(<Value as Cast>::Caster::name().as_str(), "Union[None, int, str]");
///
/// assert_eq!(load::<Value>(&Object::none()).unwrap(), Variant3::V1(()));
/// assert_eq!(load::<Value>(&Object::int(42)).unwrap(), Variant3::V2(42));
/// assert_eq!(load::<Value>(&Object::str("x")).unwrap(), Variant3::V3(String::from("x")));
/// assert!(load::<Value>(&Object::float(1.0)).is_err());
/// ```
///
/// Projection forwards the active alternative, the ownership policy, and the
/// cleanup list to the alternative's caster.
pub struct VariantCaster<U> {
    value: Option<U>,
}

impl<U> Default for VariantCaster<U> {
    #[inline(always)]
    fn default() -> Self {
        Self { value: None }
    }
}

impl<U: Alternatives> TypeCaster for VariantCaster<U> {
    type Value = U;

    #[inline(always)]
    fn name() -> TypeName {
        U::name()
    }

    #[inline]
    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> CastResult {
        self.value = None;
        self.value = Some(U::load(src, flags, cleanup)?);

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<U> {
        self.value.ok_or(CastFailure)
    }

    #[inline(always)]
    fn to_dynamic(src: Source<'_, U>, policy: Policy, cleanup: &mut CleanupList) -> Option<Object> {
        U::dump(src, policy, cleanup)
    }
}

macro_rules! impl_variant {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($param:ident)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub enum $name<$($param),+> {
            $(
            $variant($param),
            )+
        }

        impl<$($param: Cast),+> Cast for $name<$($param),+> {
            type Caster = VariantCaster<Self>;
        }

        impl<$($param: Cast),+> Alternatives for $name<$($param),+> {
            #[inline(always)]
            fn name() -> TypeName {
                TypeName::union([$(<<$param as Cast>::Caster as TypeCaster>::name()),+])
            }

            fn load(src: &Object, flags: CastFlags, cleanup: &mut CleanupList) -> CastResult<Self> {
                $(
                if let Some(value) = try_alternative::<<$param as Cast>::Caster>(src, flags, cleanup) {
                    return Ok(Self::$variant(value));
                }
                )+

                Err(CastFailure)
            }

            fn dump(src: Source<'_, Self>, policy: Policy, cleanup: &mut CleanupList) -> Option<Object> {
                match src {
                    $(
                    Source::Owned(Self::$variant(value)) => {
                        <<$param as Cast>::Caster as TypeCaster>::to_dynamic(
                            Source::Owned(value),
                            policy,
                            cleanup,
                        )
                    }
                    )+

                    $(
                    Source::Borrowed(Self::$variant(value)) => {
                        <<$param as Cast>::Caster as TypeCaster>::to_dynamic(
                            Source::Borrowed(value),
                            policy,
                            cleanup,
                        )
                    }
                    )+
                }
            }
        }
    };
}

impl_variant!(
    /// A sum type of two alternatives.
    Variant2 { V1(T1), V2(T2) }
);

impl_variant!(
    /// A sum type of three alternatives.
    Variant3 { V1(T1), V2(T2), V3(T3) }
);

impl_variant!(
    /// A sum type of four alternatives.
    Variant4 { V1(T1), V2(T2), V3(T3), V4(T4) }
);

impl_variant!(
    /// A sum type of five alternatives.
    Variant5 { V1(T1), V2(T2), V3(T3), V4(T4), V5(T5) }
);

impl_variant!(
    /// A sum type of six alternatives.
    Variant6 { V1(T1), V2(T2), V3(T3), V4(T4), V5(T5), V6(T6) }
);

impl_variant!(
    /// A sum type of seven alternatives.
    Variant7 { V1(T1), V2(T2), V3(T3), V4(T4), V5(T5), V6(T6), V7(T7) }
);

impl_variant!(
    /// A sum type of eight alternatives.
    Variant8 { V1(T1), V2(T2), V3(T3), V4(T4), V5(T5), V6(T6), V7(T7), V8(T8) }
);

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::BTreeSet, sync::Arc};

    use crate::{
        cast::{
            load,
            Cast,
            CastConfig,
            CastFailure,
            CastFlags,
            CastResult,
            CleanupList,
            Policy,
            Source,
            TypeCaster,
            TypeName,
        },
        casters::{ClassCaster, Variant2, Variant3, Variant4, VariantCaster},
        runtime::{Class, Object, Ptr},
        Variant,
    };

    #[derive(Clone, PartialEq, Debug)]
    struct Tag(i64);

    impl Class for Tag {
        const NAME: &'static str = "Tag";

        fn implicit(src: &Object) -> Option<Self> {
            match src.is_none() {
                true => Some(Self(0)),
                false => src.as_int().map(Self),
            }
        }
    }

    impl Cast for Tag {
        type Caster = ClassCaster<Self>;
    }

    thread_local! {
        static ATTEMPTS: Cell<usize> = const { Cell::new(0) };
    }

    // Accepts any object, and counts the attempts.
    #[derive(Clone, PartialEq, Debug)]
    struct Any;

    #[derive(Default)]
    struct AnyCaster(bool);

    impl TypeCaster for AnyCaster {
        type Value = Any;

        fn name() -> TypeName {
            TypeName::new("Any")
        }

        fn from_dynamic(
            &mut self,
            _src: &Object,
            _flags: CastFlags,
            _cleanup: &mut CleanupList,
        ) -> CastResult {
            ATTEMPTS.set(ATTEMPTS.get() + 1);
            self.0 = true;

            Ok(())
        }

        fn into_value(self) -> CastResult<Any> {
            match self.0 {
                true => Ok(Any),
                false => Err(CastFailure),
            }
        }

        fn to_dynamic(
            _src: Source<'_, Any>,
            _policy: Policy,
            _cleanup: &mut CleanupList,
        ) -> Option<Object> {
            Some(Object::str("any"))
        }
    }

    impl Cast for Any {
        type Caster = AnyCaster;
    }

    #[derive(Variant, Clone, PartialEq, Debug)]
    enum Shape {
        Empty,
        Count(i64),
        Label(String),
        Tags(BTreeSet<i64>),
    }

    #[test]
    fn test_none_or_int() {
        type Value = Variant2<(), i64>;

        assert_eq!(load::<Value>(&Object::none()), Ok(Variant2::V1(())));
        assert_eq!(load::<Value>(&Object::int(42)), Ok(Variant2::V2(42)));
        assert_eq!(load::<Value>(&Object::str("42")), Err(CastFailure));

        let config = CastConfig::new();

        assert!(config.dump(Value::V1(())).unwrap().is(&Object::none()));
        assert_eq!(config.dump_ref(&Value::V2(42)), Some(Object::int(42)));
        assert_eq!(<Value as Cast>::Caster::name().as_str(), "Union[None, int]");
    }

    #[test]
    fn test_short_circuit() {
        type Value = Variant3<(), Any, i64>;

        ATTEMPTS.set(0);

        assert_eq!(load::<Value>(&Object::none()), Ok(Variant3::V1(())));
        assert_eq!(ATTEMPTS.get(), 0);

        assert_eq!(load::<Value>(&Object::int(5)), Ok(Variant3::V2(Any)));
        assert_eq!(ATTEMPTS.get(), 1);
    }

    #[test]
    fn test_declaration_order() {
        assert_eq!(load::<Variant2<f64, i64>>(&Object::int(3)), Ok(Variant2::V1(3.0)));
        assert_eq!(load::<Variant2<i64, f64>>(&Object::int(3)), Ok(Variant2::V1(3)));

        assert_eq!(
            CastConfig::strict().load::<Variant2<f64, i64>>(&Object::int(3)),
            Ok(Variant2::V2(3)),
        );
    }

    #[test]
    fn test_alternative_flags() {
        type Value = Variant2<Tag, Ptr<Tag>>;

        let config = CastConfig::new();

        assert_eq!(config.load::<Tag>(&Object::none()), Ok(Tag(0)));
        assert_eq!(config.load::<Value>(&Object::none()), Ok(Variant2::V2(Ptr::null())));
        assert_eq!(config.load::<Value>(&Object::int(8)), Ok(Variant2::V1(Tag(8))));

        let tag = Arc::new(Tag(2));
        let object = Object::instance(tag.clone());

        assert_eq!(config.load::<Value>(&object), Ok(Variant2::V1(Tag(2))));
        assert_eq!(
            config.load::<Variant2<Ptr<Tag>, Tag>>(&object),
            Ok(Variant2::V1(Ptr::from(tag))),
        );

        let mut cleanup = CleanupList::new();
        let mut caster = VariantCaster::<Variant2<(), Tag>>::default();

        assert!(caster
            .from_dynamic(&Object::str("tag"), CastFlags::CONVERT, &mut cleanup)
            .is_err());
        assert!(caster.into_value().is_err());
    }

    #[test]
    fn test_projection_policy() {
        let mut config = CastConfig::new();

        let owned = config.dump(Variant4::<bool, i64, Tag, String>::V3(Tag(1))).unwrap();

        assert_eq!(owned.type_name(), "Tag");

        let borrowed = config
            .dump_ref(&Variant4::<bool, i64, Tag, String>::V4(String::from("s")))
            .unwrap();

        assert_eq!(borrowed, Object::str("s"));

        config.policy = Policy::None;

        assert!(config.dump(Variant2::<i64, Tag>::V2(Tag(1))).is_none());
        assert_eq!(config.dump(Variant2::<i64, Tag>::V1(1)), Some(Object::int(1)));
    }

    #[test]
    fn test_derived_variant() {
        assert_eq!(
            <Shape as Cast>::Caster::name().as_str(),
            "Union[None, int, str, Set[int]]",
        );

        assert_eq!(load::<Shape>(&Object::none()), Ok(Shape::Empty));
        assert_eq!(load::<Shape>(&Object::int(3)), Ok(Shape::Count(3)));
        assert_eq!(load::<Shape>(&Object::str("a")), Ok(Shape::Label(String::from("a"))));
        assert_eq!(
            load::<Shape>(&Object::list([Object::int(1), Object::int(1)])),
            Ok(Shape::Tags(BTreeSet::from([1]))),
        );
        assert_eq!(load::<Shape>(&Object::float(0.5)), Err(CastFailure));

        let config = CastConfig::new();

        assert!(config.dump(Shape::Empty).unwrap().is_none());
        assert_eq!(config.dump_ref(&Shape::Count(7)), Some(Object::int(7)));

        let tags = config.dump(Shape::Tags(BTreeSet::from([1, 2]))).unwrap();

        assert_eq!(load::<Shape>(&tags), Ok(Shape::Tags(BTreeSet::from([1, 2]))));
    }
}
