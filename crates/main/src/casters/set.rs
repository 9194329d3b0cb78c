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

use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
};

use ahash::AHashSet;
use log::trace;

use crate::{
    cast::{decode, Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A native set-like collection that can be decoded from and projected into
/// dynamic sets.
///
/// The trait is implemented for the standard [HashSet] and [BTreeSet], and for
/// the [AHashSet] of the `ahash` crate. The [SetCaster] is the caster of each
/// of them.
pub trait SetContainer: Default {
    /// The type of the set elements.
    type Key: Cast;

    /// Inserts a decoded element. Duplicates collapse according to the
    /// collection's own equality.
    fn insert_key(&mut self, key: Self::Key);

    /// Iterates over the elements by reference.
    fn keys(&self) -> impl Iterator<Item = &Self::Key>;

    /// Consumes the collection and iterates over the elements by value.
    fn into_keys(self) -> impl Iterator<Item = Self::Key>;
}

impl<K, S> SetContainer for HashSet<K, S>
where
    K: Cast + Eq + Hash,
    S: BuildHasher + Default,
{
    type Key = K;

    #[inline(always)]
    fn insert_key(&mut self, key: K) {
        let _ = self.insert(key);
    }

    #[inline(always)]
    fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter()
    }

    #[inline(always)]
    fn into_keys(self) -> impl Iterator<Item = K> {
        self.into_iter()
    }
}

impl<K> SetContainer for BTreeSet<K>
where
    K: Cast + Ord,
{
    type Key = K;

    #[inline(always)]
    fn insert_key(&mut self, key: K) {
        let _ = self.insert(key);
    }

    #[inline(always)]
    fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter()
    }

    #[inline(always)]
    fn into_keys(self) -> impl Iterator<Item = K> {
        self.into_iter()
    }
}

impl<K> SetContainer for AHashSet<K>
where
    K: Cast + Eq + Hash,
{
    type Key = K;

    #[inline(always)]
    fn insert_key(&mut self, key: K) {
        let _ = self.insert(key);
    }

    #[inline(always)]
    fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter()
    }

    #[inline(always)]
    fn into_keys(self) -> impl Iterator<Item = K> {
        self.into_iter()
    }
}

impl<K, S> Cast for HashSet<K, S>
where
    K: Cast + Eq + Hash,
    S: BuildHasher + Default,
{
    type Caster = SetCaster<Self>;
}

impl<K> Cast for BTreeSet<K>
where
    K: Cast + Ord,
{
    type Caster = SetCaster<Self>;
}

impl<K> Cast for AHashSet<K>
where
    K: Cast + Eq + Hash,
{
    type Caster = SetCaster<Self>;
}

type KeyCaster<S> = <<S as SetContainer>::Key as Cast>::Caster;

/// A caster of the native [set-like collections](SetContainer): `Set[K]`.
///
/// Decoding accepts any iterable object: sets, tuples, lists, strings, and
/// custom iterables. Every element is decoded with the caster of the
/// collection's key type, and duplicates collapse in the native collection.
///
/// The element flags are the caller's flags, plus
/// [NONE_DISALLOWED](CastFlags::NONE_DISALLOWED) if the key caster is a
/// class-bound caster of plain values. Pointer keys keep the caller's flags,
/// so the none singleton may decode into null pointers.
///
/// The first element that fails to decode stops the iteration and fails the
/// whole decoding. An iteration error fails it as well, even if it is raised
/// after the last element. A failed decoding never leaves a partially filled
/// collection in the caster.
///
/// Projection creates a new dynamic set and inserts the projected elements
/// into it. If any element fails to project or to insert, the partially
/// built set is discarded and the projection fails.
///
/// ```
/// use std::collections::HashSet;
///
/// use astra_cast::{cast::load, runtime::Object};
///
/// let object = Object::tuple([Object::int(1), Object::int(2), Object::int(2), Object::int(3)]);
///
/// assert_eq!(load::<HashSet<i64>>(&object).unwrap(), HashSet::from([1, 2, 3]));
/// ```
pub struct SetCaster<S> {
    value: Option<S>,
}

impl<S> Default for SetCaster<S> {
    #[inline(always)]
    fn default() -> Self {
        Self { value: None }
    }
}

impl<S: SetContainer> TypeCaster for SetCaster<S> {
    type Value = S;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::generic("Set", [<KeyCaster<S> as TypeCaster>::name()])
    }

    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> CastResult {
        self.value = None;

        let iter = src.iter()?;
        let flags = flags.for_caster::<KeyCaster<S>>();

        let mut collection = S::default();

        for item in iter {
            let item = item?;
            let key = decode::<KeyCaster<S>>(&item, flags, cleanup);

            drop(item);

            collection.insert_key(key?);
        }

        self.value = Some(collection);

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<S> {
        self.value.ok_or(CastFailure)
    }

    fn to_dynamic(src: Source<'_, S>, policy: Policy, cleanup: &mut CleanupList) -> Option<Object> {
        let set = match Object::new_set() {
            Ok(set) => set,

            Err(error) => {
                trace!("Set allocation failed: {error}.");
                return None;
            }
        };

        match src {
            Source::Owned(collection) => {
                for key in collection.into_keys() {
                    let key = <KeyCaster<S> as TypeCaster>::to_dynamic(
                        Source::Owned(key),
                        policy,
                        cleanup,
                    )?;

                    insert(&set, key)?;
                }
            }

            Source::Borrowed(collection) => {
                for key in collection.keys() {
                    let key = <KeyCaster<S> as TypeCaster>::to_dynamic(
                        Source::Borrowed(key),
                        policy,
                        cleanup,
                    )?;

                    insert(&set, key)?;
                }
            }
        }

        Some(set)
    }
}

#[inline(always)]
fn insert(set: &Object, key: Object) -> Option<()> {
    if let Err(error) = set.set_add(&key) {
        trace!("Set projection failed: {error}.");
        return None;
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::{BTreeSet, HashSet},
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use ahash::AHashSet;

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
        casters::{ClassCaster, SetCaster, Variant2},
        runtime::{Class, Object, Ptr, RuntimeError},
    };

    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
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
        static RECEIVED: RefCell<Vec<CastFlags>> = const { RefCell::new(Vec::new()) };
    }

    // Records the flags it receives, and accepts integers only.
    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    struct Probe(i64);

    #[derive(Default)]
    struct ProbeCaster(Option<Probe>);

    impl TypeCaster for ProbeCaster {
        type Value = Probe;

        const IS_CLASS: bool = true;

        fn name() -> TypeName {
            TypeName::new("Probe")
        }

        fn from_dynamic(
            &mut self,
            src: &Object,
            flags: CastFlags,
            _cleanup: &mut CleanupList,
        ) -> CastResult {
            RECEIVED.with_borrow_mut(|received| received.push(flags));

            self.0 = Some(Probe(src.as_int().ok_or(CastFailure)?));

            Ok(())
        }

        fn into_value(self) -> CastResult<Probe> {
            self.0.ok_or(CastFailure)
        }

        fn to_dynamic(
            src: Source<'_, Probe>,
            _policy: Policy,
            _cleanup: &mut CleanupList,
        ) -> Option<Object> {
            Some(Object::int(src.as_ref().0))
        }
    }

    impl Cast for Probe {
        type Caster = ProbeCaster;
    }

    #[test]
    fn test_set_decoding() {
        let object = Object::tuple([Object::int(1), Object::int(2), Object::int(2), Object::int(3)]);

        assert_eq!(load::<HashSet<i64>>(&object), Ok(HashSet::from([1, 2, 3])));
        assert_eq!(load::<BTreeSet<i64>>(&object), Ok(BTreeSet::from([1, 2, 3])));
        assert_eq!(
            load::<AHashSet<i64>>(&object).map(|set| set.len()),
            Ok(3),
        );

        let object = Object::set([Object::str("a"), Object::str("b")]).unwrap();

        assert_eq!(
            load::<BTreeSet<String>>(&object),
            Ok(BTreeSet::from([String::from("a"), String::from("b")])),
        );

        assert_eq!(load::<BTreeSet<String>>(&Object::str("abba")).map(|set| set.len()), Ok(2));
        assert_eq!(load::<HashSet<i64>>(&Object::list([])), Ok(HashSet::new()));
        assert_eq!(load::<HashSet<i64>>(&Object::int(1)), Err(CastFailure));
        assert_eq!(load::<HashSet<i64>>(&Object::none()), Err(CastFailure));
        assert_eq!(
            load::<HashSet<i64>>(&Object::tuple([Object::int(1), Object::str("2")])),
            Err(CastFailure),
        );
    }

    #[test]
    fn test_iteration_errors() {
        let failing = Object::iterable(|| {
            [
                Ok(Object::int(1)),
                Ok(Object::int(2)),
                Err(RuntimeError::raised("exhausted")),
            ]
        });

        assert_eq!(load::<HashSet<i64>>(&failing), Err(CastFailure));

        let immediate = Object::iterable(|| [Err(RuntimeError::raised("broken"))]);

        assert_eq!(load::<HashSet<i64>>(&immediate), Err(CastFailure));

        let mut cleanup = CleanupList::new();
        let mut caster = SetCaster::<HashSet<i64>>::default();

        assert!(caster.from_dynamic(&failing, CastFlags::CONVERT, &mut cleanup).is_err());
        assert!(caster.into_value().is_err());
    }

    #[test]
    fn test_element_release() {
        let items = vec![
            Object::int(1),
            Object::int(2),
            Object::str("three"),
            Object::int(4),
            Object::int(5),
        ];

        let produced = Arc::new(AtomicUsize::new(0));

        let iterable = {
            let items = items.clone();
            let produced = produced.clone();

            Object::iterable(move || {
                let produced = produced.clone();

                items.clone().into_iter().map(move |item| {
                    let _ = produced.fetch_add(1, Ordering::SeqCst);
                    Ok(item)
                })
            })
        };

        assert!(items.iter().all(|item| item.ref_count() == 2));

        let mut cleanup = CleanupList::new();
        let mut caster = SetCaster::<HashSet<i64>>::default();

        assert!(caster.from_dynamic(&iterable, CastFlags::CONVERT, &mut cleanup).is_err());
        assert!(caster.into_value().is_err());

        assert_eq!(produced.load(Ordering::SeqCst), 3);
        assert!(items.iter().all(|item| item.ref_count() == 2));
        assert!(cleanup.is_empty());

        let valid = Object::tuple(items.iter().filter(|item| item.as_int().is_some()).cloned());

        assert_eq!(load::<HashSet<i64>>(&valid), Ok(HashSet::from([1, 2, 4, 5])));
        assert_eq!(items[2].ref_count(), 2);

        drop(valid);

        assert!(items.iter().all(|item| item.ref_count() == 2));
    }

    #[test]
    fn test_element_flags() {
        let object = Object::tuple([Object::int(1), Object::int(2)]);

        RECEIVED.with_borrow_mut(|received| received.clear());

        assert!(CastConfig::strict().load::<HashSet<Probe>>(&object).is_ok());

        RECEIVED.with_borrow_mut(|received| {
            assert_eq!(
                received.as_slice(),
                &[CastFlags::NONE_DISALLOWED, CastFlags::NONE_DISALLOWED],
            );
            received.clear();
        });

        assert!(CastConfig::new().load::<HashSet<Probe>>(&object).is_ok());

        RECEIVED.with_borrow_mut(|received| {
            assert!(received
                .iter()
                .all(|flags| *flags == CastFlags::CONVERT | CastFlags::NONE_DISALLOWED));
        });
    }

    #[test]
    fn test_class_elements() {
        let config = CastConfig::new();

        assert_eq!(config.load::<Tag>(&Object::none()), Ok(Tag(0)));

        let tag = Arc::new(Tag(1));
        let with_none = Object::tuple([Object::instance(tag.clone()), Object::none()]);

        assert_eq!(config.load::<HashSet<Tag>>(&with_none), Err(CastFailure));

        assert_eq!(
            config.load::<HashSet<Tag>>(&Object::tuple([Object::int(1), Object::int(2)])),
            Ok(HashSet::from([Tag(1), Tag(2)])),
        );

        let pointers = config.load::<HashSet<Ptr<Tag>>>(&with_none).unwrap();

        assert_eq!(pointers.len(), 2);
        assert!(pointers.contains(&Ptr::null()));
        assert!(pointers.contains(&Ptr::from(tag)));
    }

    #[test]
    fn test_set_projection() {
        let config = CastConfig::new();

        let native = HashSet::from([String::from("x"), String::from("y")]);

        let object = config.dump_ref(&native).unwrap();

        assert_eq!(object.type_name(), "set");
        assert_eq!(object.len(), Ok(2));
        assert_eq!(config.load::<HashSet<String>>(&object).as_ref(), Ok(&native));

        let object = config.dump(BTreeSet::<i64>::new()).unwrap();

        assert_eq!(object.len(), Ok(0));

        let mut unowned = CastConfig::new();
        unowned.policy = Policy::None;

        assert!(unowned.dump(HashSet::from([Tag(1)])).is_none());
    }

    #[test]
    fn test_projection_rollback() {
        let tag = Arc::new(Tag(1));

        let native = HashSet::from([
            Variant2::V1(Ptr::from(tag.clone())),
            Variant2::V2(BTreeSet::from([1i64, 2])),
        ]);

        assert!(CastConfig::new().dump_ref(&native).is_none());
        assert_eq!(Arc::strong_count(&tag), 2);

        drop(native);

        assert_eq!(Arc::strong_count(&tag), 1);
    }

    #[test]
    fn test_set_names() {
        assert_eq!(<HashSet<i64> as Cast>::Caster::name().as_str(), "Set[int]");
        assert_eq!(<BTreeSet<Tag> as Cast>::Caster::name().as_str(), "Set[Tag]");
        assert_eq!(
            <AHashSet<Variant2<(), String>> as Cast>::Caster::name().as_str(),
            "Set[Union[None, str]]",
        );
    }
}
