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
    any::Any,
    fmt::{Debug, Formatter},
    sync::{Arc, Mutex, MutexGuard, OnceLock},
};

use ahash::AHashMap;
use compact_str::CompactString;

use crate::runtime::{Class, RuntimeError, RuntimeResult};

/// A reference-counting handle to a value of the dynamic runtime.
///
/// The dynamic runtime is the dynamically typed side of the native/dynamic
/// boundary: every value there is an Object of one of a few built-in kinds
/// (none, bool, int, float, str, tuple, list, set, an instance of a
/// registered [Class], or a custom iterable).
///
/// ## Ownership Discipline
///
/// An owned `Object` is a "new reference": whoever holds it owns exactly one
/// reference count of the underlying value. Cloning the handle acquires an
/// additional reference, and dropping it releases the reference. A `&Object`
/// is a "borrowed" handle: the holder does not own a reference and cannot
/// release it.
///
/// The casters of this crate accept sources as `&Object` and return projected
/// values as owned Objects, so the reference counting of the runtime is
/// enforced by Rust's ownership rules.
///
/// ```
/// use astra_cast::runtime::Object;
///
/// let item = Object::int(10);
///
/// assert_eq!(item.ref_count(), 1);
///
/// let tuple = Object::tuple([item.clone()]);
///
/// assert_eq!(item.ref_count(), 2);
///
/// drop(tuple);
///
/// assert_eq!(item.ref_count(), 1);
/// ```
///
/// ## None Singleton
///
/// The [Object::none] constructor always returns a new reference to the
/// same process-wide instance.
///
/// ```
/// use astra_cast::runtime::Object;
///
/// assert!(Object::none().is(&Object::none()));
/// assert!(Object::none().is_none());
/// ```
#[derive(Clone)]
pub struct Object(Arc<Data>);

impl Debug for Object {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self.data() {
            Data::None => formatter.write_str("None"),

            Data::Bool(true) => formatter.write_str("True"),

            Data::Bool(false) => formatter.write_str("False"),

            Data::Int(value) => Debug::fmt(value, formatter),

            Data::Float(value) => Debug::fmt(value, formatter),

            Data::Str(value) => Debug::fmt(value.as_str(), formatter),

            Data::Tuple(items) => {
                let mut debug_tuple = formatter.debug_tuple("");

                for item in items.iter() {
                    let _ = debug_tuple.field(item);
                }

                debug_tuple.finish()
            }

            Data::List(items) => formatter.debug_list().entries(items.iter()).finish(),

            Data::Set(set) => {
                let items = set.snapshot();

                if items.is_empty() {
                    return formatter.write_str("set()");
                }

                formatter.debug_set().entries(items.iter()).finish()
            }

            Data::Instance(instance) => {
                formatter.write_fmt(format_args!("<{} object>", instance.class))
            }

            Data::Iterable(_) => formatter.write_str("<iterable object>"),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        if self.is(other) {
            return true;
        }

        match (self.data(), other.data()) {
            (Data::None, Data::None) => true,

            (Data::Bool(this), Data::Bool(other)) => this == other,

            (Data::Int(this), Data::Int(other)) => this == other,

            (Data::Float(this), Data::Float(other)) => this == other,

            (Data::Str(this), Data::Str(other)) => this == other,

            (Data::Tuple(this), Data::Tuple(other)) | (Data::List(this), Data::List(other)) => {
                this.len() == other.len() && this.iter().zip(other.iter()).all(|(a, b)| a == b)
            }

            (Data::Set(this), Data::Set(other)) => {
                let keys = this.lock().keys().cloned().collect::<Vec<_>>();
                let other = other.lock();

                keys.len() == other.len() && keys.iter().all(|key| other.contains_key(key))
            }

            (Data::Instance(this), Data::Instance(other)) => this.identity() == other.identity(),

            _ => false,
        }
    }
}

impl Object {
    /// Returns a new reference to the none singleton.
    #[inline(always)]
    pub fn none() -> Self {
        static NONE: OnceLock<Object> = OnceLock::new();

        NONE.get_or_init(|| Self(Arc::new(Data::None))).clone()
    }

    /// Creates a boolean object.
    #[inline(always)]
    pub fn bool(value: bool) -> Self {
        Self(Arc::new(Data::Bool(value)))
    }

    /// Creates an integer object.
    #[inline(always)]
    pub fn int(value: i64) -> Self {
        Self(Arc::new(Data::Int(value)))
    }

    /// Creates a floating-point number object.
    #[inline(always)]
    pub fn float(value: f64) -> Self {
        Self(Arc::new(Data::Float(value)))
    }

    /// Creates a Unicode string object.
    #[inline(always)]
    pub fn str(value: impl Into<CompactString>) -> Self {
        Self(Arc::new(Data::Str(value.into())))
    }

    /// Creates an immutable tuple object that takes ownership of the `items`
    /// references.
    #[inline(always)]
    pub fn tuple(items: impl IntoIterator<Item = Object>) -> Self {
        Self(Arc::new(Data::Tuple(items.into_iter().collect())))
    }

    /// Creates a list object that takes ownership of the `items` references.
    ///
    /// Unlike tuples, lists are never hashable.
    #[inline(always)]
    pub fn list(items: impl IntoIterator<Item = Object>) -> Self {
        Self(Arc::new(Data::List(items.into_iter().collect())))
    }

    /// Creates a new empty set object.
    ///
    /// The elements can be added later with [Object::set_add].
    #[inline(always)]
    pub fn new_set() -> RuntimeResult<Self> {
        Ok(Self(Arc::new(Data::Set(SetData(Mutex::new(
            AHashMap::new(),
        ))))))
    }

    /// Creates a set object populated with the `items`.
    ///
    /// Returns [RuntimeError::Unhashable] if any of the items cannot be
    /// hashed.
    pub fn set(items: impl IntoIterator<Item = Object>) -> RuntimeResult<Self> {
        let set = Self::new_set()?;

        for item in items {
            set.set_add(&item)?;
        }

        Ok(set)
    }

    /// Creates an instance object of a registered [Class] that shares the
    /// native allocation with the `value` pointer.
    #[inline(always)]
    pub fn instance<T: Class>(value: Arc<T>) -> Self {
        Self(Arc::new(Data::Instance(Instance {
            class: T::NAME,
            value,
        })))
    }

    /// Creates a custom iterable object.
    ///
    /// Every time the runtime starts a new iteration over this object, it
    /// calls the `factory` function, and the returned iterator produces the
    /// items. An `Err` item models an error raised by the iteration protocol:
    /// the iteration consumer observes it as a failure of the whole iteration.
    ///
    /// ```
    /// use astra_cast::runtime::{Object, RuntimeError};
    ///
    /// let iterable = Object::iterable(|| {
    ///     [Ok(Object::int(1)), Err(RuntimeError::raised("exhausted badly"))]
    /// });
    ///
    /// let mut iter = iterable.iter().unwrap();
    ///
    /// assert_eq!(iter.next().unwrap().unwrap(), Object::int(1));
    /// assert!(iter.next().unwrap().is_err());
    /// assert!(iter.next().is_none());
    /// ```
    pub fn iterable<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = RuntimeResult<Object>>,
        I::IntoIter: Send + 'static,
    {
        let factory = move || -> DynIter { Box::new(factory().into_iter()) };

        Self(Arc::new(Data::Iterable(Generator(Box::new(factory)))))
    }

    /// Returns the name of the object's dynamic type.
    ///
    /// For class instances this is the [Class::NAME] of the instance's class.
    pub fn type_name(&self) -> &'static str {
        match self.data() {
            Data::None => "NoneType",
            Data::Bool(_) => "bool",
            Data::Int(_) => "int",
            Data::Float(_) => "float",
            Data::Str(_) => "str",
            Data::Tuple(_) => "tuple",
            Data::List(_) => "list",
            Data::Set(_) => "set",
            Data::Instance(instance) => instance.class,
            Data::Iterable(_) => "iterable",
        }
    }

    /// Returns true if this object is the none singleton.
    #[inline(always)]
    pub fn is_none(&self) -> bool {
        matches!(self.data(), Data::None)
    }

    /// Returns true if both handles point to the same dynamic value.
    #[inline(always)]
    pub fn is(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the number of live references to the underlying dynamic value.
    #[inline(always)]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Returns the boolean value if the object is a bool.
    #[inline(always)]
    pub fn as_bool(&self) -> Option<bool> {
        match self.data() {
            Data::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer value if the object is an int.
    #[inline(always)]
    pub fn as_int(&self) -> Option<i64> {
        match self.data() {
            Data::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the floating-point value if the object is a float.
    #[inline(always)]
    pub fn as_float(&self) -> Option<f64> {
        match self.data() {
            Data::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string slice if the object is a str.
    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        match self.data() {
            Data::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns a shared pointer to the native value if the object is an
    /// instance of the class `T`.
    pub fn instance_of<T: Class>(&self) -> Option<Arc<T>> {
        match self.data() {
            Data::Instance(instance) => instance.value.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Returns the number of items of a tuple, list, set, or the number of
    /// characters of a str.
    pub fn len(&self) -> RuntimeResult<usize> {
        match self.data() {
            Data::Tuple(items) | Data::List(items) => Ok(items.len()),
            Data::Set(set) => Ok(set.lock().len()),
            Data::Str(string) => Ok(string.chars().count()),
            _ => Err(RuntimeError::TypeMismatch {
                expected: "sized",
                actual: self.type_name(),
            }),
        }
    }

    /// Inserts a new reference to the `item` into this set object.
    ///
    /// If the set already contains an equal item, the set remains unchanged.
    ///
    /// Returns [RuntimeError::TypeMismatch] if this object is not a set, and
    /// [RuntimeError::Unhashable] if the `item` cannot be hashed.
    pub fn set_add(&self, item: &Object) -> RuntimeResult<()> {
        let Data::Set(set) = self.data() else {
            return Err(RuntimeError::TypeMismatch {
                expected: "set",
                actual: self.type_name(),
            });
        };

        let key = item.hash_key()?;

        let _ = set.lock().entry(key).or_insert_with(|| item.clone());

        Ok(())
    }

    /// Returns true if this set object contains an item equal to the `item`.
    pub fn contains(&self, item: &Object) -> RuntimeResult<bool> {
        let Data::Set(set) = self.data() else {
            return Err(RuntimeError::TypeMismatch {
                expected: "set",
                actual: self.type_name(),
            });
        };

        let key = item.hash_key()?;

        Ok(set.lock().contains_key(&key))
    }

    #[inline(always)]
    pub(super) fn data(&self) -> &Data {
        &self.0
    }

    fn hash_key(&self) -> RuntimeResult<HashKey> {
        match self.data() {
            Data::None => Ok(HashKey::None),

            Data::Bool(value) => Ok(HashKey::Bool(*value)),

            Data::Int(value) => Ok(HashKey::Int(*value)),

            // NaN is never equal to another NaN object.
            Data::Float(value) if value.is_nan() => {
                Ok(HashKey::Nan(Arc::as_ptr(&self.0) as usize))
            }

            Data::Float(value) => Ok(HashKey::Float(match value {
                value if *value == 0.0 => 0,
                value => value.to_bits(),
            })),

            Data::Str(value) => Ok(HashKey::Str(value.clone())),

            Data::Tuple(items) => Ok(HashKey::Tuple(
                items
                    .iter()
                    .map(Object::hash_key)
                    .collect::<RuntimeResult<_>>()?,
            )),

            Data::Instance(instance) => Ok(HashKey::Identity(instance.identity())),

            Data::List(_) | Data::Set(_) | Data::Iterable(_) => Err(RuntimeError::Unhashable {
                ty: self.type_name(),
            }),
        }
    }
}

pub(super) type DynIter = Box<dyn Iterator<Item = RuntimeResult<Object>> + Send>;

pub(super) enum Data {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(CompactString),
    Tuple(Box<[Object]>),
    List(Box<[Object]>),
    Set(SetData),
    Instance(Instance),
    Iterable(Generator),
}

pub(super) struct SetData(Mutex<AHashMap<HashKey, Object>>);

impl SetData {
    #[inline(always)]
    pub(super) fn snapshot(&self) -> Vec<Object> {
        self.lock().values().cloned().collect()
    }

    #[inline(always)]
    fn lock(&self) -> MutexGuard<'_, AHashMap<HashKey, Object>> {
        self.0.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

pub(super) struct Instance {
    class: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    #[inline(always)]
    fn identity(&self) -> usize {
        Arc::as_ptr(&self.value) as *const () as usize
    }
}

pub(super) struct Generator(Box<dyn Fn() -> DynIter + Send + Sync>);

impl Generator {
    #[inline(always)]
    pub(super) fn start(&self) -> DynIter {
        (self.0)()
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum HashKey {
    None,
    Bool(bool),
    Int(i64),
    Float(u64),
    Nan(usize),
    Str(CompactString),
    Tuple(Box<[HashKey]>),
    Identity(usize),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::runtime::{Class, Object, RuntimeError};

    #[derive(Clone)]
    struct Point;

    impl Class for Point {
        const NAME: &'static str = "Point";
    }

    #[test]
    fn test_set_deduplication() {
        let set = Object::set([
            Object::int(1),
            Object::int(2),
            Object::int(2),
            Object::str("2"),
            Object::tuple([Object::int(1), Object::none()]),
            Object::tuple([Object::int(1), Object::none()]),
        ])
        .unwrap();

        assert_eq!(set.len().unwrap(), 4);
        assert!(set.contains(&Object::int(2)).unwrap());
        assert!(set.contains(&Object::str("2")).unwrap());
        assert!(!set.contains(&Object::int(3)).unwrap());
    }

    #[test]
    fn test_unhashable_items() {
        let set = Object::new_set().unwrap();

        assert_eq!(
            set.set_add(&Object::list([Object::int(1)])),
            Err(RuntimeError::Unhashable { ty: "list" }),
        );

        assert_eq!(
            set.set_add(&Object::tuple([Object::list([])])),
            Err(RuntimeError::Unhashable { ty: "list" }),
        );

        assert_eq!(set.len().unwrap(), 0);

        assert_eq!(
            Object::int(1).set_add(&Object::int(2)),
            Err(RuntimeError::TypeMismatch {
                expected: "set",
                actual: "int",
            }),
        );
    }

    #[test]
    fn test_nan_items() {
        let first = Object::float(f64::NAN);
        let second = Object::float(f64::NAN);

        assert_ne!(first, second);
        assert_eq!(first, first.clone());

        let set = Object::set([first.clone(), second.clone(), first.clone()]).unwrap();

        assert_eq!(set.len().unwrap(), 2);
        assert!(set.contains(&first).unwrap());
        assert!(!set.contains(&Object::float(f64::NAN)).unwrap());
        assert!(!set.contains(&Object::float(0.0)).unwrap());
    }

    #[test]
    fn test_instance_identity() {
        let point = Arc::new(Point);

        let first = Object::instance(point.clone());
        let second = Object::instance(point.clone());
        let third = Object::instance(Arc::new(Point));

        assert_eq!(first.type_name(), "Point");
        assert!(!first.is(&second));
        assert_eq!(first, second);
        assert_ne!(first, third);

        let set = Object::set([first, second, third]).unwrap();

        assert_eq!(set.len().unwrap(), 2);
    }

    #[test]
    fn test_debug_repr() {
        assert_eq!(format!("{:?}", Object::none()), "None");
        assert_eq!(format!("{:?}", Object::bool(true)), "True");
        assert_eq!(
            format!("{:?}", Object::list([Object::int(1), Object::str("a")])),
            "[1, \"a\"]",
        );
        assert_eq!(format!("{:?}", Object::new_set().unwrap()), "set()");
        assert_eq!(
            format!("{:?}", Object::instance(Arc::new(Point))),
            "<Point object>",
        );
    }
}
