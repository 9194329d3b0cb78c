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
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    ops::Deref,
    sync::Arc,
};

use crate::runtime::Object;

/// A native Rust type bound to a dynamic runtime class.
///
/// Instances of a bound class are dynamic [Objects](Object) that wrap the
/// native value, and the casters of such types preserve the native identity
/// instead of performing a value conversion. In other words, their casters
/// are "class-bound" casters (see
/// [TypeCaster::IS_CLASS](crate::cast::TypeCaster::IS_CLASS)).
///
/// Typically, you implement this trait using the
/// [Class derive macro](crate::Class), which also assigns the
/// [ClassCaster](crate::casters::ClassCaster) to the type.
///
/// ```
/// use astra_cast::{cast::CastConfig, runtime::Object, Class};
///
/// #[derive(Class, Clone, Debug, PartialEq)]
/// #[class(name = "Vector")]
/// struct Vector {
///     x: f32,
///     y: f32,
/// }
///
/// let object = CastConfig::new().dump(Vector { x: 1.0, y: 2.0 }).unwrap();
///
/// assert_eq!(object.type_name(), "Vector");
///
/// assert_eq!(
///     CastConfig::new().load::<Vector>(&object).unwrap(),
///     Vector { x: 1.0, y: 2.0 },
/// );
/// ```
pub trait Class: Clone + Send + Sync + 'static {
    /// The name of the class in the dynamic runtime.
    ///
    /// This name is used as the class instance [type name](Object::type_name)
    /// and as the caster's [display name](crate::cast::TypeName).
    const NAME: &'static str;

    /// An implicit conversion of an arbitrary dynamic object into an instance
    /// of this class.
    ///
    /// The class casters try this function only when the
    /// [CONVERT](crate::cast::CastFlags::CONVERT) flag is set and the source
    /// object is not an instance of this class already.
    ///
    /// The default implementation does not support implicit conversions.
    #[inline(always)]
    fn implicit(_src: &Object) -> Option<Self> {
        None
    }
}

/// A nullable shared pointer to a native value of a bound [Class].
///
/// This is the native counterpart of a dynamic reference to a class instance:
/// decoding a class instance into a Ptr shares the instance's native
/// allocation instead of copying the value out of it, and projecting a Ptr
/// back into the dynamic runtime creates an instance object around the same
/// allocation.
///
/// Unlike plain class values, a Ptr can be null. By default, the none
/// singleton decodes into a null Ptr, unless the
/// [NONE_DISALLOWED](crate::cast::CastFlags::NONE_DISALLOWED) flag is set.
///
/// The [PartialEq] and [Hash] implementations of Ptr compare pointer
/// identities, not the pointed values.
pub struct Ptr<T>(Option<Arc<T>>);

impl<T> Clone for Ptr<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Ptr<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Debug> Debug for Ptr<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => formatter.debug_tuple("Ptr").field(value.deref()).finish(),
            None => formatter.write_str("Ptr(null)"),
        }
    }
}

impl<T> PartialEq for Ptr<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl<T> Eq for Ptr<T> {}

impl<T> Hash for Ptr<T> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state)
    }
}

impl<T> From<Arc<T>> for Ptr<T> {
    #[inline(always)]
    fn from(value: Arc<T>) -> Self {
        Self(Some(value))
    }
}

impl<T> Ptr<T> {
    /// Allocates the `value` and returns a pointer to it.
    #[inline(always)]
    pub fn new(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    /// Returns a null pointer.
    #[inline(always)]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Returns true if the pointer is null.
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Dereferences the pointer, or returns None if it is null.
    #[inline(always)]
    pub fn get(&self) -> Option<&T> {
        self.0.as_deref()
    }

    /// Returns the underlying shared allocation, or None if the pointer is
    /// null.
    #[inline(always)]
    pub fn as_arc(&self) -> Option<&Arc<T>> {
        self.0.as_ref()
    }

    #[inline(always)]
    fn address(&self) -> usize {
        match &self.0 {
            Some(value) => Arc::as_ptr(value) as usize,
            None => 0,
        }
    }
}
