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
    error::Error as StdError,
    fmt::{Display, Formatter},
    result::Result as StdResult,
};

use log::trace;

use crate::{
    cast::{CastFlags, CleanupList, TypeName},
    runtime::{Object, RuntimeError},
};

/// A result of a decoding operation: either a value or a [CastFailure].
pub type CastResult<T = ()> = StdResult<T, CastFailure>;

/// A plain indication that a dynamic object could not be decoded into the
/// requested native type.
///
/// The failure deliberately carries no reason: composite casters only need to
/// know whether to try the next alternative or to give up. Runtime errors that
/// occur during decoding are normalized into this object through the
/// `From<RuntimeError>` implementation, which reports the discarded error
/// through the `log` facade on the trace level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct CastFailure;

impl Display for CastFailure {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("could not convert")
    }
}

impl StdError for CastFailure {}

impl From<RuntimeError> for CastFailure {
    #[inline]
    fn from(error: RuntimeError) -> Self {
        trace!("Runtime error suppressed during decoding: {error}.");

        Self
    }
}

/// An ownership policy of the projected dynamic objects.
///
/// When a native value is projected into a new dynamic object, the policy
/// describes how the object relates to the native value. The policy is
/// forwarded through composite casters unchanged and is consumed by the
/// casters of [class](crate::runtime::Class) types. Casters of plain values
/// (numbers, strings, etc.) always create independent dynamic values.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[non_exhaustive]
pub enum Policy {
    /// Moves owned values into new instances, and copies borrowed values.
    /// Shared pointers are referenced.
    #[default]
    Automatic,

    /// Always creates a new instance holding a copy of the native value.
    Copy,

    /// Moves the native value into a new instance. Borrowed values cannot be
    /// moved out and are copied instead.
    Move,

    /// Creates an instance that refers to the existing native allocation.
    /// Values without a shared allocation are copied.
    Reference,

    /// Refuses to create new instances. Projection of class values fails
    /// under this policy.
    None,
}

/// A native value passed into [TypeCaster::to_dynamic].
///
/// The variant records whether the value is passed by move or by reference,
/// so that the caster can decide whether it may take ownership of the
/// value's storage. Composite casters preserve the variant when they forward
/// their elements to the element casters.
pub enum Source<'a, T> {
    /// The value is passed by move.
    Owned(T),

    /// The value is passed by reference.
    Borrowed(&'a T),
}

impl<'a, T> AsRef<T> for Source<'a, T> {
    #[inline(always)]
    fn as_ref(&self) -> &T {
        match self {
            Self::Owned(value) => value,
            Self::Borrowed(value) => value,
        }
    }
}

impl<'a, T: Clone> Source<'a, T> {
    /// Returns the owned value, cloning it if the Source is `Borrowed`.
    #[inline(always)]
    pub fn into_owned(self) -> T {
        match self {
            Self::Owned(value) => value,
            Self::Borrowed(value) => value.clone(),
        }
    }
}

/// A bidirectional converter between a native Rust type and dynamic
/// [Objects](Object).
///
/// A caster is a short-lived, stack-allocated object. The caller constructs
/// it right before a decoding attempt using the [Default] constructor, calls
/// [from_dynamic](Self::from_dynamic), and then extracts the decoded value
/// with [into_value](Self::into_value). The reverse direction,
/// [to_dynamic](Self::to_dynamic), does not need a caster instance.
///
/// Every native type that participates in conversions is mapped to its caster
/// through the [Cast] trait. Composite casters (such as the
/// [SetCaster](crate::casters::SetCaster) and the
/// [VariantCaster](crate::casters::VariantCaster)) are written generically
/// against this trait and delegate to the casters of their element types.
///
/// ```
/// use astra_cast::{
///     cast::{CastFlags, CleanupList, TypeCaster},
///     casters::IntCaster,
///     runtime::Object,
/// };
///
/// let mut cleanup = CleanupList::new();
/// let mut caster = IntCaster::<u8>::default();
///
/// assert!(caster
///     .from_dynamic(&Object::int(1000), CastFlags::EMPTY, &mut cleanup)
///     .is_err());
///
/// let mut caster = IntCaster::<u8>::default();
///
/// caster
///     .from_dynamic(&Object::int(100), CastFlags::EMPTY, &mut cleanup)
///     .unwrap();
///
/// assert_eq!(caster.into_value().unwrap(), 100);
/// ```
pub trait TypeCaster: Default + Sized {
    /// The native type this caster converts.
    type Value;

    /// True if this caster is a class-bound caster, which preserves native
    /// class identity (the value lives inside a dynamic class instance)
    /// instead of performing a custom value conversion.
    const IS_CLASS: bool = false;

    /// True if the native [Value](Self::Value) is a nullable pointer type.
    const IS_POINTER: bool = false;

    /// Returns the display name of the native type.
    ///
    /// This function is pure: its result depends on the caster's static type
    /// parameters only.
    fn name() -> TypeName;

    /// Attempts to decode the `src` object into the native value held by this
    /// caster.
    ///
    /// On failure, the caster does not hold a value that could be trusted, and
    /// the function does not propagate errors of the dynamic runtime: they are
    /// converted into a plain [CastFailure].
    ///
    /// The `cleanup` list belongs to the outermost caller of the conversion
    /// chain. The caster may only append objects to it.
    fn from_dynamic(
        &mut self,
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> CastResult;

    /// Extracts the value decoded by a successful
    /// [from_dynamic](Self::from_dynamic) call.
    ///
    /// Returns a [CastFailure] if the caster does not hold a value.
    fn into_value(self) -> CastResult<Self::Value>;

    /// Projects a native value into a new dynamic object.
    ///
    /// Returns None (an invalid handle) if the projection fails. In this case,
    /// all intermediate dynamic objects have already been released.
    fn to_dynamic(
        src: Source<'_, Self::Value>,
        policy: Policy,
        cleanup: &mut CleanupList,
    ) -> Option<Object>;
}

/// A mapping from a native Rust type to its [TypeCaster].
///
/// ```
/// use std::collections::HashSet;
///
/// use astra_cast::cast::{Cast, TypeCaster};
///
/// assert_eq!(<HashSet<String> as Cast>::Caster::name().as_str(), "Set[str]");
/// ```
pub trait Cast: Sized {
    /// The caster of this type.
    type Caster: TypeCaster<Value = Self>;
}
