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

use std::marker::PhantomData;

use crate::{
    cast::{CastFlags, CastResult, CleanupList, TypeCaster},
    runtime::Object,
};

/// Decodes the `src` object with a fresh instance of the caster `C`.
///
/// The `flags` are passed to the caster as they are. Composite casters
/// usually derive them from their own flags with
/// [CastFlags::for_caster] first.
///
/// ```
/// use astra_cast::{
///     cast::{decode, CastFlags, CleanupList},
///     casters::StrCaster,
///     runtime::Object,
/// };
///
/// let mut cleanup = CleanupList::new();
///
/// assert_eq!(
///     decode::<StrCaster>(&Object::str("foo"), CastFlags::EMPTY, &mut cleanup).unwrap(),
///     "foo",
/// );
/// ```
#[inline]
pub fn decode<C: TypeCaster>(
    src: &Object,
    flags: CastFlags,
    cleanup: &mut CleanupList,
) -> CastResult<C::Value> {
    let mut caster = C::default();

    caster.from_dynamic(src, flags, cleanup)?;

    caster.into_value()
}

/// Attempts to decode the `src` object into one alternative of a sum type.
///
/// The function derives the alternative's own flags from the caller's
/// `flags` (see [CastFlags::for_caster]) and decodes the object with a fresh
/// caster `C`. It returns None if the alternative does not accept the object,
/// so the caller can try the next alternative.
///
/// A pointer alternative must be handled by a class-bound caster: if `C` has
/// [IS_POINTER](TypeCaster::IS_POINTER) set but not
/// [IS_CLASS](TypeCaster::IS_CLASS), the program does not compile.
///
/// ```compile_fail
/// use astra_cast::{
///     cast::{try_alternative, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
///     runtime::Object,
/// };
///
/// #[derive(Default)]
/// struct AddressCaster(Option<usize>);
///
/// impl TypeCaster for AddressCaster {
///     type Value = usize;
///
///     const IS_POINTER: bool = true;
///
///     fn name() -> TypeName {
///         TypeName::new("address")
///     }
///
///     fn from_dynamic(&mut self, _: &Object, _: CastFlags, _: &mut CleanupList) -> CastResult {
///         Ok(())
///     }
///
///     fn into_value(self) -> CastResult<usize> {
///         Ok(0)
///     }
///
///     fn to_dynamic(_: Source<'_, usize>, _: Policy, _: &mut CleanupList) -> Option<Object> {
///         None
///     }
/// }
///
/// let mut cleanup = CleanupList::new();
///
/// // A custom caster intercepting a pointer type is a configuration error.
/// let _ = try_alternative::<AddressCaster>(&Object::none(), CastFlags::EMPTY, &mut cleanup);
/// ```
#[inline]
pub fn try_alternative<C: TypeCaster>(
    src: &Object,
    flags: CastFlags,
    cleanup: &mut CleanupList,
) -> Option<C::Value> {
    #[allow(clippy::let_unit_value)]
    let () = AlternativeCheck::<C>::VALID;

    decode::<C>(src, flags.for_caster::<C>(), cleanup).ok()
}

struct AlternativeCheck<C>(PhantomData<C>);

impl<C: TypeCaster> AlternativeCheck<C> {
    const VALID: () = assert!(
        !C::IS_POINTER || C::IS_CLASS,
        "A pointer alternative of a sum type requires a class-bound caster. \
        A custom caster intercepting a pointer type is not allowed.",
    );
}
