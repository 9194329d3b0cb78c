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
    ops::{BitOr, BitOrAssign},
};

use crate::cast::TypeCaster;

/// A set of conversion policies passed into every
/// [TypeCaster::from_dynamic] call.
///
/// The flags are an immutable value: a composite caster never changes the
/// flags it received. Instead, it derives the flags for each of its element
/// casters with [CastFlags::for_caster], which is a pure function of the
/// parent flags and the element caster's static properties.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastFlags(u8);

impl Debug for CastFlags {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug_set = formatter.debug_set();

        if self.contains(Self::CONVERT) {
            let _ = debug_set.entry(&"CONVERT");
        }

        if self.contains(Self::NONE_DISALLOWED) {
            let _ = debug_set.entry(&"NONE_DISALLOWED");
        }

        debug_set.finish()
    }
}

impl BitOr for CastFlags {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for CastFlags {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl CastFlags {
    /// No flags set.
    pub const EMPTY: Self = Self(0);

    /// Allows casters to perform implicit conversions, such as turning an int
    /// into a float, or constructing a class instance through
    /// [Class::implicit](crate::runtime::Class::implicit).
    pub const CONVERT: Self = Self(1 << 0);

    /// Requires the caster to reject the none singleton rather than decoding
    /// it into a null or default value.
    pub const NONE_DISALLOWED: Self = Self(1 << 1);

    /// Returns true if all flags of `other` are set in `self`.
    #[inline(always)]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns a union of both flag sets.
    #[inline(always)]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns a copy of `self` without the flags of `other`.
    #[inline(always)]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if the [CONVERT](Self::CONVERT) flag is set.
    #[inline(always)]
    pub const fn convert(self) -> bool {
        self.contains(Self::CONVERT)
    }

    /// Returns true if the [NONE_DISALLOWED](Self::NONE_DISALLOWED) flag is
    /// set.
    #[inline(always)]
    pub const fn none_disallowed(self) -> bool {
        self.contains(Self::NONE_DISALLOWED)
    }

    /// Computes the flags that a composite caster passes to the element
    /// caster `C`.
    ///
    /// If `C` is a [class-bound](TypeCaster::IS_CLASS) caster of a
    /// non-[pointer](TypeCaster::IS_POINTER) type, the none singleton has no
    /// legitimate decoding into `C`'s value, and the function adds the
    /// [NONE_DISALLOWED](Self::NONE_DISALLOWED) flag. Otherwise, the flags
    /// are forwarded unchanged.
    ///
    /// ```
    /// use astra_cast::{
    ///     cast::{Cast, CastFlags},
    ///     runtime::Ptr,
    ///     Class,
    /// };
    ///
    /// #[derive(Class, Clone)]
    /// struct Foo;
    ///
    /// let flags = CastFlags::CONVERT;
    ///
    /// assert_eq!(
    ///     flags.for_caster::<<Foo as Cast>::Caster>(),
    ///     CastFlags::CONVERT | CastFlags::NONE_DISALLOWED,
    /// );
    ///
    /// assert_eq!(flags.for_caster::<<Ptr<Foo> as Cast>::Caster>(), flags);
    /// assert_eq!(flags.for_caster::<<i64 as Cast>::Caster>(), flags);
    /// ```
    #[inline(always)]
    pub const fn for_caster<C: TypeCaster>(self) -> Self {
        match C::IS_CLASS && !C::IS_POINTER {
            true => self.union(Self::NONE_DISALLOWED),
            false => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cast::CastFlags;

    #[test]
    fn test_flag_algebra() {
        let flags = CastFlags::CONVERT | CastFlags::NONE_DISALLOWED;

        assert!(flags.convert());
        assert!(flags.none_disallowed());
        assert!(!CastFlags::EMPTY.convert());
        assert!(flags.contains(CastFlags::EMPTY));

        assert_eq!(flags.difference(CastFlags::CONVERT), CastFlags::NONE_DISALLOWED);

        let mut flags = CastFlags::EMPTY;

        flags |= CastFlags::CONVERT;

        assert_eq!(flags, CastFlags::CONVERT);
        assert_eq!(format!("{flags:?}"), "{\"CONVERT\"}");
    }
}
