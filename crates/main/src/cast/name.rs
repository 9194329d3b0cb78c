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

use std::fmt::{Display, Formatter};

use compact_str::CompactString;

/// A display name of a caster's native type.
///
/// The name describes the type the way typing stubs and signatures of the
/// dynamic runtime would spell it, such as `int`, `Set[str]`, or
/// `Union[None, int]`. Composite casters synthesize their names from the names
/// of their element casters.
///
/// The name is informational only: casters never inspect it to make
/// conversion decisions.
///
/// ```
/// use astra_cast::cast::TypeName;
///
/// let name = TypeName::generic(
///     "Union",
///     [TypeName::new("None"), TypeName::generic("Set", [TypeName::new("int")])],
/// );
///
/// assert_eq!(name.as_str(), "Union[None, Set[int]]");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeName(CompactString);

impl Display for TypeName {
    #[inline(always)]
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl AsRef<str> for TypeName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TypeName {
    /// Creates a plain type name.
    #[inline(always)]
    pub fn new(name: &str) -> Self {
        Self(CompactString::new(name))
    }

    /// Creates a parameterized type name: `head[arg1, arg2, ...]`.
    pub fn generic(head: &str, args: impl IntoIterator<Item = TypeName>) -> Self {
        let mut name = CompactString::new(head);

        name.push('[');

        for (index, arg) in args.into_iter().enumerate() {
            if index > 0 {
                name.push_str(", ");
            }

            name.push_str(arg.as_str());
        }

        name.push(']');

        Self(name)
    }

    /// Creates a union type name: `Union[name1, name2, ...]`.
    #[inline(always)]
    pub fn union(alternatives: impl IntoIterator<Item = TypeName>) -> Self {
        Self::generic("Union", alternatives)
    }

    /// Returns the name as a string slice.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
