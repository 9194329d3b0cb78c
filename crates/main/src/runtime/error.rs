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

use compact_str::CompactString;

/// A result of a dynamic runtime API call, which can either be a normal value
/// or a [RuntimeError].
pub type RuntimeResult<T> = StdResult<T, RuntimeError>;

/// Represents any error raised by the dynamic runtime while the casters
/// inspect or construct [Objects](crate::runtime::Object).
///
/// Casters never propagate this error past their own boundary. A decoding
/// caster converts it into a plain [CastFailure](crate::cast::CastFailure),
/// and a projecting caster turns it into an invalid handle. The error value
/// exists to let the runtime describe what went wrong, which the casters
/// report through the `log` facade on the trace level.
///
/// The [Display] implementation provides a brief description of the
/// underlying error.
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum RuntimeError {
    /// The object does not support the iteration protocol.
    NotIterable {
        /// The name of the object's dynamic type.
        ty: &'static str,
    },

    /// The object cannot be inserted into a dynamic set because it does not
    /// have a stable hash value.
    Unhashable {
        /// The name of the object's dynamic type.
        ty: &'static str,
    },

    /// An operation expected an object of a particular dynamic type.
    TypeMismatch {
        /// The name of the expected dynamic type.
        expected: &'static str,

        /// The name of the object's actual dynamic type.
        actual: &'static str,
    },

    /// An error raised by user code running inside the runtime, such as a
    /// custom iterable that fails while producing the next item.
    Raised {
        /// A user-facing description of the error.
        message: CompactString,
    },
}

impl Display for RuntimeError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotIterable { ty } => {
                formatter.write_fmt(format_args!("'{ty}' object is not iterable"))
            }

            Self::Unhashable { ty } => {
                formatter.write_fmt(format_args!("unhashable type: '{ty}'"))
            }

            Self::TypeMismatch { expected, actual } => formatter.write_fmt(format_args!(
                "expected '{expected}' object, but '{actual}' object provided",
            )),

            Self::Raised { message } => formatter.write_str(message.as_str()),
        }
    }
}

impl StdError for RuntimeError {}

impl RuntimeError {
    /// A helper constructor of the [RuntimeError::Raised] variant.
    #[inline(always)]
    pub fn raised(message: impl Into<CompactString>) -> Self {
        Self::Raised {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::RuntimeError;

    #[test]
    fn test_error_descriptions() {
        assert_eq!(
            "'int' object is not iterable",
            RuntimeError::NotIterable { ty: "int" }.to_string(),
        );

        assert_eq!(
            "unhashable type: 'list'",
            RuntimeError::Unhashable { ty: "list" }.to_string(),
        );

        assert_eq!(
            "expected 'set' object, but 'tuple' object provided",
            RuntimeError::TypeMismatch {
                expected: "set",
                actual: "tuple",
            }
            .to_string(),
        );

        assert_eq!("boom", RuntimeError::raised("boom").to_string());
    }
}
