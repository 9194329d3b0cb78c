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

use std::fmt::{Debug, Formatter};

use log::trace;

use crate::runtime::Object;

/// An ordered list of dynamic objects that must stay alive until the
/// outermost conversion completes.
///
/// The list is owned by the outermost caller of a conversion chain, and a
/// mutable reference to it is threaded through every nested
/// [TypeCaster](crate::cast::TypeCaster) call. When a caster creates a
/// temporary dynamic object that has to outlive its own call (for instance,
/// an instance created by an implicit conversion), it registers the object in
/// the list.
///
/// Nested casters can only append to the list. Releasing the registered
/// objects requires ownership of the list: the owner either calls
/// [release](Self::release) explicitly or drops the list, regardless of
/// whether the conversion succeeded.
///
/// ```
/// use astra_cast::{cast::CleanupList, runtime::Object};
///
/// let temporary = Object::int(5);
///
/// let mut cleanup = CleanupList::new();
///
/// cleanup.push(temporary.clone());
///
/// assert_eq!(temporary.ref_count(), 2);
/// assert_eq!(cleanup.release(), 1);
/// assert_eq!(temporary.ref_count(), 1);
/// ```
#[derive(Default)]
pub struct CleanupList {
    objects: Vec<Object>,
}

impl Debug for CleanupList {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.objects.iter()).finish()
    }
}

impl CleanupList {
    /// Creates an empty list.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new reference to be released together with the list.
    #[inline(always)]
    pub fn push(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Returns the number of registered objects.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects have been registered.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Releases all registered references in registration order, and returns
    /// the number of released objects.
    pub fn release(mut self) -> usize {
        let count = self.objects.len();

        if count > 0 {
            trace!("Releasing {count} temporary object(s) of the conversion.");
        }

        self.objects.clear();

        count
    }
}
