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

use std::vec::IntoIter;

use crate::runtime::{
    object::{Data, DynIter},
    Object,
    RuntimeError,
    RuntimeResult,
};

/// An iterator over the items of an iterable [Object].
///
/// Created by the [Object::iter] function. Each produced item is either a new
/// reference to the next Object, or a [RuntimeError] raised by the iteration
/// protocol. The iterator is finite and cannot be restarted: to iterate the
/// same Object again, request a new iterator.
///
/// The iterator holds a reference to the iterated Object until it is dropped.
pub struct ObjectIter {
    inner: IterInner,
    _source: Object,
}

impl Iterator for ObjectIter {
    type Item = RuntimeResult<Object>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Items(items) => items.next().map(Ok),
            IterInner::Generator(generator) => generator.next(),
        }
    }
}

impl Object {
    /// Starts the iteration protocol over this object.
    ///
    /// Tuples, lists and sets produce their items, strings produce single
    /// character strings, and [custom iterables](Object::iterable) produce
    /// whatever their factory function yields.
    ///
    /// Returns [RuntimeError::NotIterable] for all other objects.
    ///
    /// ```
    /// use astra_cast::runtime::Object;
    ///
    /// let items = Object::str("ab")
    ///     .iter()
    ///     .unwrap()
    ///     .collect::<Result<Vec<_>, _>>()
    ///     .unwrap();
    ///
    /// assert_eq!(items, vec![Object::str("a"), Object::str("b")]);
    ///
    /// assert!(Object::int(1).iter().is_err());
    /// ```
    pub fn iter(&self) -> RuntimeResult<ObjectIter> {
        let inner = match self.data() {
            Data::Tuple(items) | Data::List(items) => IterInner::Items(items.to_vec().into_iter()),

            Data::Set(set) => IterInner::Items(set.snapshot().into_iter()),

            Data::Str(string) => IterInner::Items(
                string
                    .chars()
                    .map(|character| Object::str(character.to_string()))
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),

            Data::Iterable(generator) => IterInner::Generator(generator.start()),

            _ => {
                return Err(RuntimeError::NotIterable {
                    ty: self.type_name(),
                })
            }
        };

        Ok(ObjectIter {
            inner,
            _source: self.clone(),
        })
    }
}

enum IterInner {
    Items(IntoIter<Object>),
    Generator(DynIter),
}

#[cfg(test)]
mod tests {
    use crate::runtime::{Object, RuntimeError};

    #[test]
    fn test_iteration_keeps_source_alive() {
        let item = Object::int(7);
        let tuple = Object::tuple([item.clone()]);

        let mut iter = tuple.iter().unwrap();

        assert_eq!(tuple.ref_count(), 2);
        assert_eq!(item.ref_count(), 3);

        let produced = iter.next().unwrap().unwrap();

        assert!(produced.is(&item));
        assert!(iter.next().is_none());

        drop(produced);
        drop(iter);

        assert_eq!(tuple.ref_count(), 1);
        assert_eq!(item.ref_count(), 2);
    }

    #[test]
    fn test_custom_iterable_restarts() {
        let iterable = Object::iterable(|| (1..=3).map(|value| Ok(Object::int(value))));

        for _ in 0..2 {
            let items = iterable
                .iter()
                .unwrap()
                .map(|item| item.unwrap().as_int().unwrap())
                .collect::<Vec<_>>();

            assert_eq!(items, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_not_iterable() {
        assert!(matches!(
            Object::none().iter(),
            Err(RuntimeError::NotIterable { ty: "NoneType" }),
        ));
    }
}
