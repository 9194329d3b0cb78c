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

use crate::{
    cast::{Cast, CastFailure, CastFlags, CastResult, CleanupList, Policy, Source, TypeCaster, TypeName},
    runtime::Object,
};

/// A pass-through caster of the [Object] type: `object`.
///
/// Accepts any dynamic object, including the none singleton, and shares it
/// without conversion.
#[derive(Default)]
pub struct ObjectCaster(Option<Object>);

impl TypeCaster for ObjectCaster {
    type Value = Object;

    #[inline(always)]
    fn name() -> TypeName {
        TypeName::new("object")
    }

    #[inline(always)]
    fn from_dynamic(
        &mut self,
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> CastResult {
        self.0 = Some(src.clone());

        Ok(())
    }

    #[inline(always)]
    fn into_value(self) -> CastResult<Object> {
        self.0.ok_or(CastFailure)
    }

    #[inline(always)]
    fn to_dynamic(
        src: Source<'_, Object>,
        _policy: Policy,
        _cleanup: &mut CleanupList,
    ) -> Option<Object> {
        Some(src.into_owned())
    }
}

impl Cast for Object {
    type Caster = ObjectCaster;
}
