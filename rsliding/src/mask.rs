// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The boolean output of [`crate::ops::sliding_sigma_clip`], same shape as its
//! companion value array.

use crate::array::checked_size;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Mask {
    shape: Vec<usize>,
    data: Vec<bool>,
}

impl Mask {
    pub fn from_vec(shape: Vec<usize>, data: Vec<bool>) -> Result<Self> {
        let expected = checked_size(&shape)?;
        if data.len() != expected {
            return Err(Error::DataLenMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Mask { shape, data })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<bool> {
        self.data
    }
}
