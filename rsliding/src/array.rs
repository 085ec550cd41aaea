// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! A dense, row-major, N-dimensional buffer of `f64`, and the coordinate
//! arithmetic shared by padding, the window walker and the parallel driver.

use crate::error::{Error, Result};
use crate::util::vec_helpers::try_with_capacity;

/// A dense N-dimensional `f64` array, contiguous in row-major order.
#[derive(Clone, Debug)]
pub struct Array {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<f64>,
}

impl Array {
    pub fn new_filled(shape: Vec<usize>, value: f64) -> Result<Self> {
        let len = checked_size(&shape)?;
        let mut data = try_with_capacity(len)?;
        data.resize(len, value);
        let strides = row_major_strides(&shape);
        Ok(Array {
            shape,
            strides,
            data,
        })
    }

    pub fn from_vec(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let expected = checked_size(&shape)?;
        if data.len() != expected {
            return Err(Error::DataLenMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        let strides = row_major_strides(&shape);
        Ok(Array {
            shape,
            strides,
            data,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// The length of axis 0, the axis the parallel driver partitions; `1` for
    /// a rank-0 array (a single scalar "row").
    pub fn outer_len(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }

    /// The flat element count of one outer-axis row.
    pub fn row_len(&self) -> usize {
        match self.outer_len() {
            0 => 0,
            outer_len => self.data.len() / outer_len,
        }
    }

    pub fn get(&self, coord: &[usize]) -> f64 {
        self.data[self.linear_index(coord)]
    }

    pub fn set(&mut self, coord: &[usize], value: f64) {
        let index = self.linear_index(coord);
        self.data[index] = value;
    }

    fn linear_index(&self, coord: &[usize]) -> usize {
        debug_assert_eq!(coord.len(), self.shape.len());
        coord
            .iter()
            .zip(&self.strides)
            .map(|(&i, &stride)| i * stride)
            .sum()
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

/// Recovers the row-major coordinate for a flat `linear` index, given a
/// shape and its row-major `strides`. Used by the parallel driver, which
/// only hands reducers a flat row-ordered slice and a row-start offset.
pub fn unravel_index(shape: &[usize], strides: &[usize], mut linear: usize) -> Vec<usize> {
    debug_assert_eq!(shape.len(), strides.len());
    let mut coord = vec![0usize; shape.len()];
    for axis in 0..shape.len() {
        let stride = strides[axis];
        coord[axis] = linear / stride;
        linear %= stride;
    }
    coord
}

/// Total element count of an array with the given shape, checked for overflow.
pub fn checked_size(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &s| acc.checked_mul(s))
        .ok_or(Error::SizeOverflow { what: "array" })
}

/// A deterministic, allocation-free, row-major walk over every coordinate of a
/// shape (last axis fastest). Used both by the window walker, to enumerate
/// kernel offsets in the order the reducers depend on for reproducibility, and
/// by the driver, to enumerate the inner axes of a worker's row range.
pub struct Odometer<'a> {
    shape: &'a [usize],
    state: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl<'a> Odometer<'a> {
    pub fn new(shape: &'a [usize]) -> Self {
        let exhausted = shape.iter().any(|&s| s == 0);
        Odometer {
            shape,
            state: vec![0; shape.len()],
            started: false,
            exhausted,
        }
    }

    /// Writes the next coordinate into `out` and returns `true`, or returns
    /// `false` once the walk is exhausted. `out.len()` must equal the rank.
    pub fn next_into(&mut self, out: &mut [usize]) -> bool {
        if self.exhausted {
            return false;
        }
        if !self.started {
            self.started = true;
            out.copy_from_slice(&self.state);
            return true;
        }
        for axis in (0..self.shape.len()).rev() {
            self.state[axis] += 1;
            if self.state[axis] < self.shape[axis] {
                out.copy_from_slice(&self.state);
                return true;
            }
            self.state[axis] = 0;
        }
        self.exhausted = true;
        false
    }
}

impl Iterator for Odometer<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let mut out = vec![0usize; self.shape.len()];
        if self.next_into(&mut out) {
            Some(out)
        } else {
            None
        }
    }
}
