// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::array::{Array, checked_size};
use crate::error::{Error, Result};

/// A validated, dense N-dimensional kernel: every axis is a positive odd
/// integer, weights may be zero, negative or positive.
#[derive(Clone, Debug)]
pub struct Kernel {
    shape: Vec<usize>,
    weights: Vec<f64>,
    center: Vec<usize>,
}

impl Kernel {
    fn new(shape: Vec<usize>, weights: Vec<f64>) -> Result<Self> {
        for (axis, &k) in shape.iter().enumerate() {
            if k == 0 || k % 2 == 0 {
                return Err(Error::InvalidKernelDim { axis, size: k });
            }
        }
        let expected = checked_size(&shape)?;
        if weights.len() != expected {
            return Err(Error::DataLenMismatch {
                shape,
                expected,
                actual: weights.len(),
            });
        }
        let center = shape.iter().map(|&k| (k - 1) / 2).collect();
        Ok(Kernel {
            shape,
            weights,
            center,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The half-width `(k - 1) / 2` of each axis; also this kernel's centre
    /// coordinate, and the per-axis padding required before sliding it.
    pub fn half_widths(&self) -> &[usize] {
        &self.center
    }

    pub fn center(&self) -> &[usize] {
        &self.center
    }

    fn weight_linear_index(&self, offset: &[usize]) -> usize {
        debug_assert_eq!(offset.len(), self.shape.len());
        let mut index = 0;
        let mut stride = 1;
        for axis in (0..self.shape.len()).rev() {
            index += offset[axis] * stride;
            stride *= self.shape[axis];
        }
        index
    }

    pub fn weight_at(&self, offset: &[usize]) -> f64 {
        self.weights[self.weight_linear_index(offset)]
    }
}

/// The three forms a caller may describe a kernel with, mirroring the
/// `KernelType` accepted by the language bindings this crate backs.
pub enum KernelSpec {
    /// A cubic kernel of this size on every axis, weights all one.
    Size(usize),
    /// A kernel of this per-axis shape, weights all one.
    Shape(Vec<usize>),
    /// A dense weight array, one entry per kernel offset.
    Weights(Array),
}

impl KernelSpec {
    pub fn resolve(self, data_rank: usize) -> Result<Kernel> {
        match self {
            KernelSpec::Size(k) => {
                let shape = vec![k; data_rank];
                let weights = vec![1.0; checked_size(&shape)?];
                Kernel::new(shape, weights)
            }
            KernelSpec::Shape(shape) => {
                if shape.len() != data_rank {
                    return Err(Error::RankMismatch {
                        data_rank,
                        kernel_rank: shape.len(),
                    });
                }
                let weights = vec![1.0; checked_size(&shape)?];
                Kernel::new(shape, weights)
            }
            KernelSpec::Weights(array) => {
                if array.rank() != data_rank {
                    return Err(Error::RankMismatch {
                        data_rank,
                        kernel_rank: array.rank(),
                    });
                }
                let shape = array.shape().to_vec();
                Kernel::new(shape, array.into_vec())
            }
        }
    }
}
