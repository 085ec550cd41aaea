// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ShapeError: kernel/data rank and kernel dimension validation.
    #[error("kernel has rank {kernel_rank} but data has rank {data_rank}")]
    RankMismatch { data_rank: usize, kernel_rank: usize },
    #[error("kernel dimension {axis} is {size}, expected a positive odd integer")]
    InvalidKernelDim { axis: usize, size: usize },
    #[error("array of shape {shape:?} needs {expected} elements, got {actual}")]
    DataLenMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("arithmetic overflow while computing the size of {what}")]
    SizeOverflow { what: &'static str },

    // BorderError: reflect padding is undefined on axes too narrow to mirror.
    #[error(
        "reflect padding on axis {axis} needs at least 2 samples, found {axis_len} (half-width {half_width})"
    )]
    ReflectTooNarrow {
        axis: usize,
        axis_len: usize,
        half_width: usize,
    },
    #[error("reflect padding requested on zero-length axis {axis}")]
    ReflectOnEmptyAxis { axis: usize },

    // ConfigError: caller-supplied parameters that are not internally consistent.
    #[error("sigma-clip needs at least one of sigma_lower or sigma_upper")]
    NoClipBound,
    #[error("thread count must be at least 1, got {0}")]
    InvalidThreadCount(usize),

    #[error("allocation failed")]
    OutOfMemory(#[from] TryReserveError),

    // TypeError: reserved for binding layers that marshal non-float64 buffers into
    // this crate; the Rust API is statically typed to f64 and never raises this itself.
    #[error("expected a float64 array")]
    TypeError,
}

pub type Result<T> = std::result::Result<T, Error>;
