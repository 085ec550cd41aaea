// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! N-dimensional, NaN-aware sliding-window statistics over dense `f64`
//! arrays: border padding, weighted convolution, and sliding mean, median,
//! standard deviation and iterative sigma-clipping, dispatched row-wise
//! across a caller-chosen number of threads.

#![deny(unsafe_code)]

pub mod array;
pub mod driver;
pub mod error;
pub mod kernel;
pub mod mask;
pub mod numeric;
mod ops;
pub mod padding;
mod reduce;
mod util;
mod walker;

pub use array::Array;
pub use driver::Threads;
pub use error::{Error, Result};
pub use kernel::KernelSpec;
pub use mask::Mask;
pub use ops::{Border, convolution, padding as pad, sliding_mean, sliding_median, sliding_sigma_clip, sliding_stddev};
pub use reduce::CenterChoice;
