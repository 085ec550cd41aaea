// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The per-window reducers: weighted sum, mean, population standard
//! deviation, median, and iterative sigma-clipping. Each operates on the
//! (value, weight) pairs a [`crate::walker::Workspace`] has already filtered
//! to non-NaN samples.

mod mean;
mod median;
mod sigma_clip;
mod stddev;
mod sum;

pub use mean::weighted_mean;
pub use median::weighted_median;
pub use sigma_clip::{CenterChoice, SigmaClipResult, sigma_clip};
pub use stddev::{weighted_stddev, weighted_variance_around};
pub use sum::weighted_sum;
