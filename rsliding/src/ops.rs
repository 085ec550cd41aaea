// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The public façade: padding, weighted convolution, and the three sliding
//! reducers, each dispatched row-wise across `threads` workers.

use crate::array::Array;
use crate::driver::{Threads, dispatch, dispatch_paired};
use crate::error::{Error, Result};
use crate::kernel::{Kernel, KernelSpec};
use crate::mask::Mask;
use crate::padding::{self, BorderPolicy};
use crate::reduce::{self, CenterChoice};
use crate::walker::Workspace;

/// How an axis's out-of-bounds samples are produced. `None` is the absence
/// of a border: out-of-bounds samples are treated as missing data, which is
/// equivalent to padding with `NaN`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Border {
    None,
    Constant(f64),
    Reflect,
    Replicate,
}

fn normalize(border: Border) -> BorderPolicy {
    match border {
        Border::None => BorderPolicy::Constant(f64::NAN),
        Border::Constant(value) => BorderPolicy::Constant(value),
        Border::Reflect => BorderPolicy::Reflect,
        Border::Replicate => BorderPolicy::Replicate,
    }
}

/// Materializes `data` padded by `half_widths[axis]` samples on both sides
/// of every axis, under `border`. The lower-level primitive the other
/// façade functions build their padded working copy from.
pub fn padding(data: &Array, half_widths: &[usize], border: Border) -> Result<Array> {
    if half_widths.len() != data.rank() {
        return Err(Error::RankMismatch {
            data_rank: data.rank(),
            kernel_rank: half_widths.len(),
        });
    }
    padding::pad(data, half_widths, normalize(border))
}

/// Runs `cell` once per output coordinate, across `threads` workers, and
/// collects the results into an array shaped like `data`.
fn process_cellwise(
    data: &Array,
    kernel: &Kernel,
    border: Border,
    threads: Threads,
    cell: impl Fn(&mut Workspace, &Array, &Kernel, &[usize]) -> f64 + Sync,
) -> Result<Array> {
    #[cfg(feature = "tracing")]
    tracing::debug!(shape = ?data.shape(), kernel_shape = ?kernel.shape(), ?threads, "sliding-window operation");
    let padded = padding::pad(data, kernel.half_widths(), normalize(border))?;
    let shape = data.shape().to_vec();
    let strides = data.strides().to_vec();
    let rank = data.rank();
    let kernel_len = kernel.len();

    let mut out = Array::new_filled(shape.clone(), 0.0)?;
    let row_len = out.row_len();
    dispatch(threads, &mut out, |start, _end, rows| {
        let mut workspace = Workspace::new(rank, kernel_len);
        for (offset, value) in rows.iter_mut().enumerate() {
            let linear = start * row_len + offset;
            let coord = crate::array::unravel_index(&shape, &strides, linear);
            *value = cell(&mut workspace, &padded, kernel, &coord);
        }
    })?;
    Ok(out)
}

/// Weighted sum of each window under `kernel`, with NaN samples excluded and
/// the kernel's weight at their position excluded from the normalization.
/// Unlike the sliding reducers, this never compensates the running sum: the
/// façade does not expose a `neumaier` flag for plain convolution.
pub fn convolution(data: &Array, kernel: KernelSpec, border: Border, threads: Threads) -> Result<Array> {
    let kernel = kernel.resolve(data.rank())?;
    process_cellwise(data, &kernel, border, threads, |workspace, padded, kernel, coord| {
        let effective_weight = workspace.collect_window(padded, kernel, coord);
        if effective_weight == 0.0 {
            f64::NAN
        } else {
            reduce::weighted_sum(&workspace.values, &workspace.weights, false)
        }
    })
}

/// Sliding weighted mean under `kernel`.
pub fn sliding_mean(
    data: &Array,
    kernel: KernelSpec,
    border: Border,
    threads: Threads,
    neumaier: bool,
) -> Result<Array> {
    let kernel = kernel.resolve(data.rank())?;
    process_cellwise(data, &kernel, border, threads, move |workspace, padded, kernel, coord| {
        let effective_weight = workspace.collect_window(padded, kernel, coord);
        reduce::weighted_mean(&workspace.values, &workspace.weights, effective_weight, neumaier)
    })
}

/// Sliding weighted median under `kernel`.
pub fn sliding_median(data: &Array, kernel: KernelSpec, border: Border, threads: Threads) -> Result<Array> {
    let kernel = kernel.resolve(data.rank())?;
    process_cellwise(data, &kernel, border, threads, |workspace, padded, kernel, coord| {
        let effective_weight = workspace.collect_window(padded, kernel, coord);
        reduce::weighted_median(&workspace.values, &workspace.weights, effective_weight)
    })
}

/// Sliding weighted population standard deviation under `kernel`.
pub fn sliding_stddev(
    data: &Array,
    kernel: KernelSpec,
    border: Border,
    threads: Threads,
    neumaier: bool,
) -> Result<Array> {
    let kernel = kernel.resolve(data.rank())?;
    process_cellwise(data, &kernel, border, threads, move |workspace, padded, kernel, coord| {
        let effective_weight = workspace.collect_window(padded, kernel, coord);
        reduce::weighted_stddev(&workspace.values, &workspace.weights, effective_weight, neumaier)
    })
}

/// Iterative sigma-clipping under `kernel`: returns the clipped value (the
/// window's converged centre statistic) alongside a same-shaped mask that is
/// `true` wherever `data`'s own sample at that coordinate was clipped away,
/// or was `NaN` to begin with.
///
/// At least one of `sigma_lower`/`sigma_upper` must be `Some`.
#[allow(clippy::too_many_arguments)]
pub fn sliding_sigma_clip(
    data: &Array,
    kernel: KernelSpec,
    border: Border,
    threads: Threads,
    sigma_lower: Option<f64>,
    sigma_upper: Option<f64>,
    max_iters: usize,
    center: CenterChoice,
    neumaier: bool,
) -> Result<(Array, Mask)> {
    if sigma_lower.is_none() && sigma_upper.is_none() {
        return Err(Error::NoClipBound);
    }
    let kernel = kernel.resolve(data.rank())?;
    let half_widths = kernel.half_widths().to_vec();

    #[cfg(feature = "tracing")]
    tracing::debug!(shape = ?data.shape(), ?sigma_lower, ?sigma_upper, max_iters, "sliding sigma-clip");
    let padded = padding::pad(data, &half_widths, normalize(border))?;
    let shape = data.shape().to_vec();
    let strides = data.strides().to_vec();
    let rank = data.rank();
    let kernel_len = kernel.len();

    let mut values_out = Array::new_filled(shape.clone(), 0.0)?;
    let row_len = values_out.row_len();
    let mut clipped_out = vec![false; values_out.len()];

    dispatch_paired(threads, &mut values_out, &mut clipped_out, |start, _end, rows, clipped_rows| {
        let mut workspace = Workspace::new(rank, kernel_len);
        let mut center_coord = vec![0usize; rank];
        for (offset, (value, clipped)) in rows.iter_mut().zip(clipped_rows.iter_mut()).enumerate() {
            let linear = start * row_len + offset;
            let coord = crate::array::unravel_index(&shape, &strides, linear);
            workspace.collect_window(&padded, &kernel, &coord);
            let result = reduce::sigma_clip(
                &workspace.values,
                &workspace.weights,
                sigma_lower,
                sigma_upper,
                max_iters,
                center,
                neumaier,
            );
            *value = result.mean;

            for axis in 0..rank {
                center_coord[axis] = coord[axis] + half_widths[axis];
            }
            // True iff the centre sample was clipped away (or NaN to begin
            // with): the mask marks *replaced* positions, not survivors.
            *clipped = !result.contains(padded.get(&center_coord));
        }
    })?;

    let mask = Mask::from_vec(shape, clipped_out)?;
    Ok((values_out, mask))
}
