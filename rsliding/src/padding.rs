// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Materializes a padded copy of an [`Array`], one half-width per axis on
//! each side, under a chosen [`BorderPolicy`].

use crate::array::{Array, Odometer, checked_size};
use crate::error::{Error, Result};
use crate::util::mirror::{reflect101, replicate};

/// How samples beyond an axis's bounds are produced during padding.
///
/// `None` is normalized by the façade to `Constant(f64::NAN)` before reaching
/// this module: an absent border is equivalent to treating out-of-bounds
/// samples as missing data, which the NaN-aware reducers already handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BorderPolicy {
    Constant(f64),
    Reflect,
    Replicate,
}

/// Pads `data` by `half_widths[axis]` samples on both sides of every axis.
pub fn pad(data: &Array, half_widths: &[usize], policy: BorderPolicy) -> Result<Array> {
    debug_assert_eq!(half_widths.len(), data.rank());

    if let BorderPolicy::Reflect = policy {
        for (axis, (&len, &half_width)) in data.shape().iter().zip(half_widths).enumerate() {
            if half_width == 0 {
                continue;
            }
            if len == 0 {
                return Err(Error::ReflectOnEmptyAxis { axis });
            }
            if len < 2 {
                return Err(Error::ReflectTooNarrow {
                    axis,
                    axis_len: len,
                    half_width,
                });
            }
        }
    }

    let padded_shape: Vec<usize> = data
        .shape()
        .iter()
        .zip(half_widths)
        .map(|(&len, &half_width)| len + 2 * half_width)
        .collect();
    checked_size(&padded_shape)?;

    let mut out = Array::new_filled(padded_shape.clone(), 0.0)?;
    let mut coord = vec![0usize; padded_shape.len()];
    let mut source = vec![0usize; data.rank()];
    let mut odometer = Odometer::new(&padded_shape);
    while odometer.next_into(&mut coord) {
        match source_coord(data.shape(), half_widths, &coord, policy, &mut source) {
            Some(()) => out.set(&coord, data.get(&source)),
            None => {
                let BorderPolicy::Constant(value) = policy else {
                    unreachable!("reflect/replicate always resolve to an in-bounds source");
                };
                out.set(&coord, value);
            }
        }
    }
    Ok(out)
}

/// Resolves one padded-array coordinate back to an unpadded source coordinate,
/// writing it into `out` and returning `Some(())`, or `None` if it falls
/// outside `shape` under a `Constant` policy.
fn source_coord(
    shape: &[usize],
    half_widths: &[usize],
    padded_coord: &[usize],
    policy: BorderPolicy,
    out: &mut [usize],
) -> Option<()> {
    for axis in 0..shape.len() {
        let v = padded_coord[axis] as isize - half_widths[axis] as isize;
        let len = shape[axis];
        out[axis] = match policy {
            BorderPolicy::Constant(_) => {
                if v < 0 || v >= len as isize {
                    return None;
                }
                v as usize
            }
            BorderPolicy::Reflect => reflect101(v, len),
            BorderPolicy::Replicate => replicate(v, len),
        };
    }
    Some(())
}
