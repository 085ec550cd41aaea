// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::mean::weighted_mean;
use crate::numeric::WeightedSum;

/// Weighted population variance (reliability weights, no Bessel correction)
/// around a caller-supplied centre `mu`, rather than the window's own mean,
/// so sigma-clipping can reuse this around a median centre.
pub fn weighted_variance_around(
    values: &[f64],
    weights: &[f64],
    effective_weight: f64,
    mu: f64,
    compensated: bool,
) -> f64 {
    if effective_weight == 0.0 {
        return f64::NAN;
    }
    let mut acc = WeightedSum::new(compensated);
    for (&v, &w) in values.iter().zip(weights) {
        let d = v - mu;
        acc.add(w * d * d);
    }
    (acc.total() / effective_weight).max(0.0)
}

/// Weighted population standard deviation around the window's own weighted
/// mean.
pub fn weighted_stddev(values: &[f64], weights: &[f64], effective_weight: f64, compensated: bool) -> f64 {
    let mu = weighted_mean(values, weights, effective_weight, compensated);
    weighted_variance_around(values, weights, effective_weight, mu, compensated).sqrt()
}
