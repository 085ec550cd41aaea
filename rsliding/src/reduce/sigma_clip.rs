// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::mean::weighted_mean;
use super::median::weighted_median;
use super::stddev::weighted_variance_around;

/// Which centre statistic drives clipping and the deviation it's measured
/// from: the weighted mean, or the weighted median.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CenterChoice {
    Mean,
    Median,
}

/// The converged centre, spread and clip bounds of one sigma-clip window.
#[derive(Clone, Copy, Debug)]
pub struct SigmaClipResult {
    pub mean: f64,
    pub stddev: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl SigmaClipResult {
    fn unconverged() -> Self {
        SigmaClipResult {
            mean: f64::NAN,
            stddev: f64::NAN,
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
        }
    }

    /// Whether `value` falls within the converged clip bounds; `false` for
    /// `NaN` and whenever no iteration ever converged.
    pub fn contains(&self, value: f64) -> bool {
        !value.is_nan() && value >= self.lower_bound && value <= self.upper_bound
    }
}

/// Iteratively clips samples more than `sigma_lower` below, or `sigma_upper`
/// above, the chosen centre statistic, recomputing the centre and spread
/// from the surviving (kept) subset each round. Stops when a round removes
/// nothing, when fewer than two samples remain, or after `max_iters` rounds.
/// A single surviving sample still yields a real centre (that sample, with
/// zero spread) rather than `NaN` — only a fully emptied kept set does.
///
/// At least one of `sigma_lower`/`sigma_upper` must be `Some`; an absent
/// bound is treated as infinite (never clips on that side).
pub fn sigma_clip(
    values: &[f64],
    weights: &[f64],
    sigma_lower: Option<f64>,
    sigma_upper: Option<f64>,
    max_iters: usize,
    center: CenterChoice,
    compensated: bool,
) -> SigmaClipResult {
    debug_assert_eq!(values.len(), weights.len());
    let n = values.len();
    if n == 0 {
        return SigmaClipResult::unconverged();
    }

    let mut kept = vec![true; n];
    let mut result = SigmaClipResult::unconverged();

    for _ in 0..max_iters {
        let idx: Vec<usize> = (0..n).filter(|&i| kept[i]).collect();
        if idx.len() < 2 {
            // A single kept sample still has a well-defined centre (itself)
            // and spread (zero); only an empty kept set stays NaN.
            if let [i] = idx.as_slice() {
                let i = *i;
                let mu = values[i];
                let sigma = 0.0;
                result = SigmaClipResult {
                    mean: mu,
                    stddev: sigma,
                    lower_bound: sigma_lower.map_or(f64::NEG_INFINITY, |s| mu - s * sigma),
                    upper_bound: sigma_upper.map_or(f64::INFINITY, |s| mu + s * sigma),
                };
            }
            break;
        }
        let sub_values: Vec<f64> = idx.iter().map(|&i| values[i]).collect();
        let sub_weights: Vec<f64> = idx.iter().map(|&i| weights[i]).collect();
        let effective_weight: f64 = sub_weights.iter().sum();
        if effective_weight <= 0.0 {
            break;
        }

        let mu = match center {
            CenterChoice::Mean => weighted_mean(&sub_values, &sub_weights, effective_weight, compensated),
            CenterChoice::Median => weighted_median(&sub_values, &sub_weights, effective_weight),
        };
        let sigma = weighted_variance_around(&sub_values, &sub_weights, effective_weight, mu, compensated).sqrt();

        let lower_bound = sigma_lower.map_or(f64::NEG_INFINITY, |s| mu - s * sigma);
        let upper_bound = sigma_upper.map_or(f64::INFINITY, |s| mu + s * sigma);
        result = SigmaClipResult {
            mean: mu,
            stddev: sigma,
            lower_bound,
            upper_bound,
        };

        let mut changed = false;
        for &i in &idx {
            if values[i] < lower_bound || values[i] > upper_bound {
                kept[i] = false;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    result
}
