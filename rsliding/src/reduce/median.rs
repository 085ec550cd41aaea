// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Weighted median: sorts samples by value, then scans cumulative weight
/// for the first position `k` where `W_k >= effective_weight / 2`. If that
/// cumulative weight lands exactly on the half point, the result is the
/// average of that element and the next one in sorted order, per the usual
/// weighted-median tie convention.
///
/// `NaN` if `effective_weight` is zero or non-positive.
pub fn weighted_median(values: &[f64], weights: &[f64], effective_weight: f64) -> f64 {
    debug_assert_eq!(values.len(), weights.len());
    if effective_weight <= 0.0 {
        return f64::NAN;
    }
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).expect("no NaN in window"));

    let half = effective_weight / 2.0;
    let mut cumulative = 0.0;
    for (pos, &i) in order.iter().enumerate() {
        cumulative += weights[i];
        if cumulative >= half {
            if cumulative == half && pos + 1 < order.len() {
                return (values[i] + values[order[pos + 1]]) / 2.0;
            }
            return values[i];
        }
    }
    // Floating-point slop only: the last element always reaches `half`.
    values[*order.last().expect("effective_weight > 0 implies non-empty window")]
}
