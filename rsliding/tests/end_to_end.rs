// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Hand-verified worked examples for the five public operations, one per
//! border policy they exercise, plus the border/NaN equivalence the façade
//! relies on (`Border::None` normalizes to `Border::Constant(NaN)`).

use rsliding::{Array, Border, CenterChoice, KernelSpec, Threads, convolution, pad, sliding_mean, sliding_median, sliding_sigma_clip, sliding_stddev};
use rsliding_test_utils::assert_almost_eq;

fn kernel3() -> KernelSpec {
    KernelSpec::Size(3)
}

#[test]
fn sliding_mean_1d_constant_border() {
    let data = Array::from_vec(vec![5], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let out = sliding_mean(&data, kernel3(), Border::Constant(0.0), Threads::Sequential, false).unwrap();
    assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0, 4.0, 3.0]);
}

#[test]
fn sliding_median_1d_constant_border() {
    let data = Array::from_vec(vec![5], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let out = sliding_median(&data, kernel3(), Border::Constant(0.0), Threads::Sequential).unwrap();
    assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0, 4.0, 4.0]);
}

#[test]
fn convolution_1d_constant_border() {
    let data = Array::from_vec(vec![5], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    let out = convolution(&data, kernel3(), Border::Constant(0.0), Threads::Sequential).unwrap();
    assert_eq!(out.as_slice(), &[3.0, 6.0, 9.0, 12.0, 9.0]);
}

#[test]
fn sliding_mean_skips_nan_samples() {
    let data = Array::from_vec(vec![3], vec![1.0, f64::NAN, 3.0]).unwrap();
    let out = sliding_mean(&data, kernel3(), Border::Constant(0.0), Threads::Sequential, false).unwrap();
    assert_eq!(out.as_slice(), &[0.5, 2.0, 1.5]);
}

#[test]
fn border_none_matches_constant_nan_padding() {
    let data = Array::from_vec(vec![3], vec![1.0, f64::NAN, 3.0]).unwrap();
    let none = sliding_mean(&data, kernel3(), Border::None, Threads::Sequential, false).unwrap();
    let explicit_nan =
        sliding_mean(&data, kernel3(), Border::Constant(f64::NAN), Threads::Sequential, false).unwrap();
    assert_eq!(none.as_slice(), explicit_nan.as_slice());
    assert_eq!(none.as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
fn shape_is_preserved_by_every_operation() {
    let data = Array::from_vec(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

    let padded = pad(&data, &[1, 1], Border::Constant(0.0)).unwrap();
    assert_eq!(padded.shape(), &[4, 5]);

    let mean = sliding_mean(&data, kernel3(), Border::Reflect, Threads::Sequential, false).unwrap();
    assert_eq!(mean.shape(), data.shape());

    let median = sliding_median(&data, kernel3(), Border::Reflect, Threads::Sequential).unwrap();
    assert_eq!(median.shape(), data.shape());

    let (stddev, centre) = sliding_stddev(&data, kernel3(), Border::Reflect, Threads::Sequential, false).unwrap();
    assert_eq!(stddev.shape(), data.shape());
    assert_eq!(centre.shape(), data.shape());

    let (clipped, mask) = sliding_sigma_clip(
        &data,
        kernel3(),
        Border::Reflect,
        Threads::Sequential,
        Some(3.0),
        Some(3.0),
        5,
        CenterChoice::Mean,
        false,
    )
    .unwrap();
    assert_eq!(clipped.shape(), data.shape());
    assert_eq!(mask.shape(), data.shape());
}

#[test]
fn identity_kernel_is_a_no_op_for_mean_median_and_stddev() {
    let data = Array::from_vec(vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let identity = KernelSpec::Weights(Array::from_vec(vec![1, 1], vec![1.0]).unwrap());

    let mean = sliding_mean(&data, identity, Border::Constant(0.0), Threads::Sequential, false).unwrap();
    assert_eq!(mean.as_slice(), data.as_slice());

    let identity = KernelSpec::Weights(Array::from_vec(vec![1, 1], vec![1.0]).unwrap());
    let median = sliding_median(&data, identity, Border::Constant(0.0), Threads::Sequential).unwrap();
    assert_eq!(median.as_slice(), data.as_slice());

    let identity = KernelSpec::Weights(Array::from_vec(vec![1, 1], vec![1.0]).unwrap());
    let (stddev, centre) = sliding_stddev(&data, identity, Border::Constant(0.0), Threads::Sequential, false).unwrap();
    for &s in stddev.as_slice() {
        assert_eq!(s, 0.0);
    }
    assert_eq!(centre.as_slice(), data.as_slice());
}

#[test]
fn constant_input_has_zero_spread_and_scaled_convolution() {
    let shape = vec![3, 3];
    let data = Array::new_filled(shape.clone(), 4.0).unwrap();

    let mean = sliding_mean(&data, kernel3(), Border::Replicate, Threads::Sequential, false).unwrap();
    assert!(mean.as_slice().iter().all(|&v| v == 4.0));

    let median = sliding_median(&data, kernel3(), Border::Replicate, Threads::Sequential).unwrap();
    assert!(median.as_slice().iter().all(|&v| v == 4.0));

    let (stddev, _) = sliding_stddev(&data, kernel3(), Border::Replicate, Threads::Sequential, false).unwrap();
    assert!(stddev.as_slice().iter().all(|&v| v == 0.0));

    // Interior cell: every one of the 9 kernel weights lands on a replicated
    // sample equal to 4, so the convolution there is exactly 4 * 9.
    let conv = convolution(&data, kernel3(), Border::Replicate, Threads::Sequential).unwrap();
    assert_eq!(conv.get(&[1, 1]), 36.0);
}

#[test]
fn all_nan_window_yields_nan_and_sigma_clip_marks_it_clipped() {
    let data = Array::from_vec(vec![3], vec![f64::NAN, f64::NAN, f64::NAN]).unwrap();
    let mean = sliding_mean(&data, kernel3(), Border::Constant(0.0), Threads::Sequential, false).unwrap();
    assert!(mean.get(&[1]).is_nan());

    let (clipped, mask) = sliding_sigma_clip(
        &data,
        kernel3(),
        Border::Constant(0.0),
        Threads::Sequential,
        Some(3.0),
        Some(3.0),
        5,
        CenterChoice::Mean,
        false,
    )
    .unwrap();
    assert!(clipped.get(&[1]).is_nan());
    assert!(mask.as_slice()[1], "an all-NaN centre must be marked as clipped");
}

#[test]
fn sigma_clip_marks_the_outlier_but_not_its_neighbours() {
    // A single spike of 100 among otherwise flat data; clipped on a wide
    // window so every position sees the outlier and the mask should single
    // it out precisely.
    let data = Array::from_vec(vec![7], vec![1.0, 1.0, 1.0, 100.0, 1.0, 1.0, 1.0]).unwrap();
    let kernel = KernelSpec::Size(7);
    let (clipped, mask) = sliding_sigma_clip(
        &data,
        kernel,
        Border::Constant(1.0),
        Threads::Sequential,
        Some(2.0),
        Some(2.0),
        5,
        CenterChoice::Mean,
        false,
    )
    .unwrap();
    assert!(mask.as_slice()[3], "the outlier's own position must be marked clipped");
    assert!(!mask.as_slice()[0], "a flat neighbour must not be marked clipped");
    assert_almost_eq!(clipped.get(&[3]), 1.0, 1e-9);
}

#[test]
fn determinism_is_independent_of_thread_count() {
    let shape = vec![6, 5];
    let mut values = Vec::with_capacity(30);
    for i in 0..30 {
        values.push(if i % 7 == 0 { f64::NAN } else { i as f64 * 0.37 - 3.0 });
    }
    let data = Array::from_vec(shape, values).unwrap();

    let sequential = sliding_mean(&data, KernelSpec::Size(3), Border::Reflect, Threads::Sequential, false).unwrap();
    let four_workers = sliding_mean(&data, KernelSpec::Size(3), Border::Reflect, Threads::Count(4), false).unwrap();
    let auto = sliding_mean(&data, KernelSpec::Size(3), Border::Reflect, Threads::Auto, false).unwrap();

    for ((a, b), c) in sequential
        .as_slice()
        .iter()
        .zip(four_workers.as_slice())
        .zip(auto.as_slice())
    {
        if a.is_nan() {
            assert!(b.is_nan() && c.is_nan());
        } else {
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }
}

#[test]
fn median_tie_averages_the_two_central_order_statistics() {
    // An even non-NaN count under unit weights: the usual even-count median.
    let data = Array::from_vec(vec![4], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let kernel = KernelSpec::Size(3);
    // Border = none so the edge windows only ever see the in-bounds samples,
    // giving a clean even count of 2 at both ends.
    let out = sliding_median(&data, kernel, Border::None, Threads::Sequential).unwrap();
    assert_eq!(out.get(&[0]), 1.5); // {1, 2} -> average
    assert_eq!(out.get(&[3]), 3.5); // {3, 4} -> average
}

#[test]
fn asymmetric_kernel_respects_zero_weighted_offsets() {
    // A 3x3 kernel with the north offset zeroed out: at output (2, 1), the
    // north neighbour is data(1, 1), which holds an outlier. Weighting it
    // out should visibly change the mean from the all-ones kernel's result.
    let mut weights = vec![1.0; 9];
    weights[1] = 0.0; // kernel-local (0, 1): one row above centre.
    let kernel = KernelSpec::Weights(Array::from_vec(vec![3, 3], weights).unwrap());

    let data = Array::from_vec(vec![3, 3], vec![1.0, 1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
    let with_zeroed_north = sliding_mean(&data, kernel, Border::Constant(0.0), Threads::Sequential, false).unwrap();
    let all_ones = sliding_mean(&data, KernelSpec::Size(3), Border::Constant(0.0), Threads::Sequential, false).unwrap();

    assert_almost_eq!(with_zeroed_north.get(&[2, 1]), 5.0 / 8.0, 1e-12);
    assert_almost_eq!(all_ones.get(&[2, 1]), 15.0 / 9.0, 1e-12);
}
