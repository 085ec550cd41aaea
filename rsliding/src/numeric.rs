// Copyright (c) the rsliding Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Compensated summation shared by the weighted reducers.

/// A running Neumaier (improved Kahan) compensated sum, tracking the running
/// total's lost low-order bits in a separate compensation term.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Naive running sum, used where the façade does not offer compensation
/// (plain convolution) or where the caller has opted out of it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveSum {
    sum: f64,
}

impl NaiveSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.sum += value;
    }

    pub fn total(&self) -> f64 {
        self.sum
    }
}

/// A weighted running sum that is either compensated or naive, chosen once
/// per call so hot loops do not branch per element.
#[derive(Clone, Copy, Debug)]
pub enum WeightedSum {
    Neumaier(NeumaierSum),
    Naive(NaiveSum),
}

impl WeightedSum {
    pub fn new(compensated: bool) -> Self {
        if compensated {
            WeightedSum::Neumaier(NeumaierSum::new())
        } else {
            WeightedSum::Naive(NaiveSum::new())
        }
    }

    pub fn add(&mut self, value: f64) {
        match self {
            WeightedSum::Neumaier(s) => s.add(value),
            WeightedSum::Naive(s) => s.add(value),
        }
    }

    pub fn total(&self) -> f64 {
        match self {
            WeightedSum::Neumaier(s) => s.total(),
            WeightedSum::Naive(s) => s.total(),
        }
    }
}
