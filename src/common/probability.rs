//! Defines the probability density/mass functions.

use serde::{
    Serialize,
    Deserialize,
};

use core::f64::consts::PI;


/// A probability density/mass function over a single observation.
pub trait Probability<X> {
    /// Returns the logarithmic probability of `x`.
    fn log_probability(&self, x: X) -> f64;

    /// Returns the probability of `x`.
    fn probability(&self, x: X) -> f64 {
        self.log_probability(x).exp()
    }
}


/// Gaussian density with a scalar mean and variance.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Gaussian {
    pub(crate) mean: f64,
    pub(crate) variance: f64,
}

impl Gaussian {
    pub(crate) fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// The mean of the density.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The (population) variance of the density.
    pub fn variance(&self) -> f64 {
        self.variance
    }
}


impl Probability<f64> for Gaussian {
    /// `-0.5 * (ln(var) + ln(2π) + (x - mean)^2 / var)`.
    /// A zero variance yields a non-finite value.
    #[inline(always)]
    fn log_probability(&self, x: f64) -> f64 {
        let gauss_const = (2.0_f64 * PI).ln();
        let var = self.variance;

        - 0.5 * (var.ln() + gauss_const + (x - self.mean).powi(2) / var)
    }
}


/// Bernoulli mass function, `p` is the probability of `1`.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Bernoulli {
    pub(crate) p: f64,
}

impl Bernoulli {
    pub(crate) fn new(p: f64) -> Self {
        Self { p }
    }

    /// The probability of observing `1`.
    pub fn p(&self) -> f64 {
        self.p
    }
}


/// Kronecker delta.
#[inline(always)]
fn delta(i: i64, j: i64) -> f64 {
    if i == j { 1.0 } else { 0.0 }
}


impl Probability<i64> for Bernoulli {
    /// `ln([x = 1] * p + [x = 0] * (1 - p))`.
    /// Any `x` other than `0` or `1` has probability `0`,
    /// so its logarithm is `-inf`.
    #[inline(always)]
    fn log_probability(&self, x: i64) -> f64 {
        (delta(1, x) * self.p + delta(0, x) * (1.0 - self.p)).ln()
    }
}
