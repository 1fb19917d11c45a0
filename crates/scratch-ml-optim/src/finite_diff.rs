//! Finite-difference derivative estimation.
//!
//! Used when an analytic gradient is unavailable, or to cross-check one.
//! The step `h` is a numerical-accuracy knob chosen by the caller; it is
//! not validated here.

/// Forward-difference approximation to the derivative of a univariate
/// function: `(f(x + h) - f(x)) / h`.
pub fn difference_quotient<F>(f: F, x: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + h) - f(x)) / h
}

/// Partial derivative estimate of a multivariate function with respect to
/// coordinate `i`, holding all other coordinates fixed.
///
/// Like `h`, the index is the caller's contract: `i` must satisfy
/// `i < v.len()`, otherwise this panics.
pub fn partial_difference_quotient<F>(f: F, v: &[f64], i: usize, h: f64) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    let mut w = v.to_vec();
    w[i] += h;
    (f(&w) - f(v)) / h
}

/// Gradient estimate assembled from per-coordinate partial quotients.
pub fn estimate_gradient<F>(f: F, v: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    (0..v.len())
        .map(|i| partial_difference_quotient(&f, v, i, h))
        .collect()
}
