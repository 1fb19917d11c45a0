use crate::error::{VectorError, VectorResult};

fn check_lengths(x: &[f64], y: &[f64]) -> VectorResult<()> {
    if x.len() != y.len() {
        return Err(VectorError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    Ok(())
}

/// Inner product of two equal-length vectors.
pub fn dot(x: &[f64], y: &[f64]) -> VectorResult<f64> {
    check_lengths(x, y)?;
    Ok(x.iter().zip(y).map(|(xi, yi)| xi * yi).sum())
}

/// Elementwise sum of two equal-length vectors.
pub fn add(x: &[f64], y: &[f64]) -> VectorResult<Vec<f64>> {
    check_lengths(x, y)?;
    Ok(x.iter().zip(y).map(|(xi, yi)| xi + yi).collect())
}

/// Elementwise difference of two equal-length vectors.
pub fn sub(x: &[f64], y: &[f64]) -> VectorResult<Vec<f64>> {
    check_lengths(x, y)?;
    Ok(x.iter().zip(y).map(|(xi, yi)| xi - yi).collect())
}

/// Scale every element of `v` by `s`.
pub fn scalar_multiply(s: f64, v: &[f64]) -> Vec<f64> {
    v.iter().map(|vi| s * vi).collect()
}

/// Zero vector of the given dimension.
pub fn zeros(dim: usize) -> Vec<f64> {
    vec![0.0; dim]
}

/// Sum of squared elements, i.e. the self inner product.
pub fn sum_of_squares(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum()
}
