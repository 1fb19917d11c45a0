use scratch_ml_core::{vector, VectorResult};
use scratch_ml_optim::objective::RecordObjective;

/// Squashes a real value into (0, 1).
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the logistic function.
pub fn logistic_prime(x: f64) -> f64 {
    logistic(x) * (1.0 - logistic(x))
}

/// Residual of a linear prediction `x·beta` against the target.
fn residual(x: &[f64], y: f64, beta: &[f64]) -> VectorResult<f64> {
    Ok(y - vector::dot(x, beta)?)
}

/// Squared prediction error of a linear model on a single record.
/// Minimize with [`scratch_ml_optim::StochasticGradientDescent::minimize`].
pub struct SquaredError;

impl RecordObjective for SquaredError {
    fn value(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<f64> {
        let e = residual(x, y, beta)?;
        Ok(e * e)
    }

    fn gradient(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<Vec<f64>> {
        let e = residual(x, y, beta)?;
        Ok(x.iter().map(|xi| -2.0 * xi * e).collect())
    }
}

/// Squared error plus an L2 penalty `alpha * Σ beta[1..]²`. The first
/// coefficient is treated as the intercept and left unpenalized.
pub struct RidgeSquaredError {
    pub alpha: f64,
}

impl RidgeSquaredError {
    pub fn new(alpha: f64) -> Self {
        RidgeSquaredError { alpha }
    }

    fn penalty(&self, beta: &[f64]) -> f64 {
        self.alpha * beta.iter().skip(1).map(|b| b * b).sum::<f64>()
    }

    fn penalty_gradient(&self, beta: &[f64]) -> Vec<f64> {
        beta.iter()
            .enumerate()
            .map(|(i, b)| if i == 0 { 0.0 } else { 2.0 * self.alpha * b })
            .collect()
    }
}

impl RecordObjective for RidgeSquaredError {
    fn value(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<f64> {
        Ok(SquaredError.value(x, y, beta)? + self.penalty(beta))
    }

    fn gradient(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<Vec<f64>> {
        vector::add(
            &SquaredError.gradient(x, y, beta)?,
            &self.penalty_gradient(beta),
        )
    }
}

/// Per-record log-likelihood of a logistic model with binary targets.
/// Maximize with [`scratch_ml_optim::StochasticGradientDescent::maximize`].
pub struct LogisticLogLikelihood;

impl RecordObjective for LogisticLogLikelihood {
    fn value(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<f64> {
        let score = vector::dot(x, beta)?;
        if y == 1.0 {
            Ok(logistic(score).ln())
        } else {
            Ok((1.0 - logistic(score)).ln())
        }
    }

    fn gradient(&self, x: &[f64], y: f64, beta: &[f64]) -> VectorResult<Vec<f64>> {
        let score = vector::dot(x, beta)?;
        Ok(x.iter().map(|xi| (y - logistic(score)) * xi).collect())
    }
}
