use scratch_ml_core::{vector, VectorResult};

/// Objective over the full parameter vector, already aggregated over the
/// dataset by the caller. Consumed by [`crate::BatchGradientDescent`].
pub trait Objective {
    /// Scalar score at `theta`.
    fn value(&self, theta: &[f64]) -> VectorResult<f64>;

    /// Partial derivatives at `theta`, one per parameter.
    fn gradient(&self, theta: &[f64]) -> VectorResult<Vec<f64>>;
}

/// Objective evaluated one training record at a time. Consumed by
/// [`crate::StochasticGradientDescent`].
pub trait RecordObjective {
    /// Scalar score of parameters `theta` on the record `(x, y)`.
    fn value(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<f64>;

    /// Gradient with respect to `theta` on the record `(x, y)`.
    fn gradient(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<Vec<f64>>;
}

impl<O: Objective + ?Sized> Objective for &O {
    fn value(&self, theta: &[f64]) -> VectorResult<f64> {
        (**self).value(theta)
    }

    fn gradient(&self, theta: &[f64]) -> VectorResult<Vec<f64>> {
        (**self).gradient(theta)
    }
}

impl<O: RecordObjective + ?Sized> RecordObjective for &O {
    fn value(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<f64> {
        (**self).value(x, y, theta)
    }

    fn gradient(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<Vec<f64>> {
        (**self).gradient(x, y, theta)
    }
}

/// Adapter turning a pair of closures into an [`Objective`].
pub struct FnObjective<F, G> {
    value_fn: F,
    gradient_fn: G,
}

impl<F, G> FnObjective<F, G>
where
    F: Fn(&[f64]) -> VectorResult<f64>,
    G: Fn(&[f64]) -> VectorResult<Vec<f64>>,
{
    pub fn new(value_fn: F, gradient_fn: G) -> Self {
        FnObjective {
            value_fn,
            gradient_fn,
        }
    }
}

impl<F, G> Objective for FnObjective<F, G>
where
    F: Fn(&[f64]) -> VectorResult<f64>,
    G: Fn(&[f64]) -> VectorResult<Vec<f64>>,
{
    fn value(&self, theta: &[f64]) -> VectorResult<f64> {
        (self.value_fn)(theta)
    }

    fn gradient(&self, theta: &[f64]) -> VectorResult<Vec<f64>> {
        (self.gradient_fn)(theta)
    }
}

/// Adapter turning a pair of closures into a [`RecordObjective`].
pub struct FnRecordObjective<F, G> {
    value_fn: F,
    gradient_fn: G,
}

impl<F, G> FnRecordObjective<F, G>
where
    F: Fn(&[f64], f64, &[f64]) -> VectorResult<f64>,
    G: Fn(&[f64], f64, &[f64]) -> VectorResult<Vec<f64>>,
{
    pub fn new(value_fn: F, gradient_fn: G) -> Self {
        FnRecordObjective {
            value_fn,
            gradient_fn,
        }
    }
}

impl<F, G> RecordObjective for FnRecordObjective<F, G>
where
    F: Fn(&[f64], f64, &[f64]) -> VectorResult<f64>,
    G: Fn(&[f64], f64, &[f64]) -> VectorResult<Vec<f64>>,
{
    fn value(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<f64> {
        (self.value_fn)(x, y, theta)
    }

    fn gradient(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<Vec<f64>> {
        (self.gradient_fn)(x, y, theta)
    }
}

/// Wrapper negating both the value and the gradient of an objective, so a
/// maximization problem can be handed to a minimizing solver.
pub struct Negated<O>(pub O);

impl<O: RecordObjective> RecordObjective for Negated<O> {
    fn value(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<f64> {
        Ok(-self.0.value(x, y, theta)?)
    }

    fn gradient(&self, x: &[f64], y: f64, theta: &[f64]) -> VectorResult<Vec<f64>> {
        Ok(vector::scalar_multiply(-1.0, &self.0.gradient(x, y, theta)?))
    }
}
