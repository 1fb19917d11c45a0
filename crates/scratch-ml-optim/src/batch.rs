use serde::{Deserialize, Serialize};

use scratch_ml_core::{vector, VectorResult};

use crate::objective::Objective;

/// Default menu of candidate step sizes tried on every iteration.
pub const STEP_SIZES: [f64; 8] = [100.0, 10.0, 1.0, 0.1, 0.01, 0.001, 0.0001, 0.00001];

/// Move `v` by `step_size` along `direction`, leaving both inputs intact.
/// Pass a negative `step_size` to descend along a gradient, a positive one
/// to ascend.
pub fn step(v: &[f64], direction: &[f64], step_size: f64) -> VectorResult<Vec<f64>> {
    vector::add(v, &vector::scalar_multiply(step_size, direction))
}

/// Full-dataset gradient descent with adaptive step-size selection.
///
/// Each iteration tries every step size in the menu and keeps the candidate
/// with the lowest objective value. The loop stops once the improvement
/// falls below `tol`, returning the parameter vector from *before* the
/// final negligible step.
///
/// With `max_iter` left at `None` the loop has no iteration ceiling: an
/// objective that keeps improving by more than `tol` runs forever. Callers
/// that cannot vouch for their objective should set a ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchGradientDescent {
    /// Convergence tolerance on the change in objective value.
    pub tol: f64,
    /// Optional hard cap on update iterations.
    pub max_iter: Option<usize>,
    /// Candidate step sizes scanned each iteration.
    pub step_sizes: Vec<f64>,
}

impl BatchGradientDescent {
    pub fn new(tol: f64) -> Self {
        BatchGradientDescent {
            tol,
            max_iter: None,
            step_sizes: STEP_SIZES.to_vec(),
        }
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Minimize `objective` starting from `theta0`.
    ///
    /// An empty step-size menu leaves nothing to try, so `theta0` is
    /// returned unchanged.
    pub fn minimize<O: Objective>(&self, objective: &O, theta0: &[f64]) -> VectorResult<Vec<f64>> {
        let Some((&first_step, rest)) = self.step_sizes.split_first() else {
            return Ok(theta0.to_vec());
        };

        let mut theta = theta0.to_vec();
        let mut value = objective.value(&theta)?;
        let mut iterations = 0usize;

        loop {
            let gradient = objective.gradient(&theta)?;

            // Linear scan seeded with the first candidate, so even an
            // objective that is inf/NaN everywhere yields a vector of
            // theta's dimension; later candidates win only on strict
            // improvement, keeping the earliest minimum on ties.
            let mut best_theta = step(&theta, &gradient, -first_step)?;
            let mut best_value = objective.value(&best_theta)?;
            for &step_size in rest {
                let candidate = step(&theta, &gradient, -step_size)?;
                let candidate_value = objective.value(&candidate)?;
                if candidate_value < best_value {
                    best_value = candidate_value;
                    best_theta = candidate;
                }
            }

            // Last-stable policy: once the change is negligible, hand back
            // the pre-update vector rather than the marginal candidate.
            if (value - best_value).abs() < self.tol {
                return Ok(theta);
            }

            theta = best_theta;
            value = best_value;

            iterations += 1;
            if let Some(cap) = self.max_iter {
                if iterations >= cap {
                    return Ok(theta);
                }
            }
        }
    }
}
