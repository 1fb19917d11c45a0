pub mod batch;
pub mod finite_diff;
pub mod objective;
pub mod stochastic;

pub use batch::{step, BatchGradientDescent, STEP_SIZES};
pub use finite_diff::{difference_quotient, estimate_gradient, partial_difference_quotient};
pub use objective::{FnObjective, FnRecordObjective, Negated, Objective, RecordObjective};
pub use stochastic::{random_init, StochasticGradientDescent};
