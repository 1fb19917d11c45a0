//! # scratch-ml
//!
//! From-scratch statistical learning building blocks in pure Rust.
//!
//! ## Modules
//!
//! - **core** — vector algebra: dot product, elementwise arithmetic, scaling
//! - **optim** — finite-difference gradients, batch and stochastic descent,
//!   gradient ascent by negation
//! - **loss** — objective functions: squared error, ridge-penalized squared
//!   error, logistic log-likelihood

/// Vector algebra primitives.
pub use scratch_ml_core as core;

/// Gradient estimation and descent solvers.
pub use scratch_ml_optim as optim;

/// Objective functions.
pub use scratch_ml_loss as loss;
