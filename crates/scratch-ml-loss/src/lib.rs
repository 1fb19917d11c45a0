pub mod loss;

pub use loss::{
    logistic, logistic_prime, LogisticLogLikelihood, RidgeSquaredError, SquaredError,
};
