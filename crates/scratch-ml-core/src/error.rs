use thiserror::Error;

/// Error type shared by all vector operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VectorError {
    #[error("vectors are of unequal size: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type VectorResult<T> = Result<T, VectorError>;
