pub mod error;
pub mod vector;

pub use error::{VectorError, VectorResult};
