//! volcans-common: shared types and errors used across all volcans crates.

pub mod error;
pub mod entities;
pub mod matrix;

// Re-export commonly used types
pub use entities::{Criterion, VolcanoIdentity, VolcanoRecord};
pub use error::{Result, VolcansError};
pub use matrix::SimilarityMatrix;
