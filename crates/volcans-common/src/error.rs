use thiserror::Error;

use crate::entities::{format_volcano_table, Criterion, VolcanoRecord};

#[derive(Debug, Error)]
pub enum VolcansError {
    /// A name or Smithsonian id did not resolve to any catalogue row.
    #[error("{0}")]
    NotFound(String),

    /// A name matched zero or several catalogue rows.
    /// Always carries the closest catalogue names for operator guidance.
    #[error("{message}\n{}", format_volcano_table(.suggestions))]
    AmbiguousName {
        message: String,
        suggestions: Vec<VolcanoRecord>,
    },

    #[error("Sum of weights ({sum}) is different from 1!")]
    WeightSum { sum: f64 },

    #[error("{0}")]
    InputType(String),

    #[error("Volcano index {index} out of bounds for a catalogue of {len} volcanoes")]
    OutOfRange { index: usize, len: usize },

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Analogy matrix shape error: {0}")]
    MatrixShape(String),

    #[error("No analogy matrix available for criterion '{0}'")]
    MissingMatrix(Criterion),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VolcansError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_sum_message_reports_sum() {
        let err = VolcansError::WeightSum { sum: 0.99 };
        assert_eq!(err.to_string(), "Sum of weights (0.99) is different from 1!");
    }

    #[test]
    fn test_ambiguous_name_includes_suggestions() {
        let err = VolcansError::AmbiguousName {
            message: "Fujj not found! Did you mean:".to_string(),
            suggestions: vec![VolcanoRecord::new("Fuji", "Japan", 283030)],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Fujj not found! Did you mean:\n"));
        assert!(msg.contains("Fuji"));
        assert!(msg.contains("283030"));
    }
}
