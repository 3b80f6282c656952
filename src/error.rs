//! Analysis error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Dataset is empty: at least one password is required")]
    EmptyDataset,
    #[error("Invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },
    #[error("Analysis cancelled")]
    Cancelled,
    #[error("Analysis worker failed: {0}")]
    Worker(String),
}

impl AnalysisError {
    pub fn invalid_input(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            index,
            reason: reason.into(),
        }
    }
}
