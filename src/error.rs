//! Pipeline error taxonomy

use thiserror::Error;

/// Result type for pipeline stages (load, preprocess, predict, aggregate)
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Errors a dashboard render can fail with. Any of these aborts the
/// entire render; there is no partial output.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input file (dataset CSV or model artifact) is missing
    #[error("required file not found: {path}")]
    NotFound { path: String },

    /// The dataset could not be read into the expected columns
    #[error("failed to parse dataset: {0}")]
    Parse(String),

    /// The model artifact could not be deserialized, or is internally
    /// inconsistent
    #[error("model artifact is corrupt or unusable: {0}")]
    CorruptArtifact(String),

    /// The feature matrix width does not match what the model expects
    #[error("prediction failed: model expects {expected} features, feature matrix has {actual}")]
    Prediction { expected: usize, actual: usize },
}

impl PipelineError {
    /// Remediation text for a missing input file, naming both files the
    /// dashboard needs to run.
    pub fn remediation(data_path: &str, model_path: &str) -> String {
        format!(
            "File not found. Make sure:\n  1. The dataset `{}` exists in the working directory\n  2. The model artifact `{}` has been generated",
            data_path, model_path
        )
    }
}
