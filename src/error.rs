//! Typed failures surfaced by the survey pipeline.

/// Errors that stop a pipeline run. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The CSV source could not be fetched or read.
    #[error("data unavailable from '{source_name}': {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// A required column is missing or a value is outside the handled set.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// An aggregate produced no rows.
    #[error("empty result: {0}")]
    EmptyResult(&'static str),
}

impl PipelineError {
    pub fn unavailable(source_name: &str, reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(error: csv::Error) -> Self {
        Self::SchemaMismatch(format!("malformed CSV: {error}"))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
