use thiserror::Error;

/// Failure reported by an external collaborator (source query or upload).
///
/// The pipeline propagates these unchanged and never retries; retry policy,
/// if any, belongs to the collaborator or the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UpstreamError {
    pub message: String,
}

impl UpstreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level error taxonomy for a pipeline run. Every variant is fatal to
/// the run; there is no partial recovery beyond the explicit filter/dedup
/// rules in the normalizer.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required option is missing or empty.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The source extract contains a date value that fails to parse.
    /// Strict: a single bad date aborts the entire run.
    #[error("unparseable date value '{value}' at source row {row}")]
    DataQuality { value: String, row: usize },

    /// No clean records remain after filtering, so the daily date range is
    /// undefined.
    #[error("no sales records remain after filtering; nothing to aggregate")]
    EmptyInput,

    /// Source query or upload collaborator failure, propagated as-is.
    #[error("upstream collaborator failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
