use thiserror::Error;

use ledgertrend_core::PipelineError;
use ledgertrend_warehouse::WarehouseError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Pipeline(PipelineError::Configuration { .. }) => 2,
            Self::Pipeline(PipelineError::DataQuality { .. }) => 3,
            Self::Pipeline(PipelineError::EmptyInput) => 4,
            Self::Pipeline(PipelineError::Upstream(_))
            | Self::Warehouse(_)
            | Self::Serialization(_)
            | Self::Io(_) => 10,
        }
    }
}
