use std::io;
use thiserror::Error;

/// Custom error type for the ecotop application
#[derive(Error, Debug)]
pub enum EcotopError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metric collection failed: {0}")]
    MetricCollection(String),

    #[error("GPU not available: {0}")]
    GpuNotAvailable(String),

    #[error("TUI error: {0}")]
    Tui(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the ecotop application
pub type Result<T> = std::result::Result<T, EcotopError>;

impl EcotopError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EcotopError::Config(msg.into())
    }

    pub fn metric_collection<S: Into<String>>(msg: S) -> Self {
        EcotopError::MetricCollection(msg.into())
    }

    pub fn gpu_not_available<S: Into<String>>(msg: S) -> Self {
        EcotopError::GpuNotAvailable(msg.into())
    }

    pub fn tui<S: Into<String>>(msg: S) -> Self {
        EcotopError::Tui(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EcotopError::Other(msg.into())
    }
}
