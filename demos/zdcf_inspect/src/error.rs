//! Error types for the `zdcf-inspect` demo.
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised by the inspector.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Settings could not be assembled from the command line and environment.
    #[error("failed to load settings: {0}")]
    Settings(Box<figment::Error>),
    /// Sources could not be resolved, or the requested device is absent.
    #[error("failed to resolve configuration: {0}")]
    Resolve(#[from] Arc<zdcf::ZdcfError>),
    /// The report could not be encoded.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    /// Writing to standard output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<figment::Error> for InspectError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

/// Result alias for the inspector.
pub type Result<T, E = InspectError> = std::result::Result<T, E>;
