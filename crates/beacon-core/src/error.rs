//! Unified error types for beacon

use thiserror::Error;

/// Unified error type for all beacon operations
///
/// The pipeline never lets one of these reach the embedder; they exist so
/// internals can report what went wrong and tests can assert on the kind.
#[derive(Error, Debug)]
pub enum BeaconError {
    // Storage errors
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage read failed: {0}")]
    StorageRead(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    // Transport errors
    #[error("Request build failed: {0}")]
    RequestBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Endpoint returned status {0}")]
    Status(u16),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using BeaconError
pub type Result<T> = std::result::Result<T, BeaconError>;
