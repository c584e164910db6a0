//! Error types for container, asset and cache operations.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for modelcache operations.
///
/// The sampler never produces one of these: missing channels and
/// out-of-range times are defined fallbacks, not failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Container file does not exist or cannot be opened
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Truncated header, or declared lengths inconsistent with the file
    #[error("Corrupt container: {0}")]
    CorruptContainer(String),

    /// Decompression failed or produced the wrong number of bytes
    #[error("Corrupt blob: {0}")]
    CorruptBlob(String),

    /// Metadata JSON missing a field or holding the wrong type
    #[error("Schema error: {0}")]
    Schema(String),

    /// Container tag does not match the serializer reading it
    #[error("Kind mismatch: expected {expected}, got {actual}")]
    KindMismatch { expected: String, actual: String },

    /// Container written by an unknown writer version
    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(i32),

    /// Decoded segment length is not a whole number of records
    #[error("{segment} segment of {len} bytes is not a multiple of {record_size}-byte records")]
    RecordAlignment {
        segment: &'static str,
        len: usize,
        record_size: usize,
    },

    /// Asset contents violate an invariant (index range, buffer size)
    #[error("Corrupt asset: {0}")]
    CorruptAsset(String),

    /// Node hierarchy violates the parent-before-child or unique-name rule
    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// The scene importer failed to produce a model
    #[error("Import failed: {0}")]
    Import(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a corrupt container error.
    pub fn corrupt_container(msg: impl Into<String>) -> Self {
        Self::CorruptContainer(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a corrupt asset error.
    pub fn corrupt_asset(msg: impl Into<String>) -> Self {
        Self::CorruptAsset(msg.into())
    }

    /// True for errors caused by metadata that this reader cannot interpret.
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::KindMismatch { .. } | Self::UnsupportedVersion(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Schema(e.to_string())
    }
}

/// Result type alias for modelcache operations.
pub type Result<T> = std::result::Result<T, Error>;
