//! # Plugframe Config Document Errors
//!
//! Defines [`ConfigReadError`], covering file I/O, unknown document formats,
//! (de)serialization failures, and version fields that do not describe exactly
//! one versioning mode.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("I/O error during operation '{operation}' on path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format for path: {}", .0.display())]
    UnsupportedConfigFormat(PathBuf),

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Plugin '{}' sets both 'version' and a version range", .path.display())]
    AmbiguousVersion { path: PathBuf },

    #[error("Plugin '{}' needs either 'version' or both 'min_version' and 'max_version'", .path.display())]
    MissingVersion { path: PathBuf },
}

// Every I/O failure names the document path it was working on
impl ConfigReadError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        ConfigReadError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
