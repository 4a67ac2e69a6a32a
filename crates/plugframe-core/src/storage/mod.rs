//! # Plugframe Config Documents
//!
//! Reading and writing plugin configurations as JSON, YAML or TOML documents.
//! The on-disk layout is described in [`reader`]; turning a document into
//! [`FrameworkConfig`](crate::plugin_config::FrameworkConfig) values only checks
//! its shape, semantic checks are left to `validate()`.
pub mod error;
pub mod reader;

/// Re-export key types
pub use error::ConfigReadError;
pub use reader::{ConfigFormat, ConfigReader};

// Test module declaration
#[cfg(test)]
mod tests;
