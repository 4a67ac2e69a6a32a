//! # Plugframe Plugin Configuration Errors
//!
//! Defines error types for the plugin configuration model.
//!
//! [`VersionError`] covers parsing and converting version values.
//! [`ConfigValidationError`] names the first validation rule a plugin or
//! framework configuration breaks; the boolean `is_valid` predicates are built
//! on top of it.
use std::path::PathBuf;
use thiserror::Error;

use crate::plugin_config::version::VersionInfo;

/// Error type for version parsing and conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format '{0}', expected MAJOR.MINOR.PATCH")]
    InvalidFormat(String),

    #[error("Invalid component '{component}' in version '{version}'")]
    InvalidComponent { version: String, component: String },

    #[error("The null version has no semantic version representation")]
    NullVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Invalid plugin file path '{}'", .path.display())]
    InvalidFilePath { path: PathBuf },

    #[error("Invalid plugin version '{version}'")]
    InvalidVersion { version: VersionInfo },

    #[error("Invalid plugin version range [{min}, {max}]")]
    InvalidVersionRange { min: VersionInfo, max: VersionInfo },

    #[error("Plugin '{}' has no instance configs", .path.display())]
    NoInstances { path: PathBuf },

    #[error("Invalid instance config '{name}'")]
    InvalidInstance { name: String },

    #[error("Instance name '{name}' is used more than once")]
    DuplicateInstanceName { name: String },

    #[error(
        "Instance name '{name}' is used by plugins '{}' and '{}'",
        .first.display(),
        .second.display()
    )]
    DuplicateInstanceAcrossPlugins {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Plugin config for '{}' is invalid: {source}", .path.display())]
    InvalidPlugin {
        path: PathBuf,
        #[source]
        source: Box<ConfigValidationError>,
    },
}
