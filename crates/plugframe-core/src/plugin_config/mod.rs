//! # Plugframe Plugin Configuration
//!
//! This module describes *what* the framework should load: for every plugin,
//! the path of the module on disk, the acceptable plugin version (one exact
//! version or an inclusive range), and the named instances to create from it.
//! Nothing here touches the filesystem or loads code; these are plain values
//! that can be checked for well-formedness before any loading happens.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`version`]**: [`VersionInfo`], a `MAJOR.MINOR.PATCH` value with a null
//!   state, and [`VersionSpec`], the exact-or-range version requirement.
//! - **[`instance`]**: [`PluginInstanceConfig`], a named instance with its
//!   parameters and the instances it depends on.
//! - **[`validation`]**: Syntactic rules for plugin file paths and instance
//!   names, plus the injectable [`FilePathValidator`](validation::FilePathValidator).
//! - **[`config`]**: [`PluginConfig`], the per-plugin record and its validation.
//! - **[`framework`]**: [`FrameworkConfig`], all plugin configs of one
//!   application with framework-wide instance name checks.
//! - **[`error`]**: Error types ([`VersionError`](error::VersionError),
//!   [`ConfigValidationError`](error::ConfigValidationError)).
pub mod version;
pub mod instance;
pub mod validation;
pub mod config;
pub mod framework;
pub mod error;

pub use version::{VersionInfo, VersionSpec};
pub use instance::PluginInstanceConfig;
pub use validation::{DefaultFilePathValidator, FilePathValidator};
pub use config::PluginConfig;
pub use framework::FrameworkConfig;
