pub mod plugin_config;
pub mod storage;

// Re-export key public types for easier use by the binary and by loaders
pub use plugin_config::{
    FrameworkConfig, PluginConfig, PluginInstanceConfig, VersionInfo, VersionSpec,
};
pub use plugin_config::error::{ConfigValidationError, VersionError};
pub use storage::{ConfigFormat, ConfigReader};
pub use storage::error::ConfigReadError;
