//! Config document reader.
//!
//! A document lists the plugins to load. Each plugin entry names its module
//! file, either an exact `version` or a `min_version`/`max_version` pair, and
//! its instances:
//!
//! ```json
//! {
//!   "plugins": [
//!     {
//!       "file_path": "/plugins/foo.so",
//!       "version": "1.0.0",
//!       "instances": [{ "name": "a", "config": { "port": 8080 }, "dependencies": ["b"] }]
//!     },
//!     {
//!       "file_path": "/plugins/bar.so",
//!       "min_version": "1.0.0",
//!       "max_version": "2.0.0",
//!       "instances": [{ "name": "b" }]
//!     }
//!   ]
//! }
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plugin_config::{
    FrameworkConfig, PluginConfig, PluginInstanceConfig, VersionInfo, VersionSpec,
};
use crate::storage::error::ConfigReadError;

type Result<T> = std::result::Result<T, ConfigReadError>;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    /// Determine format from a name such as "json" or "yml"
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            #[cfg(feature = "toml-config")]
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FrameworkDocument {
    #[serde(default)]
    plugins: Vec<PluginDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PluginDocument {
    file_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<VersionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_version: Option<VersionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_version: Option<VersionInfo>,
    #[serde(default)]
    instances: Vec<PluginInstanceConfig>,
}

fn non_null(version: VersionInfo) -> Option<VersionInfo> {
    (!version.is_null()).then_some(version)
}

/// Only configs in exact or range mode have a document form; anything else
/// would be written out and then refused by `parse_str`.
impl TryFrom<&PluginConfig> for PluginDocument {
    type Error = ConfigReadError;

    fn try_from(config: &PluginConfig) -> Result<Self> {
        if !config.is_exact_version() && !config.is_version_range() {
            return Err(ConfigReadError::MissingVersion {
                path: config.file_path().to_path_buf(),
            });
        }
        Ok(Self {
            file_path: config.file_path().to_path_buf(),
            version: non_null(config.version()),
            min_version: non_null(config.min_version()),
            max_version: non_null(config.max_version()),
            instances: config.instance_configs().to_vec(),
        })
    }
}

impl TryFrom<PluginDocument> for PluginConfig {
    type Error = ConfigReadError;

    fn try_from(document: PluginDocument) -> Result<Self> {
        let spec = match (document.version, document.min_version, document.max_version) {
            (Some(version), None, None) => VersionSpec::Exact(version),
            (None, Some(min), Some(max)) => VersionSpec::Range { min, max },
            (Some(_), _, _) => {
                return Err(ConfigReadError::AmbiguousVersion {
                    path: document.file_path,
                });
            }
            (None, _, _) => {
                return Err(ConfigReadError::MissingVersion {
                    path: document.file_path,
                });
            }
        };
        Ok(PluginConfig::with_spec(
            document.file_path,
            spec,
            document.instances,
        ))
    }
}

/// Reads and writes [`FrameworkConfig`] documents
#[derive(Debug, Clone, Copy)]
pub struct ConfigReader {
    /// Format used when a path has no recognised extension
    default_format: ConfigFormat,
}

impl ConfigReader {
    pub fn new(default_format: ConfigFormat) -> Self {
        Self { default_format }
    }

    /// Get the default format
    pub fn default_format(&self) -> ConfigFormat {
        self.default_format
    }

    /// Set the default format
    pub fn set_default_format(&mut self, format: ConfigFormat) {
        self.default_format = format;
    }

    /// Determine the format of `path` from its extension, falling back to the
    /// default format
    pub fn format_for(&self, path: &Path) -> ConfigFormat {
        ConfigFormat::from_path(path).unwrap_or(self.default_format)
    }

    /// Parse a document. Only the document shape is checked here.
    pub fn parse_str(&self, data: &str, format: ConfigFormat) -> Result<FrameworkConfig> {
        let document: FrameworkDocument = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| deserialization_error("JSON", e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| deserialization_error("YAML", e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| deserialization_error("TOML", e))?,
        };

        let plugins = document
            .plugins
            .into_iter()
            .map(PluginConfig::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(FrameworkConfig::new(plugins))
    }

    /// Serialize a config to a document string. Fails with
    /// [`ConfigReadError::MissingVersion`] for a plugin that is in neither
    /// exact nor range mode.
    pub fn to_string(&self, config: &FrameworkConfig, format: ConfigFormat) -> Result<String> {
        let document = FrameworkDocument {
            plugins: config
                .plugins()
                .iter()
                .map(PluginDocument::try_from)
                .collect::<Result<Vec<_>>>()?,
        };

        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&document)
                .map_err(|e| serialization_error("JSON", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&document)
                .map_err(|e| serialization_error("YAML", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&document)
                .map_err(|e| serialization_error("TOML", e)),
        }
    }

    /// Load a document from disk, picking the format from the file extension
    pub fn read_file(&self, path: &Path) -> Result<FrameworkConfig> {
        let format = match ConfigFormat::from_path(path) {
            Some(format) => format,
            None if path.extension().is_none() => self.default_format,
            None => return Err(ConfigReadError::UnsupportedConfigFormat(path.to_path_buf())),
        };

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigReadError::io(e, "read", path.to_path_buf()))?;

        let config = self.parse_str(&content, format)?;
        log::info!(
            "Read {} plugin config(s) from {}",
            config.plugins().len(),
            path.display()
        );
        Ok(config)
    }

    /// Save a document to disk, picking the format from the file extension
    pub fn write_file(&self, path: &Path, config: &FrameworkConfig) -> Result<()> {
        let content = self.to_string(config, self.format_for(path))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigReadError::io(e, "create_dir_all", parent.to_path_buf()))?;
        }

        fs::write(path, content).map_err(|e| ConfigReadError::io(e, "write", path.to_path_buf()))
    }
}

impl Default for ConfigReader {
    fn default() -> Self {
        Self::new(ConfigFormat::Json)
    }
}

fn deserialization_error<E>(format: &str, source: E) -> ConfigReadError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigReadError::DeserializationError {
        format: format.to_string(),
        source: Box::new(source),
    }
}

fn serialization_error<E>(format: &str, source: E) -> ConfigReadError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigReadError::SerializationError {
        format: format.to_string(),
        source: Box::new(source),
    }
}
