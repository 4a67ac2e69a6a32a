use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::plugin_config::error::ConfigValidationError;
use crate::plugin_config::instance::PluginInstanceConfig;
use crate::plugin_config::validation::{DefaultFilePathValidator, FilePathValidator};
use crate::plugin_config::version::{VersionInfo, VersionSpec};

/// Configuration of a single plugin: where its module lives, which version(s)
/// of it are acceptable, and the instances to create from it.
///
/// Construction never fails and the setters never validate. Whether the value
/// is usable is decided on demand by [`is_valid`](Self::is_valid) or, with the
/// failing rule reported, by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Path of the plugin module
    file_path: PathBuf,

    /// Exact version or version range
    version_spec: VersionSpec,

    /// Instances to create, in configuration order
    instance_configs: Vec<PluginInstanceConfig>,
}

impl PluginConfig {
    /// Create a config that accepts exactly `version`
    pub fn exact<P: Into<PathBuf>>(
        file_path: P,
        version: VersionInfo,
        instance_configs: Vec<PluginInstanceConfig>,
    ) -> Self {
        Self::with_spec(file_path, VersionSpec::Exact(version), instance_configs)
    }

    /// Create a config that accepts any version in `[min_version, max_version]`
    pub fn range<P: Into<PathBuf>>(
        file_path: P,
        min_version: VersionInfo,
        max_version: VersionInfo,
        instance_configs: Vec<PluginInstanceConfig>,
    ) -> Self {
        Self::with_spec(
            file_path,
            VersionSpec::Range {
                min: min_version,
                max: max_version,
            },
            instance_configs,
        )
    }

    pub fn with_spec<P: Into<PathBuf>>(
        file_path: P,
        version_spec: VersionSpec,
        instance_configs: Vec<PluginInstanceConfig>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            version_spec,
            instance_configs,
        }
    }

    /// Checks if the config is usable, judging the file path with
    /// [`validate_file_path`](crate::plugin_config::validation::validate_file_path)
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Same as [`is_valid`](Self::is_valid) with a caller-supplied path rule
    pub fn is_valid_with(&self, path_validator: &dyn FilePathValidator) -> bool {
        self.validate_with(path_validator).is_ok()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.validate_with(&DefaultFilePathValidator)
    }

    /// Runs the checks in order and reports the first one that fails:
    /// file path, version(s), at least one instance, every instance valid,
    /// and no instance name used twice.
    pub fn validate_with(
        &self,
        path_validator: &dyn FilePathValidator,
    ) -> Result<(), ConfigValidationError> {
        let result = self.check(path_validator);
        if let Err(ref e) = result {
            log::debug!("Rejected plugin config '{}': {}", self.file_path.display(), e);
        }
        result
    }

    fn check(&self, path_validator: &dyn FilePathValidator) -> Result<(), ConfigValidationError> {
        if !path_validator.validate_file_path(&self.file_path) {
            return Err(ConfigValidationError::InvalidFilePath {
                path: self.file_path.clone(),
            });
        }

        if self.is_exact_version() {
            let version = self.version();
            if !version.is_valid() {
                return Err(ConfigValidationError::InvalidVersion { version });
            }
        } else {
            let (min, max) = (self.min_version(), self.max_version());
            if !VersionInfo::is_range_valid(&min, &max) {
                return Err(ConfigValidationError::InvalidVersionRange { min, max });
            }
        }

        if self.instance_configs.is_empty() {
            return Err(ConfigValidationError::NoInstances {
                path: self.file_path.clone(),
            });
        }

        if let Some(instance) = self.instance_configs.iter().find(|i| !i.is_valid()) {
            return Err(ConfigValidationError::InvalidInstance {
                name: instance.name().to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.instance_configs.len());
        for instance in &self.instance_configs {
            if !seen.insert(instance.name()) {
                return Err(ConfigValidationError::DuplicateInstanceName {
                    name: instance.name().to_string(),
                });
            }
        }

        Ok(())
    }

    /// True iff the version is set and neither range bound is
    pub fn is_exact_version(&self) -> bool {
        self.version_spec.is_exact()
    }

    /// True iff the version is unset and both range bounds are set
    pub fn is_version_range(&self) -> bool {
        self.version_spec.is_range()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_file_path<P: Into<PathBuf>>(&mut self, file_path: P) {
        self.file_path = file_path.into();
    }

    /// The exact version, or null in range mode
    pub fn version(&self) -> VersionInfo {
        self.version_spec.version()
    }

    /// Switches to exact mode with the given version
    pub fn set_version(&mut self, version: VersionInfo) {
        self.version_spec = VersionSpec::Exact(version);
    }

    /// The lower range bound, or null in exact mode
    pub fn min_version(&self) -> VersionInfo {
        self.version_spec.min_version()
    }

    /// Switches to range mode, keeping the upper bound if already in range mode
    pub fn set_min_version(&mut self, min_version: VersionInfo) {
        self.version_spec = VersionSpec::Range {
            min: min_version,
            max: self.max_version(),
        };
    }

    /// The upper range bound, or null in exact mode
    pub fn max_version(&self) -> VersionInfo {
        self.version_spec.max_version()
    }

    /// Switches to range mode, keeping the lower bound if already in range mode
    pub fn set_max_version(&mut self, max_version: VersionInfo) {
        self.version_spec = VersionSpec::Range {
            min: self.min_version(),
            max: max_version,
        };
    }

    /// Switches to range mode with both bounds
    pub fn set_version_range(&mut self, min_version: VersionInfo, max_version: VersionInfo) {
        self.version_spec = VersionSpec::Range {
            min: min_version,
            max: max_version,
        };
    }

    pub fn version_spec(&self) -> &VersionSpec {
        &self.version_spec
    }

    pub fn set_version_spec(&mut self, version_spec: VersionSpec) {
        self.version_spec = version_spec;
    }

    pub fn instance_configs(&self) -> &[PluginInstanceConfig] {
        &self.instance_configs
    }

    pub fn instance_configs_mut(&mut self) -> &mut Vec<PluginInstanceConfig> {
        &mut self.instance_configs
    }

    pub fn set_instance_configs(&mut self, instance_configs: Vec<PluginInstanceConfig>) {
        self.instance_configs = instance_configs;
    }

    /// Find an instance config by name (first match)
    pub fn instance_config(&self, name: &str) -> Option<&PluginInstanceConfig> {
        self.instance_configs.iter().find(|i| i.name() == name)
    }
}
