use std::collections::HashMap;
use std::path::Path;

use crate::plugin_config::config::PluginConfig;
use crate::plugin_config::error::ConfigValidationError;
use crate::plugin_config::instance::PluginInstanceConfig;

/// All plugin configurations of one application.
///
/// Instances are addressed by name across the whole framework (dependencies
/// refer to them by name), so on top of each plugin's own checks an instance
/// name may only appear once over all plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkConfig {
    plugins: Vec<PluginConfig>,
}

impl FrameworkConfig {
    pub fn new(plugins: Vec<PluginConfig>) -> Self {
        Self { plugins }
    }

    pub fn plugins(&self) -> &[PluginConfig] {
        &self.plugins
    }

    pub fn add_plugin(&mut self, plugin: PluginConfig) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for plugin in &self.plugins {
            plugin
                .validate()
                .map_err(|e| ConfigValidationError::InvalidPlugin {
                    path: plugin.file_path().to_path_buf(),
                    source: Box::new(e),
                })?;
        }

        let mut owners: HashMap<&str, &Path> = HashMap::new();
        for plugin in &self.plugins {
            for instance in plugin.instance_configs() {
                if let Some(first) = owners.insert(instance.name(), plugin.file_path()) {
                    log::debug!(
                        "Instance '{}' is configured by both '{}' and '{}'",
                        instance.name(),
                        first.display(),
                        plugin.file_path().display()
                    );
                    return Err(ConfigValidationError::DuplicateInstanceAcrossPlugins {
                        name: instance.name().to_string(),
                        first: first.to_path_buf(),
                        second: plugin.file_path().to_path_buf(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Find an instance by name together with the plugin that configures it
    pub fn find_instance(&self, name: &str) -> Option<(&PluginConfig, &PluginInstanceConfig)> {
        self.plugins.iter().find_map(|plugin| {
            plugin
                .instance_config(name)
                .map(|instance| (plugin, instance))
        })
    }
}
