use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::plugin_config::validation::validate_instance_name;

/// Configuration of one runtime instance created from a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginInstanceConfig {
    /// Instance name, unique within its plugin (and framework-wide)
    name: String,

    /// Instance parameters handed to the plugin, always a JSON object
    #[serde(default = "empty_object")]
    config: Value,

    /// Names of the instances this instance needs injected
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    dependencies: BTreeSet<String>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl PluginInstanceConfig {
    /// Create an instance config with no parameters and no dependencies
    pub fn new(name: &str) -> Self {
        Self::with_config(name, empty_object())
    }

    pub fn with_config(name: &str, config: Value) -> Self {
        Self::with_dependencies(name, config, BTreeSet::new())
    }

    pub fn with_dependencies(name: &str, config: Value, dependencies: BTreeSet<String>) -> Self {
        Self {
            name: name.to_string(),
            config,
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn set_config(&mut self, config: Value) {
        self.config = config;
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    pub fn set_dependencies(&mut self, dependencies: BTreeSet<String>) {
        self.dependencies = dependencies;
    }

    /// Add a dependency on another instance. Returns false if it was already present.
    pub fn add_dependency(&mut self, instance_name: &str) -> bool {
        self.dependencies.insert(instance_name.to_string())
    }

    /// Checks the instance name, that the parameters are a JSON object, and
    /// that every dependency is a valid name other than this instance's own.
    pub fn is_valid(&self) -> bool {
        if !validate_instance_name(&self.name) {
            return false;
        }

        if !self.config.is_object() {
            return false;
        }

        self.dependencies
            .iter()
            .all(|dependency| validate_instance_name(dependency) && *dependency != self.name)
    }
}
