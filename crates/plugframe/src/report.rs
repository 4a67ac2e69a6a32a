use std::fmt;

use plugframe_core::{ConfigValidationError, FrameworkConfig};

/// Result of checking a config document, one line per plugin
#[derive(Debug)]
pub struct CheckReport {
    lines: Vec<String>,
    valid: bool,
}

impl CheckReport {
    pub fn new(config: &FrameworkConfig) -> Self {
        let mut lines = Vec::new();
        let mut plugins_valid = true;

        for plugin in config.plugins() {
            let path = plugin.file_path().display();
            match plugin.validate() {
                Ok(()) => lines.push(format!(
                    "OK {} ({}, {} instance(s))",
                    path,
                    plugin.version_spec(),
                    plugin.instance_configs().len()
                )),
                Err(e) => {
                    plugins_valid = false;
                    lines.push(format!("INVALID {}: {}", path, e));
                }
            }
        }

        // Per-plugin failures are already listed above
        let valid = match config.validate() {
            Ok(()) => true,
            Err(ConfigValidationError::InvalidPlugin { .. }) => false,
            Err(e) => {
                lines.push(format!("INVALID framework: {}", e));
                false
            }
        };

        if config.plugins().is_empty() {
            lines.push("No plugins configured".to_string());
        }

        Self {
            lines,
            valid: valid && plugins_valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
