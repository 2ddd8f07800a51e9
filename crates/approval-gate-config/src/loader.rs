//! Loading and validating a `GateConfig`.

use std::path::Path;

use tracing::debug;

use approval_gate_contracts::error::{GateError, GateResult};

use crate::settings::GateConfig;

impl GateConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `GateError::Config` if the TOML is malformed, does not match
    /// the `GateConfig` schema, or fails validation.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        let config: GateConfig = toml::from_str(s).map_err(|e| GateError::Config {
            reason: format!("failed to parse gate TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            path = %config.webhook.path,
            resource = %config.resource.gvk(),
            disallow_unknown_fields = config.webhook.disallow_unknown_fields,
            "gate configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as gate configuration.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> GateResult<()> {
        if !self.webhook.path.starts_with('/') {
            return Err(GateError::Config {
                reason: format!("webhook path '{}' must start with '/'", self.webhook.path),
            });
        }
        let resource = &self.resource;
        for (field, value) in [
            ("group", &resource.group),
            ("version", &resource.version),
            ("kind", &resource.kind),
        ] {
            if value.is_empty() {
                return Err(GateError::Config {
                    reason: format!("resource {field} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
