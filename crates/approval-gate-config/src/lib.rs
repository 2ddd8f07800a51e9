//! # approval-gate-config
//!
//! TOML configuration for the approval-gate admission webhook.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use approval_gate_config::GateConfig;
//!
//! let config = GateConfig::from_file(Path::new("config/approval-gate.toml"))?;
//! ```
//!
//! Every key is optional; missing keys take the stock `ApprovalTask`
//! webhook values.

pub mod loader;
pub mod settings;

pub use settings::{GateConfig, ResourceSettings, WebhookSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use approval_gate_contracts::{admission::GroupVersionKind, error::GateError};

    use crate::GateConfig;

    const SHIPPED_CONFIG: &str = include_str!("../../../config/approval-gate.toml");

    #[test]
    fn shipped_config_matches_defaults() {
        let config = GateConfig::from_toml_str(SHIPPED_CONFIG).unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = GateConfig::from_toml_str("").unwrap();

        assert_eq!(config, GateConfig::default());
        assert_eq!(config.webhook.path, "/approvaltask-validation");
        assert!(config.webhook.disallow_unknown_fields);
        assert_eq!(
            config.resource.gvk(),
            GroupVersionKind::new("openshift-pipelines.org", "v1alpha1", "ApprovalTask")
        );
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let toml = r#"
            [webhook]
            path = "/validate"
            disallow_unknown_fields = false
        "#;

        let config = GateConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.webhook.path, "/validate");
        assert!(!config.webhook.disallow_unknown_fields);
        assert_eq!(config.webhook.name, GateConfig::default().webhook.name);
        assert_eq!(config.resource.kind, "ApprovalTask");
    }

    #[test]
    fn relative_path_is_rejected() {
        let toml = r#"
            [webhook]
            path = "validate"
        "#;

        match GateConfig::from_toml_str(toml) {
            Err(GateError::Config { reason }) => {
                assert!(reason.contains("must start with '/'"), "unexpected reason: {reason}");
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn empty_resource_kind_is_rejected() {
        let toml = r#"
            [resource]
            kind = ""
        "#;

        match GateConfig::from_toml_str(toml) {
            Err(GateError::Config { reason }) => assert!(reason.contains("kind")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = GateConfig::from_toml_str("this is not valid toml ][[[");

        match result {
            Err(GateError::Config { reason }) => {
                assert!(
                    reason.contains("failed to parse gate TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = GateConfig::from_file(std::path::Path::new("/nonexistent/approval-gate.toml"));
        assert!(matches!(result, Err(GateError::Config { .. })));
    }
}
