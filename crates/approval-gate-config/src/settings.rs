//! Configuration schema.
//!
//! A `GateConfig` is deserialized from TOML. Every field has a default, so an
//! empty document yields the stock webhook for `ApprovalTask` resources.
//!
//! Example:
//! ```toml
//! [webhook]
//! name = "validation.webhook.manual-approval.openshift-pipelines.org"
//! path = "/approvaltask-validation"
//! disallow_unknown_fields = true
//!
//! [resource]
//! group = "openshift-pipelines.org"
//! version = "v1alpha1"
//! kind = "ApprovalTask"
//! ```

use serde::{Deserialize, Serialize};

use approval_gate_contracts::admission::GroupVersionKind;

/// How the webhook endpoint is exposed and how strictly it decodes bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Name of the registered validating webhook.
    pub name: String,

    /// HTTP path the webhook is served on. Must start with `/`.
    pub path: String,

    /// Reject object bodies carrying fields outside the `ApprovalTask` schema.
    pub disallow_unknown_fields: bool,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            name: "validation.webhook.manual-approval.openshift-pipelines.org".to_string(),
            path: "/approvaltask-validation".to_string(),
            disallow_unknown_fields: true,
        }
    }
}

/// The resource kind the webhook expects to be called for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            group: "openshift-pipelines.org".to_string(),
            version: "v1alpha1".to_string(),
            kind: "ApprovalTask".to_string(),
        }
    }
}

impl ResourceSettings {
    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::new(&self.group, &self.version, &self.kind)
    }
}

/// The top-level structure deserialized from a TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub webhook: WebhookSettings,
    pub resource: ResourceSettings,
}
