//! Decoding admission object bodies into `ApprovalTask`s.
//!
//! Decoding runs in up to two phases:
//!
//! 1. **Structural** (strict mode only): the raw JSON is validated against
//!    the embedded `ApprovalTask` schema, so unknown fields are rejected.
//! 2. **Typed**: the JSON is deserialized into the wire model.
//!
//! An absent or empty body decodes to an empty task, the same as a create
//! request with no prior object.

use std::fmt;

use tracing::{debug, warn};

use approval_gate_contracts::{
    error::{GateError, GateResult},
    task::ApprovalTask,
};

use crate::schema::approval_task_schema;

/// Which side of the update a body belongs to; used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Old,
    New,
}

impl fmt::Display for ObjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Old => f.write_str("old"),
            Self::New => f.write_str("new"),
        }
    }
}

pub struct TaskDecoder {
    /// Present when unknown fields are disallowed.
    validator: Option<jsonschema::Validator>,
}

impl TaskDecoder {
    /// Ignore fields outside the wire model.
    pub fn lenient() -> Self {
        Self { validator: None }
    }

    /// Reject bodies with fields outside the `ApprovalTask` schema.
    pub fn strict() -> GateResult<Self> {
        let validator =
            jsonschema::validator_for(&approval_task_schema()).map_err(|e| GateError::Config {
                reason: format!("invalid ApprovalTask schema: {e}"),
            })?;
        Ok(Self {
            validator: Some(validator),
        })
    }

    pub fn new(disallow_unknown_fields: bool) -> GateResult<Self> {
        if disallow_unknown_fields {
            Self::strict()
        } else {
            Ok(Self::lenient())
        }
    }

    pub fn is_strict(&self) -> bool {
        self.validator.is_some()
    }

    pub fn decode(&self, body: Option<&[u8]>, role: ObjectRole) -> GateResult<ApprovalTask> {
        let bytes = match body {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                debug!(%role, "object body absent; using an empty task");
                return Ok(ApprovalTask::default());
            }
        };

        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| decode_error(role, e))?;

        if let Some(validator) = &self.validator {
            let violations = validator
                .iter_errors(&value)
                .map(|error| format!("{} at '{}'", error, error.instance_path))
                .collect::<Vec<_>>();
            if !violations.is_empty() {
                let summary = violations.join("; ");
                warn!(%role, violations = %summary, "object body violates ApprovalTask schema");
                return Err(decode_error(role, summary));
            }
        }

        serde_json::from_value(value).map_err(|e| decode_error(role, e))
    }
}

impl fmt::Debug for TaskDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDecoder")
            .field("strict", &self.is_strict())
            .finish()
    }
}

fn decode_error(role: ObjectRole, cause: impl fmt::Display) -> GateError {
    GateError::Decode {
        reason: format!("cannot decode incoming {role} object: {cause}"),
    }
}
