//! Error types for the approval-gate admission pipeline.
//!
//! Fallible infrastructure operations (decoding, configuration, decision
//! logging) return `GateResult<T>`. Policy outcomes are never errors: a denied
//! update is a `Decision`, not a `GateError`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A new `input` value outside the accepted domain.
///
/// Produced by the value validator when the requester targets one of their
/// own decision fields with anything other than `approve` or `reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("invalid input value: '{value}'. Supported values are 'approve' or 'reject'")]
pub struct InvalidInputValue {
    /// The rejected literal, verbatim.
    pub value: String,
}

impl InvalidInputValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// The unified error type for the approval-gate crates.
#[derive(Debug, Error)]
pub enum GateError {
    /// An admission object body could not be decoded into an `ApprovalTask`.
    #[error("{reason}")]
    Decode { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The decision log could not persist an admission outcome.
    ///
    /// Fatal for the request being admitted: an outcome that cannot be
    /// recorded is not allowed through.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

/// Convenience alias used throughout the approval-gate crates.
pub type GateResult<T> = Result<T, GateError>;
