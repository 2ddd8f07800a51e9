//! # approval-gate-webhook
//!
//! The admission controller for `ApprovalTask` updates.
//!
//! This crate provides [`AdmissionController`], which turns an
//! `AdmissionRequest` into an `AdmissionResponse`:
//!
//! 1. **Decode**: both object bodies, strictly against the embedded
//!    `ApprovalTask` schema when unknown fields are disallowed.
//! 2. **Decide**: one call into the `DecisionEngine`.
//! 3. **Record**: the outcome is appended to the `DecisionLog`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use approval_gate_audit::InMemoryDecisionLog;
//! use approval_gate_config::GateConfig;
//! use approval_gate_core::ApprovalGate;
//! use approval_gate_webhook::AdmissionController;
//!
//! let config = GateConfig::from_file(path)?;
//! let controller = AdmissionController::new(
//!     &config,
//!     Box::new(ApprovalGate::new()),
//!     Box::new(InMemoryDecisionLog::new(&config.webhook.name)),
//! )?;
//! let response = controller.admit(&request);
//! ```

pub mod controller;
pub mod decode;
pub mod schema;

pub use controller::AdmissionController;
pub use decode::{ObjectRole, TaskDecoder};
