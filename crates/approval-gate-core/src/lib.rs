//! # approval-gate-core
//!
//! The pure decision engine behind the approval-task admission webhook.
//!
//! This crate provides:
//! - The two trait seams (`DecisionEngine`, `DecisionLog`)
//! - `ApprovalGate`, the stateless engine, and its building blocks:
//!   eligibility, change location, value validation and isolation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use approval_gate_core::{ApprovalGate, traits::DecisionEngine};
//!
//! let decision = ApprovalGate::new().decide(&old, &new, &requester);
//! ```

pub mod eligibility;
pub mod engine;
pub mod isolation;
pub mod locator;
pub mod traits;
pub mod value;

pub use engine::{decide, ApprovalGate};
