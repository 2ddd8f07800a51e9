//! # approval-gate-contracts
//!
//! Shared types, wire models, and error contracts for the approval-gate
//! admission webhook.
//!
//! All crates in the workspace import from here. No policy lives in this
//! crate, only data definitions and their conversions.

pub mod admission;
pub mod approver;
pub mod decision;
pub mod error;
pub mod requester;
pub mod task;
