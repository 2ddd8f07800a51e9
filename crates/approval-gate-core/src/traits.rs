//! Trait seams of the admission pipeline.
//!
//! - `DecisionEngine`: trusted, pure gate over an old/new task pair
//! - `DecisionLog`:    trusted sink recording every admission outcome
//!
//! The webhook's admission controller wires them together: decode, decide,
//! record, respond.

use std::sync::Arc;

use approval_gate_contracts::{
    approver::TaskState,
    decision::{Decision, DecisionRecord},
    error::GateResult,
    requester::Requester,
};

/// Decides whether a proposed update to an approval task is admissible.
///
/// Implementations must be deterministic and free of I/O: the same
/// arguments always produce the same `Decision`.
pub trait DecisionEngine: Send + Sync {
    fn decide(&self, old: &TaskState, new: &TaskState, requester: &Requester) -> Decision;
}

/// Append-only record of admission outcomes.
///
/// A failed write is fatal for the request being admitted.
pub trait DecisionLog: Send + Sync {
    /// Append one outcome. Records are never modified once written.
    fn record(&self, entry: &DecisionRecord) -> GateResult<()>;
}

/// A log shared between the controller and whoever reads it back.
impl<L: DecisionLog + ?Sized> DecisionLog for Arc<L> {
    fn record(&self, entry: &DecisionRecord) -> GateResult<()> {
        (**self).record(entry)
    }
}
