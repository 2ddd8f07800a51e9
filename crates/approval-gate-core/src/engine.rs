//! The approval-task decision engine.
//!
//! `decide` runs the admission checks in a fixed order and returns the first
//! denial it meets:
//!
//!   Eligibility → Change location (+ value validation) → Isolation → Allow
//!
//! The engine holds no state. Two calls with the same arguments always
//! return the same `Decision`.

use tracing::{debug, info, warn};

use approval_gate_contracts::{
    approver::TaskState,
    decision::{Decision, DenyReason},
    requester::Requester,
};

use crate::{
    eligibility::check_eligibility, isolation::only_requester_changed, locator::locate_change,
    traits::DecisionEngine,
};

/// The stateless `DecisionEngine` for approval tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalGate;

impl ApprovalGate {
    pub fn new() -> Self {
        Self
    }
}

impl DecisionEngine for ApprovalGate {
    fn decide(&self, old: &TaskState, new: &TaskState, requester: &Requester) -> Decision {
        decide(old, new, requester)
    }
}

/// Decide whether `requester` may turn `old` into `new`.
///
/// # Pipeline
///
/// 1. `old` must be open and list the requester (`TaskClosed` / `NotAnApprover`)
/// 2. Locate the requester's changed value; a bad value is `InvalidInput`
/// 3. No located change is `OutOfScope`
/// 4. Anything else changed is `OutOfScope`
/// 5. Allow
pub fn decide(old: &TaskState, new: &TaskState, requester: &Requester) -> Decision {
    debug!(
        username = %requester.username,
        approvers = old.approvers.len(),
        approvals_received = old.approvals_received,
        approvals_required = old.approvals_required,
        "evaluating approval task update"
    );

    if let Err(reason) = check_eligibility(old, requester) {
        return deny(requester, reason);
    }

    let site = match locate_change(&old.approvers, &new.approvers, requester) {
        Ok(Some(site)) => site,
        Ok(None) => {
            debug!(username = %requester.username, "no change to the requester's input located");
            return deny(requester, DenyReason::OutOfScope);
        }
        Err(invalid) => return deny(requester, DenyReason::InvalidInput(invalid)),
    };

    debug!(
        username = %requester.username,
        index = site.index,
        target = ?site.target,
        value = %site.value,
        "located requester's change"
    );

    if !only_requester_changed(&old.approvers, &new.approvers, requester, &site) {
        return deny(requester, DenyReason::OutOfScope);
    }

    info!(
        username = %requester.username,
        index = site.index,
        value = %site.value,
        "approval task update admitted"
    );
    Decision::Allow
}

fn deny(requester: &Requester, reason: DenyReason) -> Decision {
    warn!(
        username = %requester.username,
        reason = %reason,
        retryable = reason.is_retryable(),
        "approval task update denied"
    );
    Decision::deny(reason)
}

// ── Tests ────────────────────────────────────────────────────────────────────
