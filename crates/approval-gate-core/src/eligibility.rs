//! Eligibility: may the requester act on this task at all?
//!
//! Checked against the *old* task state, before any change is inspected.
//! A closed task is refused first, regardless of who is asking.

use tracing::debug;

use approval_gate_contracts::{
    approver::{ApproverEntry, ApproverKind, TaskState},
    decision::DenyReason,
    requester::Requester,
};

/// Group membership as the engine understands it: the group name is one of
/// the requester's groups, or the requester is listed among the members.
///
/// Always false for entries that are not groups.
pub fn is_group_member(entry: &ApproverEntry, requester: &Requester) -> bool {
    match &entry.kind {
        ApproverKind::Group { members } => {
            requester.in_group(&entry.name)
                || members.iter().any(|m| m.name == requester.username)
        }
        ApproverKind::User | ApproverKind::Unrecognized { .. } => false,
    }
}

/// True if `entry` designates the requester, directly or through a group.
pub fn designates(entry: &ApproverEntry, requester: &Requester) -> bool {
    match entry.kind {
        ApproverKind::User => entry.name == requester.username,
        ApproverKind::Group { .. } => is_group_member(entry, requester),
        ApproverKind::Unrecognized { .. } => false,
    }
}

/// Returns the denial reason when the requester may not act on `task`.
pub fn check_eligibility(task: &TaskState, requester: &Requester) -> Result<(), DenyReason> {
    if task.is_closed() {
        return Err(DenyReason::TaskClosed);
    }

    // No approvers configured means no restriction.
    if task.approvers.is_empty() {
        debug!(
            username = %requester.username,
            "approver list is empty; requester is eligible by default"
        );
        return Ok(());
    }

    if task.approvers.iter().any(|entry| designates(entry, requester)) {
        Ok(())
    } else {
        Err(DenyReason::NotAnApprover)
    }
}

pub fn is_eligible(task: &TaskState, requester: &Requester) -> bool {
    check_eligibility(task, requester).is_ok()
}
