//! Domain view of an approval task as seen by the decision engine.
//!
//! `TaskState` is built fresh from each decoded `ApprovalTask` body. It keeps
//! only what the engine reads: the ordered approver list, the task phase and
//! the two threshold counters.

use crate::task::{ApprovalTask, ApproverDetails, ApproverType};

/// An individual's decision within a group approver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: String,
    pub input: String,
}

impl MemberEntry {
    pub fn new(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
        }
    }
}

/// What an approver entry stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproverKind {
    /// A single identity; `ApproverEntry::name` is the username.
    User,
    /// A group; `ApproverEntry::name` is the group name.
    Group { members: Vec<MemberEntry> },
    /// A `type` other than `User` or `Group`. Designates nobody.
    Unrecognized { type_name: String },
}

/// One line item of the approver list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproverEntry {
    pub name: String,
    /// The decision recorded on the entry itself (`""`, `approve`, `reject`).
    pub input: String,
    pub kind: ApproverKind,
}

impl ApproverEntry {
    pub fn user(name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            kind: ApproverKind::User,
        }
    }

    pub fn group(
        name: impl Into<String>,
        input: impl Into<String>,
        members: Vec<MemberEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            kind: ApproverKind::Group { members },
        }
    }

    pub fn unrecognized(
        name: impl Into<String>,
        input: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            kind: ApproverKind::Unrecognized {
                type_name: type_name.into(),
            },
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, ApproverKind::User)
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ApproverKind::Group { .. })
    }

    /// The wire type name, `User` for defaulted entries.
    pub fn type_name(&self) -> &str {
        match &self.kind {
            ApproverKind::User => ApproverType::User.as_str(),
            ApproverKind::Group { .. } => ApproverType::Group.as_str(),
            ApproverKind::Unrecognized { type_name } => type_name,
        }
    }

    /// Group members; always empty for anything but a `Group` entry.
    pub fn members(&self) -> &[MemberEntry] {
        match &self.kind {
            ApproverKind::Group { members } => members,
            ApproverKind::User | ApproverKind::Unrecognized { .. } => &[],
        }
    }

    /// Position of the first member named `name`.
    pub fn member_position(&self, name: &str) -> Option<usize> {
        self.members().iter().position(|m| m.name == name)
    }

    /// Input of the first member named `name`.
    pub fn member_input(&self, name: &str) -> Option<&str> {
        self.members()
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.input.as_str())
    }
}

impl From<&ApproverDetails> for ApproverEntry {
    fn from(details: &ApproverDetails) -> Self {
        match ApproverType::parse(details.defaulted_type()) {
            Some(ApproverType::User) => Self::user(&details.name, &details.input),
            Some(ApproverType::Group) => Self::group(
                &details.name,
                &details.input,
                details
                    .users
                    .iter()
                    .map(|u| MemberEntry::new(&u.name, &u.input))
                    .collect(),
            ),
            None => Self::unrecognized(&details.name, &details.input, details.defaulted_type()),
        }
    }
}

/// Task-level status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskPhase {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl TaskPhase {
    /// Map a `status.state` string. Anything other than the two terminal
    /// values, including the empty string, is still pending.
    pub fn from_state(state: &str) -> Self {
        match state {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A snapshot of an approval task at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskState {
    /// Order is significant: old and new lists are paired by index.
    pub approvers: Vec<ApproverEntry>,
    pub state: TaskPhase,
    pub approvals_received: usize,
    pub approvals_required: usize,
}

impl TaskState {
    /// A pending task with no responses recorded yet.
    pub fn pending(approvers: Vec<ApproverEntry>, approvals_required: usize) -> Self {
        Self {
            approvers,
            state: TaskPhase::Pending,
            approvals_received: 0,
            approvals_required,
        }
    }

    /// Terminal phase reached, or the threshold already met.
    pub fn is_closed(&self) -> bool {
        self.state.is_terminal() || self.approvals_received == self.approvals_required
    }
}

impl From<&ApprovalTask> for TaskState {
    fn from(task: &ApprovalTask) -> Self {
        Self {
            approvers: task.spec.approvers.iter().map(ApproverEntry::from).collect(),
            state: TaskPhase::from_state(&task.status.state),
            approvals_received: task.status.approvers_response.len(),
            approvals_required: task.spec.number_of_approvals_required,
        }
    }
}
