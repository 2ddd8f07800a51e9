//! Decision, denial reason and located-change types.
//!
//! The engine consumes two `TaskState`s and a `Requester` and produces a
//! `Decision`. Every denial carries a `DenyReason` whose `Display` text is the
//! exact message returned to the API client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::InvalidInputValue;

/// The two legal terminal values of an `input` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalInput {
    Approve,
    Reject,
}

impl ApprovalInput {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for ApprovalInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an update was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DenyReason {
    /// The request body could not be decoded. Never produced by the engine.
    #[error("{reason}")]
    Malformed { reason: String },

    /// The task is approved, rejected, or has met its threshold.
    #[error("ApprovalTask has already reached its final state")]
    TaskClosed,

    /// The requester matches no approver entry.
    #[error("User does not exist in the approval list")]
    NotAnApprover,

    /// The requester targeted their own entry with an unsupported value.
    #[error("Invalid input change: {0}")]
    InvalidInput(InvalidInputValue),

    /// Nothing of the requester's changed, or something beyond it did.
    #[error("User can only update their own approval input")]
    OutOfScope,
}

impl DenyReason {
    /// Only a bad value can succeed on resubmission with a corrected body.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// The verdict for one proposed update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn deny(reason: DenyReason) -> Self {
        Self::Deny { reason }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The denial message, `None` when allowed.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => Some(reason.to_string()),
        }
    }

    pub fn reason(&self) -> Option<&DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => Some(reason),
        }
    }
}

/// Which of the requester's decision values an update touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeTarget {
    /// The `input` of a `User` entry.
    UserInput,
    /// The group-level `input` of a `Group` entry.
    GroupInput,
    /// The requester added themselves as a member at `position` of the new list.
    MemberAdded { position: usize },
    /// The requester's existing member entry at `position` of the new list.
    MemberInput { position: usize },
}

/// The single located change: approver index, target, and validated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSite {
    pub index: usize,
    pub target: ChangeTarget,
    pub value: ApprovalInput,
}

/// One admission outcome, as written to the decision log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The admission request uid.
    pub request_uid: Uuid,
    /// `namespace/name` of the task, empty when the body could not be decoded.
    pub task: String,
    pub requester: String,
    pub decision: Decision,
    pub timestamp: DateTime<Utc>,
}
