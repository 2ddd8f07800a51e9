//! Wire model of the `ApprovalTask` custom resource.
//!
//! These structs mirror the JSON bodies carried in an admission request.
//! Field names follow the resource's camelCase schema. Unknown fields are
//! ignored here; strict decoding is layered on top by the webhook crate.

use serde::{Deserialize, Serialize};

/// The two kinds of approver an `ApprovalTask` may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproverType {
    User,
    Group,
}

impl ApproverType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
        }
    }

    /// `None` for anything other than the two exact type names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "User" => Some(Self::User),
            "Group" => Some(Self::Group),
            _ => None,
        }
    }
}

/// One decision recorded by a named individual inside a group approver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub name: String,
    #[serde(default)]
    pub input: String,
}

/// One line item of `spec.approvers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverDetails {
    pub name: String,

    #[serde(default)]
    pub input: String,

    /// Kept verbatim. Absent or empty means `User`.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub approver_type: String,

    /// Individual decisions inside a `Group` approver.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserDetails>,
}

impl ApproverDetails {
    /// The type name with the `User` default applied.
    pub fn defaulted_type(&self) -> &str {
        if self.approver_type.is_empty() {
            ApproverType::User.as_str()
        } else {
            &self.approver_type
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTaskSpec {
    #[serde(default)]
    pub approvers: Vec<ApproverDetails>,

    #[serde(default)]
    pub number_of_approvals_required: usize,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberState {
    pub name: String,
    #[serde(default)]
    pub response: String,
}

/// A response already counted towards the approval threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproverState {
    pub name: String,

    #[serde(rename = "type", default)]
    pub approver_type: String,

    #[serde(default)]
    pub response: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_members: Vec<GroupMemberState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTaskStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approvers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approvers_response: Vec<ApproverState>,

    /// `pending`, `approved` or `rejected`; empty before the controller has
    /// touched the task.
    #[serde(default)]
    pub state: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

/// A full `ApprovalTask` object body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTask {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    /// Object metadata. Only `name` and `namespace` are ever read.
    #[serde(default)]
    pub metadata: serde_json::Value,

    #[serde(default)]
    pub spec: ApprovalTaskSpec,

    #[serde(default)]
    pub status: ApprovalTaskStatus,
}

impl ApprovalTask {
    /// `namespace/name` when both are present, used as the log subject.
    pub fn qualified_name(&self) -> String {
        let field = |key: &str| {
            self.metadata
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let name = field("name");
        match field("namespace") {
            ns if ns.is_empty() => name,
            ns => format!("{ns}/{name}"),
        }
    }
}
