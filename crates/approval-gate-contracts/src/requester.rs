//! The authenticated actor behind an admission request.

use std::collections::BTreeSet;

use crate::admission::UserInfo;

/// Identity and group memberships, captured once per request.
///
/// The engine never looks group membership up itself; whatever the transport
/// put here is taken as fact for the duration of one decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requester {
    pub username: String,
    pub groups: BTreeSet<String>,
}

impl Requester {
    pub fn new<I, S>(username: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

impl From<&UserInfo> for Requester {
    fn from(info: &UserInfo) -> Self {
        Self::new(info.username.clone(), info.groups.iter().cloned())
    }
}
