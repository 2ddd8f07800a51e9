//! Isolation: nothing but the located change may differ.
//!
//! Every old entry is compared with its positional counterpart. The located
//! `ChangeSite` is the only decision value allowed to move, and it already
//! belongs to the requester. In particular:
//!
//! - another identity's `User` input stays byte-identical;
//! - a group's own input only moves when it is the located site, which
//!   requires the requester to be a member;
//! - group members present in both lists keep their input, except the
//!   requester at the located site;
//! - a member name new to the list must be the requester, a member of that
//!   group, added at the located site.
//!
//! Entries of an unrecognized type keep their input. Entries may not be
//! added, removed, renamed or retyped. Members dropped
//! from a group list are not inspected.

use tracing::debug;

use approval_gate_contracts::{
    approver::{ApproverEntry, ApproverKind},
    decision::{ChangeSite, ChangeTarget},
    requester::Requester,
};

use crate::eligibility::is_group_member;

/// True when the update touches `site` and nothing else.
pub fn only_requester_changed(
    old: &[ApproverEntry],
    new: &[ApproverEntry],
    requester: &Requester,
    site: &ChangeSite,
) -> bool {
    if old.len() != new.len() {
        debug!(
            old_len = old.len(),
            new_len = new.len(),
            "approver list length changed"
        );
        return false;
    }

    for (index, (before, after)) in old.iter().zip(new).enumerate() {
        let at_site = (site.index == index).then_some(site.target);
        if let Err(violation) = check_entry(before, after, requester, at_site) {
            debug!(
                index,
                approver = %before.name,
                username = %requester.username,
                violation,
                "update changes more than the requester's own input"
            );
            return false;
        }
    }

    true
}

/// `at_site` is the located target when this entry holds the change.
fn check_entry(
    before: &ApproverEntry,
    after: &ApproverEntry,
    requester: &Requester,
    at_site: Option<ChangeTarget>,
) -> Result<(), &'static str> {
    if before.name != after.name || before.type_name() != after.type_name() {
        return Err("approver entry renamed or retyped");
    }

    if before.input != after.input {
        let expected = match before.kind {
            ApproverKind::User => Some(ChangeTarget::UserInput),
            ApproverKind::Group { .. } => Some(ChangeTarget::GroupInput),
            ApproverKind::Unrecognized { .. } => None,
        };
        if expected.is_none() || at_site != expected {
            return Err("approver input changed");
        }
    }

    if !before.is_group() {
        return Ok(());
    }

    let username = requester.username.as_str();

    for member in before.members() {
        let Some(current) = after.member_input(&member.name) else {
            continue;
        };
        let previous = before.member_input(&member.name).unwrap_or_default();
        if current == previous {
            continue;
        }
        let own_change = member.name == username
            && matches!(at_site, Some(ChangeTarget::MemberInput { .. }));
        if !own_change {
            return Err("group member input changed");
        }
    }

    for member in after.members() {
        if before.member_position(&member.name).is_some() {
            continue;
        }
        if member.name != username {
            return Err("group member added for someone else");
        }
        if !is_group_member(before, requester) {
            return Err("requester added to a group they do not belong to");
        }
        if !matches!(at_site, Some(ChangeTarget::MemberAdded { .. })) {
            return Err("group member added outside the located change");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approval_gate_contracts::{approver::MemberEntry, decision::ApprovalInput};

    use super::*;

    fn site(index: usize, target: ChangeTarget) -> ChangeSite {
        ChangeSite {
            index,
            target,
            value: ApprovalInput::Approve,
        }
    }

    fn alice() -> Requester {
        Requester::new("alice", Vec::<String>::new())
    }

    #[test]
    fn single_own_user_change_is_isolated() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "")];
        let new = vec![ApproverEntry::user("alice", "approve"), ApproverEntry::user("bob", "")];

        assert!(only_requester_changed(&old, &new, &alice(), &site(0, ChangeTarget::UserInput)));
    }

    #[test]
    fn other_user_change_breaks_isolation() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "")];
        let new = vec![
            ApproverEntry::user("alice", "approve"),
            ApproverEntry::user("bob", "reject"),
        ];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(0, ChangeTarget::UserInput)));
    }

    #[test]
    fn second_own_value_breaks_isolation() {
        let old = vec![
            ApproverEntry::user("alice", ""),
            ApproverEntry::group("dev", "", vec![MemberEntry::new("alice", "")]),
        ];
        let new = vec![
            ApproverEntry::user("alice", "approve"),
            ApproverEntry::group("dev", "", vec![MemberEntry::new("alice", "approve")]),
        ];

        let requester = Requester::new("alice", ["dev"]);
        assert!(!only_requester_changed(&old, &new, &requester, &site(0, ChangeTarget::UserInput)));
    }

    #[test]
    fn non_member_group_input_change_breaks_isolation() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::group("ops", "", vec![])];
        let new = vec![
            ApproverEntry::user("alice", "approve"),
            ApproverEntry::group("ops", "approve", vec![]),
        ];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(0, ChangeTarget::UserInput)));
    }

    #[test]
    fn adding_someone_else_to_a_group_breaks_isolation() {
        let requester = Requester::new("carol", ["qa"]);
        let old = vec![ApproverEntry::group("qa", "", vec![])];
        let new = vec![ApproverEntry::group(
            "qa",
            "",
            vec![MemberEntry::new("carol", "approve"), MemberEntry::new("eve", "approve")],
        )];

        assert!(!only_requester_changed(
            &old,
            &new,
            &requester,
            &site(0, ChangeTarget::MemberAdded { position: 0 })
        ));
    }

    #[test]
    fn removed_member_is_not_inspected() {
        let requester = Requester::new("carol", ["qa"]);
        let old = vec![ApproverEntry::group(
            "qa",
            "",
            vec![MemberEntry::new("carol", ""), MemberEntry::new("dave", "reject")],
        )];
        let new = vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("carol", "approve")])];

        assert!(only_requester_changed(
            &old,
            &new,
            &requester,
            &site(0, ChangeTarget::MemberInput { position: 0 })
        ));
    }

    #[test]
    fn appended_entry_breaks_isolation() {
        let old = vec![ApproverEntry::user("alice", "")];
        let new = vec![ApproverEntry::user("alice", "approve"), ApproverEntry::user("mallory", "")];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(0, ChangeTarget::UserInput)));
    }

    #[test]
    fn unrecognized_entry_input_change_breaks_isolation() {
        let old = vec![ApproverEntry::unrecognized("ops", "", "Team"), ApproverEntry::user("alice", "")];
        let new = vec![
            ApproverEntry::unrecognized("ops", "approve", "Team"),
            ApproverEntry::user("alice", "approve"),
        ];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(1, ChangeTarget::UserInput)));
    }

    #[test]
    fn requester_added_to_a_foreign_group_breaks_isolation() {
        let old = vec![ApproverEntry::group("ops", "", vec![]), ApproverEntry::user("alice", "")];
        let new = vec![
            ApproverEntry::group("ops", "", vec![MemberEntry::new("alice", "approve")]),
            ApproverEntry::user("alice", "approve"),
        ];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(1, ChangeTarget::UserInput)));
    }

    #[test]
    fn retyped_entry_breaks_isolation() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::group("qa", "", vec![])];
        let new = vec![ApproverEntry::user("alice", "approve"), ApproverEntry::user("qa", "")];

        assert!(!only_requester_changed(&old, &new, &alice(), &site(0, ChangeTarget::UserInput)));
    }
}
