//! Change location: which of the requester's decision values did this
//! update touch?
//!
//! Old and new approver lists are paired by index. The scan walks the *old*
//! list and stops at the first entry that settles the question:
//!
//! 1. A `User` entry named after the requester always settles it, changed
//!    or not, no later entry is inspected.
//! 2. A `Group` entry the requester belongs to settles it only when one of
//!    the requester's values in it changed: the group input, a self-added
//!    member entry, or the requester's existing member input. Otherwise the
//!    scan moves on.
//!
//! Entries of an unrecognized type are skipped.
//!
//! The new value of the located change must be `approve` or `reject`; the
//! validation error is returned instead of a site. Values of entries that
//! are not the requester's are never validated here.

use tracing::debug;

use approval_gate_contracts::{
    approver::{ApproverEntry, ApproverKind, MemberEntry},
    decision::{ChangeSite, ChangeTarget},
    error::InvalidInputValue,
    requester::Requester,
};

use crate::{eligibility::is_group_member, value::validate_input};

/// Locate the requester's single changed value, if any.
///
/// A `new` list shorter than `old` leaves the trailing old entries without a
/// counterpart; those are treated as unchanged here and reported by the
/// isolation check instead.
pub fn locate_change(
    old: &[ApproverEntry],
    new: &[ApproverEntry],
    requester: &Requester,
) -> Result<Option<ChangeSite>, InvalidInputValue> {
    for (index, before) in old.iter().enumerate() {
        let after = new.get(index);

        match &before.kind {
            ApproverKind::User => {
                if before.name != requester.username {
                    continue;
                }
                debug!(index, username = %requester.username, "requester's user entry found");
                return locate_in_user(index, before, after);
            }
            ApproverKind::Group { .. } => {
                if !is_group_member(before, requester) {
                    continue;
                }
                let Some(after) = after else {
                    continue;
                };
                if let Some(site) = locate_in_group(index, before, after, requester)? {
                    return Ok(Some(site));
                }
            }
            ApproverKind::Unrecognized { .. } => continue,
        }
    }

    Ok(None)
}

fn locate_in_user(
    index: usize,
    before: &ApproverEntry,
    after: Option<&ApproverEntry>,
) -> Result<Option<ChangeSite>, InvalidInputValue> {
    match after {
        Some(after) if after.name == before.name && after.input != before.input => {
            let value = validate_input(&after.input)?;
            Ok(Some(ChangeSite {
                index,
                target: ChangeTarget::UserInput,
                value,
            }))
        }
        _ => Ok(None),
    }
}

fn locate_in_group(
    index: usize,
    before: &ApproverEntry,
    after: &ApproverEntry,
    requester: &Requester,
) -> Result<Option<ChangeSite>, InvalidInputValue> {
    if before.input != after.input {
        let value = validate_input(&after.input)?;
        return Ok(Some(ChangeSite {
            index,
            target: ChangeTarget::GroupInput,
            value,
        }));
    }

    let username = requester.username.as_str();
    let target = match (before.member_input(username), find_member(after, username)) {
        (None, Some((position, added))) => Some((ChangeTarget::MemberAdded { position }, added)),
        (Some(previous), Some((position, current))) if current.input != previous => {
            Some((ChangeTarget::MemberInput { position }, current))
        }
        _ => None,
    };

    match target {
        Some((target, member)) => {
            let value = validate_input(&member.input)?;
            Ok(Some(ChangeSite { index, target, value }))
        }
        None => Ok(None),
    }
}

fn find_member<'a>(entry: &'a ApproverEntry, name: &str) -> Option<(usize, &'a MemberEntry)> {
    entry.members().iter().enumerate().find(|(_, m)| m.name == name)
}

#[cfg(test)]
mod tests {
    use approval_gate_contracts::decision::ApprovalInput;

    use super::*;

    fn carol_in_qa() -> Requester {
        Requester::new("carol", ["qa"])
    }

    fn nobody() -> Vec<String> {
        Vec::new()
    }

    // ── User entries ─────────────────────────────────────────────────────────

    #[test]
    fn own_user_input_change_is_located() {
        let old = vec![ApproverEntry::user("alice", "")];
        let new = vec![ApproverEntry::user("alice", "approve")];

        let site = locate_change(&old, &new, &Requester::new("alice", nobody())).unwrap();
        assert_eq!(
            site,
            Some(ChangeSite {
                index: 0,
                target: ChangeTarget::UserInput,
                value: ApprovalInput::Approve,
            })
        );
    }

    #[test]
    fn someone_elses_user_change_is_not_located() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "")];
        let new = vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "reject")];

        let site = locate_change(&old, &new, &Requester::new("alice", nobody())).unwrap();
        assert_eq!(site, None);
    }

    #[test]
    fn invalid_value_on_own_entry_is_an_error() {
        let old = vec![ApproverEntry::user("alice", "")];
        let new = vec![ApproverEntry::user("alice", "maybe")];

        let err = locate_change(&old, &new, &Requester::new("alice", nobody())).unwrap_err();
        assert_eq!(err.value, "maybe");
    }

    #[test]
    fn invalid_value_on_another_entry_is_not_validated() {
        let old = vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "")];
        let new = vec![ApproverEntry::user("alice", "approve"), ApproverEntry::user("bob", "maybe")];

        let site = locate_change(&old, &new, &Requester::new("alice", nobody())).unwrap();
        assert_eq!(site.map(|s| s.index), Some(0));
    }

    #[test]
    fn renamed_entry_is_not_an_input_change() {
        let old = vec![ApproverEntry::user("alice", "")];
        let new = vec![ApproverEntry::user("mallory", "approve")];

        assert_eq!(locate_change(&old, &new, &Requester::new("alice", nobody())), Ok(None));
    }

    #[test]
    fn first_user_match_short_circuits_the_scan() {
        // alice's user entry is unchanged, so her group member change at
        // index 1 is never looked at.
        let old = vec![
            ApproverEntry::user("alice", ""),
            ApproverEntry::group("dev", "", vec![MemberEntry::new("alice", "")]),
        ];
        let new = vec![
            ApproverEntry::user("alice", ""),
            ApproverEntry::group("dev", "", vec![MemberEntry::new("alice", "approve")]),
        ];

        assert_eq!(locate_change(&old, &new, &Requester::new("alice", ["dev"])), Ok(None));
    }

    #[test]
    fn shorter_new_list_is_treated_as_absent() {
        let old = vec![ApproverEntry::user("bob", ""), ApproverEntry::user("alice", "")];
        let new = vec![ApproverEntry::user("bob", "")];

        assert_eq!(locate_change(&old, &new, &Requester::new("alice", nobody())), Ok(None));
    }

    #[test]
    fn unrecognized_entry_is_skipped() {
        let old = vec![
            ApproverEntry::unrecognized("alice", "", "Team"),
            ApproverEntry::user("alice", ""),
        ];
        let new = vec![
            ApproverEntry::unrecognized("alice", "", "Team"),
            ApproverEntry::user("alice", "approve"),
        ];

        let site = locate_change(&old, &new, &Requester::new("alice", nobody())).unwrap();
        assert_eq!(site.map(|s| s.index), Some(1));
    }

    // ── Group entries ────────────────────────────────────────────────────────

    #[test]
    fn group_input_change_by_member_is_located() {
        let old = vec![ApproverEntry::group("qa", "", vec![])];
        let new = vec![ApproverEntry::group("qa", "reject", vec![])];

        let site = locate_change(&old, &new, &carol_in_qa()).unwrap().unwrap();
        assert_eq!(site.target, ChangeTarget::GroupInput);
        assert_eq!(site.value, ApprovalInput::Reject);
    }

    #[test]
    fn group_input_change_by_non_member_is_ignored() {
        let old = vec![ApproverEntry::group("ops", "", vec![])];
        let new = vec![ApproverEntry::group("ops", "approve", vec![])];

        assert_eq!(locate_change(&old, &new, &carol_in_qa()), Ok(None));
    }

    #[test]
    fn self_add_is_located_at_new_position() {
        let old = vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("dave", "")])];
        let new = vec![ApproverEntry::group(
            "qa",
            "",
            vec![MemberEntry::new("dave", ""), MemberEntry::new("carol", "approve")],
        )];

        let site = locate_change(&old, &new, &carol_in_qa()).unwrap().unwrap();
        assert_eq!(site.target, ChangeTarget::MemberAdded { position: 1 });
        assert_eq!(site.value, ApprovalInput::Approve);
    }

    #[test]
    fn self_add_with_invalid_value_is_an_error() {
        let old = vec![ApproverEntry::group("qa", "", vec![])];
        let new = vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("carol", "yes")])];

        assert_eq!(
            locate_change(&old, &new, &carol_in_qa()),
            Err(InvalidInputValue::new("yes"))
        );
    }

    #[test]
    fn listed_member_change_is_located_without_group_claim() {
        let old = vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("carol", "")])];
        let new = vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("carol", "reject")])];

        let requester = Requester::new("carol", nobody());
        let site = locate_change(&old, &new, &requester).unwrap().unwrap();
        assert_eq!(site.target, ChangeTarget::MemberInput { position: 0 });
    }

    #[test]
    fn unchanged_group_continues_scan() {
        let old = vec![
            ApproverEntry::group("qa", "", vec![]),
            ApproverEntry::group("release", "", vec![MemberEntry::new("carol", "")]),
        ];
        let new = vec![
            ApproverEntry::group("qa", "", vec![]),
            ApproverEntry::group("release", "", vec![MemberEntry::new("carol", "approve")]),
        ];

        let site = locate_change(&old, &new, &carol_in_qa()).unwrap().unwrap();
        assert_eq!(site.index, 1);
        assert_eq!(site.target, ChangeTarget::MemberInput { position: 0 });
    }
}
