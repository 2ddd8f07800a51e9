//! Reference approval scenarios.
//!
//! Each scenario is an old/new task pair plus a requester, run through the
//! `ApprovalGate` engine and recorded in an in-memory decision log. The run
//! ends by verifying the log's hash chain.

use chrono::Utc;
use uuid::Uuid;

use approval_gate_audit::InMemoryDecisionLog;
use approval_gate_contracts::{
    approver::{ApproverEntry, MemberEntry, TaskState},
    decision::{Decision, DecisionRecord},
    error::GateResult,
    requester::Requester,
};
use approval_gate_core::{
    traits::{DecisionEngine, DecisionLog},
    ApprovalGate,
};

struct Scenario {
    title: &'static str,
    old: TaskState,
    new: TaskState,
    requester: Requester,
    expect_allowed: bool,
}

fn scenarios() -> Vec<Scenario> {
    let alice_pending = || TaskState::pending(vec![ApproverEntry::user("alice", "")], 1);
    let alice_approved = || TaskState::pending(vec![ApproverEntry::user("alice", "approve")], 1);

    vec![
        Scenario {
            title: "approver records their own approval",
            old: alice_pending(),
            new: alice_approved(),
            requester: Requester::new("alice", Vec::<String>::new()),
            expect_allowed: true,
        },
        Scenario {
            title: "stranger approves on someone's behalf",
            old: alice_pending(),
            new: alice_approved(),
            requester: Requester::new("bob", Vec::<String>::new()),
            expect_allowed: false,
        },
        Scenario {
            title: "approver also answers for a colleague",
            old: TaskState::pending(
                vec![ApproverEntry::user("alice", ""), ApproverEntry::user("bob", "")],
                2,
            ),
            new: TaskState::pending(
                vec![
                    ApproverEntry::user("alice", "approve"),
                    ApproverEntry::user("bob", "reject"),
                ],
                2,
            ),
            requester: Requester::new("alice", Vec::<String>::new()),
            expect_allowed: false,
        },
        Scenario {
            title: "group member adds their own approval",
            old: TaskState::pending(
                vec![ApproverEntry::group("qa", "", vec![MemberEntry::new("carol", "")])],
                1,
            ),
            new: TaskState::pending(
                vec![ApproverEntry::group(
                    "qa",
                    "",
                    vec![MemberEntry::new("carol", "approve")],
                )],
                1,
            ),
            requester: Requester::new("carol", ["qa"]),
            expect_allowed: true,
        },
        Scenario {
            title: "update after the threshold was met",
            old: TaskState {
                approvals_received: 1,
                ..alice_pending()
            },
            new: alice_approved(),
            requester: Requester::new("alice", Vec::<String>::new()),
            expect_allowed: false,
        },
        Scenario {
            title: "approver answers with an unsupported value",
            old: alice_pending(),
            new: TaskState::pending(vec![ApproverEntry::user("alice", "maybe")], 1),
            requester: Requester::new("alice", Vec::<String>::new()),
            expect_allowed: false,
        },
    ]
}

/// Run every scenario and return how many produced an unexpected outcome.
pub fn run_all() -> GateResult<usize> {
    let engine = ApprovalGate::new();
    let log = InMemoryDecisionLog::new("gatectl-scenarios");
    let mut mismatches = 0;

    for (n, scenario) in scenarios().into_iter().enumerate() {
        let decision = engine.decide(&scenario.old, &scenario.new, &scenario.requester);
        let matched = decision.is_allowed() == scenario.expect_allowed;
        if !matched {
            mismatches += 1;
        }

        println!(
            "[{}] Scenario {}: {}",
            if matched { "ok" } else { "MISMATCH" },
            n + 1,
            scenario.title
        );
        println!("      requester: {}", scenario.requester.username);
        println!("      outcome:   {}", describe(&decision));

        log.record(&DecisionRecord {
            request_uid: Uuid::new_v4(),
            task: format!("scenarios/scenario-{}", n + 1),
            requester: scenario.requester.username.clone(),
            decision,
            timestamp: Utc::now(),
        })?;
    }

    let trail = log.export()?;
    println!();
    println!(
        "Decision log: {} entries ({} allowed, {} denied), chain {}",
        trail.entries.len(),
        trail.allowed(),
        trail.denied(),
        if log.verify_integrity() { "intact" } else { "BROKEN" }
    );
    println!("Head digest:  {}", trail.head);

    Ok(mismatches)
}

fn describe(decision: &Decision) -> String {
    match decision.message() {
        None => "allowed".to_string(),
        Some(message) => format!("denied: {message}"),
    }
}
