//! # approval-gate-audit
//!
//! Append-only, SHA-256 hash-chained log of admission decisions.
//!
//! Every outcome the webhook returns is wrapped in a `LogEntry` linked to
//! the previous one by digest. Editing any stored entry breaks the chain and
//! is caught by `verify_chain`.
//!
//! ```rust,ignore
//! use approval_gate_audit::InMemoryDecisionLog;
//! use approval_gate_core::traits::DecisionLog;
//!
//! let log = InMemoryDecisionLog::new("approvaltask-validation");
//! log.record(&record)?;
//! assert!(log.verify_integrity());
//! ```

pub mod chain;
pub mod entry;
pub mod memory;

pub use chain::{digest_entry, verify_chain};
pub use entry::{DecisionTrail, LogEntry};
pub use memory::InMemoryDecisionLog;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use approval_gate_contracts::decision::{Decision, DecisionRecord, DenyReason};
    use approval_gate_core::traits::DecisionLog;

    use super::{InMemoryDecisionLog, LogEntry};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn record(requester: &str, decision: Decision) -> DecisionRecord {
        DecisionRecord {
            request_uid: Uuid::new_v4(),
            task: "ci/deploy-gate".to_string(),
            requester: requester.to_string(),
            decision,
            timestamp: Utc::now(),
        }
    }

    fn filled_log() -> InMemoryDecisionLog {
        let log = InMemoryDecisionLog::new("approvaltask-validation");
        log.record(&record("alice", Decision::Allow)).unwrap();
        log.record(&record("bob", Decision::deny(DenyReason::NotAnApprover)))
            .unwrap();
        log.record(&record("carol", Decision::deny(DenyReason::OutOfScope)))
            .unwrap();
        log
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn sequential_records_form_a_valid_chain() {
        let log = filled_log();
        assert_eq!(log.len(), 3);
        assert!(log.verify_integrity());
    }

    #[test]
    fn first_entry_links_to_genesis() {
        let trail = filled_log().export().unwrap();
        assert_eq!(trail.entries[0].prev_digest, LogEntry::GENESIS);
        assert_eq!(trail.entries[1].prev_digest, trail.entries[0].digest);
    }

    #[test]
    fn rewriting_a_decision_is_detected() {
        let log = filled_log();
        {
            let mut entries = log.entries.lock().unwrap();
            entries[1].record.decision = Decision::Allow;
        }
        assert!(!log.verify_integrity());
    }

    #[test]
    fn dropping_an_entry_is_detected() {
        let log = filled_log();
        log.entries.lock().unwrap().remove(0);
        assert!(!log.verify_integrity());
    }

    #[test]
    fn export_reports_head_and_counts() {
        let trail = filled_log().export().unwrap();

        assert_eq!(trail.webhook, "approvaltask-validation");
        assert_eq!(trail.head, trail.entries.last().unwrap().digest);
        assert_eq!(trail.allowed(), 1);
        assert_eq!(trail.denied(), 2);
        assert!(super::verify_chain(&trail.webhook, &trail.entries));
    }

    #[test]
    fn chain_is_bound_to_its_webhook() {
        let trail = filled_log().export().unwrap();
        assert!(!super::verify_chain("some-other-webhook", &trail.entries));
    }

    #[test]
    fn empty_log_is_valid() {
        let log = InMemoryDecisionLog::new("approvaltask-validation");
        assert!(log.is_empty());
        assert!(log.verify_integrity());
        assert_eq!(log.export().unwrap().head, "");
    }
}
