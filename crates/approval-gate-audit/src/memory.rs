//! In-memory `DecisionLog`.
//!
//! Entries live in a `Vec` behind a `Mutex`, so one log can be shared by
//! every worker admitting requests for the same webhook.

use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use approval_gate_contracts::{
    decision::DecisionRecord,
    error::{GateError, GateResult},
};
use approval_gate_core::traits::DecisionLog;

use crate::{
    chain::{digest_entry, verify_chain},
    entry::{DecisionTrail, LogEntry},
};

pub struct InMemoryDecisionLog {
    webhook: String,
    pub(crate) entries: Mutex<Vec<LogEntry>>,
}

impl InMemoryDecisionLog {
    pub fn new(webhook: impl Into<String>) -> Self {
        Self {
            webhook: webhook.into(),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of everything recorded so far.
    pub fn export(&self) -> GateResult<DecisionTrail> {
        let entries = self.lock()?.clone();
        let head = entries.last().map(|e| e.digest.clone()).unwrap_or_default();
        Ok(DecisionTrail {
            webhook: self.webhook.clone(),
            entries,
            exported_at: Utc::now(),
            head,
        })
    }

    /// Re-verify the whole chain. A poisoned lock counts as a failure.
    pub fn verify_integrity(&self) -> bool {
        match self.lock() {
            Ok(entries) => verify_chain(&self.webhook, &entries),
            Err(_) => false,
        }
    }

    fn lock(&self) -> GateResult<std::sync::MutexGuard<'_, Vec<LogEntry>>> {
        self.entries.lock().map_err(|e| GateError::AuditWriteFailed {
            reason: format!("decision log lock poisoned: {e}"),
        })
    }
}

impl DecisionLog for InMemoryDecisionLog {
    fn record(&self, record: &DecisionRecord) -> GateResult<()> {
        let mut entries = self.lock()?;

        let sequence = entries.len() as u64;
        let prev_digest = entries
            .last()
            .map(|e| e.digest.clone())
            .unwrap_or_else(|| LogEntry::GENESIS.to_string());
        let digest = digest_entry(&self.webhook, sequence, &prev_digest, record)?;

        debug!(
            webhook = %self.webhook,
            sequence,
            request_uid = %record.request_uid,
            allowed = record.decision.is_allowed(),
            "decision recorded"
        );

        entries.push(LogEntry {
            sequence,
            record: record.clone(),
            prev_digest,
            digest,
        });
        Ok(())
    }
}
