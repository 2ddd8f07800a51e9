//! Chained log entries and the exported trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use approval_gate_contracts::decision::DecisionRecord;

/// One admission outcome linked to its predecessor by hash.
///
/// Changing any field, including the embedded `record`, invalidates `digest`
/// and every later `prev_digest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    pub record: DecisionRecord,

    /// `digest` of the previous entry, or `LogEntry::GENESIS` for the first.
    pub prev_digest: String,

    /// Hex SHA-256 over (webhook, sequence, prev_digest, record JSON).
    pub digest: String,
}

impl LogEntry {
    /// `prev_digest` of the first entry in every chain.
    pub const GENESIS: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of the log for one webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrail {
    /// The webhook whose decisions are recorded.
    pub webhook: String,

    pub entries: Vec<LogEntry>,

    pub exported_at: DateTime<Utc>,

    /// `digest` of the last entry; empty when no entry has been written.
    pub head: String,
}

impl DecisionTrail {
    pub fn allowed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.record.decision.is_allowed())
            .count()
    }

    pub fn denied(&self) -> usize {
        self.entries.len() - self.allowed()
    }
}
