//! Digest computation and chain verification.
//!
//! Digest input, in order: webhook name bytes, sequence as 8-byte
//! little-endian, `prev_digest` bytes, compact JSON of the record.

use sha2::{Digest, Sha256};

use approval_gate_contracts::{
    decision::DecisionRecord,
    error::{GateError, GateResult},
};

use crate::entry::LogEntry;

/// Hex SHA-256 digest committing to an entry's position, link and record.
pub fn digest_entry(
    webhook: &str,
    sequence: u64,
    prev_digest: &str,
    record: &DecisionRecord,
) -> GateResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| GateError::AuditWriteFailed {
        reason: format!("decision record is not serializable: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(webhook.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_digest.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Check sequence numbering, linkage and every digest. An empty chain is valid.
pub fn verify_chain(webhook: &str, entries: &[LogEntry]) -> bool {
    let mut expected_prev: &str = LogEntry::GENESIS;

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_digest != expected_prev {
            return false;
        }
        match digest_entry(webhook, entry.sequence, &entry.prev_digest, &entry.record) {
            Ok(digest) if digest == entry.digest => {}
            _ => return false,
        }
        expected_prev = entry.digest.as_str();
    }

    true
}
