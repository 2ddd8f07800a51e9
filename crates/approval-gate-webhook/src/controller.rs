//! The admission controller: one request in, one response out.
//!
//!   Kind check → Decode old/new → Decide → Record → Respond
//!
//! A body that cannot be decoded is rejected before the engine runs. Every
//! outcome, including decode rejections, is written to the decision log; an
//! outcome that cannot be recorded is not admitted.
//!
//! Denials from the engine carry its message and no code. Decode rejections
//! carry code 400. A failed log write is a transport-level failure, not an
//! engine denial: the response carries the log error and code 500.

use chrono::Utc;
use tracing::{debug, error, info};

use approval_gate_config::GateConfig;
use approval_gate_contracts::{
    admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, GroupVersionKind, Status},
    approver::TaskState,
    decision::{Decision, DecisionRecord, DenyReason},
    error::{GateError, GateResult},
    requester::Requester,
    task::ApprovalTask,
};
use approval_gate_core::traits::{DecisionEngine, DecisionLog};

use crate::decode::{ObjectRole, TaskDecoder};

/// HTTP-style code attached to decode rejections.
const BAD_REQUEST: u16 = 400;
/// Code attached when the decision log rejects a write. Never used for an
/// engine denial.
const INTERNAL_ERROR: u16 = 500;

pub struct AdmissionController {
    engine: Box<dyn DecisionEngine>,
    log: Box<dyn DecisionLog>,
    decoder: TaskDecoder,
    resource: GroupVersionKind,
    path: String,
}

impl AdmissionController {
    /// Build a controller from loaded configuration and its trusted parts.
    ///
    /// Fails only if the strict-mode schema cannot be compiled.
    pub fn new(
        config: &GateConfig,
        engine: Box<dyn DecisionEngine>,
        log: Box<dyn DecisionLog>,
    ) -> GateResult<Self> {
        Ok(Self {
            engine,
            log,
            decoder: TaskDecoder::new(config.webhook.disallow_unknown_fields)?,
            resource: config.resource.gvk(),
            path: config.webhook.path.clone(),
        })
    }

    /// The path this controller is served on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Admit or reject one request.
    pub fn admit(&self, request: &AdmissionRequest) -> AdmissionResponse {
        if request.kind != self.resource {
            error!(
                uid = %request.uid,
                kind = %request.kind,
                expected = %self.resource,
                "unhandled kind"
            );
        }

        let requester = Requester::from(&request.user_info);
        debug!(
            uid = %request.uid,
            operation = ?request.operation,
            username = %requester.username,
            groups = requester.groups.len(),
            "admission request received"
        );

        let (subject, decision) = match self.decode_pair(request) {
            Ok((old, new)) => {
                let decision = self.engine.decide(
                    &TaskState::from(&old),
                    &TaskState::from(&new),
                    &requester,
                );
                (subject_of(request, Some(&new)), decision)
            }
            Err(e) => (
                subject_of(request, None),
                Decision::deny(DenyReason::Malformed {
                    reason: e.to_string(),
                }),
            ),
        };

        let record = DecisionRecord {
            request_uid: request.uid,
            task: subject,
            requester: requester.username.clone(),
            decision,
            timestamp: Utc::now(),
        };

        // Not an engine outcome: the request fails with the log's own error.
        if let Err(e) = self.log.record(&record) {
            error!(uid = %request.uid, error = %e, "decision could not be recorded");
            return AdmissionResponse {
                uid: request.uid,
                allowed: false,
                result: Some(Status {
                    message: e.to_string(),
                    code: Some(INTERNAL_ERROR),
                }),
            };
        }

        info!(
            uid = %request.uid,
            task = %record.task,
            username = %record.requester,
            allowed = record.decision.is_allowed(),
            "admission decision"
        );
        render(request, &record.decision)
    }

    /// Answer a full `AdmissionReview` document.
    ///
    /// Returns `GateError::Decode` when the review carries no request.
    pub fn review(&self, review: &AdmissionReview) -> GateResult<AdmissionReview> {
        let request = review.request.as_ref().ok_or_else(|| GateError::Decode {
            reason: "admission review carries no request".to_string(),
        })?;
        Ok(AdmissionReview::from_response(self.admit(request)))
    }

    fn decode_pair(&self, request: &AdmissionRequest) -> GateResult<(ApprovalTask, ApprovalTask)> {
        let old = self.decoder.decode(request.old_object_bytes(), ObjectRole::Old)?;
        let new = self.decoder.decode(request.object_bytes(), ObjectRole::New)?;
        Ok((old, new))
    }
}

/// `namespace/name` from the request, falling back to the decoded body.
fn subject_of(request: &AdmissionRequest, task: Option<&ApprovalTask>) -> String {
    match (&request.namespace, &request.name) {
        (Some(ns), Some(name)) => format!("{ns}/{name}"),
        (None, Some(name)) => name.clone(),
        _ => task.map(ApprovalTask::qualified_name).unwrap_or_default(),
    }
}

fn render(request: &AdmissionRequest, decision: &Decision) -> AdmissionResponse {
    let result = decision.reason().map(|reason| Status {
        message: reason.to_string(),
        code: matches!(reason, DenyReason::Malformed { .. }).then_some(BAD_REQUEST),
    });
    AdmissionResponse {
        uid: request.uid,
        allowed: decision.is_allowed(),
        result,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
