//! JSON Schema of an `ApprovalTask` body with every known field listed.
//!
//! Used only for strict decoding: `additionalProperties: false` at each
//! level turns an unknown field into a validation failure. `metadata` stays
//! open because the API server owns its contents. An approver `type` may
//! be any string: empty means `User` and unknown names decode to entries
//! that designate nobody.

use serde_json::{json, Value};

pub fn approval_task_schema() -> Value {
    let member = json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": { "type": "string" },
            "input": { "type": "string" }
        },
        "additionalProperties": false
    });

    let approver = json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": { "type": "string" },
            "input": { "type": "string" },
            "type": { "type": "string" },
            "users": { "type": "array", "items": member }
        },
        "additionalProperties": false
    });

    let response = json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": { "type": "string" },
            "type": { "type": "string" },
            "response": { "type": "string" },
            "groupMembers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" },
                        "response": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            }
        },
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "apiVersion": { "type": "string" },
            "kind": { "type": "string" },
            "metadata": { "type": "object" },
            "spec": {
                "type": "object",
                "properties": {
                    "approvers": { "type": "array", "items": approver },
                    "numberOfApprovalsRequired": { "type": "integer", "minimum": 0 },
                    "description": { "type": "string" }
                },
                "additionalProperties": false
            },
            "status": {
                "type": "object",
                "properties": {
                    "approvers": { "type": "array", "items": { "type": "string" } },
                    "approversResponse": { "type": "array", "items": response },
                    "state": { "type": "string" },
                    "startTime": { "type": "string" }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}
