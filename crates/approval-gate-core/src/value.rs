//! Value validation for decision inputs.

use approval_gate_contracts::{decision::ApprovalInput, error::InvalidInputValue};

/// Accept exactly `approve` or `reject`; case and whitespace are significant.
pub fn validate_input(input: &str) -> Result<ApprovalInput, InvalidInputValue> {
    match input {
        "approve" => Ok(ApprovalInput::Approve),
        "reject" => Ok(ApprovalInput::Reject),
        other => Err(InvalidInputValue::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_terminal_values() {
        assert_eq!(validate_input("approve"), Ok(ApprovalInput::Approve));
        assert_eq!(validate_input("reject"), Ok(ApprovalInput::Reject));
    }

    #[test]
    fn rejects_everything_else_verbatim() {
        for bad in ["maybe", "", "Approve", "REJECT", " approve", "approved"] {
            let err = validate_input(bad).unwrap_err();
            assert_eq!(err.value, bad);
        }
    }
}
