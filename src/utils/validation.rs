//! Validation utilities

use regex::Regex;
use std::sync::LazyLock;

use crate::types::*;

static FORCEABLE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^NV[A-Z][0-9]{3}$").expect("valid force-set pattern"));

/// Validate that a required text field is present
pub fn validate_required(field: &str, value: &str) -> ReceiptResult<()> {
    if value.trim().is_empty() {
        Err(ReceiptError::Validation(format!("Please enter {}", field)))
    } else {
        Ok(())
    }
}

/// Validate a value an operator wants to force the counter to
///
/// Accepts anything shaped like `NV<letter><three digits>`, including a zero
/// serial, since the counter is advanced right after forcing.
pub fn validate_forced_number(value: &str) -> ReceiptResult<()> {
    if FORCEABLE_NUMBER_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ReceiptError::InvalidFormat(format!(
            "'{}'. Use format like: NVA001, NVB500, NVC999",
            value
        )))
    }
}
