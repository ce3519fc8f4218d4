//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validation::validate_required;

/// Key-value persistence used for the counter and the receipt archive
///
/// This trait lets the receipt core work with any backend (a JSON file,
/// browser-style local storage, an in-memory map, ...) by implementing
/// three string operations.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> ReceiptResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&mut self, key: &str, value: &str) -> ReceiptResult<()>;

    /// Erase `key`; erasing a missing key is not an error
    async fn remove(&mut self, key: &str) -> ReceiptResult<()>;
}

/// Trait for implementing custom form validation rules
pub trait FormValidator: Send + Sync {
    /// Validate a form before a receipt is generated from it
    fn validate_form(&self, form: &ReceiptForm) -> ReceiptResult<()>;
}

/// Default form validator: required fields and at least one fee line
pub struct DefaultFormValidator;

impl FormValidator for DefaultFormValidator {
    fn validate_form(&self, form: &ReceiptForm) -> ReceiptResult<()> {
        validate_required("student name", &form.student.name)?;
        validate_required("class/section", &form.student.class_section)?;
        validate_required("academic session", &form.academic_session)?;
        validate_required("payment mode", &form.payment.mode)?;

        if !form.fees.iter().any(FeeLine::is_valid) {
            return Err(ReceiptError::Validation(
                "Please add at least one fee entry with valid type and amount".to_string(),
            ));
        }

        Ok(())
    }
}

/// What happened when a receipt was handed to a notifier
///
/// The remote endpoint's response is never read, so `Sent` only means the
/// request went out without a transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyOutcome {
    /// Request completed without a transport error
    Sent,
    /// No endpoint configured
    Skipped,
    /// The send itself failed
    Failed(String),
}

impl NotifyOutcome {
    /// Whether a send was attempted at all
    pub fn attempted(&self) -> bool {
        !matches!(self, NotifyOutcome::Skipped)
    }
}

/// Fee row inside a submission payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionFee {
    #[serde(rename = "type")]
    pub fee_type: String,
    pub period: String,
    pub amount: f64,
}

/// Flat record sent to the remote endpoint for every generated receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub receipt_number: String,
    pub receipt_date: String,
    pub academic_session: String,
    pub student_name: String,
    pub dob: String,
    pub gender: String,
    pub father_name: String,
    pub mother_name: String,
    pub class_section: String,
    pub payment_mode: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    pub payment_date: String,
    pub fees: Vec<SubmissionFee>,
}

/// Best-effort sink for generated receipts
#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    /// Send the payload; never fails, the outcome says what happened
    async fn notify(&self, payload: &SubmissionPayload) -> NotifyOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn complete_form() -> ReceiptForm {
        ReceiptForm {
            academic_session: "2025-26".to_string(),
            student: StudentDetails {
                name: "Asha Verma".to_string(),
                class_section: "V-A".to_string(),
                ..StudentDetails::default()
            },
            payment: PaymentDetails {
                mode: "Cash".to_string(),
                ..PaymentDetails::default()
            },
            fees: vec![FeeLine::new(FeeType::Tuition, "", BigDecimal::from(1200))],
            ..ReceiptForm::default()
        }
    }

    #[test]
    fn test_default_validator_accepts_complete_form() {
        assert!(DefaultFormValidator.validate_form(&complete_form()).is_ok());
    }

    #[test]
    fn test_default_validator_reports_first_missing_field() {
        let mut form = complete_form();
        form.student.name = "   ".to_string();
        form.academic_session.clear();

        let err = DefaultFormValidator.validate_form(&form).unwrap_err();
        assert!(err.to_string().contains("student name"));

        form.student.name = "Asha Verma".to_string();
        let err = DefaultFormValidator.validate_form(&form).unwrap_err();
        assert!(err.to_string().contains("academic session"));
    }

    #[test]
    fn test_default_validator_requires_a_valid_fee() {
        let mut form = complete_form();
        form.fees = vec![
            FeeLine::new(FeeType::Exam, "", BigDecimal::from(0)),
            FeeLine {
                fee_type: None,
                period: "March".to_string(),
                amount: Some(BigDecimal::from(300)),
            },
        ];

        let err = DefaultFormValidator.validate_form(&form).unwrap_err();
        assert!(matches!(err, ReceiptError::Validation(_)));
        assert!(err.to_string().contains("fee entry"));
    }

    #[test]
    fn test_payload_uses_wire_field_names() {
        let payload = SubmissionPayload {
            receipt_number: "NVA001".to_string(),
            receipt_date: "2025-01-15".to_string(),
            academic_session: "2025-26".to_string(),
            student_name: "Asha Verma".to_string(),
            dob: String::new(),
            gender: String::new(),
            father_name: String::new(),
            mother_name: String::new(),
            class_section: "V-A".to_string(),
            payment_mode: "Cash".to_string(),
            transaction_id: "TX-9".to_string(),
            payment_date: "2025-01-15".to_string(),
            fees: vec![SubmissionFee {
                fee_type: "Tuition Fee".to_string(),
                period: "January".to_string(),
                amount: 1200.0,
            }],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["receiptNumber"], "NVA001");
        assert_eq!(value["transactionID"], "TX-9");
        assert_eq!(value["fees"][0]["type"], "Tuition Fee");
        assert_eq!(value["fees"][0]["amount"], 1200.0);
    }

    #[test]
    fn test_notify_outcome_attempted() {
        assert!(NotifyOutcome::Sent.attempted());
        assert!(NotifyOutcome::Failed("refused".to_string()).attempted());
        assert!(!NotifyOutcome::Skipped.attempted());
    }
}
