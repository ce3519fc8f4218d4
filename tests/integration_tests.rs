//! Integration tests for fee-receipt-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use fee_receipt_core::{
    DefaultFormValidator, DeskConfig, FeeLine, FeeType, FormValidator, JsonFileStore,
    KeyValueStore, MemoryStore, NotifyOutcome, PaymentDetails, ReceiptDesk, ReceiptError,
    ReceiptForm, ReceiptNumber, ReceiptResult, SchoolProfile, StudentDetails, WebhookNotifier,
    ALL_RECEIPTS_KEY, LAST_RECEIPT_NUMBER_KEY,
};
use httpmock::prelude::*;
use std::str::FromStr;
use std::time::Duration;
use tempfile::TempDir;

fn student_form(name: &str, fees: Vec<FeeLine>) -> ReceiptForm {
    ReceiptForm {
        receipt_date: NaiveDate::from_ymd_opt(2025, 1, 15),
        academic_session: "2024-25".to_string(),
        school_contact: "05252-234567".to_string(),
        student: StudentDetails {
            name: name.to_string(),
            dob: NaiveDate::from_ymd_opt(2013, 6, 2),
            gender: "Female".to_string(),
            father_name: "Suresh Yadav".to_string(),
            mother_name: String::new(),
            class_section: "VI-B".to_string(),
        },
        payment: PaymentDetails {
            mode: "UPI".to_string(),
            transaction_id: "UPI-20250115-01".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15),
        },
        fees,
    }
}

#[tokio::test]
async fn test_complete_receipt_workflow() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::new();
    let mut desk = ReceiptDesk::new(store.clone(), SchoolProfile::default());

    // First receipt
    let form = student_form(
        "Pooja Yadav",
        vec![
            FeeLine::new(FeeType::Admission, "", BigDecimal::from(5000)),
            FeeLine::new(
                FeeType::Tuition,
                "January 2025",
                BigDecimal::from_str("1250.75").unwrap(),
            ),
            FeeLine::default(),
        ],
    );

    let generated = desk.generate(&form).await.unwrap();
    let receipt = generated.receipt;
    assert_eq!(receipt.number.to_string(), "NVA001");
    assert_eq!(receipt.total, BigDecimal::from_str("6250.75").unwrap());
    assert_eq!(receipt.amount_in_words, "Six Thousand Two Hundred Fifty");
    assert_eq!(receipt.fees.len(), 2);

    let path = desk.export_receipt(&receipt, dir.path()).await.unwrap();
    assert!(path.ends_with("Receipt_NVA001_Pooja_Yadav.csv"));
    let sheet = std::fs::read_to_string(&path).unwrap();
    assert!(sheet.contains("Receipt Number:,NVA001,Date:,15/01/2025"));
    assert!(sheet.contains("2,Tuition Fee,January 2025,1250.75"));
    assert!(sheet.contains("Amount in Words:,Six Thousand Two Hundred Fifty Rupees Only"));
    assert!(sheet.contains("Mother's Name:,N/A"));

    // Second receipt after starting a new one
    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVA002");
    let form = student_form(
        "Aman Gupta",
        vec![FeeLine::new(FeeType::Transport, "Q4", BigDecimal::from(1800))],
    );
    let second = desk.generate(&form).await.unwrap().receipt;
    assert_eq!(second.number.to_string(), "NVA002");
    desk.export_receipt(&second, dir.path()).await.unwrap();

    // Bulk export
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let summary = desk.export_all(dir.path(), date).await.unwrap();
    assert_eq!(summary.count, 2);
    assert!(summary.path.ends_with("All_Receipts_2025-01-31.csv"));

    let all = std::fs::read_to_string(&summary.path).unwrap();
    let lines: Vec<&str> = all.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Receipt No.,Date,Session,Student Name"));
    assert!(lines[1].starts_with("NVA001,15/01/2025,2024-25,Pooja Yadav"));
    assert!(lines[1].ends_with(",6250.75"));
    assert!(lines[2].starts_with("NVA002"));

    assert!(store.raw(ALL_RECEIPTS_KEY).is_some());
    assert_eq!(store.raw(LAST_RECEIPT_NUMBER_KEY).as_deref(), Some("NVA002"));
}

#[tokio::test]
async fn test_export_all_with_empty_archive() {
    let dir = TempDir::new().unwrap();
    let desk = ReceiptDesk::new(MemoryStore::new(), SchoolProfile::default());

    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    assert!(matches!(
        desk.export_all(dir.path(), date).await,
        Err(ReceiptError::NoReceipts)
    ));
}

#[tokio::test]
async fn test_generated_receipt_is_posted_to_webhook() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/macros/exec").json_body_partial(
                r#"{
                    "receiptNumber": "NVA001",
                    "receiptDate": "2025-01-15",
                    "studentName": "Pooja Yadav",
                    "transactionID": "UPI-20250115-01",
                    "fees": [{"type": "Exam Fee", "period": "Term 2", "amount": 750.0}]
                }"#,
            );
            then.status(302);
        })
        .await;

    let notifier =
        WebhookNotifier::new(server.url("/macros/exec"), Duration::from_secs(5)).unwrap();
    let mut desk = ReceiptDesk::new(MemoryStore::new(), SchoolProfile::default())
        .with_notifier(Box::new(notifier));

    let form = student_form(
        "Pooja Yadav",
        vec![FeeLine::new(FeeType::Exam, "Term 2", BigDecimal::from(750))],
    );
    let generated = desk.generate(&form).await.unwrap();

    mock.assert_async().await;
    assert_eq!(generated.outcome, NotifyOutcome::Sent);
    assert!(!generated.notice.is_error());
}

#[tokio::test]
async fn test_transport_failure_does_not_block_receipt() {
    let dir = TempDir::new().unwrap();
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/exec", Duration::from_secs(2)).unwrap();
    let mut desk = ReceiptDesk::new(MemoryStore::new(), SchoolProfile::default())
        .with_notifier(Box::new(notifier));

    let form = student_form(
        "Pooja Yadav",
        vec![FeeLine::new(FeeType::Hostel, "", BigDecimal::from(12000))],
    );
    let generated = desk.generate(&form).await.unwrap();

    assert!(matches!(generated.outcome, NotifyOutcome::Failed(_)));
    assert!(generated.notice.is_error());
    assert_eq!(generated.receipt.amount_in_words, "Twelve Thousand");

    // Local export is unaffected
    let path = desk.export_receipt(&generated.receipt, dir.path()).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_admin_operations() {
    let store = MemoryStore::new();
    let mut desk = ReceiptDesk::new(store.clone(), SchoolProfile::default());

    assert_eq!(desk.force_set("NVA997").await.unwrap().to_string(), "NVA998");
    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVA999");
    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVB001");

    let err = desk.force_set("NVB50").await.unwrap_err();
    assert!(matches!(err, ReceiptError::InvalidFormat(_)));
    assert_eq!(desk.current_number().await.unwrap().to_string(), "NVB001");

    assert_eq!(desk.reset().await.unwrap(), ReceiptNumber::FIRST);
    assert_eq!(desk.force_set("NVC120").await.unwrap().to_string(), "NVC121");
    assert_eq!(desk.reset_to_start().await.unwrap(), ReceiptNumber::FIRST);
    assert_eq!(desk.current_number().await.unwrap(), ReceiptNumber::FIRST);
}

#[tokio::test]
async fn test_file_backed_desk_persists_counter() {
    let dir = TempDir::new().unwrap();
    let config = DeskConfig::from_toml_str(&format!(
        "[store]\npath = {:?}\n",
        dir.path().join("state.json").to_string_lossy()
    ))
    .unwrap();

    {
        let mut desk = ReceiptDesk::from_config(&config).unwrap();
        assert_eq!(desk.current_number().await.unwrap(), ReceiptNumber::FIRST);
        desk.new_receipt().await.unwrap();
        desk.new_receipt().await.unwrap();
    }

    let mut reopened = ReceiptDesk::from_config(&config).unwrap();
    assert_eq!(reopened.current_number().await.unwrap().to_string(), "NVA003");

    let raw = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    assert!(raw.contains("\"lastReceiptNumber\": \"NVA003\""));

    let store = JsonFileStore::new(dir.path().join("state.json"));
    let mut desk = ReceiptDesk::new(store, SchoolProfile::default());
    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVA004");
}

#[tokio::test]
async fn test_receipt_from_toml_form() {
    let form: ReceiptForm = toml::from_str(
        r#"
        receipt_date = "2025-03-03"
        academic_session = "2024-25"

        [student]
        name = "Farhan Ali"
        class_section = "X-A"
        dob = "2010-11-21"

        [payment]
        mode = "Cheque"
        transaction_id = "CHQ-441"

        [[fees]]
        type = "Tuition Fee"
        period = "March 2025"
        amount = "2500"

        [[fees]]
        type = "Lab Fee"
        amount = "150000"

        [[fees]]
        period = "ignored, no type"
        amount = "99"
        "#,
    )
    .unwrap();

    let mut desk = ReceiptDesk::new(MemoryStore::new(), SchoolProfile::default());
    let receipt = desk.generate(&form).await.unwrap().receipt;

    assert_eq!(receipt.fees.len(), 2);
    assert_eq!(receipt.total, BigDecimal::from(152500));
    assert_eq!(
        receipt.amount_in_words,
        "One Lakh Fifty Two Thousand Five Hundred"
    );

    let printed = receipt.to_string();
    assert!(printed.contains("Farhan Ali"));
    assert!(printed.contains("21/11/2010"));
    assert!(printed.contains("One Lakh Fifty Two Thousand Five Hundred Rupees Only"));
}

/// Requires a transaction reference for every non-cash payment
struct ReferenceRequired;

impl FormValidator for ReferenceRequired {
    fn validate_form(&self, form: &ReceiptForm) -> ReceiptResult<()> {
        DefaultFormValidator.validate_form(form)?;
        if !form.payment.mode.eq_ignore_ascii_case("cash")
            && form.payment.transaction_id.trim().is_empty()
        {
            return Err(ReceiptError::Validation(
                "Please enter transaction ID / cheque no".to_string(),
            ));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_custom_validator_through_desk() {
    let store = MemoryStore::new();
    let mut desk = ReceiptDesk::with_validator(
        store.clone(),
        SchoolProfile::default(),
        Box::new(ReferenceRequired),
    );

    let mut form = student_form(
        "Pooja Yadav",
        vec![FeeLine::new(FeeType::Sports, "", BigDecimal::from(300))],
    );
    form.payment.transaction_id.clear();

    let err = desk.generate(&form).await.unwrap_err();
    assert!(err.to_string().contains("transaction ID"));
    assert_eq!(store.write_count(), 0);

    form.payment.mode = "Cash".to_string();
    assert!(desk.generate(&form).await.is_ok());
}

#[tokio::test]
async fn test_failed_export_keeps_archive_consistent() {
    let dir = TempDir::new().unwrap();
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "a file, not a directory").unwrap();

    let store = MemoryStore::new();
    let mut desk = ReceiptDesk::new(store.clone(), SchoolProfile::default());
    let form = student_form(
        "Aman Gupta",
        vec![FeeLine::new(FeeType::Library, "", BigDecimal::from(400))],
    );

    let receipt = desk.generate(&form).await.unwrap().receipt;
    assert!(desk.export_receipt(&receipt, &blocked).await.is_err());
    assert!(desk.archived_receipts().await.unwrap().is_empty());

    // The number is still spent; the next receipt does not reuse it
    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVA002");
    let next = desk.generate(&form).await.unwrap().receipt;
    desk.export_receipt(&next, dir.path()).await.unwrap();

    let archived = desk.archived_receipts().await.unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].receipt_number, "NVA002");
}

#[tokio::test]
async fn test_hand_edited_counter_is_resumed() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("state.json"));
    store.set(LAST_RECEIPT_NUMBER_KEY, "NVC0041").await.unwrap();

    let mut desk = ReceiptDesk::new(store.clone(), SchoolProfile::default());
    assert_eq!(desk.current_number().await.unwrap().to_string(), "NVC041");

    let form = student_form(
        "Farhan Ali",
        vec![FeeLine::new(FeeType::Tuition, "April", BigDecimal::from(2000))],
    );
    let receipt = desk.generate(&form).await.unwrap().receipt;
    assert_eq!(receipt.number.to_string(), "NVC041");
    assert_eq!(
        store.get(LAST_RECEIPT_NUMBER_KEY).await.unwrap().as_deref(),
        Some("NVC0041")
    );

    assert_eq!(desk.new_receipt().await.unwrap().to_string(), "NVC042");
}
