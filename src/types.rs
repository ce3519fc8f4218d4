//! Core types and data structures for the receipt system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Prefix shared by every receipt number
pub const RECEIPT_PREFIX: &str = "NV";

/// Highest serial within a series
pub const MAX_SERIAL: u16 = 999;

static RECEIPT_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^NV([A-Z])([0-9]{3})$").expect("valid receipt number pattern"));

/// A receipt number of the form `NV<series><serial>`, e.g. `NVA001`
///
/// The series is an uppercase ASCII letter and the serial is always in
/// `1..=999`, rendered zero-padded to three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReceiptNumber {
    series: char,
    serial: u16,
}

impl ReceiptNumber {
    /// The first number ever issued
    pub const FIRST: ReceiptNumber = ReceiptNumber {
        series: 'A',
        serial: 1,
    };

    /// Create a receipt number from its parts
    pub fn new(series: char, serial: u16) -> ReceiptResult<Self> {
        if !series.is_ascii_uppercase() {
            return Err(ReceiptError::InvalidFormat(format!(
                "series must be an uppercase letter, got '{}'",
                series
            )));
        }
        if serial == 0 || serial > MAX_SERIAL {
            return Err(ReceiptError::InvalidFormat(format!(
                "serial must be between 1 and {}, got {}",
                MAX_SERIAL, serial
            )));
        }
        Ok(Self { series, serial })
    }

    /// Parse a strictly formatted receipt number such as `NVB500`
    pub fn parse(value: &str) -> ReceiptResult<Self> {
        let captures = RECEIPT_NUMBER_PATTERN.captures(value).ok_or_else(|| {
            ReceiptError::InvalidFormat(format!(
                "'{}' does not look like NVA001, NVB500 or NVC999",
                value
            ))
        })?;

        let series = captures[1].chars().next().unwrap_or('A');
        let serial = captures[2]
            .parse::<u16>()
            .map_err(|e| ReceiptError::InvalidFormat(e.to_string()))?;

        Self::new(series, serial)
    }

    /// Series letter
    pub fn series(&self) -> char {
        self.series
    }

    /// Serial within the series
    pub fn serial(&self) -> u16 {
        self.serial
    }

    /// The number that follows this one
    ///
    /// After serial 999 the series letter moves forward and the serial restarts
    /// at 001. Series `Z` has no successor once it reaches 999.
    pub fn successor(&self) -> ReceiptResult<Self> {
        Self::following(self.series, u64::from(self.serial))
    }

    /// The number that follows an arbitrary `(series, numeric)` pair
    ///
    /// `numeric` may fall outside `1..=999` when it comes from persisted state
    /// that was written by hand.
    pub(crate) fn following(series: char, numeric: u64) -> ReceiptResult<Self> {
        if numeric >= u64::from(MAX_SERIAL) {
            let next_series = match series {
                'A'..='Y' => (series as u8 + 1) as char,
                _ => return Err(ReceiptError::SeriesExhausted(series)),
            };
            return Self::new(next_series, 1);
        }

        // numeric < 999 here, so the cast cannot truncate
        Self::new(series, numeric as u16 + 1)
    }
}

impl Default for ReceiptNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:03}", RECEIPT_PREFIX, self.series, self.serial)
    }
}

impl FromStr for ReceiptNumber {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReceiptNumber {
    type Error = ReceiptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReceiptNumber> for String {
    fn from(number: ReceiptNumber) -> Self {
        number.to_string()
    }
}

/// Kinds of fee a receipt line can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeType {
    #[serde(rename = "Admission Fee")]
    Admission,
    #[serde(rename = "Tuition Fee")]
    Tuition,
    #[serde(rename = "Exam Fee")]
    Exam,
    #[serde(rename = "Transport Fee")]
    Transport,
    #[serde(rename = "Hostel Fee")]
    Hostel,
    #[serde(rename = "Library Fee")]
    Library,
    #[serde(rename = "Lab Fee")]
    Lab,
    #[serde(rename = "Sports Fee")]
    Sports,
    Other,
}

impl FeeType {
    /// Label printed on receipts and sheets
    pub fn label(&self) -> &'static str {
        match self {
            FeeType::Admission => "Admission Fee",
            FeeType::Tuition => "Tuition Fee",
            FeeType::Exam => "Exam Fee",
            FeeType::Transport => "Transport Fee",
            FeeType::Hostel => "Hostel Fee",
            FeeType::Library => "Library Fee",
            FeeType::Lab => "Lab Fee",
            FeeType::Sports => "Sports Fee",
            FeeType::Other => "Other",
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fee row as entered on the form; any part may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeLine {
    #[serde(rename = "type")]
    pub fee_type: Option<FeeType>,
    /// Month or period the fee covers, e.g. "January 2025"
    pub period: String,
    pub amount: Option<BigDecimal>,
}

impl FeeLine {
    /// Create a fee line
    pub fn new(fee_type: FeeType, period: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            fee_type: Some(fee_type),
            period: period.into(),
            amount: Some(amount),
        }
    }

    /// A line counts only when it has a type and a positive amount
    pub fn is_valid(&self) -> bool {
        self.fee_type.is_some()
            && self
                .amount
                .as_ref()
                .is_some_and(|amount| *amount > BigDecimal::from(0))
    }
}

/// A valid fee line with its serial number on the receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeItem {
    pub serial: usize,
    pub fee_type: FeeType,
    pub period: String,
    pub amount: BigDecimal,
}

/// Student section of the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentDetails {
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub gender: String,
    pub father_name: String,
    pub mother_name: String,
    pub class_section: String,
}

/// Payment section of the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentDetails {
    /// Cash, UPI, cheque, ...
    pub mode: String,
    /// Transaction id or cheque number
    pub transaction_id: String,
    pub date: Option<NaiveDate>,
}

/// School identity printed at the top of every receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolProfile {
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
}

impl Default for SchoolProfile {
    fn default() -> Self {
        Self {
            name: "Nandini Vidyaniketan (E-Learning Vista Pvt. Ltd.)".to_string(),
            address: "Nandini Nagar, Rupaidiha Road, Nanpara (Bahraich), Uttar Pradesh"
                .to_string(),
            contact: None,
        }
    }
}

/// Raw receipt form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptForm {
    pub receipt_date: Option<NaiveDate>,
    pub academic_session: String,
    /// Telephone number printed under the school address
    pub school_contact: String,
    pub student: StudentDetails,
    pub payment: PaymentDetails,
    pub fees: Vec<FeeLine>,
}

impl ReceiptForm {
    /// Valid fee lines, numbered from 1 in form order
    pub fn valid_fee_items(&self) -> Vec<FeeItem> {
        self.fees
            .iter()
            .filter(|line| line.is_valid())
            .filter_map(|line| match (line.fee_type, line.amount.as_ref()) {
                (Some(fee_type), Some(amount)) => Some((fee_type, line.period.clone(), amount)),
                _ => None,
            })
            .enumerate()
            .map(|(index, (fee_type, period, amount))| FeeItem {
                serial: index + 1,
                fee_type,
                period,
                amount: amount.clone(),
            })
            .collect()
    }

    /// Sum of the valid fee lines
    pub fn total(&self) -> BigDecimal {
        self.fees
            .iter()
            .filter(|line| line.is_valid())
            .filter_map(|line| line.amount.as_ref())
            .sum()
    }
}

/// A generated receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub number: ReceiptNumber,
    pub school: SchoolProfile,
    pub receipt_date: Option<NaiveDate>,
    pub academic_session: String,
    pub student: StudentDetails,
    pub payment: PaymentDetails,
    pub fees: Vec<FeeItem>,
    pub total: BigDecimal,
    pub amount_in_words: String,
}

/// Fee row of an archived receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFee {
    #[serde(rename = "type")]
    pub fee_type: String,
    pub period: String,
    pub amount: BigDecimal,
}

/// Display-formatted receipt kept in the archive for bulk export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
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
    pub transaction_id: String,
    pub payment_date: String,
    pub fees: Vec<RecordFee>,
    pub total_amount: BigDecimal,
}

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short message for the operator, shown without blocking the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Errors that can occur in the receipt system
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid receipt number format: {0}")]
    InvalidFormat(String),
    #[error("Receipt series '{0}' is exhausted: no series follows it")]
    SeriesExhausted(char),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("No receipts found to export")]
    NoReceipts,
}

/// Result type for receipt operations
pub type ReceiptResult<T> = Result<T, ReceiptError>;
