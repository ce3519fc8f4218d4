//! Display helpers shared by the printable receipt and the sheets

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;

/// Placeholder printed for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// `dd/mm/yyyy`, or `N/A` when the date is missing
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `yyyy-mm-dd`, or an empty string when the date is missing
pub fn iso_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Amount with exactly two decimal places
pub fn format_money(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// The value itself, or `N/A` when blank
pub fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}
