//! Spreadsheet (CSV) export of receipts

use chrono::NaiveDate;
use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::format::{format_money, rupees_in_words};
use crate::types::*;

// Path separators are folded in too so a name can never leave the export dir
static FILENAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]+").expect("valid filename pattern"));

/// Header row of the all-receipts sheet
pub const ALL_RECEIPTS_HEADER: [&str; 13] = [
    "Receipt No.",
    "Date",
    "Session",
    "Student Name",
    "DOB",
    "Gender",
    "Father Name",
    "Mother Name",
    "Class",
    "Payment Mode",
    "Transaction ID",
    "Payment Date",
    "Total Amount (₹)",
];

type Row = Vec<String>;

fn row<const N: usize>(cells: [&str; N]) -> Row {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Rows of the single-receipt sheet
pub fn single_receipt_rows(
    record: &ReceiptRecord,
    school: &SchoolProfile,
) -> ReceiptResult<Vec<Row>> {
    let school_name = school.name.to_uppercase();
    let mut rows = vec![
        row([school_name.as_str()]),
        row([school.address.as_str()]),
        row(["FEE RECEIPT"]),
        Row::new(),
        row([
            "Receipt Number:",
            record.receipt_number.as_str(),
            "Date:",
            record.receipt_date.as_str(),
        ]),
        row(["Academic Session:", record.academic_session.as_str()]),
        Row::new(),
        row(["STUDENT INFORMATION"]),
        row(["Student Name:", record.student_name.as_str()]),
        row(["Date of Birth:", record.dob.as_str()]),
        row(["Gender:", record.gender.as_str()]),
        row(["Father's Name:", record.father_name.as_str()]),
        row(["Mother's Name:", record.mother_name.as_str()]),
        row(["Class / Section:", record.class_section.as_str()]),
        Row::new(),
        row(["FEE DETAILS"]),
        row(["S.No", "Fee Type", "Month / Period", "Amount (₹)"]),
    ];

    for (index, fee) in record.fees.iter().enumerate() {
        let period = if fee.period.trim().is_empty() {
            "N/A"
        } else {
            fee.period.as_str()
        };
        rows.push(vec![
            (index + 1).to_string(),
            fee.fee_type.clone(),
            period.to_string(),
            format_money(&fee.amount),
        ]);
    }

    let total = format!("₹ {}", format_money(&record.total_amount));
    let words = rupees_in_words(&record.total_amount)?;

    rows.extend([
        Row::new(),
        row(["", "", "Total Amount:", total.as_str()]),
        row(["Amount in Words:", words.as_str()]),
        Row::new(),
        row(["PAYMENT INFORMATION"]),
        row(["Payment Mode:", record.payment_mode.as_str()]),
        row(["Transaction ID / Cheque No:", record.transaction_id.as_str()]),
        row(["Payment Date:", record.payment_date.as_str()]),
    ]);

    Ok(rows)
}

/// Rows of the all-receipts sheet: header plus one row per record
pub fn all_receipts_rows(records: &[ReceiptRecord]) -> Vec<Row> {
    let mut rows = vec![row(ALL_RECEIPTS_HEADER)];
    rows.extend(records.iter().map(|r| {
        vec![
            r.receipt_number.clone(),
            r.receipt_date.clone(),
            r.academic_session.clone(),
            r.student_name.clone(),
            r.dob.clone(),
            r.gender.clone(),
            r.father_name.clone(),
            r.mother_name.clone(),
            r.class_section.clone(),
            r.payment_mode.clone(),
            r.transaction_id.clone(),
            r.payment_date.clone(),
            format_money(&r.total_amount),
        ]
    }));
    rows
}

/// Write rows of varying length as CSV
pub fn write_rows<W: Write>(writer: W, rows: &[Row]) -> ReceiptResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    for row in rows {
        csv_writer
            .write_record(row)
            .map_err(|e| ReceiptError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ReceiptError::Export(e.to_string()))
}

/// `Receipt_<number>_<student name>.csv`
pub fn single_receipt_filename(record: &ReceiptRecord) -> String {
    format!(
        "Receipt_{}_{}.csv",
        record.receipt_number,
        FILENAME_SEPARATORS.replace_all(&record.student_name, "_")
    )
}

/// `All_Receipts_<yyyy-mm-dd>.csv`
pub fn all_receipts_filename(date: NaiveDate) -> String {
    format!("All_Receipts_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the single-receipt sheet into `dir`
pub fn export_single_receipt(
    dir: &Path,
    record: &ReceiptRecord,
    school: &SchoolProfile,
) -> ReceiptResult<PathBuf> {
    let rows = single_receipt_rows(record, school)?;
    let path = dir.join(single_receipt_filename(record));
    write_file(&path, &rows)?;

    tracing::info!("Receipt {} exported to {}", record.receipt_number, path.display());
    Ok(path)
}

/// Write the all-receipts sheet into `dir`
pub fn export_all_receipts(
    dir: &Path,
    records: &[ReceiptRecord],
    date: NaiveDate,
) -> ReceiptResult<PathBuf> {
    if records.is_empty() {
        return Err(ReceiptError::NoReceipts);
    }

    let rows = all_receipts_rows(records);
    let path = dir.join(all_receipts_filename(date));
    write_file(&path, &rows)?;

    tracing::info!("{} receipts exported to {}", records.len(), path.display());
    Ok(path)
}

fn write_file(path: &Path, rows: &[Row]) -> ReceiptResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ReceiptError::Export(format!("creating {}: {}", parent.display(), e)))?;
    }

    let file = File::create(path)
        .map_err(|e| ReceiptError::Export(format!("creating {}: {}", path.display(), e)))?;
    write_rows(file, rows)
}
