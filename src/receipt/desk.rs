//! Receipt desk that coordinates numbering, archiving, export and notification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::DeskConfig;
use crate::export;
use crate::notify::WebhookNotifier;
use crate::receipt::ReceiptArchive;
use crate::sequence::SequenceCounter;
use crate::traits::*;
use crate::types::*;
use crate::utils::file_storage::JsonFileStore;

/// A freshly generated receipt together with the notification result
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReceipt {
    pub receipt: Receipt,
    pub outcome: NotifyOutcome,
    pub notice: Notice,
}

/// Result of a bulk export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub count: usize,
}

/// Main receipt desk that orchestrates all receipt operations
pub struct ReceiptDesk<S: KeyValueStore> {
    counter: SequenceCounter<S>,
    archive: ReceiptArchive<S>,
    school: SchoolProfile,
    validator: Box<dyn FormValidator>,
    notifier: Option<Box<dyn ReceiptNotifier>>,
}

impl<S: KeyValueStore + Clone> ReceiptDesk<S> {
    /// Create a new desk with the given store backend
    pub fn new(storage: S, school: SchoolProfile) -> Self {
        Self::with_validator(storage, school, Box::new(DefaultFormValidator))
    }

    /// Create a new desk with a custom form validator
    pub fn with_validator(
        storage: S,
        school: SchoolProfile,
        validator: Box<dyn FormValidator>,
    ) -> Self {
        Self {
            counter: SequenceCounter::new(storage.clone()),
            archive: ReceiptArchive::new(storage),
            school,
            validator,
            notifier: None,
        }
    }

    /// Attach a notifier that receives every generated receipt
    pub fn with_notifier(mut self, notifier: Box<dyn ReceiptNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn school(&self) -> &SchoolProfile {
        &self.school
    }

    // Numbering
    /// Receipt number the next generated receipt will carry
    pub async fn current_number(&mut self) -> ReceiptResult<ReceiptNumber> {
        self.counter.peek_current().await
    }

    /// Move on to a new receipt, advancing the counter once
    pub async fn new_receipt(&mut self) -> ReceiptResult<ReceiptNumber> {
        self.counter.advance().await
    }

    // Receipt generation
    /// Validate the form and generate a receipt with the current number
    ///
    /// Nothing is written when validation fails. The receipt is complete
    /// before the notifier runs, so a failed notification only changes the
    /// returned notice.
    pub async fn generate(&mut self, form: &ReceiptForm) -> ReceiptResult<GeneratedReceipt> {
        self.validator.validate_form(form)?;

        let number = self.counter.peek_current().await?;
        let receipt = Receipt::from_form(number, &self.school, form)?;
        tracing::info!(
            "Generated receipt {} for {} (total {})",
            receipt.number,
            receipt.student.name,
            receipt.total
        );

        let outcome = match &self.notifier {
            Some(notifier) => notifier.notify(&receipt.to_payload()).await,
            None => NotifyOutcome::Skipped,
        };

        let notice = match &outcome {
            NotifyOutcome::Sent => {
                Notice::success(format!("Receipt {} sent to the remote sheet", receipt.number))
            }
            NotifyOutcome::Skipped => Notice::error(
                "Remote sheet integration not configured. Receipt generated but not saved to sheets.",
            ),
            NotifyOutcome::Failed(reason) => {
                Notice::error(format!("Failed to save to the remote sheet: {}", reason))
            }
        };

        Ok(GeneratedReceipt {
            receipt,
            outcome,
            notice,
        })
    }

    // Archive and export
    /// Write the single-receipt sheet into `dir`, then archive the receipt
    ///
    /// The receipt is archived only once its sheet is on disk.
    pub async fn export_receipt(&mut self, receipt: &Receipt, dir: &Path) -> ReceiptResult<PathBuf> {
        let record = receipt.to_record();
        let path = export::export_single_receipt(dir, &record, &self.school)?;
        self.archive.append(record).await?;
        Ok(path)
    }

    /// All archived receipt records
    pub async fn archived_receipts(&self) -> ReceiptResult<Vec<ReceiptRecord>> {
        self.archive.list().await
    }

    /// Write every archived receipt into one sheet named after `date`
    pub async fn export_all(&self, dir: &Path, date: NaiveDate) -> ReceiptResult<ExportSummary> {
        let records = self.archive.list().await?;
        let path = export::export_all_receipts(dir, &records, date)?;
        Ok(ExportSummary {
            path,
            count: records.len(),
        })
    }

    // Administrative operations
    /// Force the counter to `value` and advance past it
    pub async fn force_set(&mut self, value: &str) -> ReceiptResult<ReceiptNumber> {
        self.counter.force_set(value).await
    }

    /// Erase the counter, restarting at `NVA001`
    pub async fn reset(&mut self) -> ReceiptResult<ReceiptNumber> {
        self.counter.reset().await
    }

    /// Make `NVA001` current without advancing
    pub async fn reset_to_start(&mut self) -> ReceiptResult<ReceiptNumber> {
        self.counter.reset_to_start().await
    }
}

impl ReceiptDesk<JsonFileStore> {
    /// Build a file-backed desk, with a webhook notifier when one is configured
    pub fn from_config(config: &DeskConfig) -> ReceiptResult<Self> {
        let storage = JsonFileStore::new(&config.store.path);
        let desk = Self::new(storage, config.school_profile());

        match config.webhook.endpoint() {
            Some(url) => {
                let notifier = WebhookNotifier::new(url, config.webhook.timeout())?;
                Ok(desk.with_notifier(Box::new(notifier)))
            }
            None => Ok(desk),
        }
    }
}
