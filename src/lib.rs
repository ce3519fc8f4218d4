//! # Fee Receipt Core
//!
//! School fee receipt generation: sequential receipt numbering, Indian
//! amount-in-words formatting, receipt archiving, spreadsheet export and
//! webhook submission.
//!
//! ## Features
//!
//! - **Receipt numbering**: `NVA001` ... `NVA999`, `NVB001` ... persisted in any key-value store
//! - **Amount in words**: Indian grouping with Thousand, Lakh and Crore
//! - **Form validation**: required fields and at least one valid fee line
//! - **Archive and export**: single-receipt and all-receipts CSV sheets
//! - **Webhook**: best-effort JSON submission of every generated receipt
//! - **Storage abstraction**: trait-based store with in-memory and JSON file backends
//!
//! ## Quick Start
//!
//! ```rust
//! use fee_receipt_core::{to_words, ReceiptNumber};
//!
//! assert_eq!(to_words(150000), "One Lakh Fifty Thousand");
//!
//! let number: ReceiptNumber = "NVA999".parse().unwrap();
//! assert_eq!(number.successor().unwrap().to_string(), "NVB001");
//!
//! // With a store: SequenceCounter::new(MemoryStore::new()).advance().await
//! ```

pub mod config;
pub mod export;
pub mod format;
pub mod notify;
pub mod receipt;
pub mod sequence;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::DeskConfig;
pub use format::*;
pub use notify::WebhookNotifier;
pub use receipt::*;
pub use sequence::*;
pub use traits::*;
pub use types::*;
pub use utils::{JsonFileStore, MemoryStore};
