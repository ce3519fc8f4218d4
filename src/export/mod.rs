//! Tabular exports of receipts

pub mod sheet;

pub use sheet::*;
