//! Remote notification of generated receipts

pub mod webhook;

pub use webhook::*;
