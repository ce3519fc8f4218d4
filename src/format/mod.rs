//! Text formatting for amounts and dates

pub mod display;
pub mod words;

pub use display::*;
pub use words::*;
