//! Receipt number sequencing

pub mod counter;

pub use counter::*;
