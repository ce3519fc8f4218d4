//! Utility modules

pub mod file_storage;
#[cfg(feature = "cli")]
pub mod logger;
pub mod memory_storage;
pub mod validation;

pub use file_storage::*;
pub use memory_storage::*;
pub use validation::*;
