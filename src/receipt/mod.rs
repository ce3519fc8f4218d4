//! Receipt module containing assembly, rendering, archiving and the desk

pub mod archive;
pub mod build;
pub mod desk;
pub mod render;

pub use archive::*;
pub use desk::*;
