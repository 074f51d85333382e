//! Core operations.
//!
//! This module contains the business logic for charjc commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod clean;

pub use build::build;
pub use clean::clean;
