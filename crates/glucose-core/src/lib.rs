//! Shared building blocks for the glucose log.
//!
//! Holds the reading model, the range classifier, the error type, CLI
//! settings with persisted last-used values, input validation and text
//! formatting helpers used by the data and binary crates.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod validation;

pub use error::{GlucoseError, Result};
