//! Core types shared by the drvstat crates.
//!
//! - [`error`]: the error taxonomy every engine operation reports through
//! - [`types`]: the statistics record handed to report and export layers

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{StatisticalSummary, SummaryValue};

/// Crate version, shared by the command-line front end.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
