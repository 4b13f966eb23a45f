//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics for candidate blocks
//! - Error types and result types

pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use diagnostics::{check_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{TableError, TableResult};
