//! Data layer - Static syntax tables and constants
//!
//! This module contains the fixed vocabulary of the table syntax:
//! - Separator characters
//! - Row span marker pattern and vertical alignment codes
//! - Processor names and priorities

pub mod constants;

// Re-export commonly used items
pub use constants::{
    is_row_span_marker, is_separator_text, ROW_SPAN_MARKER, SEPARATOR_CHARS, VALIGN_MARKERS,
};
