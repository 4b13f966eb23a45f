//! Constants and lookup tables for pipe table recognition
//!
//! This module contains the fixed vocabulary of the table syntax:
//! - The separator row character set
//! - The row span end marker pattern
//! - Vertical alignment marker characters
//! - Default registration priorities for block processors

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use crate::core::table::VAlign;

// ============================================================================
// Separator Row
// ============================================================================

/// Characters allowed in a separator row (`|:--|--:|`)
pub const SEPARATOR_CHARS: [char; 4] = ['|', ':', '-', ' '];

/// Check whether a character may appear in a separator row
#[inline]
pub fn is_separator_char(c: char) -> bool {
    SEPARATOR_CHARS.contains(&c)
}

/// Check whether every character of `text` is a separator character.
///
/// An empty string qualifies.
pub fn is_separator_text(text: &str) -> bool {
    text.chars().all(is_separator_char)
}

// ============================================================================
// Row Span Markers
// ============================================================================

lazy_static! {
    /// End marker of a row span: underscores at both ends, with any mix of
    /// `_`, `^`, `=`, `-` and spaces in between (`_  _`, `_^_`, `____`).
    pub static ref ROW_SPAN_MARKER: Regex =
        Regex::new(r"^_[_^=\- ]*_$").unwrap();
}

/// Vertical alignment requested by a character inside a row span marker
pub static VALIGN_MARKERS: phf::Map<char, VAlign> = phf_map! {
    '^' => VAlign::Top,
    '-' => VAlign::Middle,
    '=' => VAlign::Bottom,
};

/// Check whether a (trimmed) cell text terminates a row span
pub fn is_row_span_marker(text: &str) -> bool {
    ROW_SPAN_MARKER.is_match(text)
}

// ============================================================================
// Block Processor Registration
// ============================================================================

/// Characters a host treats as backslash-escapable before any extension
/// adds its own
pub const DEFAULT_ESCAPED_CHARS: [char; 16] = [
    '\\', '`', '*', '_', '{', '}', '[', ']', '(', ')', '>', '#', '+', '-', '.', '!',
];

/// Name under which the table processor registers itself
pub const TABLE_PROCESSOR_NAME: &str = "tables_extended";

/// Default priority of the table processor (runs before paragraphs)
pub const TABLE_PROCESSOR_PRIORITY: f64 = 75.1;

/// Name of the fallback paragraph processor
pub const PARAGRAPH_PROCESSOR_NAME: &str = "paragraph";

/// Priority of the fallback paragraph processor
pub const PARAGRAPH_PROCESSOR_PRIORITY: f64 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_text() {
        assert!(is_separator_text("|:---|---:|"));
        assert!(is_separator_text(" - | - "));
        assert!(is_separator_text(""));
        assert!(!is_separator_text("|a|b|"));
        assert!(!is_separator_text("|===|"));
    }

    #[test]
    fn test_row_span_marker() {
        assert!(is_row_span_marker("__"));
        assert!(is_row_span_marker("_  _"));
        assert!(is_row_span_marker("_^^_"));
        assert!(is_row_span_marker("_-=_"));
        assert!(is_row_span_marker("____"));

        assert!(!is_row_span_marker("_"));
        assert!(!is_row_span_marker("^="));
        assert!(!is_row_span_marker("_x_"));
        assert!(!is_row_span_marker("______ &#20;"));
        assert!(!is_row_span_marker(" _  _"));
    }

    #[test]
    fn test_valign_markers() {
        assert_eq!(VALIGN_MARKERS.get(&'^'), Some(&VAlign::Top));
        assert_eq!(VALIGN_MARKERS.get(&'-'), Some(&VAlign::Middle));
        assert_eq!(VALIGN_MARKERS.get(&'='), Some(&VAlign::Bottom));
        assert_eq!(VALIGN_MARKERS.get(&'_'), None);
    }
}
