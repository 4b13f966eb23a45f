//! Error handling for table processing
//!
//! Rejecting a block is not an error: a block that does not look like a
//! table is simply handed back to the host. The errors here are the few
//! input problems that must stop document processing.

use std::fmt;

/// Table processing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A row span end marker asks for more than one vertical alignment
    AmbiguousVerticalAlignment {
        marker: String,
        /// Grid row of the marker cell (0-based, section relative)
        row: Option<usize>,
        /// Grid column of the marker cell (0-based)
        column: Option<usize>,
    },
    /// Invalid input handed over by the host
    InvalidInput { message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::AmbiguousVerticalAlignment {
                marker,
                row,
                column,
            } => {
                write!(
                    f,
                    "Ambiguous vertical alignment in row span marker '{}': \
                     use only one of ^ (top), - (middle) or = (bottom)",
                    marker
                )?;
                if let (Some(r), Some(c)) = (row, column) {
                    write!(f, " (row {}, column {})", r + 1, c + 1)?;
                }
                Ok(())
            }
            TableError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn ambiguous_valign(marker: impl Into<String>) -> Self {
        TableError::AmbiguousVerticalAlignment {
            marker: marker.into(),
            row: None,
            column: None,
        }
    }

    pub fn ambiguous_valign_at(marker: impl Into<String>, row: usize, column: usize) -> Self {
        TableError::AmbiguousVerticalAlignment {
            marker: marker.into(),
            row: Some(row),
            column: Some(column),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether the error comes from the table text itself
    pub fn is_input_error(&self) -> bool {
        matches!(self, TableError::AmbiguousVerticalAlignment { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_valign_display() {
        let err = TableError::ambiguous_valign("_^=_");
        let msg = err.to_string();
        assert!(msg.contains("_^=_"));
        assert!(msg.contains("only one of"));
        assert!(!msg.contains("column"));
    }

    #[test]
    fn test_ambiguous_valign_with_location() {
        let err = TableError::ambiguous_valign_at("_-=_", 2, 0);
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("column 1"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_input() {
        let err = TableError::invalid("no block to process");
        assert_eq!(err.to_string(), "Invalid input: no block to process");
        assert!(!err.is_input_error());
    }
}
