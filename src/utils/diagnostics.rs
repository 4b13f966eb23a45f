//! Table diagnostics
//!
//! Explains how a candidate block is treated, without changing the
//! outcome. It can report:
//!
//! - Why a block was not recognized as a table
//! - Rows with more cells than the table has columns (extra cells are dropped)
//! - Ambiguous row span end markers (fatal during rendering)
//!
//! ## Example
//!
//! ```rust
//! use spantables::diagnostics::{check_table, DiagnosticLevel};
//!
//! let result = check_table(&["| a | b |", "| 1 | 2 |"]);
//! assert_eq!(result.diagnostics[0].level, DiagnosticLevel::Info);
//! ```

use std::fmt;

use crate::core::table::{analyze, build_table, is_candidate_table, split_row, Rejection};
use crate::data::constants::is_separator_text;
use crate::utils::error::TableError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the table renders, but maybe not as intended
    Warning,
    /// Error - rendering the block fails
    Error,
}

impl DiagnosticLevel {
    fn ansi_color(self) -> &'static str {
        match self {
            DiagnosticLevel::Error => "\x1b[31m",
            DiagnosticLevel::Warning => "\x1b[33m",
            DiagnosticLevel::Info => "\x1b[34m",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number within the block (1-indexed)
    pub line: Option<usize>,
    /// Column number within the table (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add a line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(f, "\n  --> line {}, column {}", line, col)?,
            (Some(line), None) => write!(f, "\n  --> line {}", line)?,
            _ => {}
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the block is rendered as a table
    pub is_table: bool,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check a candidate block
pub fn check_table(block: &[&str]) -> CheckResult {
    let mut result = CheckResult::new();

    let layout = match analyze(block) {
        Ok(layout) => layout,
        Err(rejection) => {
            result.add(rejection_diagnostic(block, &rejection));
            return result;
        }
    };
    result.is_table = true;

    // Rows with more cells than columns lose the extra ones
    for (line, row) in block.iter().enumerate() {
        if line == layout.separator_row {
            continue;
        }
        let cells = split_row(row, layout.border).len();
        if cells > layout.columns() {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "row has {} cells but the table has {} columns; extra cells are dropped",
                        cells,
                        layout.columns()
                    ),
                )
                .with_location(line + 1, layout.columns() + 1)
                .with_source(row.trim_matches(' ')),
            );
        }
    }

    if let Err(TableError::AmbiguousVerticalAlignment {
        marker,
        row,
        column,
    }) = build_table(block, &layout)
    {
        let mut diag = Diagnostic::new(
            DiagnosticLevel::Error,
            format!("row span marker '{}' mixes vertical alignments", marker),
        )
        .with_suggestion("use only one of ^ (top), - (middle) or = (bottom)");
        if let (Some(row), Some(column)) = (row, column) {
            // Body rows start right after the separator
            let line = layout.separator_row + 1 + row;
            diag = diag.with_location(line + 1, column + 1);
            if let Some(source) = block.get(line) {
                diag = diag.with_source(source.trim_matches(' '));
            }
        }
        result.add(diag);
    }

    result
}

/// Describe a rejection, pointing at the offending line
fn rejection_diagnostic(block: &[&str], rejection: &Rejection) -> Diagnostic {
    // Blocks that look like tables but fail later deserve a warning
    let level = if is_candidate_table(block) {
        DiagnosticLevel::Warning
    } else {
        DiagnosticLevel::Info
    };
    let mut diag = Diagnostic::new(level, format!("not a table: {}", rejection));

    let separator_line = block
        .iter()
        .take(2)
        .position(|row| is_separator_text(row.trim_matches(' ')));

    let (line, suggestion) = match rejection {
        Rejection::TooFewLines => (None, None),
        Rejection::NoSeparatorRow => (
            Some(1),
            Some("add a separator row such as |---|---| below the header"),
        ),
        Rejection::SingleColumn => (
            Some(0),
            Some("start or end every line of a single column table with |"),
        ),
        Rejection::MissingBorder { line } => (
            Some(*line),
            Some("start or end every line of a single column table with |"),
        ),
        Rejection::ColumnCountMismatch { .. } => (
            separator_line,
            Some("give the separator row exactly one cell per column"),
        ),
        Rejection::InvalidSeparator => (
            separator_line,
            Some("separator cells look like ---, :--, --: or :-:"),
        ),
    };

    if let Some(line) = line {
        diag = diag.with_line(line + 1);
        if let Some(source) = block.get(line) {
            diag = diag.with_source(source.trim_matches(' '));
        }
    }
    if let Some(suggestion) = suggestion {
        diag = diag.with_suggestion(suggestion);
    }
    diag
}

const ANSI_RESET: &str = "\x1b[0m";

/// Format a check result for a terminal
///
/// Starts with the verdict for the block, then lists each diagnostic and
/// ends with the summary line.
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let verdict = if result.is_table {
        "block renders as a table"
    } else {
        "block is left to other processors"
    };
    let mut output = format!("{}\n\n", verdict);

    for diag in &result.diagnostics {
        if use_color {
            output.push_str(&format!("{}{}{}\n\n", diag.level.ansi_color(), diag, ANSI_RESET));
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_table() {
        let result = check_table(&["| a | b |", "|---|---|", "| 1 | 2 |"]);
        assert!(result.is_table);
        assert!(result.is_empty());
        assert_eq!(result.summary(), "no issues found");
    }

    #[test]
    fn test_paragraph_is_info() {
        let result = check_table(&["just some", "text"]);
        assert!(!result.is_table);
        assert_eq!(result.infos, 1);
        assert_eq!(result.diagnostics[0].line, Some(2));
    }

    #[test]
    fn test_mismatched_separator_is_warning() {
        let result = check_table(&["| a | b |", "|---|"]);
        assert!(!result.is_table);
        assert_eq!(result.warnings, 1);
        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(2));
        assert_eq!(diag.source_text.as_deref(), Some("|---|"));
        assert!(diag.message.contains("separator row has 1 cell"));
    }

    #[test]
    fn test_extra_cells_warning() {
        let result = check_table(&["| a | b |", "|---|---|", "| 1 | 2 | 3 |"]);
        assert!(result.is_table);
        assert_eq!(result.warnings, 1);
        assert_eq!(result.diagnostics[0].line, Some(3));
        assert_eq!(result.diagnostics[0].column, Some(3));
    }

    #[test]
    fn test_ambiguous_marker_error() {
        let result = check_table(&["| a | b |", "|---|---|", "| 1 | 2 |", "|_-=_| 3 |"]);
        assert!(result.has_errors());
        let diag = &result.diagnostics[0];
        assert_eq!(diag.line, Some(4));
        assert_eq!(diag.column, Some(1));
        assert!(diag.to_string().contains("help: use only one of"));
    }

    #[test]
    fn test_format_diagnostics() {
        let result = check_table(&["| a |", "| 1 |"]);
        let text = format_diagnostics(&result, false);
        assert!(text.starts_with("block is left to other processors\n\n"));
        assert!(text.contains("not a table"));
        assert!(!text.contains('\x1b'));
        assert!(text.ends_with("Summary: 1 note"));
    }

    #[test]
    fn test_format_diagnostics_colored() {
        let result = check_table(&["| a | b |", "|---|---|", "| 1 | 2 | 3 |", "|_-=_| 4 |"]);
        let text = format_diagnostics(&result, true);
        assert!(text.starts_with("block renders as a table\n\n"));
        assert!(text.contains("\x1b[33mwarning: row has 3 cells"));
        assert!(text.contains("\x1b[31merror: row span marker '_-=_'"));
        assert_eq!(text.matches(ANSI_RESET).count(), 2);
        assert!(text.ends_with("Summary: 1 error, 1 warning"));
    }
}
