//! Table recognition
//!
//! Decides whether a candidate block is a pipe table, where its separator
//! row sits, which border convention it uses and how its columns align.

use std::fmt;

use super::cell::CellAlign;
use super::splitter::{ends_with_unescaped_pipe, split_row, BorderMode};
use crate::data::constants::is_separator_text;

/// Layout of a recognized table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Index of the separator row: 0 for headerless tables, 1 otherwise
    pub separator_row: usize,
    /// Border convention used to split every row of the block
    pub border: BorderMode,
    /// Column alignments, one per column
    pub alignments: Vec<Option<CellAlign>>,
}

impl TableLayout {
    /// Number of columns
    pub fn columns(&self) -> usize {
        self.alignments.len()
    }

    /// Whether the block starts with a header row
    pub fn has_header(&self) -> bool {
        self.separator_row > 0
    }
}

/// Why a block is not a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Tables need at least two lines
    TooFewLines,
    /// Neither the first nor the second line is a separator row
    NoSeparatorRow,
    /// The first text row has a single cell and the block has no border
    SingleColumn,
    /// A single column table line without any outer pipe (0-based line)
    MissingBorder { line: usize },
    /// The separator row does not have one cell per column
    ColumnCountMismatch { expected: usize, found: usize },
    /// The split separator row contains other characters
    InvalidSeparator,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooFewLines => write!(f, "a table needs at least two lines"),
            Rejection::NoSeparatorRow => {
                write!(f, "neither the first nor the second line is a separator row")
            }
            Rejection::SingleColumn => {
                write!(f, "single column tables need an outer pipe on every line")
            }
            Rejection::MissingBorder { line } => {
                write!(f, "line {} of a single column table has no outer pipe", line + 1)
            }
            Rejection::ColumnCountMismatch { expected, found } => write!(
                f,
                "separator row has {} cell{} but the table has {} column{}",
                found,
                if *found == 1 { "" } else { "s" },
                expected,
                if *expected == 1 { "" } else { "s" }
            ),
            Rejection::InvalidSeparator => {
                write!(f, "separator cells may only contain '|', ':', '-' and spaces")
            }
        }
    }
}

/// Cheap pre-check: at least two lines and a separator-shaped first or
/// second line
pub fn is_candidate_table(block: &[&str]) -> bool {
    let rows = trim_rows(block);
    rows.len() > 1 && find_separator_row(&rows).is_some()
}

/// Recognize a table block
///
/// Returns `None` when the block is not a table and must be handed back to
/// the host untouched.
pub fn recognize(block: &[&str]) -> Option<TableLayout> {
    analyze(block).ok()
}

/// Recognize a table block, reporting why it was rejected
pub fn analyze(block: &[&str]) -> Result<TableLayout, Rejection> {
    let result = analyze_rows(&trim_rows(block));
    match &result {
        Ok(layout) => tracing::debug!(
            separator_row = layout.separator_row,
            border = ?layout.border,
            columns = layout.columns(),
            "recognized table"
        ),
        Err(reason) => tracing::debug!(%reason, "block is not a table"),
    }
    result
}

fn analyze_rows(rows: &[&str]) -> Result<TableLayout, Rejection> {
    if rows.len() < 2 {
        return Err(Rejection::TooFewLines);
    }

    let separator_row = find_separator_row(rows).ok_or(Rejection::NoSeparatorRow)?;
    let border = BorderMode::detect(rows[0]);

    // The first text row decides the column count
    let first_text_row = if separator_row == 0 { rows[1] } else { rows[0] };
    let columns = split_row(first_text_row, border).len();

    if columns <= 1 {
        if !border.is_bordered() {
            return Err(Rejection::SingleColumn);
        }
        // Each line of a single column table needs at least one pipe
        if let Some(line) = rows
            .iter()
            .skip(1)
            .position(|row| !row.starts_with('|') && !ends_with_unescaped_pipe(row))
        {
            return Err(Rejection::MissingBorder { line: line + 1 });
        }
    }

    let separator = split_row(rows[separator_row], border);
    if separator.len() != columns {
        return Err(Rejection::ColumnCountMismatch {
            expected: columns,
            found: separator.len(),
        });
    }
    if !separator.iter().all(|cell| is_separator_text(cell)) {
        return Err(Rejection::InvalidSeparator);
    }

    Ok(TableLayout {
        separator_row,
        border,
        alignments: separator
            .iter()
            .map(|cell| CellAlign::from_separator(cell))
            .collect(),
    })
}

fn trim_rows<'a>(block: &[&'a str]) -> Vec<&'a str> {
    block.iter().map(|row| row.trim_matches(' ')).collect()
}

/// The separator row is either the first or the second row
fn find_separator_row(rows: &[&str]) -> Option<usize> {
    rows.iter()
        .take(2)
        .position(|row| is_separator_text(row))
}
