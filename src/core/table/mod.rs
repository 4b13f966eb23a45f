//! Pipe Table Engine
//!
//! Recognition, splitting and span resolution for pipe tables with
//! optional headers, column alignment and merged cells.
//!
//! This module supports:
//! - Headerless tables (separator on the first line)
//! - Bordered and borderless rows
//! - Pipes inside inline code spans and escaped pipes
//! - Colspan via adjacent empty cells (`|a    ||c|`)
//! - Rowspan closed by an end marker cell (`_  _`), with vertical alignment
//!   codes `^` (top), `-` (middle) and `=` (bottom)
//!
//! # Architecture
//!
//! ```text
//! Candidate block -> Recognizer -> Row Splitter -> Grid (span merge) -> Node tree
//! ```
//!
//! # Example
//!
//! ```ignore
//! use table::render;
//!
//! let tree = render(&["|----|----|", "|r1c1|r1c2|"])?;
//! ```

mod builder;
mod cell;
mod grid;
mod lexer;
mod recognizer;
mod splitter;


// Re-export public API
pub use builder::{build, build_table, render};
pub use cell::{Cell, CellAlign, Slot, VAlign};
pub use grid::{marker_valign, Grid};
pub use lexer::{tokenize, Token, TokenKind};
pub use recognizer::{analyze, is_candidate_table, recognize, Rejection, TableLayout};
pub use splitter::{ends_with_unescaped_pipe, split_cells, split_row, BorderMode};
