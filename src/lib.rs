//! # spantables
//!
//! Pipe table recognition with merged cells, written in Rust.
//!
//! ## Features
//!
//! - **Optional Header**: a separator on the first line makes a headerless table
//! - **Column Alignment**: `:--`, `:-:` and `--:` separator cells
//! - **Colspan**: empty cells to the right join the cell on their left
//! - **Rowspan**: empty cells below join the cell above when closed by a
//!   `_  _` end marker, which may carry `^`, `-` or `=` for vertical alignment
//! - **Code Spans**: pipes inside `` `code` `` and escaped `\|` never split cells
//! - **Host Integration**: a priority ordered block processor registry
//!
//! ## Usage Examples
//!
//! ### Rendering a Block
//!
//! ```rust
//! use spantables::{render, Tag};
//!
//! let table = render(&["|----|----|----|", "|r1c1    ||r1c3|"])
//!     .unwrap()
//!     .expect("a table");
//!
//! let cells = table.find_all(Tag::DataCell);
//! assert_eq!(cells[0].attribute("colspan"), Some("2"));
//! assert_eq!(cells[1].text(), Some("r1c3"));
//! ```
//!
//! ### Full Document Parsing
//!
//! ```rust
//! use spantables::host::{BlockParser, TableExtension};
//!
//! let mut parser = BlockParser::new();
//! parser.use_extension(&TableExtension::new());
//!
//! let doc = parser.parse_document("Intro text\n\n| a | b |\n|---|--:|\n| 1 | 2 |").unwrap();
//! assert_eq!(doc.children().len(), 2);
//! ```

/// Core table engine and host plumbing
pub mod core;

/// Data layer - syntax constants
pub mod data;

/// Utility modules
pub mod utils;

// Re-export core modules
pub use self::core::host;
pub use self::core::node;
pub use self::core::options;
pub use self::core::table;

pub use self::core::host::{
    BlockParser, BlockProcessor, Extension, ParagraphProcessor, TableExtension, TableProcessor,
};
pub use self::core::node::{Node, Tag};
pub use self::core::options::TableOptions;
pub use self::core::table::{
    analyze, build, build_table, is_candidate_table, recognize, render, split_row, BorderMode,
    Cell, CellAlign, Grid, Rejection, Slot, TableLayout, VAlign,
};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{TableError, TableResult};

/// Render every table in a document, leaving other blocks as paragraphs
///
/// Uses a [`BlockParser`] with the paragraph fallback and the table
/// extension at its default options.
///
/// # Arguments
/// * `text` - Document text
///
/// # Returns
/// The document tree, or the first fatal table error
pub fn parse_document(text: &str) -> TableResult<Node> {
    let mut parser = BlockParser::new();
    parser.use_extension(&TableExtension::new());
    parser.parse_document(text)
}

/// Check whether a single block renders as a table
///
/// # Arguments
/// * `block` - Block text, lines separated by `\n`
pub fn is_table(block: &str) -> bool {
    let lines: Vec<&str> = block.split('\n').collect();
    recognize(&lines).is_some()
}
