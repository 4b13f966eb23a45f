//! Core modules
//!
//! This module contains the table engine and its host-side plumbing:
//! - `table`: recognition, row splitting and span resolution
//! - `node`: the labeled output tree
//! - `host`: block processor registry and document driver
//! - `options`: registration options for the table extension

pub mod host;
pub mod node;
pub mod options;
pub mod table;

// Re-export main types and functions
pub use host::{BlockParser, BlockProcessor, Extension, TableExtension, TableProcessor};
pub use node::{Node, Tag};
pub use options::TableOptions;
pub use table::{
    analyze, build, build_table, is_candidate_table, recognize, render, BorderMode, CellAlign,
    Rejection, TableLayout, VAlign,
};
