//! Tree building
//!
//! Resolves spans for the header and body rows of a recognized table and
//! emits the table/section/row/cell node tree.

use super::cell::{CellAlign, Slot};
use super::grid::Grid;
use super::recognizer::{recognize, TableLayout};
use super::splitter::BorderMode;
use crate::core::node::{Node, Tag};
use crate::utils::error::TableResult;

/// Recognize and build a table block in one step
///
/// Returns `Ok(None)` when the block is not a table.
pub fn render(block: &[&str]) -> TableResult<Option<Node>> {
    match recognize(block) {
        Some(layout) => build_table(block, &layout).map(Some),
        None => Ok(None),
    }
}

/// Build the tree of a block already recognized as `layout`
pub fn build_table(block: &[&str], layout: &TableLayout) -> TableResult<Node> {
    let (header, rows) = if layout.has_header() {
        (block.first().copied(), block.get(2..).unwrap_or_default())
    } else {
        (None, block.get(1..).unwrap_or_default())
    };
    build(rows, header, layout.border, &layout.alignments)
}

/// Build a table tree from raw rows
///
/// The header row, when present, is merged on its own, so it only ever
/// produces colspans.
pub fn build<S: AsRef<str>>(
    rows: &[S],
    header: Option<&str>,
    border: BorderMode,
    alignments: &[Option<CellAlign>],
) -> TableResult<Node> {
    let mut table = Node::new(Tag::Table);

    if let Some(header) = header {
        let mut grid = Grid::parse(&[header], border, alignments);
        grid.merge_spans()?;
        let thead = table.push(Node::new(Tag::HeaderSection));
        for slots in grid.iter_rows() {
            thead.push(build_row(slots, Tag::HeaderCell));
        }
    }

    let tbody = table.push(Node::new(Tag::BodySection));
    if rows.is_empty() {
        tbody.push(build_empty_row(alignments.len()));
    } else {
        let mut grid = Grid::parse(rows, border, alignments);
        grid.merge_spans()?;
        for slots in grid.iter_rows() {
            tbody.push(build_row(slots, Tag::DataCell));
        }
    }

    Ok(table)
}

/// Build one row node from merged grid slots
fn build_row(slots: &[Slot], cell_tag: Tag) -> Node {
    let mut tr = Node::new(Tag::Row);
    for cell in slots.iter().filter_map(Slot::as_cell) {
        let mut node = Node::new(cell_tag);
        node.set_text(cell.text.clone());
        if let Some(align) = cell.align {
            node.set_attribute("align", align.as_str());
        }
        if cell.colspan > 1 {
            node.set_attribute("colspan", cell.colspan.to_string());
        }
        if cell.rowspan > 1 {
            node.set_attribute("rowspan", cell.rowspan.to_string());
        }
        if let Some(valign) = cell.valign {
            node.set_attribute("valign", valign.as_str());
        }
        tr.push(node);
    }
    tr
}

/// Body row for a table without data rows: plain empty cells
fn build_empty_row(columns: usize) -> Node {
    let mut tr = Node::new(Tag::Row);
    for _ in 0..columns {
        tr.push(Node::new(Tag::DataCell));
    }
    tr
}
