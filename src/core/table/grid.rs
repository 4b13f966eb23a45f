//! Span resolution on an arena-indexed cell grid
//!
//! Every row holds exactly one slot per column. Merging walks the grid in
//! row-major order: each surviving cell first grows to the right over empty
//! placeholders, then downward until a row span end marker closes the span.
//! Slots covered by a span become [`Slot::Absorbed`].

use super::cell::{Cell, CellAlign, Slot, VAlign};
use super::splitter::{split_row, BorderMode};
use crate::data::constants::{is_row_span_marker, VALIGN_MARKERS};
use crate::utils::error::{TableError, TableResult};

/// Table grid with a fixed column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    slots: Vec<Slot>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(columns: usize) -> Self {
        Grid {
            columns,
            slots: Vec::new(),
        }
    }

    /// Split and parse raw rows into a grid with one column per alignment
    pub fn parse<S: AsRef<str>>(
        rows: &[S],
        border: BorderMode,
        alignments: &[Option<CellAlign>],
    ) -> Self {
        let mut grid = Grid::new(alignments.len());
        for row in rows {
            grid.push_row(&split_row(row.as_ref(), border), alignments);
        }
        grid
    }

    /// Append a row of raw cells
    ///
    /// Missing cells are filled with placeholders, extra cells are dropped.
    pub fn push_row<S: AsRef<str>>(&mut self, raw_cells: &[S], alignments: &[Option<CellAlign>]) {
        for column in 0..self.columns {
            let align = alignments.get(column).copied().flatten();
            let cell = match raw_cells.get(column) {
                Some(raw) => Cell::parse(raw.as_ref(), align),
                None => Cell::empty(align),
            };
            self.slots.push(Slot::Cell(cell));
        }
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.slots.len() / self.columns
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot at a grid position
    pub fn get(&self, row: usize, column: usize) -> Option<&Slot> {
        if column >= self.columns {
            return None;
        }
        self.slots.get(self.index(row, column))
    }

    /// All slots of one row
    pub fn row(&self, row: usize) -> Option<&[Slot]> {
        if row >= self.rows() {
            return None;
        }
        let start = self.index(row, 0);
        self.slots.get(start..start + self.columns)
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Slot]> {
        self.slots.chunks(self.columns.max(1))
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.slots[self.index(row, column)].as_cell()
    }

    /// Collapse empty cells into colspans and rowspans
    ///
    /// Fails when a row span end marker asks for more than one vertical
    /// alignment.
    pub fn merge_spans(&mut self) -> TableResult<()> {
        for row in 0..self.rows() {
            for column in 0..self.columns {
                self.merge_spans_for_cell(row, column)?;
            }
        }
        Ok(())
    }

    fn merge_spans_for_cell(&mut self, row: usize, column: usize) -> TableResult<()> {
        // Already covered by an earlier span
        if self.cell(row, column).is_none() {
            return Ok(());
        }

        let colspan = 1 + (column + 1..self.columns)
            .take_while(|&right| self.cell(row, right).is_some_and(Cell::is_placeholder))
            .count();

        let (rowspan, valign) = self.scan_rowspan(row, column)?;

        let index = self.index(row, column);
        if let Slot::Cell(cell) = &mut self.slots[index] {
            cell.colspan = colspan;
            cell.rowspan = rowspan;
            cell.valign = valign;
        }

        if colspan > 1 || rowspan > 1 {
            tracing::trace!(row, column, colspan, rowspan, ?valign, "merged cell span");
        }

        for r in 0..rowspan {
            for c in 0..colspan {
                if r == 0 && c == 0 {
                    continue;
                }
                let index = self.index(row + r, column + c);
                self.slots[index] = Slot::Absorbed;
            }
        }
        Ok(())
    }

    /// Scan below a cell for a row span closed by an end marker
    ///
    /// Placeholders and blank cells extend the span tentatively; without a
    /// closing marker the span falls back to a single row.
    fn scan_rowspan(&self, row: usize, column: usize) -> TableResult<(usize, Option<VAlign>)> {
        let mut rowspan = 1;
        for down in row + 1..self.rows() {
            let Some(below) = self.cell(down, column) else {
                break;
            };
            match below.text.as_deref() {
                Some(text) if is_row_span_marker(text) => {
                    let valign = marker_valign(text)
                        .map_err(|_| TableError::ambiguous_valign_at(text, down, column))?;
                    return Ok((rowspan + 1, valign));
                }
                Some(text) if !text.is_empty() => break,
                _ => rowspan += 1,
            }
        }
        Ok((1, None))
    }
}

/// Vertical alignment requested by a row span end marker
///
/// Repeating the same code (`_^^_`) is fine, mixing codes is not.
pub fn marker_valign(marker: &str) -> TableResult<Option<VAlign>> {
    let mut valign = None;
    for requested in marker.chars().filter_map(|c| VALIGN_MARKERS.get(&c).copied()) {
        match valign {
            Some(current) if current != requested => {
                return Err(TableError::ambiguous_valign(marker));
            }
            _ => valign = Some(requested),
        }
    }
    Ok(valign)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(grid: &Grid, row: usize) -> Vec<Option<&str>> {
        grid.row(row)
            .unwrap()
            .iter()
            .map(|slot| slot.as_cell().and_then(|c| c.text.as_deref()))
            .collect()
    }

    #[test]
    fn test_parse_pads_and_truncates() {
        let aligns = vec![None, None, None];
        let grid = Grid::parse(&["|a|b|", "|a|b|c|d|"], BorderMode::Both, &aligns);
        assert_eq!(grid.rows(), 2);
        assert_eq!(texts(&grid, 0), vec![Some("a"), Some("b"), None]);
        assert_eq!(texts(&grid, 1), vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_row_out_of_range() {
        let grid = Grid::parse(&["|a|b|"], BorderMode::Both, &[None, None]);
        assert_eq!(grid.row(0).map(<[Slot]>::len), Some(2));
        assert!(grid.row(1).is_none());
        assert!(Grid::new(3).row(0).is_none());
    }

    #[test]
    fn test_blank_is_not_placeholder() {
        let grid = Grid::parse(&["| a |   ||"], BorderMode::Both, &[None, None, None]);
        let row = grid.row(0).unwrap();
        assert_eq!(row[1].as_cell().unwrap().text.as_deref(), Some(""));
        assert!(row[2].as_cell().unwrap().is_placeholder());
    }

    #[test]
    fn test_colspan_merge() {
        let mut grid = Grid::parse(&["|a|||d|"], BorderMode::Both, &[None; 4]);
        grid.merge_spans().unwrap();
        let row = grid.row(0).unwrap();
        assert_eq!(row[0].as_cell().unwrap().colspan, 3);
        assert!(row[1].is_absorbed());
        assert!(row[2].is_absorbed());
        assert_eq!(row[3].as_cell().unwrap().colspan, 1);
    }

    #[test]
    fn test_rowspan_requires_marker() {
        let mut grid = Grid::parse(&["|a|b|", "| |c|", "|d|e|"], BorderMode::Both, &[None; 2]);
        grid.merge_spans().unwrap();
        assert_eq!(grid.get(0, 0).unwrap().as_cell().unwrap().rowspan, 1);
        assert!(!grid.get(1, 0).unwrap().is_absorbed());
    }

    #[test]
    fn test_rowspan_with_marker() {
        let mut grid = Grid::parse(
            &["|a|b|", "|  |c|", "|_=_|d|"],
            BorderMode::Both,
            &[None; 2],
        );
        grid.merge_spans().unwrap();
        let cell = grid.get(0, 0).unwrap().as_cell().unwrap();
        assert_eq!(cell.rowspan, 3);
        assert_eq!(cell.valign, Some(VAlign::Bottom));
        assert!(grid.get(1, 0).unwrap().is_absorbed());
        assert!(grid.get(2, 0).unwrap().is_absorbed());
    }

    #[test]
    fn test_ambiguous_marker() {
        let mut grid = Grid::parse(&["|a|", "|_^=_|"], BorderMode::Both, &[None]);
        let err = grid.merge_spans().unwrap_err();
        assert_eq!(err, TableError::ambiguous_valign_at("_^=_", 1, 0));
    }

    #[test]
    fn test_marker_valign() {
        assert_eq!(marker_valign("_  _").unwrap(), None);
        assert_eq!(marker_valign("_^^_").unwrap(), Some(VAlign::Top));
        assert_eq!(marker_valign("_--_").unwrap(), Some(VAlign::Middle));
        assert!(marker_valign("_-^_").is_err());
    }
}
