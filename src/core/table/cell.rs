//! Cell types and alignment for pipe tables

#[cfg(feature = "serde")]
use serde::Serialize;

/// Horizontal column alignment, taken from the separator row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum CellAlign {
    Left,
    Center,
    Right,
}

impl CellAlign {
    /// Parse a (trimmed) separator cell such as `:---:`
    ///
    /// Returns `None` when the cell has no colon on either side.
    pub fn from_separator(token: &str) -> Option<Self> {
        let token = token.trim_matches(' ');
        match (token.starts_with(':'), token.ends_with(':')) {
            (true, true) => Some(CellAlign::Center),
            (true, false) => Some(CellAlign::Left),
            (false, true) => Some(CellAlign::Right),
            (false, false) => None,
        }
    }

    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            CellAlign::Left => "left",
            CellAlign::Center => "center",
            CellAlign::Right => "right",
        }
    }
}

/// Vertical alignment of a row spanning cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

impl VAlign {
    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Middle => "middle",
            VAlign::Bottom => "bottom",
        }
    }
}

/// A single table cell with span and alignment info
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Cell {
    /// Trimmed cell text. `None` marks an empty placeholder that neighbours
    /// may absorb, `Some("")` is a real blank cell.
    pub text: Option<String>,
    /// Column alignment
    pub align: Option<CellAlign>,
    /// Number of columns this cell spans
    pub colspan: usize,
    /// Number of rows this cell spans
    pub rowspan: usize,
    /// Vertical alignment, set by a row span end marker
    pub valign: Option<VAlign>,
}

impl Cell {
    /// Create a cell from raw (untrimmed) split output
    ///
    /// Only an exactly empty raw string becomes a placeholder: whitespace-only
    /// cells stay real blank cells.
    pub fn parse(raw: &str, align: Option<CellAlign>) -> Self {
        let text = if raw.is_empty() {
            None
        } else {
            Some(raw.trim_matches(' ').to_string())
        };
        Cell {
            text,
            align,
            colspan: 1,
            rowspan: 1,
            valign: None,
        }
    }

    /// Create an empty placeholder cell
    pub fn empty(align: Option<CellAlign>) -> Self {
        Cell::parse("", align)
    }

    /// Whether this cell is an empty placeholder
    pub fn is_placeholder(&self) -> bool {
        self.text.is_none()
    }

    /// Whether the cell carries no visible text (placeholder or blank)
    pub fn is_blank(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
    }
}

/// One position of the table grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Slot {
    /// A cell that is emitted, possibly spanning neighbours
    Cell(Cell),
    /// A position covered by a spanning cell elsewhere
    Absorbed,
}

impl Slot {
    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            Slot::Cell(cell) => Some(cell),
            Slot::Absorbed => None,
        }
    }

    pub fn is_absorbed(&self) -> bool {
        matches!(self, Slot::Absorbed)
    }
}
