//! Row splitting
//!
//! Turns one raw table row into its raw cell strings. Pipes inside inline
//! code spans (`` `a|b` ``) and escaped pipes (`\|`) never split a cell.

use super::lexer::{tokenize, Token, TokenKind};

/// Which outer pipes a table uses, derived once per block from its first line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// `a | b`
    #[default]
    None,
    /// `| a | b`
    Left,
    /// `a | b |`
    Right,
    /// `| a | b |`
    Both,
}

impl BorderMode {
    /// Detect the border mode from the first (trimmed) line of a block
    pub fn detect(line: &str) -> Self {
        let line = line.trim_matches(' ');
        match (line.starts_with('|'), ends_with_unescaped_pipe(line)) {
            (true, true) => BorderMode::Both,
            (true, false) => BorderMode::Left,
            (false, true) => BorderMode::Right,
            (false, false) => BorderMode::None,
        }
    }

    pub fn has_left(&self) -> bool {
        matches!(self, BorderMode::Left | BorderMode::Both)
    }

    pub fn has_right(&self) -> bool {
        matches!(self, BorderMode::Right | BorderMode::Both)
    }

    /// Whether the table uses any outer pipe at all
    pub fn is_bordered(&self) -> bool {
        *self != BorderMode::None
    }
}

/// Check whether a line ends with a pipe that is not escaped, i.e. one
/// preceded by an even number (possibly zero) of backslashes.
pub fn ends_with_unescaped_pipe(line: &str) -> bool {
    match line.strip_suffix('|') {
        Some(rest) => rest.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 0,
        None => false,
    }
}

/// Split a raw row into untrimmed cell strings
///
/// In bordered tables one leading pipe and one trailing unescaped pipe are
/// dropped when present, whichever border the first line showed. Borderless
/// rows are padded with a space on each side so that an empty first or last
/// cell reads as a blank cell instead of a placeholder.
pub fn split_row(row: &str, border: BorderMode) -> Vec<String> {
    let row = row.trim_matches(' ');

    let cells = if border.is_bordered() {
        let mut row = row.strip_prefix('|').unwrap_or(row);
        if ends_with_unescaped_pipe(row) {
            row = &row[..row.len() - 1];
        }
        split_cells(row)
    } else {
        split_cells(&format!(" {} ", row))
    };

    tracing::trace!(?border, row, cells = cells.len(), "split table row");
    cells
}

/// Split a prepared row at every pipe that lies outside a code span
pub fn split_cells(row: &str) -> Vec<String> {
    let tokens = tokenize(row);
    let regions = code_regions(&tokens);

    let mut cells = Vec::new();
    let mut pos = 0;
    for pipe in delimiters(&tokens, &regions) {
        cells.push(row[pos..pipe].to_string());
        pos = pipe + 1;
    }
    cells.push(row[pos..].to_string());
    cells
}

/// Pair backtick runs into code regions, as inclusive byte ranges
///
/// An opening run counts one backtick less when escaped and is matched with
/// the nearest later run of exactly that many backticks. Closing runs are
/// never treated as escaped.
fn code_regions(tokens: &[Token]) -> Vec<(usize, usize)> {
    let runs: Vec<(&Token, usize, bool)> = tokens
        .iter()
        .filter_map(|token| match token.kind {
            TokenKind::BacktickRun { len, escaped } => Some((token, len, escaped)),
            _ => None,
        })
        .collect();

    let mut regions = Vec::new();
    let mut pos = 0;
    while pos < runs.len() {
        let (open, len, escaped) = runs[pos];
        let size = if escaped { len - 1 } else { len };
        if size == 0 {
            pos += 1;
            continue;
        }

        let close = runs[pos + 1..]
            .iter()
            .position(|&(_, other, _)| other == size)
            .map(|offset| pos + 1 + offset);

        match close {
            Some(close) => {
                regions.push((open.start, runs[close].0.last()));
                pos = close + 1;
            }
            None => pos += 1,
        }
    }
    regions
}

/// Positions of the pipes that delimit cells
fn delimiters(tokens: &[Token], regions: &[(usize, usize)]) -> Vec<usize> {
    tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Pipe { escaped: false })
        .map(|token| token.start)
        .filter(|&pipe| {
            for &(start, end) in regions {
                if pipe < start {
                    // Regions are ordered, so no later one can contain it
                    return true;
                }
                if pipe <= end {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_detection() {
        assert_eq!(BorderMode::detect("| a | b |"), BorderMode::Both);
        assert_eq!(BorderMode::detect("| a | b"), BorderMode::Left);
        assert_eq!(BorderMode::detect("a | b |"), BorderMode::Right);
        assert_eq!(BorderMode::detect("a | b"), BorderMode::None);
        assert_eq!(BorderMode::detect("  | a | b |  "), BorderMode::Both);
    }

    #[test]
    fn test_escaped_trailing_pipe() {
        assert!(ends_with_unescaped_pipe("a|"));
        assert!(!ends_with_unescaped_pipe("a\\|"));
        assert!(ends_with_unescaped_pipe("a\\\\|"));
        assert!(!ends_with_unescaped_pipe("a\\\\\\|"));
        assert!(!ends_with_unescaped_pipe("a"));
        assert_eq!(BorderMode::detect("a | b\\|"), BorderMode::None);
    }

    #[test]
    fn test_split_bordered() {
        assert_eq!(split_row("|r1c1|r1c2|", BorderMode::Both), vec!["r1c1", "r1c2"]);
        assert_eq!(
            split_row("|r1c1    ||r1c3|", BorderMode::Both),
            vec!["r1c1    ", "", "r1c3"]
        );
    }

    #[test]
    fn test_trailing_border_keeps_escaped_backslashes() {
        // Only the pipe goes, the `\\` pair before it stays in the cell
        assert_eq!(
            split_row("| a | b\\\\|", BorderMode::Both),
            vec![" a ", " b\\\\"]
        );
    }

    #[test]
    fn test_split_borderless_pads() {
        assert_eq!(split_row("a | b", BorderMode::None), vec![" a ", " b "]);
        // Leading empty cell stays a blank, not a placeholder
        assert_eq!(split_row("| b", BorderMode::None), vec![" ", " b "]);
    }

    #[test]
    fn test_split_keeps_escaped_pipe() {
        assert_eq!(
            split_row("| a \\| b | c |", BorderMode::Both),
            vec![" a \\| b ", " c "]
        );
    }

    #[test]
    fn test_split_ignores_pipes_in_code() {
        assert_eq!(
            split_row("| `a|b` | c |", BorderMode::Both),
            vec![" `a|b` ", " c "]
        );
        assert_eq!(
            split_row("| ``a`|`b`` | c |", BorderMode::Both),
            vec![" ``a`|`b`` ", " c "]
        );
    }

    #[test]
    fn test_split_unpaired_backticks() {
        assert_eq!(
            split_row("| `a | b | c |", BorderMode::Both),
            vec![" `a ", " b ", " c "]
        );
        // Different run lengths never pair
        assert_eq!(
            split_row("| ``a|b` | c |", BorderMode::Both),
            vec![" ``a", "b` ", " c "]
        );
    }

    #[test]
    fn test_split_escaped_opening_backtick() {
        // `\``` opens with one backtick and pairs with the single one
        assert_eq!(
            split_row("| \\``a|b` | c |", BorderMode::Both),
            vec![" \\``a|b` ", " c "]
        );
        // `\`` alone has nothing left to open with
        assert_eq!(
            split_row("| \\`a|b` | c |", BorderMode::Both),
            vec![" \\`a", "b` ", " c "]
        );
    }

    #[test]
    fn test_split_code_then_pipe() {
        assert_eq!(
            split_row("| `x` | `y|z` |", BorderMode::Both),
            vec![" `x` ", " `y|z` "]
        );
    }
}
