//! Property-based tests for table recognition and span resolution

use proptest::prelude::*;
use spantables::{recognize, render, split_row, BorderMode, Grid, Slot, Tag};

/// Cell contents without any table syntax
fn text_cell() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

/// Cell contents for colspan tests: text or an empty placeholder
fn colspan_cell() -> impl Strategy<Value = String> {
    prop_oneof![3 => text_cell(), 1 => Just(String::new())]
}

/// Cell contents including blanks and unambiguous row span markers
fn span_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => text_cell(),
        2 => Just(String::new()),
        1 => Just("  ".to_string()),
        1 => Just("__".to_string()),
        1 => Just("_^_".to_string()),
        1 => Just("_ - _".to_string()),
        1 => Just("_==_".to_string()),
    ]
}

fn table_lines(columns: usize, rows: &[Vec<String>], header: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if header {
        let names: Vec<String> = (0..columns).map(|c| format!("h{}", c)).collect();
        lines.push(format!("|{}|", names.join("|")));
    }
    lines.push(format!("|{}", "---|".repeat(columns)));
    for row in rows {
        lines.push(format!("|{}|", row.join("|")));
    }
    lines
}

fn grid_rows(cell: BoxedStrategy<String>) -> impl Strategy<Value = (usize, Vec<Vec<String>>)> {
    (2usize..6).prop_flat_map(move |columns| {
        let row = prop::collection::vec(cell.clone(), columns);
        (Just(columns), prop::collection::vec(row, 1..7))
    })
}

proptest! {
    /// Without row span markers every body row covers exactly N columns
    #[test]
    fn column_count_invariant((columns, rows) in grid_rows(colspan_cell().boxed()), header in any::<bool>()) {
        let lines = table_lines(columns, &rows, header);
        let block: Vec<&str> = lines.iter().map(String::as_str).collect();
        let table = render(&block).unwrap().expect("generated block is a table");

        for row in table.find_all(Tag::Row) {
            let width: usize = row.children().iter().map(|cell| cell.span("colspan")).sum();
            prop_assert_eq!(width, columns);
        }
    }

    /// Representative cells and absorbed slots tile the grid exactly
    #[test]
    fn span_partition_invariant((columns, rows) in grid_rows(span_cell().boxed())) {
        let raw: Vec<String> = rows.iter().map(|row| format!("|{}|", row.join("|"))).collect();
        let mut grid = Grid::parse(&raw, BorderMode::Both, &vec![None; columns]);
        grid.merge_spans().unwrap();

        let mut cover = vec![vec![0usize; columns]; grid.rows()];
        let mut origin = vec![vec![false; columns]; grid.rows()];
        for r in 0..grid.rows() {
            for c in 0..columns {
                if let Some(Slot::Cell(cell)) = grid.get(r, c) {
                    origin[r][c] = true;
                    prop_assert!(r + cell.rowspan <= grid.rows());
                    prop_assert!(c + cell.colspan <= columns);
                    for row in cover.iter_mut().skip(r).take(cell.rowspan) {
                        for slot in row.iter_mut().skip(c).take(cell.colspan) {
                            *slot += 1;
                        }
                    }
                }
            }
        }

        for r in 0..grid.rows() {
            for c in 0..columns {
                prop_assert_eq!(cover[r][c], 1, "slot ({}, {}) covered {} times", r, c, cover[r][c]);
                let absorbed = grid.get(r, c).map_or(false, Slot::is_absorbed);
                prop_assert_eq!(absorbed, !origin[r][c]);
            }
        }
    }

    /// Recognition is deterministic
    #[test]
    fn recognition_is_deterministic((columns, rows) in grid_rows(colspan_cell().boxed()), header in any::<bool>()) {
        let lines = table_lines(columns, &rows, header);
        let block: Vec<&str> = lines.iter().map(String::as_str).collect();
        let first = recognize(&block).expect("generated block is a table");
        let second = recognize(&block).expect("generated block is a table");
        prop_assert_eq!(first.columns(), columns);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.has_header(), header);
    }

    /// A pipe inside a code span never splits a cell
    #[test]
    fn code_span_pipe_immunity(
        cells in prop::collection::vec(text_cell(), 1..5),
        at in any::<prop::sample::Index>(),
        left in "[a-z]{1,4}",
        right in "[a-z]{1,4}",
    ) {
        let target = at.index(cells.len());
        let with = |sep: &str| {
            let mut cells = cells.clone();
            cells[target] = format!("`{}{}{}`", left, sep, right);
            format!("| {} |", cells.join(" | "))
        };

        let piped = split_row(&with("|"), BorderMode::Both);
        let dashed = split_row(&with("-"), BorderMode::Both);
        prop_assert_eq!(piped.len(), dashed.len());
        prop_assert_eq!(piped.len(), cells.len());
    }

    /// A single column table is rejected as soon as one line lacks an outer pipe
    #[test]
    fn single_column_needs_pipe_on_every_line(
        rows in prop::collection::vec(text_cell(), 1..5),
        bare in any::<prop::sample::Index>(),
    ) {
        let bare = bare.index(rows.len());
        let mut lines = vec!["| head |".to_string(), "|------|".to_string()];
        for (i, row) in rows.iter().enumerate() {
            if i == bare {
                lines.push(row.clone());
            } else {
                lines.push(format!("| {} |", row));
            }
        }
        let block: Vec<&str> = lines.iter().map(String::as_str).collect();
        prop_assert!(recognize(&block).is_none());

        lines[bare + 2] = format!("| {}", rows[bare]);
        let block: Vec<&str> = lines.iter().map(String::as_str).collect();
        prop_assert!(recognize(&block).is_some());
    }
}
