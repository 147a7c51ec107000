//! Grid rendering for tables.
//!
//! Tables render in the bordered layout used by `psql`:
//!
//! ```text
//! +---------------+---------+
//! | name          |   price |
//! |---------------+---------|
//! | iphone 15 pro |     999 |
//! +---------------+---------+
//! ```
//!
//! Columns holding only numbers are right-aligned, everything else is
//! left-aligned. Cells containing line breaks span several physical lines
//! inside the grid. An empty table renders as nothing at all.

use std::fmt;

use prettytable::format::{Alignment, FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row as GridRow, Table as Grid};

use crate::table::Table;
use crate::types::{detect_type, ColumnType};

fn psql_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separators(
            &[LinePosition::Top, LinePosition::Bottom],
            LineSeparator::new('-', '+', '+', '+'),
        )
        .separator(LinePosition::Title, LineSeparator::new('-', '+', '|', '|'))
        .padding(1, 1)
        .build()
}

/// A column is numeric when it has at least one non-blank cell and every
/// non-blank cell parses as a number.
fn alignment(cells: &[String]) -> Alignment {
    let mut non_empty = cells.iter().filter(|cell| !cell.trim().is_empty()).peekable();
    let numeric =
        non_empty.peek().is_some() && non_empty.all(|cell| detect_type(cell) != ColumnType::Text);
    if numeric {
        Alignment::RIGHT
    } else {
        Alignment::LEFT
    }
}

fn header_cell(header: &str, align: Alignment) -> Cell {
    // headers always get two extra columns of room
    let padded = match align {
        Alignment::RIGHT => format!("  {header}"),
        _ => format!("{header}  "),
    };
    Cell::new_align(&padded, align)
}

impl Table {
    fn to_grid(&self) -> Grid {
        let headers = self.columns();
        let columns: Vec<Vec<String>> = headers
            .iter()
            .map(|header| {
                self.rows()
                    .iter()
                    .map(|row| row.get(header).map(ToString::to_string).unwrap_or_default())
                    .collect()
            })
            .collect();
        let aligns: Vec<Alignment> = columns.iter().map(|cells| alignment(cells)).collect();

        let mut grid = Grid::new();
        grid.set_format(psql_format());
        grid.set_titles(GridRow::new(
            headers
                .iter()
                .zip(&aligns)
                .map(|(header, align)| header_cell(header, *align))
                .collect(),
        ));
        for row_idx in 0..self.len() {
            grid.add_row(GridRow::new(
                columns
                    .iter()
                    .zip(&aligns)
                    .map(|(cells, align)| Cell::new_align(&cells[row_idx], *align))
                    .collect(),
            ));
        }
        grid
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns().is_empty() {
            return Ok(());
        }
        let rendered = self.to_grid().to_string();
        f.write_str(rendered.trim_end_matches('\n'))
    }
}
