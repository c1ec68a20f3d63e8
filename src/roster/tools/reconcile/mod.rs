//! Column reconciliation and row-wise merging of participant tables.
//!
//! [`ReconciledTable`] can only be produced here, so any table that reaches
//! the cleaning step is known to carry every column in
//! [`EXPECTED_COLUMNS`](crate::config::EXPECTED_COLUMNS).

use tracing::{debug, instrument};

use crate::roster::tools::config::EXPECTED_COLUMNS;
use crate::roster::tools::error::{Result, ToolError};
use crate::roster::tools::model::{Cell, Table};

/// A table holding at least the expected participant columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledTable(Table);

impl ReconciledTable {
    pub fn table(&self) -> &Table {
        &self.0
    }

    pub fn into_table(self) -> Table {
        self.0
    }

    pub(crate) fn table_mut(&mut self) -> &mut Table {
        &mut self.0
    }

    /// Position of an expected column.
    pub(crate) fn required_index(&self, column: &str) -> Result<usize> {
        self.0
            .column_index(column)
            .ok_or_else(|| ToolError::MissingColumn(column.to_string()))
    }
}

/// Appends every expected column the table lacks, filled with the missing
/// marker. Existing columns keep their position and values.
///
/// Returns the reconciled table together with the names of the columns that
/// were added.
#[instrument(level = "debug", skip_all, fields(rows = table.row_count()))]
pub fn add_expected_columns(mut table: Table) -> (ReconciledTable, Vec<String>) {
    let mut added = Vec::new();
    for column in EXPECTED_COLUMNS {
        if !table.has_column(column) {
            table.push_column(column, Cell::Missing);
            added.push(column.to_string());
        }
    }
    debug!(added = ?added, "expected columns reconciled");
    (ReconciledTable(table), added)
}

/// Concatenates `first`'s rows followed by `second`'s rows.
///
/// The header is `first`'s columns followed by any column only `second`
/// has. Cells a side does not provide are missing. Rows are neither sorted
/// nor deduplicated.
#[instrument(
    level = "debug",
    skip_all,
    fields(first_rows = first.table().row_count(), second_rows = second.table().row_count())
)]
pub fn merge(first: ReconciledTable, second: ReconciledTable) -> ReconciledTable {
    let (mut columns, first_rows) = first.into_table().into_parts();
    let (second_columns, second_rows) = second.into_table().into_parts();

    let positions: Vec<usize> = second_columns
        .into_iter()
        .map(|column| match columns.iter().position(|c| *c == column) {
            Some(index) => index,
            None => {
                columns.push(column);
                columns.len() - 1
            }
        })
        .collect();

    let width = columns.len();
    let mut rows = Vec::with_capacity(first_rows.len() + second_rows.len());
    for mut row in first_rows {
        row.resize(width, Cell::Missing);
        rows.push(row);
    }
    for row in second_rows {
        let mut aligned = vec![Cell::Missing; width];
        for (cell, &index) in row.into_iter().zip(&positions) {
            aligned[index] = cell;
        }
        rows.push(aligned);
    }

    debug!(rows = rows.len(), columns = width, "tables merged");
    ReconciledTable(Table::from_parts(columns, rows))
}
