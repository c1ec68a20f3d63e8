use std::collections::HashSet;
use std::io::Cursor;

use calamine::{DataType, Range, Reader, Xlsx};
use tracing::{debug, instrument};

use crate::roster::tools::error::{Result, ToolError};
use crate::roster::tools::model::{Cell, Table};

/// Text values that decode to the missing marker.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Decodes the first worksheet of an xlsx payload into a [`Table`].
///
/// The first row is the header; every following row that holds at least one
/// non-empty cell is a record. Text cells matching [`NA_VALUES`] exactly are
/// missing. An empty worksheet yields a table with neither columns nor rows.
#[instrument(level = "debug", skip_all, fields(bytes = bytes.len()))]
pub fn read_table(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no worksheets".into()))?
        .map_err(ToolError::from)?;

    let table = range_to_table(&range)?;
    debug!(
        columns = table.columns().len(),
        rows = table.row_count(),
        "worksheet decoded"
    );
    Ok(table)
}

fn range_to_table(range: &Range<DataType>) -> Result<Table> {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(first_row) => header_names(first_row),
        None => return Ok(Table::default()),
    };

    let mut table = Table::new(headers)?;
    for row in rows {
        if row.iter().all(is_blank) {
            continue;
        }
        table.push_row(row.iter().map(to_cell).collect())?;
    }
    Ok(table)
}

/// Names blank headers `Unnamed: <index>` and suffixes repeats with `.1`,
/// `.2`, … so every column name is unique.
fn header_names(row: &[DataType]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(row.len());

    for (index, cell) in row.iter().enumerate() {
        let raw = cell_to_string(cell);
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            raw
        };

        let mut name = base.clone();
        let mut counter = 1;
        while seen.contains(&name) {
            name = format!("{base}.{counter}");
            counter += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(value) => value.is_empty(),
        _ => false,
    }
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty | DataType::Error(_) => Cell::Missing,
        DataType::String(value) if NA_VALUES.contains(&value.as_str()) => Cell::Missing,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Boolean(*value),
        DataType::DateTime(value) => Cell::DateTime(*value),
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
