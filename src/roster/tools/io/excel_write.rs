use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, instrument};

use crate::roster::tools::error::{Result, ToolError};
use crate::roster::tools::model::{Cell, Table};

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes the table as the only worksheet of an xlsx workbook at `path`.
///
/// The workbook is rendered in memory and written to a sibling temporary
/// file that is renamed over `path`, so a failed save never leaves a
/// truncated workbook behind and never clobbers an existing one.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = table.row_count()))]
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let buffer = render_workbook(table)?;

    let staging = staging_path(path);
    if let Err(error) = fs::write(&staging, &buffer).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(error.into());
    }

    debug!(bytes = buffer.len(), "workbook saved");
    Ok(())
}

/// Renders the table into xlsx bytes.
pub fn render_workbook(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, table)?;
    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    for (col_idx, header) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, column(col_idx)?, header, &header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1)
            .map_err(|_| ToolError::InvalidWorkbook("too many rows for a worksheet".into()))?;
        for (col_idx, cell) in row.iter().enumerate() {
            let excel_col = column(col_idx)?;
            match cell {
                Cell::Missing => {}
                Cell::Text(value) => {
                    worksheet.write_string(excel_row, excel_col, value)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(excel_row, excel_col, *value)?;
                }
                Cell::Boolean(value) => {
                    worksheet.write_boolean(excel_row, excel_col, *value)?;
                }
                Cell::DateTime(value) => {
                    worksheet.write_number_with_format(excel_row, excel_col, *value, &date_format)?;
                }
            }
        }
    }

    Ok(())
}

fn column(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| ToolError::InvalidWorkbook("too many columns for a worksheet".into()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("workbook.xlsx"));
    name.push(".partial");
    path.with_file_name(name)
}
