use crate::roster::tools::error::{Result, ToolError};

/// A single spreadsheet cell.
///
/// `Missing` is the marker for "no data provided" and never compares equal to
/// any text value, including the placeholders written by the cleaning step.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    /// No value was provided.
    #[default]
    Missing,
    /// Plain string value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Excel serial date-time.
    DateTime(f64),
}

impl Cell {
    /// Builds a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Column-named table stored row-major.
///
/// Column names are unique and every row holds exactly one cell per column.
/// Row identity is positional: row `i` is simply the `i`-th entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut table = Table::default();
        for column in columns {
            if table.has_column(&column) {
                return Err(ToolError::InvalidWorkbook(format!(
                    "duplicate column '{column}'"
                )));
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    /// Builds a table from records expressed as `column → cell` pairs.
    ///
    /// Columns appear in first-seen order; a record that omits a column gets
    /// the missing marker there.
    pub fn from_records<I, R, K>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, Cell)>,
        K: Into<String>,
    {
        let mut table = Table::default();
        for record in records {
            let mut row = vec![Cell::Missing; table.columns.len()];
            for (column, cell) in record {
                let column = column.into();
                let index = match table.column_index(&column) {
                    Some(index) => index,
                    None => {
                        table.push_column(column, Cell::Missing);
                        row.push(Cell::Missing);
                        table.columns.len() - 1
                    }
                };
                row[index] = cell;
            }
            table.rows.push(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Looks up a cell by row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(index))
    }

    /// Appends a row, padding it with missing cells up to the table width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(ToolError::InvalidWorkbook(format!(
                "row has {} cells but the header has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
        Ok(())
    }

    /// Appends a column, setting every existing row to `fill`. Does nothing
    /// if the column already exists.
    pub fn push_column(&mut self, name: impl Into<String>, fill: Cell) {
        let name = name.into();
        if self.has_column(&name) {
            return;
        }
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }

    /// Mutable iterator over one column's cells, top to bottom.
    pub fn column_cells_mut(&mut self, index: usize) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().filter_map(move |row| row.get_mut(index))
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.columns, self.rows)
    }

    /// Callers guarantee unique column names and uniform row width.
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }
}
