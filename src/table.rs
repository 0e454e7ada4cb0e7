use crate::{Error, Result};

/// In-memory view of one tab-separated Mushroom Observer export.
///
/// The exports are plain TSV: one header line naming the columns, then one
/// line per record. Cells that are empty or the literal `NULL` are treated
/// as missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Parse an export body into a table.
    ///
    /// Rows shorter than the header are padded with missing cells; extra
    /// trailing cells are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or_else(|| Error::Parse("export has no header line".into()))?;
        let columns: Vec<String> = header.split('\t').map(|c| c.trim().to_string()).collect();

        let mut rows = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }

            let mut cells: Vec<Option<String>> = line
                .split('\t')
                .take(columns.len())
                .map(parse_cell)
                .collect();
            cells.resize(columns.len(), None);
            rows.push(cells);
        }

        Ok(Self { columns, rows })
    }

    /// Column names in export order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over one column's cells, in row order
    pub fn column<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = Option<&'a str>> + 'a> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| row[index].as_deref()))
    }

    /// Iterate over records
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row { table: self, cells })
    }

    /// Get one record by index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row { table: self, cells })
    }
}

fn parse_cell(cell: &str) -> Option<String> {
    let cell = cell.trim_end_matches('\r');
    if cell.is_empty() || cell == "NULL" {
        None
    } else {
        Some(cell.to_string())
    }
}

/// One record of a [`Table`], addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Option<String>],
}

impl Row<'_> {
    /// Cell value, `None` if the column is unknown or the cell is missing
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.table.column_index(column)?;
        self.cells[index].as_deref()
    }

    #[must_use]
    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get(column)?.parse().ok()
    }

    #[must_use]
    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column)?.parse().ok()
    }
}
