use crate::{Error, Result, Table};
use serde::Serialize;
use std::collections::HashMap;

/// How completely one column of an export is filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCoverage {
    /// Column name
    pub column: String,
    /// Number of rows with a value in this column
    pub non_null: usize,
    /// Total number of rows
    pub total: usize,
}

impl ColumnCoverage {
    /// Share of rows with a value, in percent
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_null as f64 / self.total as f64 * 100.0
        }
    }
}

/// Per-column non-null coverage, in column order
#[must_use]
pub fn column_coverage(table: &Table) -> Vec<ColumnCoverage> {
    table
        .columns()
        .iter()
        .map(|column| {
            let non_null = table
                .column(column)
                .map(|cells| cells.flatten().count())
                .unwrap_or(0);

            ColumnCoverage {
                column: column.clone(),
                non_null,
                total: table.len(),
            }
        })
        .collect()
}

/// One distinct value and how often it occurs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    /// Share of all counted (non-missing) values, in percent
    pub percentage: f64,
}

/// Frequency table for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCounts {
    pub column: String,
    /// Entries sorted by descending count, ties by value
    pub entries: Vec<ValueCount>,
}

/// Frequency tables for the requested columns.
///
/// Missing cells are not counted. Every requested column is validated
/// before any counting happens, so either all columns are summarized or
/// none are.
pub fn value_counts(table: &Table, columns: &[&str]) -> Result<Vec<ValueCounts>> {
    for column in columns {
        if !table.has_column(column) {
            return Err(Error::UnknownColumn((*column).to_string()));
        }
    }

    let mut summaries = Vec::with_capacity(columns.len());
    for column in columns {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in table.column(column)?.flatten() {
            *counts.entry(value).or_default() += 1;
        }

        let total: usize = counts.values().sum();
        let mut entries: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count,
                percentage: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

        summaries.push(ValueCounts {
            column: (*column).to_string(),
            entries,
        });
    }

    Ok(summaries)
}
