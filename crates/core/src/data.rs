//! Materialized input data: named columns and rows of values.

use crate::error::TableError;
use crate::selection::RowView;
use std::collections::HashSet;
use tablekit_types::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TableData {
    /// Builds a table from column names and row-major values. Every row must
    /// have exactly one value per column and column names must be unique.
    pub fn new<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::Configuration(format!("Duplicate column name '{}'", name)));
            }
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != columns.len()) {
            return Err(TableError::Configuration(format!(
                "Row {} has {} values but the table has {} columns",
                index,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Builds a table from JSON objects. Column order follows the order in
    /// which keys are first seen; absent keys become `Value::Null`.
    pub fn from_records(records: &[serde_json::Value]) -> Result<Self, TableError> {
        let mut columns: Vec<String> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                TableError::Configuration(format!("Record {} is not a JSON object", index))
            })?;
            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).map(Value::from).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn value(&self, row: usize, column: usize) -> &Value {
        &self.rows[row][column]
    }

    pub fn row(&self, row: usize) -> &[Value] {
        &self.rows[row]
    }

    pub fn row_view(&self, row: usize) -> RowView<'_> {
        RowView::new(row, &self.columns, &self.rows[row])
    }

    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[column])
    }
}
