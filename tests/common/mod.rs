#![allow(dead_code)]

pub mod fixtures;
pub mod text_assertions;

use tablekit::{PlainTextRenderer, ResolvedTable, TableError, TableModel};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve a table and render it as plain text.
pub fn render_text(table: &TableModel) -> Result<String, TableError> {
    table.render(&PlainTextRenderer::new())
}

/// Text of a body cell, addressed by input row and column name.
pub fn cell_text(resolved: &ResolvedTable, row: usize, column: &str) -> Option<String> {
    let position = resolved.column_position(column)?;
    resolved.cell(row, position).map(|c| c.text.clone())
}
