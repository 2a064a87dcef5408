//! Resolution: folds the model, its formatting directives and its style
//! directives into final text and style for every visible part of the table.

use crate::error::TableError;
use crate::spanner::SpannerSet;
use crate::style_registry::Target;
use crate::table::TableModel;
use serde::Serialize;
use tablekit_style::{CellStyle, TextAlign};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCell {
    pub text: String,
    #[serde(skip_serializing_if = "CellStyle::is_empty")]
    pub style: CellStyle,
}

impl ResolvedCell {
    pub fn new(text: impl Into<String>, style: CellStyle) -> Self {
        Self { text: text.into(), style }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHeader {
    pub title: ResolvedCell,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<ResolvedCell>,
}

/// One piece of a spanner row. `start` and `span` count displayed data
/// columns, not counting the stub.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpanner {
    pub id: String,
    pub label: ResolvedCell,
    pub start: usize,
    pub span: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColumn {
    pub name: String,
    pub label: ResolvedCell,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRow {
    /// Row position in the input data.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub: Option<ResolvedCell>,
    pub cells: Vec<ResolvedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGroup {
    /// `None` when the table is not grouped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ResolvedCell>,
    pub rows: Vec<ResolvedRow>,
}

/// Everything a renderer needs, with formatting and styling already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ResolvedHeader>,
    /// Present when the table has a stub; the text may be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stubhead: Option<ResolvedCell>,
    /// Spanner rows, outermost level first.
    pub spanner_rows: Vec<Vec<ResolvedSpanner>>,
    pub columns: Vec<ResolvedColumn>,
    pub groups: Vec<ResolvedGroup>,
    pub source_notes: Vec<ResolvedCell>,
}

impl ResolvedTable {
    pub fn has_stub(&self) -> bool {
        self.stubhead.is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = &ResolvedRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    pub fn n_rows(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    /// Body cell by input row index and displayed column position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&ResolvedCell> {
        self.rows().find(|r| r.index == row).and_then(|r| r.cells.get(column))
    }

    /// Position of a displayed column by name.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn resolve_table(model: &TableModel) -> Result<ResolvedTable, TableError> {
    let data = model.data();
    let styles = model.styles();
    let displayed = model.displayed_columns();

    let header = model.header().map(|h| ResolvedHeader {
        title: ResolvedCell::new(h.title.as_str(), styles.style_where(|t| *t == Target::Title)),
        subtitle: h
            .subtitle
            .as_ref()
            .map(|s| ResolvedCell::new(s.as_str(), styles.style_where(|t| *t == Target::Subtitle))),
    });

    let stubhead = model.stub_index().map(|_| {
        ResolvedCell::new(
            model.stubhead_label().unwrap_or_default(),
            styles.style_where(|t| *t == Target::Stubhead),
        )
    });

    let spanners = model.spanners();
    let mut spanner_rows = Vec::with_capacity(spanners.depth());
    for level in (0..spanners.depth()).rev() {
        let mut row: Vec<ResolvedSpanner> = Vec::new();
        for spanner in spanners.at_level(level) {
            let style = styles.style_where(|t| t.covers_spanner(&spanner.id));
            for (start, span) in SpannerSet::runs(spanner, &displayed) {
                row.push(ResolvedSpanner {
                    id: spanner.id.clone(),
                    label: ResolvedCell::new(spanner.label.as_str(), style.clone()),
                    start,
                    span,
                });
            }
        }
        row.sort_by_key(|s| s.start);
        spanner_rows.push(row);
    }

    let columns = displayed
        .iter()
        .map(|&c| ResolvedColumn {
            name: data.columns()[c].clone(),
            label: ResolvedCell::new(model.column_label(c), styles.style_where(|t| t.covers_label(c))),
            align: model.column_align(c),
        })
        .collect();

    let mut groups = Vec::new();
    for (key, rows) in model.row_groups() {
        let label = model
            .has_groups()
            .then(|| ResolvedCell::new(key.as_str(), styles.style_where(|t| t.covers_group(&key))));
        let mut resolved_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let stub = match model.stub_index() {
                Some(stub) => Some(ResolvedCell::new(
                    model.cell_text(row, stub)?,
                    styles.style_where(|t| t.covers_stub(row)),
                )),
                None => None,
            };
            let cells = displayed
                .iter()
                .map(|&c| {
                    let style = styles.body_style(row, c, data.value(row, c)).map_err(|e| match e {
                        TableError::Domain(msg) => TableError::Domain(format!(
                            "row {}, column '{}': {}",
                            row,
                            data.columns()[c],
                            msg
                        )),
                        other => other,
                    })?;
                    Ok(ResolvedCell::new(model.cell_text(row, c)?, style))
                })
                .collect::<Result<Vec<_>, TableError>>()?;
            resolved_rows.push(ResolvedRow { index: row, stub, cells });
        }
        groups.push(ResolvedGroup { label, rows: resolved_rows });
    }

    let note_style = styles.style_where(|t| *t == Target::SourceNotes);
    let source_notes = model
        .source_notes()
        .iter()
        .map(|n| ResolvedCell::new(n.as_str(), note_style.clone()))
        .collect();

    let table = ResolvedTable { header, stubhead, spanner_rows, columns, groups, source_notes };
    log::debug!(
        "Resolved table: {} column(s), {} row(s) in {} group(s), {} spanner row(s)",
        table.columns.len(),
        table.n_rows(),
        table.groups.len(),
        table.spanner_rows.len()
    );
    Ok(table)
}
