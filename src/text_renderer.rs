//! A plain-text renderer: fixed-width columns, rules between sections.
//!
//! Only the text-affecting parts of a style are honoured (alignment and
//! text transform); colors, fonts and borders have no plain-text form.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tablekit_core::{ResolvedCell, ResolvedTable, Renderer, TableError};
use tablekit_style::TextAlign;
use unicode_width::UnicodeWidthStr;

fn default_gap() -> usize {
    2
}

fn default_rule() -> char {
    '-'
}

fn default_indent() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRenderOptions {
    /// Spaces between adjacent columns.
    #[serde(default = "default_gap")]
    pub column_gap: usize,
    #[serde(default = "default_rule")]
    pub rule: char,
    /// Indentation of stub cells below a row group label.
    #[serde(default = "default_indent")]
    pub group_indent: usize,
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self { column_gap: default_gap(), rule: default_rule(), group_indent: default_indent() }
    }
}

impl TextRenderOptions {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlainTextRenderer {
    options: TextRenderOptions,
}

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TextRenderOptions) -> Self {
        Self { options }
    }
}

/// Text of a cell after its text transform.
fn display_text(cell: &ResolvedCell) -> String {
    match cell.style.transform {
        Some(transform) => transform.apply(&cell.text),
        None => cell.text.clone(),
    }
}

fn pad(text: &str, width: usize, align: TextAlign) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        TextAlign::Right => format!("{}{}", " ".repeat(fill), text),
        TextAlign::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
        TextAlign::Left | TextAlign::Justify => format!("{}{}", text, " ".repeat(fill)),
    }
}

impl Renderer for PlainTextRenderer {
    type Output = String;

    fn render(&self, table: &ResolvedTable) -> Result<String, TableError> {
        let gap = " ".repeat(self.options.column_gap);
        let grouped = table.groups.iter().any(|g| g.label.is_some());
        let stub_indent = if grouped { self.options.group_indent } else { 0 };

        // Column widths: labels and body text, then widened for spanners.
        let mut widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                table
                    .rows()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| display_text(c).width())
                    .chain(std::iter::once(display_text(&col.label).width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        for spanner in table.spanner_rows.iter().flatten() {
            let end = spanner.start + spanner.span;
            if spanner.span == 0 || end > widths.len() {
                return Err(TableError::Render(format!(
                    "Spanner '{}' covers columns {}..{} of {}",
                    spanner.id,
                    spanner.start,
                    end,
                    widths.len()
                )));
            }
            let available: usize =
                widths[spanner.start..end].iter().sum::<usize>() + self.options.column_gap * (spanner.span - 1);
            let needed = display_text(&spanner.label).width();
            if needed > available {
                widths[end - 1] += needed - available;
            }
        }
        let stub_width = table.stubhead.as_ref().map(|head| {
            table
                .rows()
                .filter_map(|r| r.stub.as_ref())
                .map(|c| display_text(c).width() + stub_indent)
                .chain(std::iter::once(display_text(head).width()))
                .max()
                .unwrap_or(0)
        });

        let body_width = widths.iter().sum::<usize>() + self.options.column_gap * widths.len().saturating_sub(1);
        let total_width = match stub_width {
            Some(w) if widths.is_empty() => w,
            Some(w) => w + self.options.column_gap + body_width,
            None => body_width,
        };
        let rule: String = std::iter::repeat_n(self.options.rule, total_width).collect();

        // Prefixes a row with the stub cell (or blank stub space).
        let with_stub = |stub: Option<String>, rest: String| -> String {
            match stub_width {
                Some(w) => format!("{}{}{}", pad(stub.as_deref().unwrap_or(""), w, TextAlign::Left), gap, rest),
                None => rest,
            }
        };

        let mut lines: Vec<String> = Vec::new();

        if let Some(header) = &table.header {
            lines.push(pad(&display_text(&header.title), total_width, TextAlign::Center));
            if let Some(subtitle) = &header.subtitle {
                lines.push(pad(&display_text(subtitle), total_width, TextAlign::Center));
            }
            lines.push(rule.clone());
        }

        for spanner_row in &table.spanner_rows {
            let mut line = String::new();
            let mut col = 0;
            for spanner in spanner_row {
                while col < spanner.start {
                    line.push_str(&" ".repeat(widths[col]));
                    line.push_str(&gap);
                    col += 1;
                }
                let end = spanner.start + spanner.span;
                let width = widths[spanner.start..end].iter().sum::<usize>()
                    + self.options.column_gap * (spanner.span - 1);
                line.push_str(&pad(&display_text(&spanner.label), width, TextAlign::Center));
                line.push_str(&gap);
                col = end;
            }
            lines.push(with_stub(None, line));
        }

        let labels = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| pad(&display_text(&col.label), w, col.label.style.align.unwrap_or(col.align)))
            .join(&gap);
        lines.push(with_stub(table.stubhead.as_ref().map(display_text), labels));
        lines.push(rule.clone());

        for group in &table.groups {
            if let Some(label) = &group.label {
                lines.push(display_text(label));
            }
            for row in &group.rows {
                let cells = row
                    .cells
                    .iter()
                    .zip(table.columns.iter().zip(&widths))
                    .map(|(cell, (col, &w))| pad(&display_text(cell), w, cell.style.align.unwrap_or(col.align)))
                    .join(&gap);
                let stub = row
                    .stub
                    .as_ref()
                    .map(|c| format!("{}{}", " ".repeat(stub_indent), display_text(c)));
                lines.push(with_stub(stub, cells));
            }
        }

        if !table.source_notes.is_empty() {
            lines.push(rule);
            lines.extend(table.source_notes.iter().map(display_text));
        }

        log::trace!("Rendered {} line(s) of plain text, {} column(s) wide", lines.len(), total_width);
        Ok(lines.iter().map(|l| l.trim_end()).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_core::{ResolvedColumn, ResolvedGroup, ResolvedRow};
    use tablekit_style::{CellStyle, TextTransform};

    fn cell(text: &str) -> ResolvedCell {
        ResolvedCell::new(text, CellStyle::default())
    }

    #[test]
    fn test_pad_alignments() {
        assert_eq!(pad("ab", 5, TextAlign::Left), "ab   ");
        assert_eq!(pad("ab", 5, TextAlign::Right), "   ab");
        assert_eq!(pad("ab", 5, TextAlign::Center), " ab  ");
        assert_eq!(pad("東京", 5, TextAlign::Right), " 東京");
    }

    #[test]
    fn test_minimal_table() {
        let table = ResolvedTable {
            header: None,
            stubhead: None,
            spanner_rows: vec![],
            columns: vec![
                ResolvedColumn { name: "a".into(), label: cell("a"), align: TextAlign::Left },
                ResolvedColumn { name: "n".into(), label: cell("n"), align: TextAlign::Right },
            ],
            groups: vec![ResolvedGroup {
                label: None,
                rows: vec![
                    ResolvedRow { index: 0, stub: None, cells: vec![cell("x"), cell("10")] },
                    ResolvedRow {
                        index: 1,
                        stub: None,
                        cells: vec![
                            ResolvedCell::new("yy", CellStyle::new().with_transform(TextTransform::Uppercase)),
                            cell("5"),
                        ],
                    },
                ],
            }],
            source_notes: vec![],
        };
        let text = PlainTextRenderer::new().render(&table).unwrap();
        assert_eq!(text, "a    n\n------\nx   10\nYY   5");
    }

    #[test]
    fn test_options_from_json() {
        let opts = TextRenderOptions::from_json(r#"{"columnGap": 1}"#).unwrap();
        assert_eq!(opts.column_gap, 1);
        assert_eq!(opts.rule, '-');
    }
}
