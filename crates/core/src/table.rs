//! The persistent table model.
//!
//! Every builder method borrows the current model and returns a new one; the
//! receiver is never changed, so a failed call leaves it exactly as it was.
//! Input data is shared between all derived models.

use crate::color_scale::ColorScale;
use crate::data::TableData;
use crate::error::{SelectionError, TableError};
use crate::format_registry::FormatRegistry;
use crate::options::TableOptions;
use crate::render::Renderer;
use crate::resolve::{resolve_table, ResolvedTable};
use crate::selection::{ColumnSelector, RowSelector, Selection};
use crate::spanner::{SpannerRequest, SpannerSet};
use crate::style_registry::{Location, StyleRegistry, StyleSource, Target};
use serde::Serialize;
use std::sync::Arc;
use tablekit_format::{
    CurrencyFormat, DateFormat, DateTimeFormat, Formatter, IntegerFormat, Locale, NumberFormat,
    PercentFormat, ScientificFormat, TimeFormat, ValueFormatter,
};
use tablekit_style::{CellStyle, TextAlign};
use tablekit_types::Value;

/// Label of the row group holding rows whose group value is missing.
pub const MISSING_GROUP: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TableModel {
    data: Arc<TableData>,
    stub: Option<usize>,
    groups: Option<usize>,
    group_order: Vec<String>,
    header: Option<Header>,
    stubhead: Option<String>,
    source_notes: Vec<String>,
    spanners: SpannerSet,
    labels: Vec<Option<String>>,
    hidden: Vec<bool>,
    alignments: Vec<Option<TextAlign>>,
    formats: FormatRegistry,
    styles: StyleRegistry,
    options: TableOptions,
    locale: Option<Locale>,
}

impl TableModel {
    pub fn new(data: TableData) -> Self {
        let n = data.n_columns();
        Self {
            data: Arc::new(data),
            stub: None,
            groups: None,
            group_order: Vec::new(),
            header: None,
            stubhead: None,
            source_notes: Vec::new(),
            spanners: SpannerSet::default(),
            labels: vec![None; n],
            hidden: vec![false; n],
            alignments: vec![None; n],
            formats: FormatRegistry::new(),
            styles: StyleRegistry::new(),
            options: TableOptions::default(),
            locale: None,
        }
    }

    pub fn from_records(records: &[serde_json::Value]) -> Result<Self, TableError> {
        Ok(Self::new(TableData::from_records(records)?))
    }

    fn column(&self, name: &str) -> Result<usize, TableError> {
        self.data
            .column_index(name)
            .ok_or_else(|| TableError::Configuration(format!("Column '{}' does not exist", name)))
    }

    // --- Structure ---

    /// Uses `column` as row labels.
    pub fn with_stub(&self, column: &str) -> Result<Self, TableError> {
        let index = self.column(column)?;
        if self.groups == Some(index) {
            return Err(TableError::Configuration(format!(
                "Column '{}' is already the group column",
                column
            )));
        }
        let mut next = self.clone();
        next.stub = Some(index);
        Ok(next)
    }

    /// Partitions rows into groups by the values of `column`. Groups appear
    /// in order of first appearance unless reordered.
    pub fn with_groups(&self, column: &str) -> Result<Self, TableError> {
        let index = self.column(column)?;
        if self.stub == Some(index) {
            return Err(TableError::Configuration(format!(
                "Column '{}' is already the stub column",
                column
            )));
        }
        let mut next = self.clone();
        next.groups = Some(index);
        next.group_order.clear();
        Ok(next)
    }

    pub fn with_header(&self, title: impl Into<String>, subtitle: Option<&str>) -> Self {
        let mut next = self.clone();
        next.header = Some(Header { title: title.into(), subtitle: subtitle.map(str::to_string) });
        next
    }

    pub fn with_stubhead_label(&self, label: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.stubhead = Some(label.into());
        next
    }

    pub fn with_source_note(&self, note: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.source_notes.push(note.into());
        next
    }

    /// Adds a spanner over the selected columns. Stub and group columns are
    /// never spanned.
    pub fn with_spanner(
        &self,
        request: SpannerRequest,
        columns: impl Into<ColumnSelector>,
    ) -> Result<Self, TableError> {
        let columns: Vec<usize> = columns
            .into()
            .resolve(&self.data)
            .map_err(|e| TableError::Configuration(e.to_string()))?
            .into_iter()
            .filter(|&c| Some(c) != self.stub && Some(c) != self.groups)
            .collect();
        let spanners = self.spanners.with_spanner(&request, columns)?;
        let mut next = self.clone();
        next.spanners = spanners;
        Ok(next)
    }

    /// Display labels for columns, as `(column, label)` pairs.
    pub fn with_column_labels<I, K, V>(&self, labels: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut next = self.clone();
        for (column, label) in labels {
            let index = self.column(column.as_ref())?;
            next.labels[index] = Some(label.into());
        }
        Ok(next)
    }

    /// Hidden columns stay available to selectors, formatters and styles.
    pub fn with_hidden_columns(&self, columns: impl Into<ColumnSelector>) -> Result<Self, TableError> {
        let selected = columns.into().resolve(&self.data)?;
        let mut next = self.clone();
        for index in selected {
            next.hidden[index] = true;
        }
        Ok(next)
    }

    pub fn with_column_align(
        &self,
        align: TextAlign,
        columns: impl Into<ColumnSelector>,
    ) -> Result<Self, TableError> {
        let selected = columns.into().resolve(&self.data)?;
        let mut next = self.clone();
        for index in selected {
            next.alignments[index] = Some(align);
        }
        Ok(next)
    }

    /// Moves the named groups to the front, in the given order. Remaining
    /// groups keep their order of first appearance.
    pub fn with_row_group_order<I, S>(&self, groups: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.groups.is_none() {
            return Err(TableError::Configuration("The table has no row groups".to_string()));
        }
        let known = self.group_keys();
        let order: Vec<String> = groups.into_iter().map(Into::into).collect();
        if let Some(unknown) = order.iter().find(|g| !known.contains(g)) {
            return Err(SelectionError::UnknownGroup(unknown.clone()).into());
        }
        let mut next = self.clone();
        next.group_order = order;
        Ok(next)
    }

    /// Table options. An unknown locale fails here rather than at render time.
    pub fn with_options(&self, options: TableOptions) -> Result<Self, TableError> {
        let locale = options.resolved_locale()?;
        let mut next = self.clone();
        next.options = options;
        next.locale = locale;
        Ok(next)
    }

    // --- Formatting ---

    /// Registers a formatter for the selected cells. Later registrations win
    /// for cells they share with earlier ones.
    pub fn format_with(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        formatter: Formatter,
    ) -> Result<Self, TableError> {
        formatter.validate()?;
        let selection = Selection::resolve(&self.data, &columns.into(), &rows.into())?;
        let mut next = self.clone();
        next.formats.apply(selection, formatter);
        Ok(next)
    }

    pub fn fmt<F>(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        formatter: F,
    ) -> Result<Self, TableError>
    where
        F: ValueFormatter + 'static,
    {
        self.format_with(columns, rows, Arc::new(formatter))
    }

    pub fn fmt_number(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        format: NumberFormat,
    ) -> Result<Self, TableError> {
        let format = match &self.locale {
            Some(locale) => format.fallback_locale(locale),
            None => format,
        };
        self.fmt(columns, rows, format)
    }

    pub fn fmt_integer(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        format: IntegerFormat,
    ) -> Result<Self, TableError> {
        let format = match &self.locale {
            Some(locale) => format.fallback_locale(locale),
            None => format,
        };
        self.fmt(columns, rows, format)
    }

    pub fn fmt_percent(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        format: PercentFormat,
    ) -> Result<Self, TableError> {
        let format = match &self.locale {
            Some(locale) => format.fallback_locale(locale),
            None => format,
        };
        self.fmt(columns, rows, format)
    }

    pub fn fmt_currency(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        format: CurrencyFormat,
    ) -> Result<Self, TableError> {
        let format = match &self.locale {
            Some(locale) => format.fallback_locale(locale),
            None => format,
        };
        self.fmt(columns, rows, format)
    }

    pub fn fmt_scientific(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        format: ScientificFormat,
    ) -> Result<Self, TableError> {
        let format = match &self.locale {
            Some(locale) => format.fallback_locale(locale),
            None => format,
        };
        self.fmt(columns, rows, format)
    }

    /// Fails with a format error for an unknown preset name.
    pub fn fmt_date(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        date_style: &str,
    ) -> Result<Self, TableError> {
        self.fmt(columns, rows, DateFormat::named(date_style)?)
    }

    pub fn fmt_time(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        time_style: &str,
    ) -> Result<Self, TableError> {
        self.fmt(columns, rows, TimeFormat::named(time_style)?)
    }

    pub fn fmt_datetime(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        date_style: &str,
        time_style: &str,
    ) -> Result<Self, TableError> {
        self.fmt(columns, rows, DateTimeFormat::named(date_style, time_style)?)
    }

    /// Text for missing values in the selected cells (`sub_missing`).
    pub fn with_missing_text(
        &self,
        text: impl Into<String>,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
    ) -> Result<Self, TableError> {
        let selection = Selection::resolve(&self.data, &columns.into(), &rows.into())?;
        let mut next = self.clone();
        next.formats.apply_missing_text(selection, text.into());
        Ok(next)
    }

    // --- Styling ---

    pub fn style(&self, style: CellStyle, location: Location) -> Result<Self, TableError> {
        let target = self.resolve_location(location)?;
        let mut next = self.clone();
        next.styles.apply(target, StyleSource::Static(style));
        Ok(next)
    }

    /// Like [`TableModel::style`] with a declaration list such as
    /// `"background-color: cyan; font-weight: bold"`.
    pub fn style_css(&self, css: &str, location: Location) -> Result<Self, TableError> {
        self.style(CellStyle::from_css(css)?, location)
    }

    /// Colors the selected body cells by value. The domain is fixed now,
    /// across every selected cell; colors are looked up during resolution.
    pub fn data_color(
        &self,
        columns: impl Into<ColumnSelector>,
        rows: impl Into<RowSelector>,
        scale: ColorScale,
    ) -> Result<Self, TableError> {
        let selection = Selection::resolve(&self.data, &columns.into(), &rows.into())?;
        let scale = match self.options.color_na {
            Some(color) if !scale.has_na_color() => scale.na_color(color),
            _ => scale,
        };
        let prepared = scale.prepare(&self.data, &selection)?;
        let mut next = self.clone();
        next.styles
            .apply(Target::Body(selection), StyleSource::Scale(Arc::new(prepared)));
        Ok(next)
    }

    fn resolve_location(&self, location: Location) -> Result<Target, TableError> {
        let target = match location {
            Location::Body { columns, rows } => Target::Body(Selection::resolve(&self.data, &columns, &rows)?),
            Location::ColumnLabels { columns } => Target::ColumnLabels(columns.resolve(&self.data)?),
            Location::Stub { rows } => {
                if self.stub.is_none() {
                    return Err(TableError::Configuration("The table has no stub".to_string()));
                }
                Target::Stub(rows.resolve(&self.data)?)
            }
            Location::Stubhead => {
                if self.stub.is_none() {
                    return Err(TableError::Configuration("The table has no stub".to_string()));
                }
                Target::Stubhead
            }
            Location::RowGroups { groups } => {
                if let Some(names) = &groups {
                    let known = self.group_keys();
                    if let Some(unknown) = names.iter().find(|g| !known.contains(g)) {
                        return Err(SelectionError::UnknownGroup(unknown.clone()).into());
                    }
                }
                Target::RowGroups(groups)
            }
            Location::Title => Target::Title,
            Location::Subtitle => Target::Subtitle,
            Location::SourceNotes => Target::SourceNotes,
            Location::Spanners { ids } => {
                if let Some(unknown) = ids.iter().find(|id| self.spanners.get(id).is_none()) {
                    return Err(SelectionError::UnknownSpanner(unknown.clone()).into());
                }
                Target::Spanners(ids)
            }
        };
        Ok(target)
    }

    // --- Accessors ---

    pub fn data(&self) -> &TableData {
        &self.data
    }

    pub fn stub_column(&self) -> Option<&str> {
        self.stub.map(|i| self.data.columns()[i].as_str())
    }

    pub fn group_column(&self) -> Option<&str> {
        self.groups.map(|i| self.data.columns()[i].as_str())
    }

    pub(crate) fn stub_index(&self) -> Option<usize> {
        self.stub
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub fn stubhead_label(&self) -> Option<&str> {
        self.stubhead.as_deref()
    }

    pub fn source_notes(&self) -> &[String] {
        &self.source_notes
    }

    pub fn spanners(&self) -> &SpannerSet {
        &self.spanners
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn column_label(&self, column: usize) -> &str {
        self.labels[column].as_deref().unwrap_or(&self.data.columns()[column])
    }

    pub fn is_hidden(&self, column: usize) -> bool {
        self.hidden[column]
    }

    /// Data columns shown in the body, in table order.
    pub fn displayed_columns(&self) -> Vec<usize> {
        (0..self.data.n_columns())
            .filter(|&c| !self.hidden[c] && Some(c) != self.stub && Some(c) != self.groups)
            .collect()
    }

    /// Explicit alignment, or the automatic one: numbers and temporal values
    /// right, everything else left.
    pub fn column_align(&self, column: usize) -> TextAlign {
        if let Some(align) = self.alignments[column] {
            return align;
        }
        if !self.options.auto_align {
            return TextAlign::Left;
        }
        let mut present = self.data.column_values(column).filter(|v| !v.is_missing()).peekable();
        let right = present.peek().is_some()
            && present.all(|v| {
                matches!(v, Value::Int(_) | Value::Float(_) | Value::Date(_) | Value::Time(_) | Value::DateTime(_))
            });
        if right { TextAlign::Right } else { TextAlign::Left }
    }

    fn group_key(value: &Value) -> String {
        if value.is_missing() {
            MISSING_GROUP.to_string()
        } else {
            value.to_string()
        }
    }

    fn group_keys(&self) -> Vec<String> {
        self.row_groups().into_iter().map(|(key, _)| key).collect()
    }

    /// Row groups in display order with their row indices. Without a group
    /// column this is a single unnamed group holding every row.
    pub fn row_groups(&self) -> Vec<(String, Vec<usize>)> {
        let Some(column) = self.groups else {
            return vec![(String::new(), (0..self.data.n_rows()).collect())];
        };
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (row, value) in self.data.column_values(column).enumerate() {
            let key = Self::group_key(value);
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, rows)) => rows.push(row),
                None => groups.push((key, vec![row])),
            }
        }
        groups.sort_by_key(|(key, _)| {
            self.group_order
                .iter()
                .position(|g| g == key)
                .unwrap_or(self.group_order.len())
        });
        groups
    }

    pub fn has_groups(&self) -> bool {
        self.groups.is_some()
    }

    /// Display text of one cell: the winning formatter's output, the default
    /// representation, or the missing-value text for missing values.
    pub fn cell_text(&self, row: usize, column: usize) -> Result<String, TableError> {
        let value = self.data.value(row, column);
        if value.is_missing() {
            let text = self
                .formats
                .missing_text_for(row, column)
                .unwrap_or(self.options.missing_text.as_str());
            return Ok(text.to_string());
        }
        match self.formats.formatter_for(row, column) {
            Some(formatter) => formatter.format(value).map_err(|source| TableError::CellFormat {
                row,
                column: self.data.columns()[column].clone(),
                source,
            }),
            None => Ok(value.to_string()),
        }
    }

    // --- Output ---

    pub fn resolve(&self) -> Result<ResolvedTable, TableError> {
        resolve_table(self)
    }

    pub fn render<R: Renderer>(&self, renderer: &R) -> Result<R::Output, TableError> {
        renderer.render(&self.resolve()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_format::FnFormatter;

    fn cities() -> TableModel {
        TableModel::new(
            TableData::new(
                vec!["city", "region", "pop", "share"],
                vec![
                    vec!["Tokyo".into(), "Asia".into(), 37_400_068.into(), 0.31.into()],
                    vec!["Paris".into(), "Europe".into(), 11_017_230.into(), Value::Null],
                    vec!["Delhi".into(), "Asia".into(), 28_514_000.into(), 0.24.into()],
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_structure_keeps_data() {
        let base = cities();
        let table = base
            .with_stub("city")
            .unwrap()
            .with_groups("region")
            .unwrap()
            .with_header("Cities", Some("by population"))
            .with_source_note("UN, 2018");
        assert_eq!(table.data(), base.data());
        assert_eq!(table.stub_column(), Some("city"));
        assert_eq!(table.displayed_columns(), vec![2, 3]);
        assert!(base.stub_column().is_none());
    }

    #[test]
    fn test_missing_structural_columns_are_configuration_errors() {
        let base = cities();
        assert!(matches!(base.with_stub("nope"), Err(TableError::Configuration(_))));
        assert!(matches!(
            base.with_spanner(SpannerRequest::new("x"), "nope"),
            Err(TableError::Configuration(_))
        ));
        let stubbed = base.with_stub("city").unwrap();
        assert!(stubbed.with_groups("city").is_err());
    }

    #[test]
    fn test_groups_in_order_of_appearance_and_reordered() {
        let table = cities().with_groups("region").unwrap();
        let keys: Vec<String> = table.row_groups().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Asia", "Europe"]);

        let reordered = table.with_row_group_order(["Europe"]).unwrap();
        assert_eq!(reordered.row_groups()[0], ("Europe".to_string(), vec![1]));
        assert_eq!(reordered.row_groups()[1], ("Asia".to_string(), vec![0, 2]));

        assert!(matches!(
            table.with_row_group_order(["Africa"]),
            Err(TableError::Selection(SelectionError::UnknownGroup(_)))
        ));
    }

    #[test]
    fn test_failed_selection_leaves_model_untouched() {
        let table = cities();
        let err = table.fmt("missing", RowSelector::All, NumberFormat::new()).unwrap_err();
        assert!(matches!(err, TableError::Selection(SelectionError::UnknownColumn(_))));
        assert!(table.formats().is_empty());
    }

    #[test]
    fn test_cell_text_paths() {
        let table = cities()
            .fmt_percent("share", RowSelector::All, PercentFormat::new().decimals(0))
            .unwrap()
            .with_missing_text("--", "share", RowSelector::All)
            .unwrap();
        assert_eq!(table.cell_text(0, 3).unwrap(), "31%");
        assert_eq!(table.cell_text(1, 3).unwrap(), "--");
        assert_eq!(table.cell_text(0, 0).unwrap(), "Tokyo");
    }

    #[test]
    fn test_formatter_error_is_reported_with_cell() {
        let table = cities()
            .fmt("city", RowSelector::All, FnFormatter::new(|v| {
                Err(tablekit_format::FormatError::Custom(format!("rejected {}", v)))
            }))
            .unwrap();
        match table.cell_text(2, 0) {
            Err(TableError::CellFormat { row, column, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "city");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_table_locale_applies_to_unlocalized_formatters() {
        let table = cities()
            .with_options(TableOptions::default().locale("de"))
            .unwrap()
            .fmt_number("pop", RowSelector::All, NumberFormat::new().decimals(0))
            .unwrap();
        assert_eq!(table.cell_text(0, 2).unwrap(), "37.400.068");
        assert!(cities().with_options(TableOptions::default().locale("xx")).is_err());
    }

    #[test]
    fn test_auto_alignment() {
        let table = cities();
        assert_eq!(table.column_align(0), TextAlign::Left);
        assert_eq!(table.column_align(2), TextAlign::Right);
        let centered = table.with_column_align(TextAlign::Center, "pop").unwrap();
        assert_eq!(centered.column_align(2), TextAlign::Center);
        let plain = table.with_options(TableOptions::default().auto_align(false)).unwrap();
        assert_eq!(plain.column_align(2), TextAlign::Left);
    }

    #[test]
    fn test_style_locations_validate() {
        let table = cities().with_groups("region").unwrap();
        assert!(table.style(CellStyle::new(), Location::stub(RowSelector::All)).is_err());
        assert!(table.style(CellStyle::new(), Location::row_group(["Mars"])).is_err());
        assert!(table.style(CellStyle::new(), Location::spanners(["none"])).is_err());
        let styled = table
            .style_css("font-weight: bold", Location::row_group(["Asia"]))
            .unwrap();
        assert_eq!(styled.styles().len(), 1);
    }
}
