//! # tablekit
//!
//! Build a table from materialized rows, layer formatting and styling
//! directives on top of it, then hand the resolved result to a renderer.
//!
//! ```no_run
//! use tablekit::prelude::*;
//!
//! # fn main() -> Result<(), TableError> {
//! let data = TableData::new(
//!     vec!["city", "population"],
//!     vec![vec!["Tokyo".into(), 37_400_068.into()]],
//! )?;
//! let text = TableModel::new(data)
//!     .with_stub("city")?
//!     .with_header("Largest cities", None)
//!     .fmt_number("population", RowSelector::All, NumberFormat::new().decimals(0))?
//!     .style(CellStyle::fill(Color::named("cyan").unwrap_or_default()), Location::body("population", RowSelector::All))?
//!     .render(&PlainTextRenderer::new())?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod text_renderer;

pub use tablekit_format as format;
pub use tablekit_style as style;
pub use tablekit_types as types;

pub use tablekit_core::*;
pub use tablekit_types::{Color, Value};
pub use text_renderer::{PlainTextRenderer, TextRenderOptions};

/// The names most tables need.
pub mod prelude {
    pub use crate::text_renderer::{PlainTextRenderer, TextRenderOptions};
    pub use tablekit_core::{
        ApplyTo, ColorMethod, ColorScale, ColumnSelector, JsonRenderer, Location, Renderer,
        ResolvedTable, RowSelector, SelectionError, SpannerRequest, TableData, TableError,
        TableModel, TableOptions,
    };
    pub use tablekit_format::{
        CurrencyFormat, DateStyle, FnFormatter, FormatError, IntegerFormat, NumberFormat,
        PercentFormat, Placement, ScientificFormat, TimeStyle, ValueFormatter,
    };
    pub use tablekit_style::{
        Border, BorderStyle, CellStyle, FontStyle, FontWeight, Side, TextAlign, TextTransform,
    };
    pub use tablekit_types::{Color, Value};
}
