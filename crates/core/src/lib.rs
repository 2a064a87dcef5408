//! # tablekit-core
//!
//! The table model and everything that turns it into renderable output:
//! - **data**: materialized input columns and rows
//! - **selection**: column and row selectors resolved to cell coordinates
//! - **table**: the persistent `TableModel` builder
//! - **format_registry**: ordered formatting directives, last call wins
//! - **style_registry**: accumulating style directives per location
//! - **color_scale**: value-driven fills (`data_color`)
//! - **resolve**: the final per-cell text and style handed to a [`Renderer`]
//!
//! Builder methods take `&self` and return a new model, so chains never
//! alias and a failed call leaves its receiver untouched.

pub use tablekit_format as format;
pub use tablekit_style as style;
pub use tablekit_types as types;

pub mod color_scale;
pub mod data;
pub mod error;
pub mod format_registry;
pub mod options;
pub mod render;
pub mod resolve;
pub mod selection;
pub mod spanner;
pub mod style_registry;
pub mod table;

pub use color_scale::{ApplyTo, ColorMethod, ColorScale, PreparedScale, ScaleDomain};
pub use data::TableData;
pub use error::{SelectionError, TableError};
pub use format_registry::{FormatDirective, FormatRegistry, MissingTextDirective};
pub use options::TableOptions;
pub use render::{JsonRenderer, Renderer};
pub use resolve::{
    ResolvedCell, ResolvedColumn, ResolvedGroup, ResolvedHeader, ResolvedRow, ResolvedSpanner,
    ResolvedTable,
};
pub use selection::{ColumnSelector, RowSelector, RowView, Selection};
pub use spanner::{Spanner, SpannerRequest, SpannerSet};
pub use style_registry::{Location, StyleDirective, StyleRegistry, StyleSource, Target};
pub use table::{Header, TableModel};
