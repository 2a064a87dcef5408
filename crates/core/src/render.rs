use crate::error::TableError;
use crate::resolve::ResolvedTable;

/// A trait for output backends. Renderers only ever see a fully resolved
/// table: every cell already carries its final text and merged style.
pub trait Renderer {
    type Output;

    fn render(&self, table: &ResolvedTable) -> Result<Self::Output, TableError>;
}

/// Serializes the resolved table as pretty-printed JSON, for handing off to
/// renderers that live outside this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, table: &ResolvedTable) -> Result<String, TableError> {
        table.to_json()
    }
}
