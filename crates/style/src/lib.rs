pub mod font;
pub mod text;
pub mod border;
pub mod cell_style;
pub mod parsers;

pub use font::{FontStyle, FontWeight};
pub use text::{TextAlign, TextDecoration, TextTransform, WhiteSpace};
pub use border::{Border, BorderSides, BorderStyle, Side};
pub use cell_style::CellStyle;
pub use parsers::StyleParseError;
