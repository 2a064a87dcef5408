//! Cell border primitives.
use serde::{Deserialize, Serialize};
use tablekit_types::Color;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Hidden,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Border {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: 1.0,
            style: BorderStyle::Solid,
            color: Color::BLACK,
        }
    }
}

/// Which side(s) of a cell a border applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
    All,
}

/// Per-side border settings; each side merges independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BorderSides {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub top: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub right: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bottom: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub left: Option<Border>,
}

impl BorderSides {
    pub fn new(sides: &[Side], border: Border) -> Self {
        let mut out = Self::default();
        for side in sides {
            out.set(*side, border);
        }
        out
    }

    pub fn set(&mut self, side: Side, border: Border) {
        match side {
            Side::Top => self.top = Some(border),
            Side::Right => self.right = Some(border),
            Side::Bottom => self.bottom = Some(border),
            Side::Left => self.left = Some(border),
            Side::All => {
                self.top = Some(border);
                self.right = Some(border);
                self.bottom = Some(border);
                self.left = Some(border);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    pub fn merge(&self, later: &BorderSides) -> BorderSides {
        BorderSides {
            top: later.top.or(self.top),
            right: later.right.or(self.right),
            bottom: later.bottom.or(self.bottom),
            left: later.left.or(self.left),
        }
    }
}
