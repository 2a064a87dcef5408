use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

fn default_one() -> f32 {
    1.0
}

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0, a: 1.0 }
    }
}

/// CSS named colors accepted wherever a color string is parsed.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("fuchsia", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("silver", (192, 192, 192)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
    ("navy", (0, 0, 128)),
    ("purple", (128, 0, 128)),
    ("teal", (0, 128, 128)),
    ("orange", (255, 165, 0)),
    ("pink", (255, 192, 203)),
    ("brown", (165, 42, 42)),
    ("gold", (255, 215, 0)),
    ("lightblue", (173, 216, 230)),
    ("lightgreen", (144, 238, 144)),
    ("lightyellow", (255, 255, 224)),
    ("lightcyan", (224, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkgreen", (0, 100, 0)),
    ("darkred", (139, 0, 0)),
    ("steelblue", (70, 130, 180)),
    ("tomato", (255, 99, 71)),
    ("salmon", (250, 128, 114)),
    ("indigo", (75, 0, 130)),
    ("violet", (238, 130, 238)),
    ("beige", (245, 245, 220)),
    ("ivory", (255, 255, 240)),
    ("whitesmoke", (245, 245, 245)),
    ("transparent", (0, 0, 0)),
];

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value, a: 1.0 }
    }

    /// Looks up a CSS color keyword (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == lower)
            .map(|(n, (r, g, b))| Color {
                r: *r,
                g: *g,
                b: *b,
                a: if *n == "transparent" { 0.0 } else { 1.0 },
            })
    }

    /// Parse a hex color string (#RGB, #RRGGBB or #RRGGBBAA format)
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex digits in color: {}", s));
        }

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = channel(&hex[0..1].repeat(2), "red")?;
                let g = channel(&hex[1..2].repeat(2), "green")?;
                let b = channel(&hex[2..3].repeat(2), "blue")?;
                Ok(Color { r, g, b, a: 1.0 })
            }
            6 | 8 => {
                let r = channel(&hex[0..2], "red")?;
                let g = channel(&hex[2..4], "green")?;
                let b = channel(&hex[4..6], "blue")?;
                let a = if hex.len() == 8 {
                    channel(&hex[6..8], "alpha")? as f32 / 255.0
                } else {
                    1.0
                };
                Ok(Color { r, g, b, a })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3, 6 or 8, got {}",
                hex.len()
            )),
        }
    }

    /// Uppercase `#RRGGBB` form, with a trailing alpha byte when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, alpha)
        }
    }

    /// Linear interpolation in sRGB space. `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: (self.a as f64 + (other.a as f64 - self.a as f64) * t) as f32,
        }
    }

    /// WCAG 2.x relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// WCAG contrast ratio between two colors, in `[1, 21]`.
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let (l1, l2) = (self.relative_luminance(), other.relative_luminance());
        let (hi, lo) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
        (hi + 0.05) / (lo + 0.05)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('#') {
            Self::parse_hex(s)
        } else {
            Self::named(s).ok_or_else(|| format!("Unknown color name: '{}'", s.trim()))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8, #[serde(default = "default_one")] a: f32 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => s.parse().map_err(de::Error::custom),
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#f00").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse_hex("#00FF7f").unwrap(), Color::rgb(0, 255, 127));
        let translucent = Color::parse_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(Color::parse_hex("00ff00").is_err());
        assert!(Color::parse_hex("#12345").is_err());
    }

    #[test]
    fn test_parse_hex_rejects_non_ascii() {
        assert!("#é0".parse::<Color>().is_err());
        assert!(Color::parse_hex("#aé000").is_err());
        assert!(Color::parse_hex("#+f+f+f").is_err());
    }

    #[test]
    fn test_named_colors() {
        assert_eq!("cyan".parse::<Color>().unwrap(), Color::rgb(0, 255, 255));
        assert_eq!("LightBlue".parse::<Color>().unwrap(), Color::rgb(173, 216, 230));
        assert!("notacolor".parse::<Color>().is_err());
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let black = Color::BLACK;
        let white = Color::WHITE;
        assert_eq!(black.lerp(&white, 0.0), black);
        assert_eq!(black.lerp(&white, 1.0), white);
        assert_eq!(black.lerp(&white, 0.5), Color::gray(128));
        assert_eq!(black.lerp(&white, 4.0), white);
    }

    #[test]
    fn test_luminance_and_contrast() {
        assert!(Color::BLACK.relative_luminance() < 1e-9);
        assert!((Color::WHITE.relative_luminance() - 1.0).abs() < 1e-9);
        assert!((Color::BLACK.contrast_ratio(&Color::WHITE) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_round_forms() {
        let c: Color = serde_json::from_str("\"#336699\"").unwrap();
        assert_eq!(c, Color::rgb(0x33, 0x66, 0x99));
        let m: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(m, Color::rgb(1, 2, 3));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#336699\"");
    }
}
