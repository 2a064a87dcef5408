//! Low-level nom parser functions for CSS-like style values.
//!
//! This module provides composable parser functions for parsing style values
//! like lengths, colors and borders, plus the property dispatcher used by
//! [`CellStyle::from_css`](crate::CellStyle::from_css).

use crate::border::{Border, BorderStyle};
use crate::cell_style::CellStyle;
use crate::font::{FontStyle, FontWeight};
use crate::text::{TextAlign, TextDecoration, TextTransform, WhiteSpace};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1, take_while_m_n};
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{map, map_res, opt, recognize};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use tablekit_types::Color;
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Unknown style property '{0}'")]
    UnknownProperty(String),
}

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| 0.75),
        map(tag_no_case("in"), |_| 72.0),
        map(tag_no_case("cm"), |_| 28.35),
        map(tag_no_case("mm"), |_| 2.835),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "2px"), in points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit_multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}

// --- Color & Border Parsers ---

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_color(input: &str) -> IResult<&str, Color> {
    map_res(
        recognize(preceded(char('#'), take_while_m_n(3, 8, is_hex_digit))),
        Color::parse_hex,
    )
    .parse(input)
}

fn named_color(input: &str) -> IResult<&str, Color> {
    map_res(take_while1(|c: char| c.is_ascii_alphabetic()), |name: &str| {
        Color::named(name).ok_or(())
    })
    .parse(input)
}

/// Parses a hex color ("#FF0000", "#F00") or a CSS color keyword ("cyan").
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    alt((hex_color, named_color)).parse(input)
}

/// Parses a border style keyword.
pub fn parse_border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        map(tag_no_case("solid"), |_| BorderStyle::Solid),
        map(tag_no_case("dashed"), |_| BorderStyle::Dashed),
        map(tag_no_case("dotted"), |_| BorderStyle::Dotted),
        map(tag_no_case("double"), |_| BorderStyle::Double),
        map(tag_no_case("hidden"), |_| BorderStyle::Hidden),
        map(tag_no_case("none"), |_| BorderStyle::None),
    ))
    .parse(input)
}

/// Parses a CSS border shorthand (e.g., "2px solid #00ff00").
pub fn parse_border(input: &str) -> IResult<&str, Border> {
    map(
        (
            ws(parse_length),
            ws(parse_border_style),
            ws(parse_color),
        ),
        |(width, style, color)| Border { width, style, color },
    )
    .parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- Keyword Parsers ---

fn invalid(property: &str, value: &str) -> StyleParseError {
    StyleParseError::InvalidValue {
        property: property.to_string(),
        value: value.to_string(),
    }
}

/// Parses a font weight string (e.g., "bold", "400").
pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    s.parse().map_err(|_| invalid("font-weight", s))
}

/// Parses a font style string (e.g., "normal", "italic").
pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    s.parse().map_err(|_| invalid("font-style", s))
}

pub fn parse_text_align(s: &str) -> Result<TextAlign, StyleParseError> {
    match s.to_lowercase().as_str() {
        "left" => Ok(TextAlign::Left),
        "right" => Ok(TextAlign::Right),
        "center" => Ok(TextAlign::Center),
        "justify" => Ok(TextAlign::Justify),
        _ => Err(invalid("text-align", s)),
    }
}

pub fn parse_text_decoration(s: &str) -> Result<TextDecoration, StyleParseError> {
    match s.to_lowercase().as_str() {
        "none" => Ok(TextDecoration::None),
        "underline" => Ok(TextDecoration::Underline),
        "overline" => Ok(TextDecoration::Overline),
        "line-through" => Ok(TextDecoration::LineThrough),
        _ => Err(invalid("text-decoration", s)),
    }
}

pub fn parse_text_transform(s: &str) -> Result<TextTransform, StyleParseError> {
    match s.to_lowercase().as_str() {
        "none" => Ok(TextTransform::None),
        "uppercase" => Ok(TextTransform::Uppercase),
        "lowercase" => Ok(TextTransform::Lowercase),
        "capitalize" => Ok(TextTransform::Capitalize),
        _ => Err(invalid("text-transform", s)),
    }
}

pub fn parse_whitespace(s: &str) -> Result<WhiteSpace, StyleParseError> {
    match s.to_lowercase().as_str() {
        "normal" => Ok(WhiteSpace::Normal),
        "nowrap" => Ok(WhiteSpace::Nowrap),
        "pre" => Ok(WhiteSpace::Pre),
        "pre-wrap" => Ok(WhiteSpace::PreWrap),
        "pre-line" => Ok(WhiteSpace::PreLine),
        _ => Err(invalid("white-space", s)),
    }
}

/// Applies a single CSS-like property to a `CellStyle`.
pub fn apply_style_property(style: &mut CellStyle, property: &str, value: &str) -> Result<(), StyleParseError> {
    match property.to_lowercase().as_str() {
        "background-color" | "background" | "fill" => style.fill = Some(run_parser(parse_color, value)?),
        "color" => style.color = Some(run_parser(parse_color, value)?),
        "font-family" => style.font_family = Some(value.trim_matches(|c| c == '"' || c == '\'').to_string()),
        "font-size" => style.font_size = Some(run_parser(parse_length, value)?),
        "font-weight" => style.font_weight = Some(parse_font_weight(value)?),
        "font-style" => style.font_style = Some(parse_font_style(value)?),
        "text-decoration" => style.decoration = Some(parse_text_decoration(value)?),
        "text-transform" => style.transform = Some(parse_text_transform(value)?),
        "text-align" => style.align = Some(parse_text_align(value)?),
        "white-space" => style.whitespace = Some(parse_whitespace(value)?),
        "text-indent" => style.indent = Some(run_parser(parse_length, value)?),
        "border" => style.borders.set(crate::Side::All, run_parser(parse_border, value)?),
        "border-top" => style.borders.top = Some(run_parser(parse_border, value)?),
        "border-right" => style.borders.right = Some(run_parser(parse_border, value)?),
        "border-bottom" => style.borders.bottom = Some(run_parser(parse_border, value)?),
        "border-left" => style.borders.left = Some(run_parser(parse_border, value)?),
        other => return Err(StyleParseError::UnknownProperty(other.to_string())),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(run_parser(parse_length, "12pt").unwrap(), 12.0);
        assert_eq!(run_parser(parse_length, " 1in ").unwrap(), 72.0);
        assert_eq!(run_parser(parse_length, "4px").unwrap(), 3.0);
        assert_eq!(run_parser(parse_length, "10").unwrap(), 10.0);
        assert!(run_parser(parse_length, "abc").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(run_parser(parse_color, "#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(run_parser(parse_color, "#f00").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(run_parser(parse_color, "cyan").unwrap(), Color::rgb(0, 255, 255));
        assert!(run_parser(parse_color, "#ggg").is_err());
        assert!(run_parser(parse_color, "reddish").is_err());
    }

    #[test]
    fn test_parse_border() {
        let border = run_parser(parse_border, "2pt solid #00ff00").unwrap();
        assert_eq!(border.width, 2.0);
        assert_eq!(border.style, BorderStyle::Solid);
        assert_eq!(border.color, Color::rgb(0, 255, 0));

        let dashed = run_parser(parse_border, "1 dashed gray").unwrap();
        assert_eq!(dashed.style, BorderStyle::Dashed);
        assert_eq!(dashed.color, Color::gray(128));
        assert!(run_parser(parse_border, "solid 1pt red").is_err());
    }

    #[test]
    fn test_parse_font_weight() {
        assert_eq!(parse_font_weight("bold").unwrap(), FontWeight::Bold);
        assert_eq!(parse_font_weight("400").unwrap(), FontWeight::Numeric(400));
        assert!(parse_font_weight("invalid").is_err());
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let mut style = CellStyle::default();
        assert_eq!(
            apply_style_property(&mut style, "flex-grow", "1"),
            Err(StyleParseError::UnknownProperty("flex-grow".to_string()))
        );
    }
}
