mod common;

use common::TestResult;
use common::fixtures::*;
use tablekit::prelude::*;

fn cyan() -> Color {
    Color::named("cyan").unwrap_or_default()
}

#[test]
fn test_fill_then_bold_accumulates() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let resolved = quotes_table()
        .style(CellStyle::fill(cyan()), Location::body("open", RowSelector::All))?
        .style(
            CellStyle::new().with_font_weight(FontWeight::Bold),
            Location::body("open", RowSelector::All),
        )?
        .resolve()?;
    let open = resolved.column_position("open").unwrap_or_default();
    let style = &resolved.cell(0, open).ok_or("missing cell")?.style;
    assert_eq!(style.fill, Some(cyan()));
    assert_eq!(style.font_weight, Some(FontWeight::Bold));
    Ok(())
}

#[test]
fn test_later_fill_overrides_earlier_fill() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let red = Color::named("red").unwrap_or_default();
    let resolved = quotes_table()
        .style(CellStyle::fill(cyan()), Location::body(ColumnSelector::All, RowSelector::All))?
        .style(CellStyle::fill(red), Location::body("close", RowSelector::indices([1])))?
        .resolve()?;
    let close = resolved.column_position("close").unwrap_or_default();
    assert_eq!(resolved.cell(1, close).and_then(|c| c.style.fill), Some(red));
    assert_eq!(resolved.cell(0, close).and_then(|c| c.style.fill), Some(cyan()));
    Ok(())
}

#[test]
fn test_css_declarations_and_borders() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let resolved = quotes_table()
        .style_css(
            "background-color: #FFFF00; font-style: italic; border-bottom: 2px solid red",
            Location::body("symbol", RowSelector::All),
        )?
        .style(
            CellStyle::borders(&[Side::Top], Border { width: 1.0, style: BorderStyle::Dashed, color: Color::BLACK }),
            Location::body("symbol", RowSelector::All),
        )?
        .resolve()?;
    let symbol = resolved.column_position("symbol").unwrap_or_default();
    let style = &resolved.cell(3, symbol).ok_or("missing cell")?.style;
    assert_eq!(style.fill, Some(Color::rgb(255, 255, 0)));
    assert_eq!(style.font_style, Some(FontStyle::Italic));
    assert_eq!(style.borders.bottom.as_ref().map(|b| b.width), Some(1.5));
    assert_eq!(style.borders.top.as_ref().map(|b| b.style), Some(BorderStyle::Dashed));
    Ok(())
}

#[test]
fn test_bad_css_is_a_style_error() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table();
    let err = table
        .style_css("background-color: notacolor", Location::body("open", RowSelector::All))
        .unwrap_err();
    assert!(matches!(err, TableError::Style(_)));
    assert!(table.styles().is_empty());
    Ok(())
}

#[test]
fn test_non_body_locations() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let bold = CellStyle::new().with_font_weight(FontWeight::Bold);
    let resolved = quotes_table()
        .with_stub("date")?
        .with_groups("symbol")?
        .with_header("Quotes", Some("March 2015"))
        .with_spanner(SpannerRequest::new("Price").id("price"), ["open", "close"])?
        .with_source_note("Exchange data")
        .style(CellStyle::new().with_font_size(16.0), Location::Title)?
        .style(bold.clone(), Location::column_labels(ColumnSelector::starts_with("c")))?
        .style(bold.clone(), Location::row_group(["MSFT"]))?
        .style(bold.clone(), Location::spanners(["price"]))?
        .style(bold.clone(), Location::stub(RowSelector::indices([0])))?
        .style(CellStyle::new().with_font_style(FontStyle::Italic), Location::Stubhead)?
        .style(CellStyle::text_color(Color::gray(100)), Location::SourceNotes)?
        .resolve()?;

    let header = resolved.header.as_ref().ok_or("no header")?;
    assert_eq!(header.title.style.font_size, Some(16.0));
    assert!(header.subtitle.as_ref().is_some_and(|s| s.style.is_empty()));

    let weight_of = |name: &str| {
        resolved
            .columns
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.label.style.font_weight)
    };
    assert_eq!(weight_of("close"), Some(FontWeight::Bold));
    assert_eq!(weight_of("change"), Some(FontWeight::Bold));
    assert_eq!(weight_of("open"), None);

    let msft = resolved.groups.iter().find_map(|g| g.label.as_ref().filter(|l| l.text == "MSFT"));
    assert_eq!(msft.and_then(|l| l.style.font_weight), Some(FontWeight::Bold));
    let aapl = resolved.groups.iter().find_map(|g| g.label.as_ref().filter(|l| l.text == "AAPL"));
    assert_eq!(aapl.and_then(|l| l.style.font_weight), None);

    assert_eq!(resolved.spanner_rows[0][0].label.style.font_weight, Some(FontWeight::Bold));
    let first_stub = resolved.rows().find(|r| r.index == 0).and_then(|r| r.stub.as_ref());
    assert_eq!(first_stub.and_then(|s| s.style.font_weight), Some(FontWeight::Bold));
    assert_eq!(resolved.source_notes[0].style.color, Some(Color::gray(100)));
    let stubhead = resolved.stubhead.as_ref().ok_or("no stubhead")?;
    assert_eq!(stubhead.style.font_style, Some(FontStyle::Italic));
    assert_eq!(stubhead.style.font_weight, None);
    Ok(())
}

#[test]
fn test_unknown_locations_fail() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table().with_groups("symbol")?;
    assert!(matches!(
        table.style(CellStyle::new(), Location::row_group(["GOOG"])),
        Err(TableError::Selection(SelectionError::UnknownGroup(_)))
    ));
    assert!(matches!(
        table.style(CellStyle::new(), Location::spanners(["price"])),
        Err(TableError::Selection(SelectionError::UnknownSpanner(_)))
    ));
    assert!(matches!(
        table.style(CellStyle::new(), Location::stub(RowSelector::All)),
        Err(TableError::Configuration(_))
    ));
    assert!(matches!(
        table.style(CellStyle::new(), Location::Stubhead),
        Err(TableError::Configuration(_))
    ));
    Ok(())
}

#[test]
fn test_cell_style_from_json_config() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let style: CellStyle = serde_json::from_str(r##"{"fill": "#00FFFF", "fontWeight": "bold", "align": "center"}"##)?;
    let resolved = quotes_table()
        .style(style, Location::body("volume", RowSelector::All))?
        .resolve()?;
    let volume = resolved.column_position("volume").unwrap_or_default();
    let cell = resolved.cell(0, volume).ok_or("missing cell")?;
    assert_eq!(cell.style.fill, Some(cyan()));
    assert_eq!(cell.style.align, Some(TextAlign::Center));
    Ok(())
}
