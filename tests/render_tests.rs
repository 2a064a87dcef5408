mod common;

use common::fixtures::*;
use common::text_assertions::line_of;
use common::{TestResult, render_text};
use tablekit::prelude::*;

#[test]
fn test_plain_text_layout() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table()
        .with_stub("date")?
        .with_groups("symbol")?
        .with_stubhead_label("Day")
        .with_header("Stock quotes", Some("March 2015"))
        .with_spanner(SpannerRequest::new("Price"), ["open", "close"])?
        .with_hidden_columns("change")?
        .fmt_date("date", RowSelector::All, "m_day_year")?
        .fmt_currency(["open", "close"], RowSelector::All, CurrencyFormat::new("USD")?)?
        .fmt_number("volume", RowSelector::All, NumberFormat::new().decimals(1).compact(true))?
        .with_source_note("Source: exchange feed");
    let text = render_text(&table)?;

    assert_text_contains!(text, "Stock quotes");
    assert_text_contains!(text, "Price");
    assert_text_contains!(text, "$129.25");
    assert_text_contains!(text, "48.1M");
    assert_text_contains!(text, "Mar 2, 2015");
    assert_text_not_contains!(text, "-0.0012");

    let title = line_of(&text, "Stock quotes").ok_or("no title")?;
    let spanner = line_of(&text, "Price").ok_or("no spanner")?;
    let labels = line_of(&text, "volume").ok_or("no labels")?;
    let aapl = line_of(&text, "AAPL").ok_or("no AAPL group")?;
    let msft = line_of(&text, "MSFT").ok_or("no MSFT group")?;
    let note = line_of(&text, "Source:").ok_or("no source note")?;
    assert!(title < spanner && spanner < labels && labels < aapl && aapl < msft && msft < note);
    assert!(text.lines().nth(labels).is_some_and(|l| l.starts_with("Day")));
    Ok(())
}

#[test]
fn test_numeric_columns_right_aligned() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let data = TableData::new(
        vec!["item", "qty"],
        vec![vec!["apples".into(), 5.into()], vec!["kiwis".into(), 120.into()]],
    )?;
    let text = render_text(&TableModel::new(data))?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, ["item    qty", "-----------", "apples    5", "kiwis   120"]);
    Ok(())
}

#[test]
fn test_text_transform_is_applied() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let text = render_text(
        &quotes_table().style(
            CellStyle::new().with_transform(TextTransform::Lowercase),
            Location::body("symbol", RowSelector::All),
        )?,
    )?;
    assert_text_contains!(text, "aapl");
    assert_text_not_contains!(text, "AAPL");
    Ok(())
}

#[test]
fn test_json_renderer_hands_off_resolved_table() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let json = countries_table()
        .with_stub("country")?
        .fmt_percent("growth", RowSelector::All, PercentFormat::new().decimals(1))?
        .style(CellStyle::fill(Color::WHITE), Location::body("growth", RowSelector::All))?
        .render(&JsonRenderer)?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    let first_row = &parsed["groups"][0]["rows"][0];
    assert_eq!(first_row["stub"]["text"], "Japan");
    let growth = parsed["columns"]
        .as_array()
        .and_then(|cols| cols.iter().position(|c| c["name"] == "growth"))
        .ok_or("no growth column")?;
    assert_eq!(first_row["cells"][growth]["text"], "-0.5%");
    assert_eq!(first_row["cells"][growth]["style"]["fill"], "#FFFFFF");
    Ok(())
}

#[test]
fn test_render_options_from_json() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let options = TextRenderOptions::from_json(r#"{"columnGap": 4, "rule": "="}"#)?;
    let data = TableData::new(vec!["a", "b"], vec![vec!["x".into(), "y".into()]])?;
    let text = TableModel::new(data).render(&PlainTextRenderer::with_options(options))?;
    assert_eq!(text, "a    b\n======\nx    y");
    Ok(())
}
