mod common;

use common::TestResult;
use common::fixtures::*;
use tablekit::prelude::*;

fn fill_at(resolved: &ResolvedTable, row: usize, column: &str) -> Option<Color> {
    let position = resolved.column_position(column)?;
    resolved.cell(row, position).and_then(|c| c.style.fill)
}

fn white_to_green() -> ColorScale {
    ColorScale::new(vec![Color::WHITE, Color::rgb(0, 128, 0)])
}

#[test]
fn test_domain_clamps_to_palette_ends() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // open ranges 43.56..129.25; the explicit domain sits inside it
    let resolved = quotes_table()
        .data_color("open", RowSelector::All, white_to_green().domain(50.0, 100.0))?
        .resolve()?;
    assert_eq!(fill_at(&resolved, 0, "open"), Some(Color::rgb(0, 128, 0)));
    assert_eq!(fill_at(&resolved, 3, "open"), Some(Color::WHITE));
    Ok(())
}

#[test]
fn test_domain_derived_from_observed_values() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let resolved = quotes_table()
        .data_color("volume", RowSelector::All, white_to_green())?
        .resolve()?;
    assert_eq!(fill_at(&resolved, 0, "volume"), Some(Color::rgb(0, 128, 0)));
    assert_eq!(fill_at(&resolved, 3, "volume"), Some(Color::WHITE));
    // missing volume gets the fallback color
    assert_eq!(fill_at(&resolved, 2, "volume"), Some(Color::rgb(128, 128, 128)));
    Ok(())
}

#[test]
fn test_na_color_from_options_and_scale() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table().with_options(TableOptions::default().color_na(Color::BLACK))?;
    let from_options = table.data_color("volume", RowSelector::All, white_to_green())?.resolve()?;
    assert_eq!(fill_at(&from_options, 2, "volume"), Some(Color::BLACK));

    let pink = Color::named("pink").unwrap_or_default();
    let from_scale = table
        .data_color("volume", RowSelector::All, white_to_green().na_color(pink))?
        .resolve()?;
    assert_eq!(fill_at(&from_scale, 2, "volume"), Some(pink));
    Ok(())
}

#[test]
fn test_categorical_scale() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let blue = Color::rgb(0, 0, 255);
    let resolved = quotes_table()
        .data_color("symbol", RowSelector::All, ColorScale::new(vec![Color::WHITE, blue]))?
        .resolve()?;
    assert_eq!(fill_at(&resolved, 0, "symbol"), Some(Color::WHITE));
    assert_eq!(fill_at(&resolved, 2, "symbol"), Some(blue));

    let explicit = quotes_table()
        .data_color(
            "symbol",
            RowSelector::All,
            ColorScale::new(vec![blue]).levels(["MSFT"]).na_color(Color::BLACK),
        )?
        .resolve()?;
    assert_eq!(fill_at(&explicit, 0, "symbol"), Some(Color::BLACK));
    assert_eq!(fill_at(&explicit, 3, "symbol"), Some(blue));
    Ok(())
}

#[test]
fn test_numeric_domain_errors_fail_fast() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table();
    let err = table
        .data_color("symbol", RowSelector::All, white_to_green().method(ColorMethod::Numeric))
        .unwrap_err();
    assert!(matches!(err, TableError::Domain(_)));
    assert!(table.styles().is_empty());

    let empty = table.data_color("open", RowSelector::All, ColorScale::new(vec![]));
    assert!(matches!(empty, Err(TableError::Domain(_))));
    Ok(())
}

#[test]
fn test_non_numeric_value_under_explicit_domain_fails_at_resolution() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let table = quotes_table().data_color(
        ColumnSelector::names(["open", "symbol"]),
        RowSelector::All,
        white_to_green().domain(0.0, 200.0),
    )?;
    assert!(matches!(table.resolve(), Err(TableError::Domain(_))));
    Ok(())
}

#[test]
fn test_domain_spans_all_selected_columns() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let resolved = quotes_table()
        .data_color(["open", "close"], RowSelector::All, white_to_green())?
        .resolve()?;
    // the maximum across both columns is close[1]; the minimum is close[3]
    assert_eq!(fill_at(&resolved, 1, "close"), Some(Color::rgb(0, 128, 0)));
    assert_eq!(fill_at(&resolved, 3, "close"), Some(Color::WHITE));
    assert_ne!(fill_at(&resolved, 3, "open"), Some(Color::WHITE));
    Ok(())
}

#[test]
fn test_readable_text_color_and_later_overrides() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let navy = Color::named("navy").unwrap_or_default();
    let resolved = quotes_table()
        .data_color("open", RowSelector::All, ColorScale::new(vec![Color::WHITE, navy]))?
        .style(CellStyle::fill(Color::rgb(255, 0, 0)), Location::body("open", RowSelector::indices([3])))?
        .resolve()?;
    let open = resolved.column_position("open").unwrap_or_default();
    let dark = &resolved.cell(0, open).ok_or("missing cell")?.style;
    assert_eq!(dark.fill, Some(navy));
    assert_eq!(dark.color, Some(Color::WHITE));
    let light = &resolved.cell(3, open).ok_or("missing cell")?.style;
    assert_eq!(light.fill, Some(Color::rgb(255, 0, 0)));
    assert_eq!(light.color, Some(Color::BLACK));

    let text_only = quotes_table()
        .data_color(
            "open",
            RowSelector::All,
            ColorScale::new(vec![Color::WHITE, navy]).apply_to(ApplyTo::Text),
        )?
        .resolve()?;
    let cell = text_only.cell(0, open).ok_or("missing cell")?;
    assert_eq!(cell.style.fill, None);
    assert_eq!(cell.style.color, Some(navy));
    Ok(())
}
