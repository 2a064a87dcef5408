use chrono::NaiveDate;
use serde_json::json;
use tablekit::{TableData, TableModel, Value};

/// A small stock-quote table with a missing value in `volume`.
pub fn quotes() -> TableData {
    let date = |d: u32| Value::Date(NaiveDate::from_ymd_opt(2015, 3, d).expect("valid date"));
    TableData::new(
        vec!["date", "symbol", "open", "close", "volume", "change"],
        vec![
            vec![date(2), "AAPL".into(), 129.25.into(), 129.09.into(), 48_096_700.into(), (-0.0012).into()],
            vec![date(3), "AAPL".into(), 128.96.into(), 129.36.into(), 37_816_300.into(), 0.0031.into()],
            vec![date(2), "MSFT".into(), 43.67.into(), 43.88.into(), Value::Null, 0.0048.into()],
            vec![date(3), "MSFT".into(), 43.56.into(), 43.28.into(), 31_748_200.into(), (-0.0064).into()],
        ],
    )
    .expect("quotes fixture")
}

pub fn quotes_table() -> TableModel {
    TableModel::new(quotes())
}

/// Country records as they would arrive from a JSON source.
pub fn country_records() -> Vec<serde_json::Value> {
    vec![
        json!({"country": "Japan", "continent": "Asia", "population": 125_700_000, "growth": -0.005}),
        json!({"country": "France", "continent": "Europe", "population": 68_000_000, "growth": 0.003}),
        json!({"country": "India", "continent": "Asia", "population": 1_428_600_000, "growth": 0.008}),
        json!({"country": "Spain", "continent": "Europe", "population": 48_300_000, "growth": null}),
    ]
}

pub fn countries_table() -> TableModel {
    TableModel::from_records(&country_records()).expect("country fixture")
}
