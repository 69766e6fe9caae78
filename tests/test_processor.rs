//! Tests for ticket, title, cabin and family derivation

use featherline::pipeline::{RecordProcessor, TransformError, Transformer, SENTINEL};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn process(df: DataFrame) -> DataFrame {
    RecordProcessor::new().transform(df).unwrap().0
}

#[test]
fn test_derived_columns_replace_raw_columns() {
    let df = process(create_train_dataframe());

    assert_has_columns(
        &df,
        &[
            "Ticket_cod",
            "Ticket_number",
            "Title",
            "Cabin_type",
            "Cabin_number",
            "Family_size",
            "Alone",
        ],
    );
    assert_missing_columns(&df, &["Ticket", "Name", "Cabin"]);
    // 12 - 3 raw + 7 derived
    assert_eq!(df.width(), 16);
}

#[test]
fn test_derived_columns_are_appended_in_order() {
    let df = process(create_train_dataframe());
    let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

    assert_eq!(
        &names[names.len() - 7..],
        &[
            "Ticket_cod",
            "Ticket_number",
            "Title",
            "Cabin_type",
            "Cabin_number",
            "Family_size",
            "Alone",
        ]
    );
}

#[test]
fn test_ticket_parsing() {
    let df = process(create_train_dataframe());

    assert_eq!(
        strings(&df, "Ticket_cod"),
        ["A5", "PC", "STONO2", "X", "LINE"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect::<Vec<_>>()
    );
    assert_eq!(
        ints(&df, "Ticket_number"),
        vec![Some(21171), Some(17599), Some(3101282), Some(19928), Some(SENTINEL)]
    );
}

#[test]
fn test_numeric_ticket_column_is_accepted() {
    // CSV inference can type an all-digit Ticket column as integers
    let df = df! {
        "Ticket" => [112053i64, 330911],
        "Name" => ["A, Mr. B", "C, Mrs. D"],
        "Cabin" => [None::<&str>, None],
        "SibSp" => [0i64, 0],
        "Parch" => [0i64, 0],
    }
    .unwrap();

    let df = process(df);

    assert_eq!(
        strings(&df, "Ticket_cod"),
        vec![Some("X".to_string()), Some("X".to_string())]
    );
    assert_eq!(ints(&df, "Ticket_number"), vec![Some(112053), Some(330911)]);
}

#[test]
fn test_title_mapping() {
    let df = process(create_train_dataframe());

    assert_eq!(
        strings(&df, "Title"),
        vec![
            Some("Mr".to_string()),
            Some("Mrs".to_string()),
            Some("Miss".to_string()),
            Some("Officer".to_string()),
            // "Capitan" is not a known honorific
            None,
        ]
    );
}

#[test]
fn test_missing_name_has_no_title() {
    let df = df! {
        "Name" => [Some("Braund, Mr. Owen Harris"), None],
        "Ticket" => ["A/5 21171", "113803"],
        "Cabin" => [None, Some("C85")],
        "SibSp" => [1i64, 0],
        "Parch" => [0i64, 0],
    }
    .unwrap();

    let (df, report) = RecordProcessor::new().transform(df).unwrap();

    assert_eq!(strings(&df, "Title"), vec![Some("Mr".to_string()), None]);
    assert_eq!(report.counter("unmapped titles"), Some(1));
}

#[test]
fn test_cabin_parsing() {
    let df = process(create_train_dataframe());

    assert_eq!(
        strings(&df, "Cabin_type"),
        ["Unknown", "C", "Unknown", "C", "F"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect::<Vec<_>>()
    );
    assert_eq!(
        ints(&df, "Cabin_number"),
        vec![Some(-1), Some(85), Some(-1), Some(80), Some(-1)]
    );
}

#[test]
fn test_family_size_and_alone() {
    let df = process(create_train_dataframe());

    assert_eq!(
        ints(&df, "Family_size"),
        vec![Some(1), Some(1), Some(0), Some(2), Some(0)]
    );
    let alone: Vec<Option<bool>> = df
        .column("Alone")
        .unwrap()
        .bool()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        alone,
        vec![Some(false), Some(false), Some(true), Some(false), Some(true)]
    );
}

#[test]
fn test_missing_counts_treated_as_zero() {
    let df = df! {
        "Ticket" => ["1", "2"],
        "Name" => ["A, Mr. B", "C, Mr. D"],
        "Cabin" => [None::<&str>, None],
        "SibSp" => [None, Some(2i64)],
        "Parch" => [None::<i64>, None],
    }
    .unwrap();

    let df = process(df);

    assert_eq!(ints(&df, "Family_size"), vec![Some(0), Some(2)]);
}

#[test]
fn test_derived_columns_never_missing() {
    let df = process(create_train_dataframe());

    for column in [
        "Ticket_cod",
        "Ticket_number",
        "Cabin_type",
        "Cabin_number",
        "Family_size",
        "Alone",
    ] {
        assert_eq!(
            df.column(column).unwrap().null_count(),
            0,
            "{} should never be missing",
            column
        );
    }
}

#[test]
fn test_report_counters() {
    let (_, report) = RecordProcessor::new()
        .transform(create_train_dataframe())
        .unwrap();

    assert_eq!(report.counter("ticket number fallbacks"), Some(1));
    assert_eq!(report.counter("unmapped titles"), Some(1));
    assert_eq!(report.counter("cabin number fallbacks"), Some(3));
    assert_eq!(report.counter("passengers alone"), Some(2));
    assert_eq!(report.columns_removed, vec!["Ticket", "Name", "Cabin"]);
}

#[test]
fn test_missing_raw_column_is_an_error() {
    let df = create_train_dataframe().drop("Cabin").unwrap();

    let result = RecordProcessor::new().transform(df);

    match result {
        Err(TransformError::ColumnNotFound { column, .. }) => assert_eq!(column, "Cabin"),
        other => panic!("Expected ColumnNotFound, got {:?}", other.map(|_| ())),
    }
}
