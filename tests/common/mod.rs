//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small passenger table shaped like the training source
///
/// This DataFrame includes:
/// - `Survived`: label column (absent from the holdout fixture)
/// - `Age`, `Fare`, `Embarked`: one missing value each
/// - `Ticket`: numeric, prefixed and prefix-only tickets
/// - `Name`: mapped honorifics plus one outside the dictionary
/// - `Cabin`: single, multi-cabin, deck-only and missing cabins
pub fn create_train_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5],
        "Survived" => [0i64, 1, 1, 0, 1],
        "Pclass" => [3i64, 1, 3, 1, 2],
        "Name" => [
            "Braund, Mr. Owen Harris",
            "Cumings, Mrs. John Bradley (Florence Briggs Thayer)",
            "Heikkinen, Miss. Laina",
            "Minahan, Dr. William Edward",
            "Smith, Capitan. Jonas",
        ],
        "Sex" => ["male", "female", "female", "male", "male"],
        "Age" => [Some(22.0f64), Some(38.0), None, Some(44.0), Some(30.0)],
        "SibSp" => [1i64, 1, 0, 2, 0],
        "Parch" => [0i64, 0, 0, 0, 0],
        "Ticket" => ["A/5 21171", "PC 17599", "STON/O2. 3101282", "19928", "LINE"],
        "Fare" => [Some(7.25f64), Some(71.2833), Some(7.925), Some(90.0), None],
        "Cabin" => [None, Some("C85"), None, Some("C78 C80"), Some("F")],
        "Embarked" => [Some("S"), Some("C"), Some("S"), None, Some("Q")],
    }
    .unwrap()
}

/// Create a holdout table: same columns minus `Survived`
pub fn create_holdout_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [892i64, 893],
        "Pclass" => [3i64, 3],
        "Name" => ["Kelly, Mr. James", "Wilkes, Mrs. James (Ellen Needs)"],
        "Sex" => ["male", "female"],
        "Age" => [Some(34.5f64), None],
        "SibSp" => [0i64, 1],
        "Parch" => [0i64, 0],
        "Ticket" => ["330911", "363272"],
        "Fare" => [Some(7.8292f64), Some(7.0)],
        "Cabin" => [None::<&str>, None],
        "Embarked" => ["Q", "S"],
    }
    .unwrap()
}

/// Write a DataFrame to a CSV file inside a fresh temporary directory
pub fn create_temp_csv(df: &mut DataFrame, file_name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = write_csv(&temp_dir, df, file_name);
    (temp_dir, csv_path)
}

/// Write a DataFrame as CSV into an existing directory
pub fn write_csv(dir: &TempDir, df: &mut DataFrame, file_name: &str) -> PathBuf {
    let csv_path = dir.path().join(file_name);
    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
    csv_path
}

/// Write a DataFrame as Parquet into an existing directory
pub fn write_parquet(dir: &TempDir, df: &mut DataFrame, file_name: &str) -> PathBuf {
    let parquet_path = dir.path().join(file_name);
    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();
    parquet_path
}

/// Collect a string column as owned optional values
pub fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

/// Collect an integer column as optional i64 values
pub fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Collect a numeric column as optional f64 values
pub fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
