//! Record-level feature derivation from ticket, name and cabin text
//!
//! Four independent per-row rules:
//!
//! - **Ticket**: split into a prefix code and a number (`"A/5 21171"` → `A5`, `21171`).
//!   Purely numeric tickets get the code `X`.
//! - **Title**: the honorific before the first period in the name, mapped onto
//!   one of six canonical titles. Unknown honorifics become null.
//! - **Cabin**: deck letter and cabin number from the last listed cabin
//!   (`"C23 C25"` → `C`, `25`). Missing cabins become `Unknown`, `-1`.
//! - **Family**: `SibSp + Parch`, plus an `Alone` flag.
//!
//! Unparseable numbers fall back to [`SENTINEL`] instead of failing the run.
//! The raw `Ticket`, `Name` and `Cabin` columns are dropped afterwards.

use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;

use super::error::TransformError;
use super::transform::{require_column, StageReport, Transformer};

const STAGE: &str = "processor";

/// Number used when a ticket or cabin number cannot be parsed
pub const SENTINEL: i64 = -1;

/// Ticket code assigned to tickets made only of digits
pub const NUMERIC_TICKET_CODE: &str = "X";

/// Cabin code assigned when the cabin is missing
pub const UNKNOWN_CABIN: &str = "Unknown";

/// Honorific: a space, letters, then a period
const TITLE_PATTERN: &str = r" ([A-Za-z]+)\.";

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TITLE_PATTERN).expect("title pattern is a valid regex"));

pub const TICKET: &str = "Ticket";
pub const NAME: &str = "Name";
pub const CABIN: &str = "Cabin";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";

pub const TICKET_COD: &str = "Ticket_cod";
pub const TICKET_NUMBER: &str = "Ticket_number";
pub const TITLE: &str = "Title";
pub const CABIN_TYPE: &str = "Cabin_type";
pub const CABIN_NUMBER: &str = "Cabin_number";
pub const FAMILY_SIZE: &str = "Family_size";
pub const ALONE: &str = "Alone";

/// Derives ticket, title, cabin and family columns. Carries no configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordProcessor;

impl RecordProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for RecordProcessor {
    fn name(&self) -> &'static str {
        "Derive Record Features"
    }

    fn transform(&self, mut df: DataFrame) -> Result<(DataFrame, StageReport), TransformError> {
        let mut report = StageReport::new(STAGE);

        // Fail fast before touching the frame
        for required in [TICKET, NAME, CABIN, SIBSP, PARCH] {
            require_column(&df, required, STAGE)?;
        }

        let tickets = string_values(&df, TICKET)?;
        let (ticket_codes, ticket_numbers): (Vec<String>, Vec<i64>) =
            tickets.iter().map(|t| parse_ticket(t.as_deref())).unzip();

        let names = string_values(&df, NAME)?;
        let titles: Vec<Option<&'static str>> = names
            .iter()
            .map(|name| {
                name.as_deref()
                    .and_then(extract_honorific)
                    .and_then(canonical_title)
            })
            .collect();

        let cabins = string_values(&df, CABIN)?;
        let (cabin_types, cabin_numbers): (Vec<String>, Vec<i64>) =
            cabins.iter().map(|c| parse_cabin(c.as_deref())).unzip();

        let sibsp = count_values(&df, SIBSP)?;
        let parch = count_values(&df, PARCH)?;
        let family_size: Vec<i64> = sibsp
            .iter()
            .zip(parch.iter())
            .map(|(s, p)| s.unwrap_or(0) + p.unwrap_or(0))
            .collect();
        let alone: Vec<bool> = family_size.iter().map(|&size| size == 0).collect();

        report.count(
            "ticket number fallbacks",
            ticket_numbers.iter().filter(|&&n| n == SENTINEL).count(),
        );
        report.count("unmapped titles", titles.iter().filter(|t| t.is_none()).count());
        report.count(
            "cabin number fallbacks",
            cabin_numbers.iter().filter(|&&n| n == SENTINEL).count(),
        );
        report.count("passengers alone", alone.iter().filter(|&&a| a).count());

        let derived = [
            Column::new(TICKET_COD.into(), ticket_codes),
            Column::new(TICKET_NUMBER.into(), ticket_numbers),
            Column::new(TITLE.into(), titles),
            Column::new(CABIN_TYPE.into(), cabin_types),
            Column::new(CABIN_NUMBER.into(), cabin_numbers),
            Column::new(FAMILY_SIZE.into(), family_size),
            Column::new(ALONE.into(), alone),
        ];
        for column in derived {
            report.columns_added.push(column.name().to_string());
            df.with_column(column)?;
        }

        let df = df.drop_many([TICKET, NAME, CABIN]);
        report.columns_removed = vec![TICKET.to_string(), NAME.to_string(), CABIN.to_string()];

        Ok((df, report))
    }
}

/// Read a column as optional strings, casting non-string columns first.
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, TransformError> {
    let column = require_column(df, name, STAGE)?;
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Read a count column as optional integers.
fn count_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, TransformError> {
    let column = require_column(df, name, STAGE)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(TransformError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().clone(),
            operation: "family size",
        });
    }
    let cast = column.cast(&DataType::Int64)?;
    Ok(cast.i64()?.into_iter().collect())
}

/// Split a raw ticket into `(code, number)`.
fn parse_ticket(raw: Option<&str>) -> (String, i64) {
    let Some(ticket) = raw else {
        return (NUMERIC_TICKET_CODE.to_string(), SENTINEL);
    };

    if !ticket.is_empty() && ticket.chars().all(|c| c.is_ascii_digit()) {
        return (
            NUMERIC_TICKET_CODE.to_string(),
            ticket.parse().unwrap_or(SENTINEL),
        );
    }

    let cleaned: String = ticket.chars().filter(|&c| c != '.' && c != '/').collect();
    let mut tokens = cleaned.trim().split(' ');
    let code = tokens.next().unwrap_or_default().to_string();
    let number = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or(SENTINEL);

    (code, number)
}

fn extract_honorific(name: &str) -> Option<&str> {
    TITLE_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Map an honorific onto its canonical title. Closed dictionary: anything else is `None`.
fn canonical_title(honorific: &str) -> Option<&'static str> {
    let title = match honorific {
        "Mr" => "Mr",
        "Mme" | "Ms" | "Mrs" => "Mrs",
        "Master" => "Master",
        "Mlle" | "Miss" => "Miss",
        "Capt" | "Col" | "Major" | "Dr" | "Rev" => "Officer",
        "Jonkheer" | "Don" | "Sir" | "Countess" | "Dona" | "Lady" => "Royalty",
        _ => return None,
    };
    Some(title)
}

/// Split a raw cabin into `(deck, number)` using the last listed cabin.
fn parse_cabin(raw: Option<&str>) -> (String, i64) {
    let last = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.split(' ').next_back());

    let mut chars = match last {
        Some(token) => token.chars(),
        None => return (UNKNOWN_CABIN.to_string(), SENTINEL),
    };

    match chars.next() {
        Some(deck) => (
            deck.to_string(),
            chars.as_str().parse().unwrap_or(SENTINEL),
        ),
        None => (UNKNOWN_CABIN.to_string(), SENTINEL),
    }
}
