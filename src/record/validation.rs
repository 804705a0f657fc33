//! Validation of untrusted record payloads
//!
//! Checks run in a fixed order and the first failing check decides the
//! rejection reason. Nothing is accumulated and nothing is mutated.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::types::{Record, RecordInput};

// `\d` in the regex crate matches any Unicode digit, so spell out ASCII.
static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("identifier pattern is valid"));

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Year-first or month-named only; `DD/MM/YYYY` and `MM/DD/YYYY` stay rejected.
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%b %d %Y", "%B %d, %Y", "%b %d, %Y"];

/// Why a payload was not accepted as a record
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    #[error("Todos os campos (cpf, nome, data_nascimento) são obrigatórios.")]
    MissingFields,

    #[error("CPF deve ser um número de 11 dígitos.")]
    InvalidIdentifierFormat,

    #[error("Nome deve ser uma string não vazia.")]
    InvalidName,

    #[error("Data de nascimento deve ser uma data válida.")]
    InvalidBirthDate,
}

impl RejectionReason {
    /// Stable machine-readable name of the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidIdentifierFormat => "invalid_identifier_format",
            Self::InvalidName => "invalid_name",
            Self::InvalidBirthDate => "invalid_birth_date",
        }
    }
}

/// Validate an untrusted payload into a [`Record`].
///
/// The returned record carries the fields exactly as received. The name is
/// trimmed only to decide whether it is blank.
pub fn validate(input: &RecordInput) -> Result<Record, RejectionReason> {
    let (identifier, name, birth_date) =
        match (&input.identifier, &input.name, &input.birth_date) {
            (Some(identifier), Some(name), Some(birth_date))
                if is_present(identifier) && is_present(name) && is_present(birth_date) =>
            {
                (identifier, name, birth_date)
            }
            _ => return Err(RejectionReason::MissingFields),
        };

    let identifier = identifier
        .as_str()
        .filter(|value| is_valid_identifier(value))
        .ok_or(RejectionReason::InvalidIdentifierFormat)?;

    let name = name
        .as_str()
        .filter(|value| !is_blank(value))
        .ok_or(RejectionReason::InvalidName)?;

    let birth_date = birth_date
        .as_str()
        .filter(|value| parse_birth_date(value).is_some())
        .ok_or(RejectionReason::InvalidBirthDate)?;

    Ok(Record {
        identifier: identifier.to_string(),
        name: name.to_string(),
        birth_date: birth_date.to_string(),
    })
}

/// Whether `value` is exactly 11 ASCII decimal digits
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(value)
}

/// Parse a birth date written in one of the accepted ISO-8601 or RFC forms.
///
/// Accepts full dates (`1970-09-06`), reduced precision (`1970-09`, `1970`),
/// RFC 3339 and RFC 2822 timestamps, naive date-times, and the unambiguous
/// `1970/09/06` and `Sep 6 1970` forms. Only the calendar date is kept.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    if let Some(date) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|datetime| datetime.date())
    {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(value) {
        return Some(timestamp.date_naive());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    {
        return Some(date);
    }

    parse_reduced_precision(value)
}

/// `YYYY` or `YYYY-MM`, resolved to the first day of the period
fn parse_reduced_precision(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parts.next().filter(|year| is_ascii_digits(year, 4))?;
    let month = match parts.next() {
        Some(month) if is_ascii_digits(month, 2) => month,
        Some(_) => return None,
        None => "01",
    };
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Blank after stripping whitespace and the byte-order mark
fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

fn is_ascii_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Falsy values (`null`, `false`, zero and the empty string) count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
