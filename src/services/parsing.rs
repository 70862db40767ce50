//! Normalization of client-supplied booking input.
//!
//! The booking form sends dates as `DD/MM/YYYY`; storage and every response
//! use ISO `YYYY-MM-DD`. Anything that does not parse is rejected with a
//! [`ValidationError`] instead of being stored as-is.

use chrono::{NaiveDate, NaiveTime};

use crate::models::TaxDocument;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("data ausente")]
    Missing,

    #[error("data inválida, use DD/MM/AAAA: {0}")]
    Malformed(String),

    #[error("data inexistente: {0}")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error("horário inválido, use HH:MM: {0}")]
    Time(String),

    #[error("informe apenas um documento: cpf, cnpj ou document")]
    ConflictingDocuments,

    #[error("documento inválido, use CPF (11 dígitos) ou CNPJ (14 dígitos): {0}")]
    UnknownDocument(String),
}

/// Parses a `DD/MM/YYYY` date. Day and month may be one or two digits, the
/// year must be four.
pub fn parse_booking_date(input: Option<&str>) -> Result<NaiveDate, DateError> {
    let raw = input.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(DateError::Missing);
    }

    let malformed = || DateError::Malformed(raw.to_string());

    let parts: Vec<&str> = raw.split('/').collect();
    let (day, month, year) = match parts.as_slice() {
        [d, m, y] => (*d, *m, *y),
        _ => return Err(malformed()),
    };

    let digits = |s: &str, min: usize, max: usize| {
        (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(day, 1, 2) || !digits(month, 1, 2) || !digits(year, 4, 4) {
        return Err(malformed());
    }

    let day: u32 = day.parse().map_err(|_| malformed())?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange(raw.to_string()))
}

/// Parses an optional `HH:MM` (or `HH:MM:SS`) time. Blank means no time.
pub fn parse_booking_time(input: Option<&str>) -> Result<Option<NaiveTime>, ValidationError> {
    let raw = input.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| ValidationError::Time(raw.to_string()))
}

/// Collapses the form's alternative tax-ID inputs into one document. At most
/// one of `cpf`, `cnpj` and `document` may be filled in; `document` is
/// classified by its digit count.
pub fn parse_document(
    cpf: Option<String>,
    cnpj: Option<String>,
    document: Option<String>,
) -> Result<Option<TaxDocument>, ValidationError> {
    match (optional_text(cpf), optional_text(cnpj), optional_text(document)) {
        (Some(cpf), None, None) => Ok(Some(TaxDocument::Cpf(cpf))),
        (None, Some(cnpj), None) => Ok(Some(TaxDocument::Cnpj(cnpj))),
        (None, None, Some(document)) => classify_document(document).map(Some),
        (None, None, None) => Ok(None),
        _ => Err(ValidationError::ConflictingDocuments),
    }
}

/// Accepts bare digits or the usual `000.000.000-00` / `00.000.000/0000-00`
/// punctuation.
fn classify_document(raw: String) -> Result<TaxDocument, ValidationError> {
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/'))
    {
        return Err(ValidationError::UnknownDocument(raw));
    }

    match raw.chars().filter(char::is_ascii_digit).count() {
        11 => Ok(TaxDocument::Cpf(raw)),
        14 => Ok(TaxDocument::Cnpj(raw)),
        _ => Err(ValidationError::UnknownDocument(raw)),
    }
}

pub fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    optional_text(value).ok_or(ValidationError::MissingField(field))
}

pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
