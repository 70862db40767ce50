use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub fields: BookingFields,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Everything about a booking the client controls. Creates and updates both
/// carry a complete set; there are no partial writes.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFields {
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub service: Option<String>,
    pub email: Option<String>,
    pub document: Option<TaxDocument>,
}

/// Brazilian tax ID: CPF for individuals, CNPJ for companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "lowercase")]
pub enum TaxDocument {
    Cpf(String),
    Cnpj(String),
}

impl TaxDocument {
    pub fn kind(&self) -> &'static str {
        match self {
            TaxDocument::Cpf(_) => "cpf",
            TaxDocument::Cnpj(_) => "cnpj",
        }
    }

    pub fn number(&self) -> &str {
        match self {
            TaxDocument::Cpf(n) | TaxDocument::Cnpj(n) => n,
        }
    }

    pub fn from_parts(kind: &str, number: String) -> Option<Self> {
        match kind {
            "cpf" => Some(TaxDocument::Cpf(number)),
            "cnpj" => Some(TaxDocument::Cnpj(number)),
            _ => None,
        }
    }
}
