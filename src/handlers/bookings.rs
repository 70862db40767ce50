use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Booking, BookingFields, TaxDocument};
use crate::services::parsing::{
    optional_text, parse_booking_date, parse_booking_time, parse_document, required_text,
    ValidationError,
};
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "Agendamento não encontrado";

/// Body of create and update requests, as sent by the booking form.
#[derive(Debug, Default, Deserialize)]
pub struct BookingPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// `DD/MM/YYYY`
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub cnpj: Option<String>,
    /// CPF or CNPJ, told apart by digit count.
    pub document: Option<String>,
}

impl BookingPayload {
    pub fn into_fields(self) -> Result<BookingFields, ValidationError> {
        Ok(BookingFields {
            name: required_text("name", self.name)?,
            phone: required_text("phone", self.phone)?,
            date: parse_booking_date(self.date.as_deref())?,
            time: parse_booking_time(self.time.as_deref())?,
            service: optional_text(self.service),
            email: optional_text(self.email),
            document: parse_document(self.cpf, self.cnpj, self.document)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    id: i64,
    name: String,
    phone: String,
    date: String,
    time: Option<String>,
    service: Option<String>,
    email: Option<String>,
    document: Option<TaxDocument>,
    created_at: String,
    updated_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.fields.name,
            phone: b.fields.phone,
            date: b.fields.date.format("%Y-%m-%d").to_string(),
            time: b.fields.time.map(format_time),
            service: b.fields.service,
            email: b.fields.email,
            document: b.fields.document,
            created_at: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: b.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// `HH:MM`, or `HH:MM:SS` when the stored time carries seconds, so a
/// fetched booking can be sent back unchanged.
fn format_time(t: NaiveTime) -> String {
    if t.second() == 0 {
        t.format("%H:%M").to_string()
    } else {
        t.format("%H:%M:%S").to_string()
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    message: &'static str,
    data: BookingResponse,
}

#[derive(Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

// POST /api/agendar
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingPayload>,
) -> Result<Json<CreatedResponse>, AppError> {
    let fields = payload.into_fields()?;
    let booking = state.store.insert(fields).await?;

    tracing::info!(id = booking.id, date = %booking.fields.date, "booking created");

    Ok(Json(CreatedResponse {
        message: "Agendamento salvo!",
        data: booking.into(),
    }))
}

// GET /api/agendamentos
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = state.store.list().await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

// GET /api/agendamentos/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(|b| Json(b.into()))
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

// PUT /api/agendamentos/:id
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingPayload>,
) -> Result<Json<BookingResponse>, AppError> {
    let fields = payload.into_fields()?;
    let booking = state
        .store
        .update(id, fields)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    tracing::info!(id, "booking updated");

    Ok(Json(booking.into()))
}

// DELETE /api/agendamentos/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::info!(id, "booking deleted");

    Ok(Json(MessageResponse {
        message: "Agendamento removido",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parsing::DateError;

    fn payload() -> BookingPayload {
        BookingPayload {
            name: Some("Ana".to_string()),
            phone: Some("+5511999990000".to_string()),
            date: Some("25/12/2024".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_fields_minimal() {
        let fields = payload().into_fields().unwrap();
        assert_eq!(fields.name, "Ana");
        assert_eq!(fields.date.to_string(), "2024-12-25");
        assert!(fields.time.is_none());
        assert!(fields.document.is_none());
    }

    #[test]
    fn test_into_fields_requires_phone() {
        let mut p = payload();
        p.phone = None;
        assert_eq!(p.into_fields(), Err(ValidationError::MissingField("phone")));
    }

    #[test]
    fn test_format_time_keeps_seconds() {
        assert_eq!(format_time(NaiveTime::from_hms_opt(14, 30, 0).unwrap()), "14:30");
        assert_eq!(format_time(NaiveTime::from_hms_opt(9, 15, 30).unwrap()), "09:15:30");
    }

    #[test]
    fn test_into_fields_accepts_document_key() {
        let mut p = payload();
        p.document = Some("52998224725".to_string());
        assert_eq!(
            p.into_fields().unwrap().document,
            Some(TaxDocument::Cpf("52998224725".to_string()))
        );
    }

    #[test]
    fn test_into_fields_requires_date() {
        let mut p = payload();
        p.date = None;
        assert_eq!(p.into_fields(), Err(ValidationError::Date(DateError::Missing)));
    }
}
