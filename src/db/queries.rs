use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Booking, BookingFields, TaxDocument};

const BOOKING_COLUMNS: &str = "id, name, phone, date, time, service, email, document_kind, document_number, created_at, updated_at";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Bookings ──

pub fn create_booking(conn: &Connection, fields: &BookingFields) -> anyhow::Result<Booking> {
    let now = now_timestamp();
    let sql = format!(
        "INSERT INTO bookings (name, phone, date, time, service, email, document_kind, document_number, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
         RETURNING {BOOKING_COLUMNS}"
    );

    let booking = conn.query_row(
        &sql,
        params![
            fields.name,
            fields.phone,
            fields.date.format(DATE_FORMAT).to_string(),
            fields.time.map(|t| t.format(TIME_FORMAT).to_string()),
            fields.service,
            fields.email,
            fields.document.as_ref().map(TaxDocument::kind),
            fields.document.as_ref().map(TaxDocument::number),
            now,
        ],
        |row| Ok(parse_booking_row(row)),
    )??;
    Ok(booking)
}

pub fn list_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id DESC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: i64) -> anyhow::Result<Option<Booking>> {
    let result = conn
        .query_row(
            &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
            params![id],
            |row| Ok(parse_booking_row(row)),
        )
        .optional()?;

    result.transpose()
}

/// Replaces every client-controlled column. Returns `None` when `id` does
/// not exist.
pub fn update_booking(
    conn: &Connection,
    id: i64,
    fields: &BookingFields,
) -> anyhow::Result<Option<Booking>> {
    let sql = format!(
        "UPDATE bookings SET name = ?1, phone = ?2, date = ?3, time = ?4, service = ?5, email = ?6,
             document_kind = ?7, document_number = ?8, updated_at = ?9
         WHERE id = ?10
         RETURNING {BOOKING_COLUMNS}"
    );

    let result = conn
        .query_row(
            &sql,
            params![
                fields.name,
                fields.phone,
                fields.date.format(DATE_FORMAT).to_string(),
                fields.time.map(|t| t.format(TIME_FORMAT).to_string()),
                fields.service,
                fields.email,
                fields.document.as_ref().map(TaxDocument::kind),
                fields.document.as_ref().map(TaxDocument::number),
                now_timestamp(),
                id,
            ],
            |row| Ok(parse_booking_row(row)),
        )
        .optional()?;

    result.transpose()
}

pub fn delete_booking(conn: &Connection, id: i64) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn now_timestamp() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let phone: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let time_str: Option<String> = row.get(4)?;
    let service: Option<String> = row.get(5)?;
    let email: Option<String> = row.get(6)?;
    let document_kind: Option<String> = row.get(7)?;
    let document_number: Option<String> = row.get(8)?;
    let created_at_str: String = row.get(9)?;
    let updated_at_str: String = row.get(10)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .with_context(|| format!("booking {id} has invalid date: {date_str}"))?;
    let time = time_str
        .map(|t| {
            NaiveTime::parse_from_str(&t, TIME_FORMAT)
                .with_context(|| format!("booking {id} has invalid time: {t}"))
        })
        .transpose()?;
    let document = match (document_kind, document_number) {
        (Some(kind), Some(number)) => TaxDocument::from_parts(&kind, number),
        _ => None,
    };
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .with_context(|| format!("booking {id} has invalid created_at: {created_at_str}"))?;
    let updated_at = NaiveDateTime::parse_from_str(&updated_at_str, TIMESTAMP_FORMAT)
        .with_context(|| format!("booking {id} has invalid updated_at: {updated_at_str}"))?;

    Ok(Booking {
        id,
        fields: BookingFields {
            name,
            phone,
            date,
            time,
            service,
            email,
            document,
        },
        created_at,
        updated_at,
    })
}
