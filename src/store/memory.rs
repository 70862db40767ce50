use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Booking, BookingFields};

use super::BookingStore;

/// Process-local store for tests and demo runs. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryBookingStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    bookings: Vec<Booking>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("booking store mutex poisoned"))
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, fields: BookingFields) -> anyhow::Result<Booking> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let now = Utc::now().naive_utc();
        let booking = Booking {
            id: inner.last_id,
            fields,
            created_at: now,
            updated_at: now,
        };
        inner.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        let inner = self.lock()?;
        // Inserts append with increasing ids, so reversing yields id DESC.
        Ok(inner.bookings.iter().rev().cloned().collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Booking>> {
        let inner = self.lock()?;
        Ok(inner.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: i64, fields: BookingFields) -> anyhow::Result<Option<Booking>> {
        let mut inner = self.lock()?;
        let Some(booking) = inner.bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.fields = fields;
        booking.updated_at = Utc::now().naive_utc();
        Ok(Some(booking.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut inner = self.lock()?;
        let before = inner.bookings.len();
        inner.bookings.retain(|b| b.id != id);
        Ok(inner.bookings.len() < before)
    }
}
