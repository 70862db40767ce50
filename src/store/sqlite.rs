use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{Booking, BookingFields};

use super::BookingStore;

pub struct SqliteBookingStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBookingStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection mutex poisoned"))
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    async fn insert(&self, fields: BookingFields) -> anyhow::Result<Booking> {
        let db = self.lock()?;
        queries::create_booking(&db, &fields)
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        let db = self.lock()?;
        queries::list_bookings(&db)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Booking>> {
        let db = self.lock()?;
        queries::get_booking_by_id(&db, id)
    }

    async fn update(&self, id: i64, fields: BookingFields) -> anyhow::Result<Option<Booking>> {
        let db = self.lock()?;
        queries::update_booking(&db, id, &fields)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let db = self.lock()?;
        queries::delete_booking(&db, id)
    }
}
