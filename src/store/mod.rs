pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{Booking, BookingFields};

pub use memory::MemoryBookingStore;
pub use sqlite::SqliteBookingStore;

/// Persistence for bookings. Ids are assigned by the store, increase with
/// each insert and are never handed out twice, even after a delete.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, fields: BookingFields) -> anyhow::Result<Booking>;

    /// All bookings, newest (highest id) first.
    async fn list(&self) -> anyhow::Result<Vec<Booking>>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Booking>>;

    /// Full replace of the mutable fields. `None` if `id` does not exist.
    async fn update(&self, id: i64, fields: BookingFields) -> anyhow::Result<Option<Booking>>;

    /// `false` if `id` does not exist.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
