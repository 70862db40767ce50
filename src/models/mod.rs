pub mod booking;

pub use booking::{Booking, BookingFields, TaxDocument};
