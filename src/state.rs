use crate::store::BookingStore;

pub struct AppState {
    pub store: Box<dyn BookingStore>,
}
