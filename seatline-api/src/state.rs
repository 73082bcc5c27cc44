use seatline_store::ReservationStore;

#[derive(Clone, Default)]
pub struct AppState {
    pub store: ReservationStore,
}

impl AppState {
    pub fn new(store: ReservationStore) -> Self {
        Self { store }
    }
}
