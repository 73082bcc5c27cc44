pub mod app_config;
pub mod reservation_store;

pub use reservation_store::ReservationStore;
