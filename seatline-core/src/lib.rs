pub mod error;

pub use error::{ErrorKind, ReservationError};

pub type ReservationResult<T> = Result<T, ReservationError>;
