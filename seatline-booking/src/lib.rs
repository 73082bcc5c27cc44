pub mod models;
pub mod seating;
pub mod ledger;

pub use models::{
    Customer, Receipt, Route, SeatCoordinate, Section, SectionOccupant, SEATS_PER_SECTION,
    TICKET_PRICE,
};
pub use seating::SeatingChart;
pub use ledger::BookingLedger;
