use chrono::{DateTime, Utc};
use seatline_core::{ReservationError, ReservationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Seats in each section, numbered 1..=SEATS_PER_SECTION
pub const SEATS_PER_SECTION: usize = 10;

/// Flat fare charged for every ticket
pub const TICKET_PRICE: f64 = 20.0;

/// One of the two independent seating pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
}

impl Section {
    /// Scan order used when looking for the first free seat
    pub const ALL: [Section; 2] = [Section::A, Section::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(ReservationError::invalid_argument("Section cannot be empty")),
            "A" => Ok(Section::A),
            "B" => Ok(Section::B),
            other => Err(ReservationError::invalid_argument(format!(
                "Invalid section: {}",
                other
            ))),
        }
    }
}

/// A physical seat: section plus 1-based seat number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatCoordinate {
    pub section: Section,
    pub seat_number: u32,
}

impl SeatCoordinate {
    pub fn new(section: Section, seat_number: u32) -> ReservationResult<Self> {
        if seat_number < 1 || seat_number as usize > SEATS_PER_SECTION {
            return Err(ReservationError::invalid_argument(format!(
                "Invalid seat number {}. Must be between 1 and {}",
                seat_number, SEATS_PER_SECTION
            )));
        }
        Ok(Self { section, seat_number })
    }

    /// Bit index inside the section's occupancy vector
    pub(crate) fn index(&self) -> usize {
        self.seat_number as usize - 1
    }
}

/// Receipt tag, e.g. `A1`
impl fmt::Display for SeatCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.section, self.seat_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    pub(crate) fn validate(&self) -> ReservationResult<()> {
        if self.email.trim().is_empty()
            || self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
        {
            return Err(ReservationError::invalid_argument(
                "First name, last name, and email cannot be empty",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

impl Route {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Stored booking record, owned by the ledger and never handed out directly
#[derive(Debug, Clone)]
pub(crate) struct Booking {
    pub purchase_id: Uuid,
    pub route: Route,
    pub customer: Customer,
    pub price_paid: f64,
    pub seat: Option<SeatCoordinate>,
    pub purchased_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(route: Route, customer: Customer) -> Self {
        Self {
            purchase_id: Uuid::new_v4(),
            route,
            customer,
            price_paid: TICKET_PRICE,
            seat: None,
            purchased_at: Utc::now(),
        }
    }

    pub fn assign_seat(&mut self, seat: Option<SeatCoordinate>) {
        self.seat = seat;
    }

    pub fn receipt(&self) -> Receipt {
        Receipt {
            purchase_id: self.purchase_id,
            route: self.route.clone(),
            customer: self.customer.clone(),
            price_paid: self.price_paid,
            seat: self.seat,
            purchased_at: self.purchased_at,
        }
    }
}

/// Public view of a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub purchase_id: Uuid,
    pub route: Route,
    pub customer: Customer,
    pub price_paid: f64,
    pub seat: Option<SeatCoordinate>,
    pub purchased_at: DateTime<Utc>,
}

impl Receipt {
    /// Human-readable seat tag (`A1`), if a seat is assigned
    pub fn allocated_seat(&self) -> Option<String> {
        self.seat.map(|seat| seat.to_string())
    }
}

/// A customer seated in a given section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOccupant {
    pub customer: Customer,
    pub seat: SeatCoordinate,
}
