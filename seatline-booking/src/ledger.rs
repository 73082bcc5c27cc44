use crate::models::{
    Booking, Customer, Receipt, Route, SeatCoordinate, Section, SectionOccupant,
};
use crate::seating::SeatingChart;
use seatline_core::{ReservationError, ReservationResult};
use std::collections::HashMap;

/// Bookings keyed by customer email together with the seats they hold.
///
/// Every method validates all of its input and checks every precondition
/// before the first mutation, so a failed call leaves the ledger untouched.
/// The ledger itself is not synchronised; share it behind a single lock.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: HashMap<String, Booking>,
    chart: SeatingChart,
}

fn require_email(email: &str) -> ReservationResult<&str> {
    if email.trim().is_empty() {
        return Err(ReservationError::invalid_argument("Email cannot be empty"));
    }
    Ok(email)
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a booking without a seat: unpurchased → purchased
    pub fn purchase(&mut self, route: Route, customer: Customer) -> ReservationResult<Receipt> {
        customer.validate()?;

        if self.bookings.contains_key(&customer.email) {
            return Err(ReservationError::already_exists(
                "Ticket already purchased for the provided email",
            ));
        }

        let booking = Booking::new(route, customer);
        let receipt = booking.receipt();
        self.bookings.insert(booking.customer.email.clone(), booking);

        Ok(receipt)
    }

    /// Seat a purchased booking in the first free seat of `section`:
    /// purchased → seated
    pub fn allocate_seat(&mut self, email: &str, section: &str) -> ReservationResult<SeatCoordinate> {
        let email = require_email(email)?;
        let section: Section = section.parse()?;

        let booking = self
            .bookings
            .get_mut(email)
            .ok_or_else(|| ReservationError::not_found("Purchase not found for the provided email"))?;

        if let Some(seat) = booking.seat {
            return Err(ReservationError::failed_precondition(format!(
                "Seat {} already allocated; use ModifySeat to change it",
                seat
            )));
        }

        let seat = self.chart.first_free(section).ok_or_else(|| {
            ReservationError::resource_exhausted(format!(
                "No seats available in section {}",
                section
            ))
        })?;

        self.chart.occupy(seat)?;
        booking.assign_seat(Some(seat));

        Ok(seat)
    }

    pub fn show_receipt(&self, email: &str) -> ReservationResult<Receipt> {
        let email = require_email(email)?;

        let booking = self
            .bookings
            .get(email)
            .ok_or_else(|| ReservationError::not_found("Purchase not found for the provided email"))?;

        if booking.seat.is_none() {
            return Err(ReservationError::failed_precondition(
                "No seat allocated yet for the provided email",
            ));
        }

        Ok(booking.receipt())
    }

    /// Customers seated in `section`, ordered by seat number. A section other
    /// than `A` or `B` has no occupants.
    pub fn list_by_section(&self, section: &str) -> ReservationResult<Vec<SectionOccupant>> {
        if section.is_empty() {
            return Err(ReservationError::invalid_argument("Section cannot be empty"));
        }
        let section: Section = match section.parse() {
            Ok(section) => section,
            Err(_) => return Ok(Vec::new()),
        };

        let mut occupants: Vec<SectionOccupant> = self
            .bookings
            .values()
            .filter_map(|booking| match booking.seat {
                Some(seat) if seat.section == section => Some(SectionOccupant {
                    customer: booking.customer.clone(),
                    seat,
                }),
                _ => None,
            })
            .collect();
        occupants.sort_by_key(|occupant| occupant.seat.seat_number);

        Ok(occupants)
    }

    /// Delete a booking and free its seat. Returns the final receipt.
    pub fn remove(&mut self, email: &str) -> ReservationResult<Receipt> {
        let email = require_email(email)?;

        let booking = self
            .bookings
            .remove(email)
            .ok_or_else(|| ReservationError::not_found("User removed or not present"))?;

        if let Some(seat) = booking.seat {
            if let Err(err) = self.chart.release(seat) {
                self.bookings.insert(booking.customer.email.clone(), booking);
                return Err(err);
            }
        }

        Ok(booking.receipt())
    }

    /// Move a seated booking to a specific seat: seated → seated'.
    ///
    /// Moving to the seat the booking already holds succeeds without change.
    pub fn modify_seat(
        &mut self,
        email: &str,
        section: &str,
        seat_number: u32,
    ) -> ReservationResult<SeatCoordinate> {
        let email = require_email(email)?;
        let section: Section = section.parse()?;
        let target = SeatCoordinate::new(section, seat_number)?;

        let booking = self
            .bookings
            .get_mut(email)
            .ok_or_else(|| ReservationError::not_found("No purchase found for the provided email"))?;

        let current = booking.seat.ok_or_else(|| {
            ReservationError::failed_precondition("No seat allocated yet; use AllocateSeat first")
        })?;

        if !self.chart.is_occupied(current) {
            return Err(ReservationError::internal(format!(
                "Booking holds seat {} but the seat is not marked occupied",
                current
            )));
        }

        if current == target {
            return Ok(target);
        }

        if self.chart.is_occupied(target) {
            return Err(ReservationError::resource_exhausted(
                "Requested seat is not available in the specified section",
            ));
        }

        self.chart.release(current)?;
        self.chart.occupy(target)?;
        booking.assign_seat(Some(target));

        Ok(target)
    }

    /// Occupied seat numbers in `section`
    pub fn occupancy(&self, section: Section) -> Vec<u32> {
        self.chart.occupied_seats(section)
    }

    /// Check that the chart holds exactly the seats referenced by bookings
    pub fn verify_consistency(&self) -> ReservationResult<()> {
        let mut expected = SeatingChart::new();
        for booking in self.bookings.values() {
            if let Some(seat) = booking.seat {
                expected.occupy(seat).map_err(|_| {
                    ReservationError::internal(format!("Seat {} is held by two bookings", seat))
                })?;
            }
        }

        if expected != self.chart {
            return Err(ReservationError::internal(
                "Seating chart disagrees with the active bookings",
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
