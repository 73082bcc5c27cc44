use crate::models::{SeatCoordinate, Section, SEATS_PER_SECTION};
use seatline_core::{ReservationError, ReservationResult};

/// Occupancy bitmaps for both sections.
///
/// `occupy` and `release` refuse to flip a bit that is already in the target
/// state: either case means a booking and the chart disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatingChart {
    section_a: [bool; SEATS_PER_SECTION],
    section_b: [bool; SEATS_PER_SECTION],
}

impl SeatingChart {
    pub fn new() -> Self {
        Self::default()
    }

    fn seats(&self, section: Section) -> &[bool; SEATS_PER_SECTION] {
        match section {
            Section::A => &self.section_a,
            Section::B => &self.section_b,
        }
    }

    fn seats_mut(&mut self, section: Section) -> &mut [bool; SEATS_PER_SECTION] {
        match section {
            Section::A => &mut self.section_a,
            Section::B => &mut self.section_b,
        }
    }

    /// Lowest free seat number in the section
    pub fn first_free(&self, section: Section) -> Option<SeatCoordinate> {
        self.seats(section)
            .iter()
            .position(|occupied| !occupied)
            .map(|index| SeatCoordinate {
                section,
                seat_number: index as u32 + 1,
            })
    }

    pub fn is_occupied(&self, seat: SeatCoordinate) -> bool {
        self.seats(seat.section)[seat.index()]
    }

    pub fn occupy(&mut self, seat: SeatCoordinate) -> ReservationResult<()> {
        let bit = &mut self.seats_mut(seat.section)[seat.index()];
        if *bit {
            return Err(ReservationError::internal(format!(
                "Seat {} is already marked occupied",
                seat
            )));
        }
        *bit = true;
        Ok(())
    }

    pub fn release(&mut self, seat: SeatCoordinate) -> ReservationResult<()> {
        let bit = &mut self.seats_mut(seat.section)[seat.index()];
        if !*bit {
            return Err(ReservationError::internal(format!(
                "Seat {} is not marked occupied",
                seat
            )));
        }
        *bit = false;
        Ok(())
    }

    /// Occupied seat numbers in increasing order
    pub fn occupied_seats(&self, section: Section) -> Vec<u32> {
        self.seats(section)
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(index, _)| index as u32 + 1)
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        Section::ALL
            .iter()
            .map(|section| self.seats(*section).iter().filter(|occupied| **occupied).count())
            .sum()
    }
}
