//! Shared reservation store used by the transport layer.

use std::sync::Arc;

use seatline_booking::{
    BookingLedger, Customer, Receipt, Route, SeatCoordinate, Section, SectionOccupant,
};
use seatline_core::ReservationResult;
use seatline_shared::Masked;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Clonable handle over the booking ledger.
///
/// Every operation takes the one ledger lock and holds it from the existence
/// check through the last seat-bit mutation, so concurrent callers are fully
/// serialised against each other.
#[derive(Debug, Clone, Default)]
pub struct ReservationStore {
    ledger: Arc<Mutex<BookingLedger>>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn purchase(&self, route: Route, customer: Customer) -> ReservationResult<Receipt> {
        let mut ledger = self.ledger.lock().await;
        let receipt = ledger.purchase(route, customer)?;

        info!(
            purchase_id = %receipt.purchase_id,
            email = %Masked(receipt.customer.email.as_str()),
            from = %receipt.route.from,
            to = %receipt.route.to,
            bookings = ledger.len(),
            "Ticket purchased"
        );
        Ok(receipt)
    }

    pub async fn allocate_seat(&self, email: &str, section: &str) -> ReservationResult<SeatCoordinate> {
        let mut ledger = self.ledger.lock().await;
        let seat = ledger.allocate_seat(email, section)?;

        info!(email = %Masked(email), seat = %seat, "Seat allocated");
        Ok(seat)
    }

    pub async fn show_receipt(&self, email: &str) -> ReservationResult<Receipt> {
        let ledger = self.ledger.lock().await;
        ledger.show_receipt(email)
    }

    pub async fn list_by_section(&self, section: &str) -> ReservationResult<Vec<SectionOccupant>> {
        let ledger = self.ledger.lock().await;
        let occupants = ledger.list_by_section(section)?;

        debug!(section = %section, count = occupants.len(), "Listed section occupants");
        Ok(occupants)
    }

    pub async fn remove(&self, email: &str) -> ReservationResult<Receipt> {
        let mut ledger = self.ledger.lock().await;
        let receipt = ledger.remove(email)?;

        info!(
            purchase_id = %receipt.purchase_id,
            email = %Masked(email),
            freed_seat = ?receipt.allocated_seat(),
            bookings = ledger.len(),
            "Booking removed"
        );
        Ok(receipt)
    }

    pub async fn modify_seat(
        &self,
        email: &str,
        section: &str,
        seat_number: u32,
    ) -> ReservationResult<SeatCoordinate> {
        let mut ledger = self.ledger.lock().await;
        let seat = ledger.modify_seat(email, section, seat_number)?;

        info!(email = %Masked(email), seat = %seat, "Seat modified");
        Ok(seat)
    }

    /// Occupied seat numbers in `section`
    pub async fn occupancy(&self, section: Section) -> Vec<u32> {
        self.ledger.lock().await.occupancy(section)
    }

    pub async fn verify_consistency(&self) -> ReservationResult<()> {
        self.ledger.lock().await.verify_consistency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatline_booking::SEATS_PER_SECTION;
    use seatline_core::ErrorKind;
    use std::collections::HashSet;

    fn customer(email: &str) -> Customer {
        Customer::new("Jane", "Roe", email)
    }

    fn route() -> Route {
        Route::new("London", "France")
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let store = ReservationStore::new();

        let receipt = store.purchase(route(), customer("a@x.com")).await.unwrap();
        assert!(receipt.seat.is_none());

        let seat = store.allocate_seat("a@x.com", "A").await.unwrap();
        assert_eq!(seat.to_string(), "A1");

        let receipt = store.show_receipt("a@x.com").await.unwrap();
        assert_eq!(receipt.allocated_seat().as_deref(), Some("A1"));

        store.modify_seat("a@x.com", "B", 5).await.unwrap();
        assert!(store.occupancy(Section::A).await.is_empty());
        assert_eq!(store.occupancy(Section::B).await, vec![5]);

        store.remove("a@x.com").await.unwrap();
        assert!(store.occupancy(Section::B).await.is_empty());

        let err = store.show_receipt("a@x.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_race_for_last_seat() {
        let store = ReservationStore::new();
        for n in 0..SEATS_PER_SECTION - 1 {
            let email = format!("early{}@x.com", n);
            store.purchase(route(), customer(&email)).await.unwrap();
            store.allocate_seat(&email, "A").await.unwrap();
        }
        store.purchase(route(), customer("left@x.com")).await.unwrap();
        store.purchase(route(), customer("right@x.com")).await.unwrap();

        let handles: Vec<_> = ["left@x.com", "right@x.com"]
            .into_iter()
            .map(|email| {
                let store = store.clone();
                tokio::spawn(async move { store.allocate_seat(email, "A").await })
            })
            .collect();

        let mut granted = 0;
        let mut exhausted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(seat) => {
                    assert_eq!(seat.seat_number, SEATS_PER_SECTION as u32);
                    granted += 1;
                }
                Err(err) => {
                    assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
                    exhausted += 1;
                }
            }
        }

        assert_eq!((granted, exhausted), (1, 1));
        store.verify_consistency().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocations_never_share_a_seat() {
        let store = ReservationStore::new();
        let handles: Vec<_> = (0..30)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    let email = format!("rider{}@x.com", n);
                    store.purchase(route(), customer(&email)).await?;
                    store.allocate_seat(&email, "B").await
                })
            })
            .collect();

        let mut seats = HashSet::new();
        let mut exhausted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(seat) => assert!(seats.insert(seat), "seat {} handed out twice", seat),
                Err(err) => {
                    assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
                    exhausted += 1;
                }
            }
        }

        assert_eq!(seats.len(), SEATS_PER_SECTION);
        assert_eq!(exhausted, 30 - SEATS_PER_SECTION);
        store.verify_consistency().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_purchase() {
        let store = ReservationStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.purchase(route(), customer("same@x.com")).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(err) => assert_eq!(err.kind(), ErrorKind::AlreadyExists),
            }
        }
        assert_eq!(ok, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_moves_to_same_seat() {
        let store = ReservationStore::new();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            store.purchase(route(), customer(email)).await.unwrap();
            store.allocate_seat(email, "A").await.unwrap();
        }

        let handles: Vec<_> = ["a@x.com", "b@x.com", "c@x.com"]
            .into_iter()
            .map(|email| {
                let store = store.clone();
                tokio::spawn(async move { store.modify_seat(email, "B", 7).await })
            })
            .collect();

        let mut moved = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                moved += 1;
            }
        }

        assert_eq!(moved, 1);
        assert_eq!(store.occupancy(Section::B).await, vec![7]);
        assert_eq!(store.occupancy(Section::A).await.len(), 2);
        store.verify_consistency().await.unwrap();
    }
}
