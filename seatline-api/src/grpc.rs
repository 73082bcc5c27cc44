//! gRPC surface of the ticket service.
//!
//! Messages are plain prost structs (standard protobuf wire format, package
//! `ticket`); the service trait, server and client are generated by `build.rs`.
//! A booking without a seat is encoded as `section = ""`, `seat_number = 0`.

use serde::Serialize;
use tonic::{Request, Response, Status};

use seatline_booking::{Customer, Receipt, Route, SectionOccupant};

use crate::error::status_from;
use crate::state::AppState;

pub const REMOVED_ACK: &str = "User removed successfully";
pub const MODIFIED_ACK: &str = "Seat modified successfully";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub first_name: String,
    #[prost(string, tag = "2")]
    pub last_name: String,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct PurchaseRequest {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(string, tag = "2")]
    pub to: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct PurchaseResponse {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(string, tag = "2")]
    pub to: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
    #[prost(double, tag = "4")]
    pub price_paid: f64,
    #[prost(string, tag = "5")]
    pub purchase_id: String,
    #[prost(string, tag = "6")]
    pub section: String,
    #[prost(int32, tag = "7")]
    pub seat_number: i32,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct AllocateSeatRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub section: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct AllocateSeatResponse {
    #[prost(string, tag = "1")]
    pub section: String,
    #[prost(int32, tag = "2")]
    pub seat_number: i32,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct ShowReceiptRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct ShowReceiptResponse {
    #[prost(message, optional, tag = "1")]
    pub purchase_response: Option<PurchaseResponse>,
    #[prost(string, tag = "2")]
    pub allocated_seat: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct GetUsersBySectionRequest {
    #[prost(string, tag = "1")]
    pub section: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct UserSeatInfo {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(string, tag = "2")]
    pub section: String,
    #[prost(int32, tag = "3")]
    pub seat_number: i32,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct GetUsersBySectionResponse {
    #[prost(message, repeated, tag = "1")]
    pub user_seat_info: Vec<UserSeatInfo>,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct RemoveUserRequest {
    #[prost(string, tag = "1")]
    pub email: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct RemoveUserResponse {
    #[prost(string, tag = "1")]
    pub res: String,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct ModifySeatRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub new_section: String,
    #[prost(int32, tag = "3")]
    pub new_seat_number: i32,
}

#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct ModifySeatResponse {
    #[prost(string, tag = "1")]
    pub res: String,
}

// ---------------------------------------------------------------------------
// Generated service trait + server/client
// ---------------------------------------------------------------------------

include!(concat!(env!("OUT_DIR"), "/ticket.TicketService.rs"));

pub use ticket_service_client::TicketServiceClient;
pub use ticket_service_server::{TicketService, TicketServiceServer};

// ---------------------------------------------------------------------------
// Domain <-> wire conversions
// ---------------------------------------------------------------------------

impl From<User> for Customer {
    fn from(user: User) -> Self {
        Customer::new(user.first_name, user.last_name, user.email)
    }
}

impl From<Customer> for User {
    fn from(customer: Customer) -> Self {
        Self {
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

impl From<Receipt> for PurchaseResponse {
    fn from(receipt: Receipt) -> Self {
        let (section, seat_number) = match receipt.seat {
            Some(seat) => (seat.section.to_string(), seat.seat_number as i32),
            None => (String::new(), 0),
        };

        Self {
            from: receipt.route.from,
            to: receipt.route.to,
            user: Some(receipt.customer.into()),
            price_paid: receipt.price_paid,
            purchase_id: receipt.purchase_id.to_string(),
            section,
            seat_number,
        }
    }
}

impl From<SectionOccupant> for UserSeatInfo {
    fn from(occupant: SectionOccupant) -> Self {
        Self {
            user: Some(occupant.customer.into()),
            section: occupant.seat.section.to_string(),
            seat_number: occupant.seat.seat_number as i32,
        }
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Decodes each RPC, runs the matching store operation and encodes the result.
pub struct TicketServiceHandler {
    state: AppState,
}

impl TicketServiceHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl TicketService for TicketServiceHandler {
    async fn purchase_ticket(
        &self,
        request: Request<PurchaseRequest>,
    ) -> Result<Response<PurchaseResponse>, Status> {
        let req = request.into_inner();
        let customer: Customer = req.user.unwrap_or_default().into();

        let receipt = self
            .state
            .store
            .purchase(Route::new(req.from, req.to), customer)
            .await
            .map_err(status_from)?;

        Ok(Response::new(receipt.into()))
    }

    async fn allocate_seat(
        &self,
        request: Request<AllocateSeatRequest>,
    ) -> Result<Response<AllocateSeatResponse>, Status> {
        let req = request.into_inner();

        let seat = self
            .state
            .store
            .allocate_seat(&req.email, &req.section)
            .await
            .map_err(status_from)?;

        Ok(Response::new(AllocateSeatResponse {
            section: seat.section.to_string(),
            seat_number: seat.seat_number as i32,
        }))
    }

    async fn show_receipt(
        &self,
        request: Request<ShowReceiptRequest>,
    ) -> Result<Response<ShowReceiptResponse>, Status> {
        let req = request.into_inner();

        let receipt = self
            .state
            .store
            .show_receipt(&req.email)
            .await
            .map_err(status_from)?;
        let allocated_seat = receipt.allocated_seat().unwrap_or_default();

        Ok(Response::new(ShowReceiptResponse {
            purchase_response: Some(receipt.into()),
            allocated_seat,
        }))
    }

    async fn get_users_by_section(
        &self,
        request: Request<GetUsersBySectionRequest>,
    ) -> Result<Response<GetUsersBySectionResponse>, Status> {
        let req = request.into_inner();

        let occupants = self
            .state
            .store
            .list_by_section(&req.section)
            .await
            .map_err(status_from)?;

        Ok(Response::new(GetUsersBySectionResponse {
            user_seat_info: occupants.into_iter().map(UserSeatInfo::from).collect(),
        }))
    }

    async fn remove_user(
        &self,
        request: Request<RemoveUserRequest>,
    ) -> Result<Response<RemoveUserResponse>, Status> {
        let req = request.into_inner();

        self.state
            .store
            .remove(&req.email)
            .await
            .map_err(status_from)?;

        Ok(Response::new(RemoveUserResponse {
            res: REMOVED_ACK.to_string(),
        }))
    }

    async fn modify_seat(
        &self,
        request: Request<ModifySeatRequest>,
    ) -> Result<Response<ModifySeatResponse>, Status> {
        let req = request.into_inner();
        // Negative numbers fold to 0, which the store rejects as out of range
        let seat_number = u32::try_from(req.new_seat_number).unwrap_or(0);

        self.state
            .store
            .modify_seat(&req.email, &req.new_section, seat_number)
            .await
            .map_err(status_from)?;

        Ok(Response::new(ModifySeatResponse {
            res: MODIFIED_ACK.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatline_store::ReservationStore;
    use tonic::Code;

    fn handler() -> TicketServiceHandler {
        TicketServiceHandler::new(AppState::new(ReservationStore::new()))
    }

    fn purchase_request(email: &str) -> Request<PurchaseRequest> {
        Request::new(PurchaseRequest {
            from: "London".into(),
            to: "France".into(),
            user: Some(User {
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: email.into(),
            }),
        })
    }

    #[tokio::test]
    async fn test_purchase_encodes_unassigned_seat() {
        let handler = handler();
        let resp = handler
            .purchase_ticket(purchase_request("john@x.com"))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(resp.price_paid, 20.0);
        assert_eq!(resp.section, "");
        assert_eq!(resp.seat_number, 0);
        assert_eq!(resp.user.unwrap().email, "john@x.com");
        assert!(uuid::Uuid::parse_str(&resp.purchase_id).is_ok());
    }

    #[tokio::test]
    async fn test_missing_user_is_invalid_argument() {
        let handler = handler();
        let status = handler
            .purchase_ticket(Request::new(PurchaseRequest {
                from: "London".into(),
                to: "France".into(),
                user: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_negative_seat_number_is_invalid_argument() {
        let handler = handler();
        handler
            .purchase_ticket(purchase_request("john@x.com"))
            .await
            .unwrap();
        handler
            .allocate_seat(Request::new(AllocateSeatRequest {
                email: "john@x.com".into(),
                section: "A".into(),
            }))
            .await
            .unwrap();

        let status = handler
            .modify_seat(Request::new(ModifySeatRequest {
                email: "john@x.com".into(),
                new_section: "B".into(),
                new_seat_number: -3,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }
}
