use seatline_core::{ErrorKind, ReservationError};
use tonic::{Code, Status};

/// Map a store error onto the gRPC status the caller receives.
///
/// Internal errors signal a broken invariant: the detail is logged and the
/// caller only sees a generic message.
pub fn status_from(err: ReservationError) -> Status {
    let code = match err.kind() {
        ErrorKind::InvalidArgument => Code::InvalidArgument,
        ErrorKind::AlreadyExists => Code::AlreadyExists,
        ErrorKind::NotFound => Code::NotFound,
        ErrorKind::FailedPrecondition => Code::FailedPrecondition,
        ErrorKind::ResourceExhausted => Code::ResourceExhausted,
        ErrorKind::Internal => {
            tracing::error!("Reservation invariant violated: {}", err.message());
            return Status::internal("Internal error");
        }
    };

    tracing::debug!(kind = %err.kind(), "Request rejected: {}", err.message());
    Status::new(code, err.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_map_to_grpc_codes() {
        let cases = [
            (ReservationError::invalid_argument("bad"), Code::InvalidArgument),
            (ReservationError::already_exists("dup"), Code::AlreadyExists),
            (ReservationError::not_found("gone"), Code::NotFound),
            (ReservationError::failed_precondition("seat"), Code::FailedPrecondition),
            (ReservationError::resource_exhausted("full"), Code::ResourceExhausted),
        ];

        for (err, code) in cases {
            let message = err.message().to_string();
            let status = status_from(err);
            assert_eq!(status.code(), code);
            assert_eq!(status.message(), message);
        }
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let status = status_from(ReservationError::internal("seat A3 bit clear"));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "Internal error");
    }
}
