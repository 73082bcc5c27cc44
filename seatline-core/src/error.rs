use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure categories a reservation operation can report.
///
/// The set is closed: the transport layer maps each kind onto exactly one
/// wire-level status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    FailedPrecondition,
    ResourceExhausted,
    /// A broken store invariant. Never a normal user-facing outcome.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("Invalid request: {0}")]
    InvalidArgument(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed precondition: {0}")]
    FailedPrecondition(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReservationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::FailedPrecondition(message.into())
    }

    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::ResourceExhausted(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::FailedPrecondition(_) => ErrorKind::FailedPrecondition,
            Self::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument(msg)
            | Self::AlreadyExists(msg)
            | Self::NotFound(msg)
            | Self::FailedPrecondition(msg)
            | Self::ResourceExhausted(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ReservationError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(
            ReservationError::resource_exhausted("full").kind(),
            ErrorKind::ResourceExhausted
        );
        assert_eq!(ReservationError::internal("bit").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_display_and_message() {
        let err = ReservationError::already_exists("Ticket already purchased for a@x.com");
        assert_eq!(err.to_string(), "Already exists: Ticket already purchased for a@x.com");
        assert_eq!(err.message(), "Ticket already purchased for a@x.com");
        assert_eq!(err.kind().to_string(), "ALREADY_EXISTS");
    }
}
