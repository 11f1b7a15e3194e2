//! Domain errors
//!
//! Business-rule failures are expected outcomes and are returned as
//! typed variants; only `Storage` represents an infrastructure fault.

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Duplicate registration or already-activated account
    #[error("Conflict: {0}")]
    Conflict(String),

    /// One-time code past its expiry
    #[error("Code expired: {0}")]
    Expired(String),

    /// Wrong one-time code or wrong credentials
    #[error("Mismatch: {0}")]
    Mismatch(String),

    #[error("Weak secret: {0}")]
    WeakSecret(String),

    /// Operation requires a verified account
    #[error("Not verified: {0}")]
    NotVerified(String),

    #[error("Station {0} is outside its operating hours")]
    StationClosed(i32),

    #[error("Station {station_id} has no capacity for {requested} slot(s)")]
    NoCapacity { station_id: i32, requested: i32 },

    #[error("Booking {0} is already paid")]
    AlreadyPaid(i32),

    #[error("Booking {booking_id} is already {status}")]
    AlreadyTerminal { booking_id: i32, status: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation: {0}")]
    Validation(String),

    /// Storage or transport failure; the operation may be retried
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Expired(_) => "expired",
            Self::Mismatch(_) => "mismatch",
            Self::WeakSecret(_) => "weak_secret",
            Self::NotVerified(_) => "not_verified",
            Self::StationClosed(_) => "station_closed",
            Self::NoCapacity { .. } => "no_capacity",
            Self::AlreadyPaid(_) => "already_paid",
            Self::AlreadyTerminal { .. } => "already_terminal",
            Self::Unauthorized(_) => "unauthorized",
            Self::Validation(_) => "validation",
            Self::Storage(_) => "internal",
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let e = DomainError::NoCapacity {
            station_id: 7,
            requested: 1,
        };
        assert_eq!(e.code(), "no_capacity");
        assert_eq!(DomainError::Expired("otp".into()).code(), "expired");
        assert_eq!(DomainError::Storage("boom".into()).code(), "internal");
    }

    #[test]
    fn only_storage_is_transient() {
        assert!(DomainError::Storage("lost connection".into()).is_transient());
        assert!(!DomainError::Conflict("dup".into()).is_transient());
    }
}
