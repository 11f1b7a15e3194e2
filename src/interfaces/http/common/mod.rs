//! Common HTTP API types: the response envelope and error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API response wrapper
///
/// Every REST endpoint returns data in this envelope.
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "...", "error_code": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload; `null` on error
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable machine-readable error code; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_code: None,
        }
    }

    pub fn error_with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_code: Some(code.to_string()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Domain error carried across the handler boundary.
///
/// Handlers return `Result<_, ApiError>` and use `?`; the status code
/// and `error_code` mapping lives in one place here.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_)
            | DomainError::StationClosed(_)
            | DomainError::NoCapacity { .. }
            | DomainError::AlreadyPaid(_)
            | DomainError::AlreadyTerminal { .. } => StatusCode::CONFLICT,
            DomainError::Expired(_)
            | DomainError::Mismatch(_)
            | DomainError::WeakSecret(_)
            | DomainError::NotVerified(_)
            | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage details stay in the log, not on the wire
        let message = if matches!(self.0, DomainError::Storage(_)) {
            tracing::error!(error = %self.0, "Internal error");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        let body = ApiResponse::<EmptyData>::error_with_code(message, self.0.code());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::success(42);
        assert!(ok.success);
        assert_eq!(ok.data, Some(42));
        assert!(ok.error.is_none());

        let err = ApiResponse::<()>::error_with_code("boom", "conflict");
        assert!(!err.success);
        assert_eq!(err.error_code.as_deref(), Some("conflict"));
    }

    #[test]
    fn error_status_mapping() {
        let cases = [
            (
                DomainError::NotFound {
                    entity: "Station",
                    field: "id",
                    value: "1".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::NoCapacity {
                    station_id: 1,
                    requested: 1,
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::StationClosed(1), StatusCode::CONFLICT),
            (DomainError::AlreadyPaid(1), StatusCode::CONFLICT),
            (DomainError::Expired("otp".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::Mismatch("code".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::NotVerified("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Unauthorized("x".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Storage("db".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError(error).status(), expected);
        }
    }
}
