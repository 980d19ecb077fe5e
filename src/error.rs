//! Portal error types with HTTP status code mapping.
//!
//! [`PortalError`] is the central server-side error type. Each variant maps
//! to a specific HTTP status code and a `{"msg": ...}` JSON body — the shape
//! the admin tooling surfaces verbatim to the operator.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// JSON error body returned on every non-2xx response.
///
/// ```json
/// { "msg": "check-in scan type cannot be deleted" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MsgBody {
    /// Human-readable message surfaced to the operator.
    pub msg: String,
}

impl MsgBody {
    /// Creates a message body from any displayable value.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Server-side error enum with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or unrecognized bearer token.
    #[error("invalid or missing bearer token")]
    Unauthorized,

    /// Token is valid but lacks the required permission.
    #[error("you do not have the required permission to use this functionality")]
    Forbidden,

    /// Referenced resource does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PortalError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = axum::Json(MsgBody::new(self.to_string())).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(
            PortalError::InvalidRequest(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PortalError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(PortalError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            PortalError::NotFound("scan type".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PortalError::Internal(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn msg_body_round_trip() {
        let body = MsgBody::new("scan type already exists");
        let json = serde_json::to_string(&body).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"msg\""));
        let parsed: Option<MsgBody> = serde_json::from_str(&json).ok();
        let Some(parsed) = parsed else {
            panic!("deserialization failed");
        };
        assert_eq!(parsed.msg, "scan type already exists");
    }
}
