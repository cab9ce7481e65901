//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use dbc_domain::error::DbcError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failures surfaced by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be decoded into the expected payload.
    Payload(serde_json::Error),
    /// The request body was not declared as JSON.
    UnsupportedMediaType,
    /// An application service failed.
    Service(DbcError),
}

impl From<DbcError> for ApiError {
    fn from(err: DbcError) -> Self {
        Self::Service(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Payload(err) => {
                tracing::debug!(error = %err, "rejected request body");
                (StatusCode::BAD_REQUEST, format!("invalid request body: {err}"))
            }
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected an application/json request body".to_string(),
            ),
            Self::Service(DbcError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unreachable;

    impl std::fmt::Display for Unreachable {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("datastore unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    #[test]
    fn should_map_storage_error_to_internal_server_error() {
        let response = ApiError::from(DbcError::Storage(Box::new(Unreachable))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_map_unsupported_media_type_to_415() {
        let response = ApiError::UnsupportedMediaType.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn should_map_payload_error_to_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
