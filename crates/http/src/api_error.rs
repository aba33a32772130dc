//! Typed API error for the JSON handlers.
//!
//! Converts service errors into HTTP responses with a JSON body and status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use digidash_service::ServiceError;

const UNAVAILABLE_MESSAGE: &str = "database is busy, retry later";

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: nothing matched.
    NotFound(String),
    /// 503 Service Unavailable: database busy. Details logged, not exposed.
    ServiceUnavailable,
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE.to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingInput(msg) => Self::BadRequest(msg.to_owned()),
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg.to_owned()),
            ServiceError::Storage(ref e) if e.is_transient() => {
                tracing::warn!(error = %e, "transient storage failure");
                Self::ServiceUnavailable
            },
            ServiceError::Storage(_) | ServiceError::Chart(_) => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use digidash_storage::StorageError;

    #[tokio::test]
    async fn busy_database_hides_error_text() {
        let busy = StorageError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked by writer pid 4242".to_owned()),
        ));

        let response = ApiError::from(ServiceError::Storage(busy)).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn missing_input_is_bad_request() {
        let response = ApiError::from(ServiceError::MissingInput("need code")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
