//! Error type for the HTML page handlers.
//!
//! Renders a short message with a link back to the home page. Internal
//! failures are logged and replaced by a generic message.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use digidash_service::ServiceError;

use crate::pages::message_page;

const UNAVAILABLE_MESSAGE: &str = "The database is busy. Please try again in a moment.";
const INTERNAL_MESSAGE: &str = "Something went wrong while preparing this page. Please try again later.";

#[derive(Debug)]
pub enum PageError {
    /// 400: required input missing or unusable.
    BadRequest(String),
    /// 404: the lookup matched no rows.
    NotFound(String),
    /// 503: the database is locked or the pool is exhausted.
    Unavailable,
    /// 500: storage, chart or task failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl PageError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
            Self::Unavailable => UNAVAILABLE_MESSAGE.to_owned(),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "page rendering failed");
                INTERNAL_MESSAGE.to_owned()
            },
        };
        (status, Html(message_page(&message))).into_response()
    }
}

impl From<ServiceError> for PageError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingInput(msg) => Self::BadRequest(msg.to_owned()),
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg.to_owned()),
            ServiceError::Storage(ref e) if e.is_transient() => {
                tracing::warn!(error = %e, "transient storage failure");
                Self::Unavailable
            },
            ServiceError::Storage(_) | ServiceError::Chart(_) => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let err = PageError::from(ServiceError::MissingInput("need code"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = PageError::from(ServiceError::NotFound("nothing"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = PageError::from(ServiceError::InvalidInput("bad year".to_owned()));
        assert!(matches!(err, PageError::BadRequest(ref m) if m == "bad year"));
    }
}
