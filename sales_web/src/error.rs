//! Request-boundary error handling.
//!
//! Data and fitting problems are handled inside the handlers (flash
//! message plus redirect, or an inline message on the prediction page);
//! only session-store failures and other internal faults surface here.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

#[derive(Debug)]
pub enum WebError {
    Session(tower_sessions::session::Error),
}

/// Result type for request handlers
pub type Result<T> = std::result::Result<T, WebError>;

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        WebError::Session(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let WebError::Session(err) = self;
        error!("session error: {}", err);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(crate::views::error_page("Something went wrong. Please try again.")),
        )
            .into_response()
    }
}
