//! Errors returned by HTTP handlers.
//!
//! Every variant renders as `{"error": "<message>"}` with the matching status code.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

/// Errors surfaced to API clients.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum HTTPError {
    /// No valid session, or the session lacks the required role.
    #[display(fmt = "Unauthorized")]
    Unauthorized,
    /// The addressed record does not exist.
    #[display(fmt = "{}", _0)]
    NotFound(String),
    /// The request payload was rejected before reaching the store.
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    /// The store failed. The cause is logged, not returned.
    #[display(fmt = "{}", _0)]
    InternalServerError(String),
}

/// JSON body of an error response.
#[derive(Serialize, Debug)]
struct ErrorBody<'msg> {
    /// Human readable message.
    error: &'msg str,
}

impl ResponseError for HTTPError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &message })
    }
}
