//! Uniform `{data, responseCode, message}` response wrapper.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Response envelope shared by task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Operation payload; an empty string when there is none.
    pub data: T,
    /// HTTP status code, repeated in the body.
    #[serde(rename = "responseCode")]
    pub response_code: u16,
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Creates an envelope without a message.
    #[must_use]
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self {
            data,
            response_code: status.as_u16(),
            message: None,
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<String> {
    /// Creates an envelope carrying only a message.
    #[must_use]
    pub fn message_only(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, String::new()).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.response_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
