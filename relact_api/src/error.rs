//! API errors and the response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relact_control::command::CommandReply;
use relact_control::{ControlError, StatusSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request body is not a JSON object.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A required field is absent.
    #[error("missing '{0}' field")]
    MissingField(&'static str),

    /// A field has the wrong type.
    #[error("invalid '{field}': expected a number")]
    InvalidNumber {
        /// Offending field.
        field: &'static str,
    },

    /// The controller refused the command.
    #[error("{0}")]
    Control(#[from] ControlError),

    /// The blocking task running the command failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    ///
    /// - Body, field and caller errors: 400 Bad Request
    /// - Hardware faults, spawn and task failures: 500 Internal Server Error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::MissingField(_) | Self::InvalidNumber { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Control(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Control(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body returned by every `/api` route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request did what it asked.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Controller status after the request.
    pub status: StatusSnapshot,
}

/// Status code plus envelope.
#[derive(Debug)]
pub struct ApiReply {
    code: StatusCode,
    body: ApiResponse,
}

impl ApiReply {
    /// Successful reply.
    pub fn ok(message: impl Into<String>, status: StatusSnapshot) -> Self {
        Self {
            code: StatusCode::OK,
            body: ApiResponse {
                success: true,
                message: message.into(),
                status,
            },
        }
    }

    /// Failed reply; the code follows [`ApiError::status_code`].
    pub fn error(err: &ApiError, status: StatusSnapshot) -> Self {
        Self {
            code: err.status_code(),
            body: ApiResponse {
                success: false,
                message: err.to_string(),
                status,
            },
        }
    }

    /// HTTP status code of the reply.
    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl From<CommandReply> for ApiReply {
    fn from(reply: CommandReply) -> Self {
        let message = reply.message();
        match reply.result {
            Ok(_) => Self::ok(message, reply.status),
            Err(e) => Self::error(&ApiError::Control(e), reply.status),
        }
    }
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}
