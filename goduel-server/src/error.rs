use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use goduel_engine::{EntryError, GoError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.status_and_message().into_response()
    }
}

/// JSON-returning error type for API routes.
/// Wraps AppError and returns `{"error": "message"}` responses.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Json(json!({"error": message}))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError(e)
    }
}

/// Why a client message was refused by a session. Sent back to the
/// offending socket only.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The frame was not one of the known message shapes.
    Malformed(String),
    /// A move arrived before both seats were claimed.
    NotStarted,
    /// The token does not belong to the seat named in the entry.
    InvalidToken,
    /// The engine refused the entry.
    Rules(GoError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Malformed(msg) => write!(f, "malformed message: {msg}"),
            SessionError::NotStarted => write!(f, "not started"),
            SessionError::InvalidToken => write!(f, "invalid token"),
            SessionError::Rules(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Rules(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GoError> for SessionError {
    fn from(e: GoError) -> Self {
        SessionError::Rules(e)
    }
}

impl From<EntryError> for SessionError {
    fn from(e: EntryError) -> Self {
        SessionError::Rules(GoError::InvalidEntry(e))
    }
}
