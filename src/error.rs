//!
//! # Custom Error Handling
//!
//! Defines `AppError`, the error type used throughout the application, and its
//! mapping onto HTTP responses.
//!
//! The taxonomy mirrors the public API contract: input problems, duplicate
//! emails, bad credentials, and missing tasks all surface as 400-class JSON
//! errors; a missing or invalid bearer token is a 401; everything else is a
//! 500 carrying a deliberately generic, operation-specific message. The
//! underlying causes of 500s are logged by the controllers, never sent to the
//! client.

use actix_web::http::StatusCode;
use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request input (HTTP 400).
    Validation(String),
    /// A uniqueness constraint would be violated, e.g. duplicate email (HTTP 400).
    Conflict(String),
    /// Credential check failed during login (HTTP 400).
    Auth(String),
    /// Bearer token absent, malformed, invalid, or expired (HTTP 401).
    Unauthorized(String),
    /// The requested record does not exist within the caller's scope.
    /// Reported as HTTP 400, matching the documented API behavior.
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500). The message is a generic
    /// per-operation string; details stay in the logs.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Auth(msg) => write!(f, "Auth: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::Auth(_)
            | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let msg = match self {
            AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Auth(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Internal(msg) => msg,
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the detailed field messages. Lets handlers use `?` on
/// `payload.validate()`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}
