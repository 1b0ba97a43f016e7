use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::ApiResponse;

/// Message sent to clients for every 500; the detail only goes to the log.
pub const GENERIC_FAILURE: &str = "Something went wrong!";

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
    AlreadyExists(String),
    DatabaseError(String),
    Internal(String),
}

impl AppError {
    /// Text placed in the envelope's `message` field.
    pub fn client_message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::AlreadyExists(msg) => msg,
            AppError::DatabaseError(_) | AppError::Internal(_) => GENERIC_FAILURE,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("❌ {}", self);
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.client_message()))
    }
}
