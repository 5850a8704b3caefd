// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every request either succeeds fully or fails with one of these.
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("missing {0}")]
    MissingParameter(String),

    #[error("invalid {0}")]
    InvalidParameter(String),

    #[error("unsupported query in {0}: expected one or two words")]
    InvalidQuery(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),
}

impl ServiceError {
    fn code(&self) -> &'static str {
        match self {
            ServiceError::MissingParameter(_) => "MISSING_PARAMETER",
            ServiceError::InvalidParameter(_) => "INVALID_PARAMETER",
            ServiceError::InvalidQuery(_) => "INVALID_QUERY",
            ServiceError::DatabaseError(_) => "DATABASE_ERROR",
            ServiceError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
        }
    }
}

/// Convert ServiceError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ServiceError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
