// HTTP API Error Types
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::AuthError;
use crate::database::{DecodeError, ErrorCode, InvokeError};
use crate::models::FieldErrors;
use crate::services::ServiceError;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // Any catalogued code: domain tags, infrastructure faults, unknown routes
    Code(ErrorCode),

    // 422 Unprocessable Entity
    ValidationError {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 400 Bad Request
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Code(code) => code.status_code(),
            ApiError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Code(code) => code.message(),
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Code(code) => code.as_str(),
            ApiError::ValidationError { .. } => ErrorCode::ValidationError.as_str(),
            ApiError::InvalidJson(_) => ErrorCode::InvalidJson.as_str(),
            ApiError::Unauthorized(_) => ErrorCode::Unauthorized.as_str(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "detail": self.message(),
            "error_code": self.error_code(),
            "timestamp": Utc::now().to_rfc3339(),
        });

        if let ApiError::ValidationError { field_errors, .. } = self {
            response["field_errors"] = json!(field_errors);
        }

        response
    }
}

impl ApiError {
    pub fn code(code: ErrorCode) -> Self {
        ApiError::Code(code)
    }

    pub fn validation_error(
        message: impl Into<String>,
        field_errors: HashMap<String, String>,
    ) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.into(), message.into());
        ApiError::validation_error("Request validation failed", field_errors)
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found() -> Self {
        ApiError::Code(ErrorCode::NotFound)
    }

    pub fn method_not_allowed() -> Self {
        ApiError::Code(ErrorCode::MethodNotAllowed)
    }

    pub fn internal() -> Self {
        ApiError::Code(ErrorCode::InternalError)
    }
}

// Convert other error types to ApiError
impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::validation_error("Request validation failed", errors.into_map())
    }
}

impl From<InvokeError> for ApiError {
    fn from(err: InvokeError) -> Self {
        // Already logged by the invoker
        ApiError::Code(err.code())
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        tracing::error!(error = %err, "failed to decode procedure result");
        ApiError::internal()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invoke(err) => err.into(),
            ServiceError::Decode(err) => err.into(),
            ServiceError::NotFound(code) => ApiError::Code(code),
            ServiceError::EmptyResult { procedure } => {
                tracing::error!(%procedure, "stored procedure returned no rows");
                ApiError::internal()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::unauthorized(NOT_AUTHENTICATED),
            other => {
                tracing::debug!(error = %other, "rejected bearer token");
                ApiError::unauthorized(INVALID_CREDENTIALS)
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = Json(self.to_json());

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}
