//! Error responses for the Agora Web API.
//!
//! Every failure leaves the server as `{"error": {code, message, details?}}`
//! with a status derived from the code. Internal detail such as query text
//! or store errors is logged server-side and never echoed to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::auth::{PolicyError, RegistrationError, SessionError};
use crate::AgoraError;

/// Machine-readable error codes, serialized as `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    /// Field-level validation failure; the response carries `details`.
    ValidationError,
    InternalError,
}

impl ErrorCode {
    /// The HTTP status each code maps to.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
struct ErrorInfo {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<HashMap<String, Vec<String>>>,
}

/// An error a handler can return; renders as the JSON envelope.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// A 422 carrying per-field messages under `details`.
    pub fn validation(details: HashMap<String, Vec<String>>) -> Self {
        Self::with_details(ErrorCode::ValidationError, "Validation failed", details)
    }

    /// Collect `validator` output into the per-field detail map.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(msg) => msg.to_string(),
                        None => format!("Invalid value for {field}"),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self::validation(details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let envelope = ErrorEnvelope {
            error: ErrorInfo {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };
        (status, Json(envelope)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AgoraError> for ApiError {
    fn from(err: AgoraError) -> Self {
        match &err {
            AgoraError::NotFound(_) => ApiError::not_found(err.to_string()),
            AgoraError::Validation(msg) => ApiError::new(ErrorCode::ValidationError, msg.clone()),
            AgoraError::Database(_) | AgoraError::Io(_) | AgoraError::Config(_) => {
                tracing::error!("Internal error: {err}");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<PolicyError> for ApiError {
    // Every policy denial is forbidden to the caller, including the
    // fails-closed missing-identity case.
    fn from(err: PolicyError) -> Self {
        ApiError::forbidden(err.to_string())
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match &err {
            RegistrationError::Validation(e) => {
                ApiError::new(ErrorCode::ValidationError, e.to_string())
            }
            RegistrationError::Password(e) => {
                ApiError::new(ErrorCode::ValidationError, e.to_string())
            }
            RegistrationError::DuplicateIdentity => {
                ApiError::conflict("Username or email already in use")
            }
            RegistrationError::Database(e) => {
                tracing::error!("Registration failed: {e}");
                ApiError::internal("Failed to create account")
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match &err {
            // Unknown username and wrong password are deliberately one message.
            SessionError::InvalidCredentials => {
                ApiError::unauthorized("Invalid username or password")
            }
            SessionError::MissingSecret => {
                tracing::error!("Login attempted without a configured signing secret");
                ApiError::internal("Server configuration error")
            }
            SessionError::TokenEncoding(e) => {
                tracing::error!("Failed to encode session token: {e}");
                ApiError::internal("Failed to generate token")
            }
            SessionError::Database(e) => {
                tracing::error!("Login failed against the store: {e}");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
