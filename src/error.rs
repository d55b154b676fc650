//! HTTP error type for the JSON API.
//!
//! Handlers return [`AppError`], which renders as
//! `{"error": {"code", "message", "details"}}` with a matching status code.
//! Page routes render HTML error pages instead (see [`crate::web`]).

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::ShortlinkError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Forbidden { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    PayloadTooLarge { message: String, details: Value },

    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn payload_too_large(message: impl Into<String>, details: Value) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::Unavailable { .. } => "unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::Forbidden { message, details }
            | Self::NotFound { message, details }
            | Self::PayloadTooLarge { message, details }
            | Self::Unavailable { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ShortlinkError> for AppError {
    fn from(e: ShortlinkError) -> Self {
        match e {
            ShortlinkError::NotFound { code } => {
                AppError::not_found("Shortlink not found", json!({ "code": code }))
            }
            ShortlinkError::CodeExhaustion { attempts } => AppError::unavailable(
                "Could not allocate a short code, try again",
                json!({ "attempts": attempts }),
            ),
            ShortlinkError::Load(_) => AppError::internal("Shortlink store unavailable", json!({})),
            ShortlinkError::Persist(_) => AppError::internal("Failed to save shortlink", json!({})),
            ShortlinkError::Task(_) => AppError::internal("Shortlink request failed", json!({})),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::payload_too_large("Request body too large", json!({}))
        } else {
            AppError::bad_request("Invalid JSON body", json!({ "reason": rejection.body_text() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::SnapshotError;

    #[test]
    fn test_shortlink_error_mapping() {
        let cases = [
            (
                ShortlinkError::NotFound { code: "abc1234".into() },
                StatusCode::NOT_FOUND,
            ),
            (
                ShortlinkError::CodeExhaustion { attempts: 10 },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ShortlinkError::Load(SnapshotError::Malformed("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ShortlinkError::Persist(SnapshotError::Io(std::io::Error::other("disk"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(AppError::from(error).status(), status);
        }
    }

    #[test]
    fn test_error_info_shape() {
        let err = AppError::forbidden("Blocked", json!({ "reason": "term" }));
        let info = err.to_error_info();

        assert_eq!(info.code, "forbidden");
        assert_eq!(info.message, "Blocked");
        assert_eq!(info.details["reason"], "term");
        assert_eq!(err.to_string(), "Blocked");
    }

    #[test]
    fn test_internal_details_hidden() {
        let err: AppError =
            ShortlinkError::Persist(SnapshotError::Io(std::io::Error::other("/secret/path")))
                .into();

        assert!(!err.to_error_info().message.contains("/secret/path"));
    }
}
