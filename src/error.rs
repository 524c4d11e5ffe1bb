use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::intake::FieldErrors;
use crate::models::{ApiError, ApiErrorResponse};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Remote error: {message}")]
    RemoteError {
        message: String,
        code: Option<String>,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Form validation failed: {0}")]
    InvalidForm(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    pub fn remote(message: impl Into<String>, code: Option<String>) -> Self {
        AppError::RemoteError {
            message: message.into(),
            code,
        }
    }

    /// Human-readable text of a failure that came back from the database side.
    /// Transport and decoding failures count as remote failures too.
    pub fn remote_message(&self) -> Option<String> {
        match self {
            AppError::RemoteError { message, .. } => Some(message.clone()),
            AppError::ReqwestError(e) => Some(e.to_string()),
            AppError::SerdeJsonError(e) => Some(e.to_string()),
            _ => None,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RemoteError { .. } | AppError::ReqwestError(_) | AppError::SerdeJsonError(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.http_status();
        let error = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                ApiError::new("VALIDATION_ERROR", msg.as_str())
            }
            AppError::InvalidForm(errors) => {
                log::warn!("Form validation failed: {errors}");
                ApiError {
                    fields: Some(errors.as_slice().to_vec()),
                    focus_field: errors.first().map(|e| e.field),
                    ..ApiError::new("VALIDATION_ERROR", "Please correct the highlighted fields")
                }
            }
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg.as_str()),
            AppError::RemoteError { message, code } => {
                log::error!("Remote error: {message} (code: {code:?})");
                ApiError {
                    remote_code: code.clone(),
                    ..ApiError::new("REMOTE_ERROR", message.as_str())
                }
            }
            AppError::ReqwestError(_) | AppError::SerdeJsonError(_) => {
                log::error!("Remote error: {self}");
                ApiError::new("REMOTE_ERROR", self.to_string())
            }
            AppError::ConfigError(msg) => {
                log::error!("Config error: {msg}");
                ApiError::new("CONFIG_ERROR", "Service is not configured")
            }
            AppError::InternalError(_) => {
                log::error!("Internal error: {self}");
                ApiError::new("INTERNAL_ERROR", "Internal server error")
            }
        };

        HttpResponse::build(status_code).json(ApiErrorResponse::from(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ConfigError("missing".into()).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::remote("boom", None).http_status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::NotFound("x".into()).http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_remote_message_only_for_remote_failures() {
        let err = AppError::remote("duplicate key", Some("23505".into()));
        assert_eq!(err.remote_message().as_deref(), Some("duplicate key"));
        assert!(AppError::ConfigError("x".into()).remote_message().is_none());
    }

    #[actix_web::test]
    async fn test_invalid_form_envelope_names_focus_field() {
        let mut form = crate::intake::IntakeForm::new("+1 (246)");
        form.full_name = "Ana Gomez".into();
        let errors = crate::intake::validate(&form).unwrap_err();

        let resp = AppError::InvalidForm(errors).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"]["focus_field"], serde_json::json!("email"));
        assert!(body["error"]["remote_code"].is_null());
    }
}
