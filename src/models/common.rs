use serde::Serialize;
use utoipa::ToSchema;

use crate::intake::{FieldError, FormField};

/// Body of every failed request: `{"success": false, "error": {...}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,
    pub message: String,
    /// Per-field problems of a rejected intake form, in form order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
    /// First invalid field; the form moves focus there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_field: Option<FormField>,
    /// Error code reported by the database, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_code: Option<String>,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            fields: None,
            focus_field: None,
            remote_code: None,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        Self {
            success: false,
            error,
        }
    }
}
