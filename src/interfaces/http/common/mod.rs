//! Response envelope, error mapping and extractors shared by all modules

pub mod validated_form;

pub use validated_form::{ValidatedForm, ValidatedFormRejection};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;
use crate::shared::errors::InfraError;

/// Standard API response wrapper
///
/// Rendered for every failed request as
/// `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error returned by handlers; rendered as an `ApiResponse` error body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            DomainError::Validation(message) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            DomainError::Unauthorized(message) => Self::new(StatusCode::UNAUTHORIZED, message),
            DomainError::Storage(detail) => {
                error!(error = %detail, "Storage failure while handling request");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<InfraError> for ApiError {
    fn from(e: InfraError) -> Self {
        DomainError::from(e).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}
