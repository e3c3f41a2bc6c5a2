//! Validated form extractor for Axum
//!
//! `ValidatedForm<T>` works like `axum::Form<T>` for
//! `application/x-www-form-urlencoded` bodies, then runs
//! `validator::Validate::validate()` on the decoded value.
//! Undecodable bodies answer 400, failed validation answers 422.

use axum::extract::rejection::FormRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

pub struct ValidatedForm<T>(pub T);

pub enum ValidatedFormRejection {
    FormError(FormRejection),
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::FormError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid form data: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                field_errors.sort();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedFormRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(ValidatedFormRejection::FormError)?;

        value
            .validate()
            .map_err(ValidatedFormRejection::ValidationError)?;

        Ok(ValidatedForm(value))
    }
}
