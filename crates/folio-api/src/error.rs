//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::{
  submission::FieldError,
  wire::{
    ErrorBody, ErrorDetails, INVALID_BODY, SEND_FAILED, UNEXPECTED_ERROR,
    VALIDATION_FAILED,
  },
};
use thiserror::Error;

/// An error returned by a contact handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("request body is not valid JSON")]
  MalformedBody,

  #[error("validation failed for {} field(s)", .0.len())]
  Validation(Vec<FieldError>),

  #[error("delivery failed: {0}")]
  Delivery(String),

  #[error("unexpected error")]
  Unexpected,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::MalformedBody => (StatusCode::BAD_REQUEST, ErrorBody {
        error:   INVALID_BODY.to_owned(),
        details: None,
      }),
      ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, ErrorBody {
        error:   VALIDATION_FAILED.to_owned(),
        details: Some(ErrorDetails::Fields(errors)),
      }),
      ApiError::Delivery(reason) => {
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
          error:   SEND_FAILED.to_owned(),
          details: Some(ErrorDetails::Reason(reason)),
        })
      }
      ApiError::Unexpected => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
        error:   SEND_FAILED.to_owned(),
        details: Some(ErrorDetails::Reason(UNEXPECTED_ERROR.to_owned())),
      }),
    };
    (status, Json(body)).into_response()
  }
}
