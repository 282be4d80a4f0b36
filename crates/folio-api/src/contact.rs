//! Handlers for `/contact`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/contact` | Body: `{name,email,subject,message}`; 200, 400 or 500 |
//! | `GET`  | `/contact` | Liveness probe; fixed message |

use axum::{Json, extract::State};
use bytes::Bytes;
use folio_core::{
  dispatch::DispatchOutcome,
  mailer::Mailer,
  submission::{SubmissionInput, validate},
  wire::{STATUS_MESSAGE, StatusBody, SuccessBody},
};
use serde_json::Value;

use crate::{ApiState, config::ConfigSource, error::ApiError};

// ─── Submit ──────────────────────────────────────────────────────────────────

/// `POST /contact` — parse, validate, dispatch.
pub async fn submit<M, C>(
  State(state): State<ApiState<M, C>>,
  body: Bytes,
) -> Result<Json<SuccessBody>, ApiError>
where
  M: Mailer + 'static,
  C: ConfigSource + 'static,
{
  let raw: Value = serde_json::from_slice(&body).map_err(|e| {
    tracing::debug!(error = %e, "rejecting unparseable contact body");
    ApiError::MalformedBody
  })?;

  let submission =
    validate(&SubmissionInput::from_json(&raw)).map_err(|errors| {
      tracing::info!(failed = errors.len(), "contact submission failed validation");
      ApiError::Validation(errors)
    })?;

  let config = state.config.delivery();
  match state.dispatcher.dispatch(&submission, &config).await {
    DispatchOutcome::LoggedOnly => Ok(Json(SuccessBody::logged())),
    DispatchOutcome::Delivered { provider_id } => {
      Ok(Json(SuccessBody::delivered(provider_id)))
    }
    DispatchOutcome::Failed { reason } => Err(ApiError::Delivery(reason)),
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// `GET /contact`
pub async fn status() -> Json<StatusBody> {
  Json(StatusBody {
    message: STATUS_MESSAGE.to_owned(),
  })
}
