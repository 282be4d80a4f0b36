//! JSON contact endpoint for folio.
//!
//! Exposes an axum [`Router`] wired to a [`Dispatcher`] and a
//! [`ConfigSource`]. TLS, tracing layers and the listener are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(dispatcher, config))
//! ```

pub mod config;
pub mod contact;
pub mod error;

use std::{any::Any, sync::Arc};

use axum::{
  Router,
  response::{IntoResponse, Response},
  routing::get,
};
use folio_core::{dispatch::Dispatcher, mailer::Mailer};
use tower_http::catch_panic::CatchPanicLayer;

pub use config::{ConfigSource, StaticConfig};
pub use error::ApiError;

/// Shared state threaded through the contact handlers. Read-only.
pub struct ApiState<M, C> {
  pub dispatcher: Arc<Dispatcher<M>>,
  pub config:     Arc<C>,
}

impl<M, C> Clone for ApiState<M, C> {
  fn clone(&self) -> Self {
    Self {
      dispatcher: Arc::clone(&self.dispatcher),
      config:     Arc::clone(&self.config),
    }
  }
}

/// Build the contact API router.
///
/// Panics raised while handling a request are converted into a generic
/// `500` body instead of tearing down the connection.
pub fn api_router<M, C>(
  dispatcher: Arc<Dispatcher<M>>,
  config: Arc<C>,
) -> Router<()>
where
  M: Mailer + 'static,
  C: ConfigSource + 'static,
{
  Router::new()
    .route(
      "/contact",
      get(contact::status).post(contact::submit::<M, C>),
    )
    .with_state(ApiState { dispatcher, config })
    .layer(CatchPanicLayer::custom(panic_response))
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
  tracing::error!("contact handler panicked");
  ApiError::Unexpected.into_response()
}

// ─── Integration tests ────────────────────────────────────────────────────────
