use thiserror::Error;

/// Errors raised while constructing a [`crate::ResendMailer`].
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid endpoint {endpoint:?}: {reason}")]
  InvalidEndpoint { endpoint: String, reason: String },

  #[error("failed to build HTTP client: {0}")]
  Client(#[from] reqwest::Error),
}
