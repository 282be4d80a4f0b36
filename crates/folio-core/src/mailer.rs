//! The `Mailer` trait: the seam between the dispatcher and an email provider.
//!
//! Implemented by provider clients (e.g. `folio-resend`). The dispatcher
//! depends only on this abstraction, so tests can swap in a fake.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason reported when the provider fails without saying why.
pub const FALLBACK_REASON: &str = "Failed to send email";

/// A fully composed email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
  pub from:     String,
  pub to:       String,
  pub reply_to: String,
  pub subject:  String,
  pub html:     String,
}

/// Provider acknowledgement of an accepted email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Receipt {
  /// Identifier assigned by the provider.
  pub id: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
  #[error("provider rejected the request with status {status}")]
  Rejected {
    status:  u16,
    /// Message from the provider's error payload, if it sent one.
    message: Option<String>,
  },

  #[error("provider request timed out")]
  Timeout,

  #[error("transport error: {0}")]
  Transport(String),

  #[error("invalid provider response: {0}")]
  InvalidResponse(String),
}

impl MailerError {
  /// Diagnostic text suitable for surfacing to a client.
  pub fn reason(&self) -> String {
    match self {
      MailerError::Rejected {
        message: Some(message),
        ..
      } if !message.is_empty() => message.clone(),
      MailerError::Rejected { .. } => FALLBACK_REASON.to_owned(),
      other => other.to_string(),
    }
  }
}

/// Something that can deliver an [`OutboundEmail`].
///
/// Each call is a single attempt; implementations must not retry.
pub trait Mailer: Send + Sync {
  fn send<'a>(
    &'a self,
    api_key: &'a str,
    email: &'a OutboundEmail,
  ) -> impl Future<Output = Result<Receipt, MailerError>> + Send + 'a;
}
