//! The submission dispatcher.
//!
//! Given a [`ValidatedSubmission`] and a [`DeliveryConfig`], either hands a
//! composed email to the [`Mailer`] (exactly one attempt) or, when the
//! provider credential or destination address is missing, only logs the
//! submission.

use std::fmt;

use serde::Serialize;

use crate::{
  Result,
  mailer::{Mailer, OutboundEmail},
  submission::ValidatedSubmission,
  template::EmailTemplate,
};

pub const DEFAULT_FROM_ADDRESS: &str =
  "Portfolio Contact <onboarding@resend.dev>";
pub const DEFAULT_SUBJECT_PREFIX: &str = "Portfolio: ";

const RENDER_FAILED: &str = "failed to render email body";
const REDACTED: &str = "[redacted]";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Delivery settings, resolved fresh for each request.
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
  /// Provider API credential. Absent or blank means log-only.
  pub api_key:        Option<String>,
  /// Destination inbox. Absent or blank means log-only.
  pub contact_email:  Option<String>,
  pub from_address:   String,
  pub subject_prefix: String,
}

impl Default for DeliveryConfig {
  fn default() -> Self {
    Self {
      api_key:        None,
      contact_email:  None,
      from_address:   DEFAULT_FROM_ADDRESS.to_owned(),
      subject_prefix: DEFAULT_SUBJECT_PREFIX.to_owned(),
    }
  }
}

impl DeliveryConfig {
  /// `(api_key, contact_email)` when both are present and non-blank.
  fn credentials(&self) -> Option<(&str, &str)> {
    fn present(v: &Option<String>) -> Option<&str> {
      v.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
    Some((present(&self.api_key)?, present(&self.contact_email)?))
  }

  pub fn is_configured(&self) -> bool { self.credentials().is_some() }
}

impl fmt::Debug for DeliveryConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DeliveryConfig")
      .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
      .field("contact_email", &self.contact_email)
      .field("from_address", &self.from_address)
      .field("subject_prefix", &self.subject_prefix)
      .finish()
  }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// What happened to a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
  Delivered { provider_id: String },
  LoggedOnly,
  Failed { reason: String },
}

// ─── Dispatcher ──────────────────────────────────────────────────────────────

/// Chooses between provider delivery and the log-only fallback.
///
/// Holds no per-request state; share it behind an `Arc`.
#[derive(Debug)]
pub struct Dispatcher<M> {
  mailer:   M,
  template: EmailTemplate,
}

impl<M: Mailer> Dispatcher<M> {
  pub fn new(mailer: M) -> Result<Self> {
    Ok(Self {
      mailer,
      template: EmailTemplate::new()?,
    })
  }

  pub fn mailer(&self) -> &M { &self.mailer }

  /// Deliver or log `submission` according to `config`.
  ///
  /// Never panics on provider failure and never retries.
  pub async fn dispatch(
    &self,
    submission: &ValidatedSubmission,
    config: &DeliveryConfig,
  ) -> DispatchOutcome {
    let Some((api_key, contact_email)) = config.credentials() else {
      log_only(submission);
      return DispatchOutcome::LoggedOnly;
    };

    let email = match self.compose(submission, contact_email, config) {
      Ok(email) => email,
      Err(e) => {
        tracing::error!(error = %e, "could not compose contact email");
        return DispatchOutcome::Failed {
          reason: RENDER_FAILED.to_owned(),
        };
      }
    };

    tracing::debug!(to = %email.to, subject = %email.subject, "sending contact email");
    match self.mailer.send(api_key, &email).await {
      Ok(receipt) => {
        tracing::info!(
          provider_id = %receipt.id,
          to = %email.to,
          reply_to = %email.reply_to,
          subject = %submission.subject(),
          "contact email delivered"
        );
        DispatchOutcome::Delivered {
          provider_id: receipt.id,
        }
      }
      Err(e) => {
        let reason = redact(&e.reason(), api_key);
        tracing::error!(reason = %reason, "contact email delivery failed");
        DispatchOutcome::Failed { reason }
      }
    }
  }

  /// Build the provider request for `submission`.
  pub fn compose(
    &self,
    submission: &ValidatedSubmission,
    contact_email: &str,
    config: &DeliveryConfig,
  ) -> Result<OutboundEmail> {
    Ok(OutboundEmail {
      from:     config.from_address.clone(),
      to:       contact_email.to_owned(),
      reply_to: submission.email().to_owned(),
      subject:  format!("{}{}", config.subject_prefix, submission.subject()),
      html:     self.template.render(submission)?,
    })
  }
}

fn log_only(submission: &ValidatedSubmission) {
  tracing::warn!("email delivery not configured; logging submission only");
  tracing::info!(
    name = %submission.name(),
    email = %submission.email(),
    subject = %submission.subject(),
    message = %submission.message(),
    "contact form submission"
  );
}

fn redact(reason: &str, secret: &str) -> String {
  if secret.is_empty() {
    reason.to_owned()
  } else {
    reason.replace(secret, REDACTED)
  }
}
