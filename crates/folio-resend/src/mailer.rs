use std::{future::Future, time::Duration};

use folio_core::mailer::{Mailer, MailerError, OutboundEmail, Receipt};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.resend.com/emails";

/// Upper bound on a single provider call. Elapsing counts as a failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ResendConfig {
  pub endpoint: String,
  pub timeout:  Duration,
}

impl Default for ResendConfig {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_owned(),
      timeout:  DEFAULT_TIMEOUT,
    }
  }
}

/// HTTP client for the Resend `POST /emails` API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ResendMailer {
  client:   Client,
  endpoint: Url,
}

impl ResendMailer {
  pub fn new(config: ResendConfig) -> Result<Self, Error> {
    let endpoint =
      Url::parse(&config.endpoint).map_err(|e| Error::InvalidEndpoint {
        endpoint: config.endpoint.clone(),
        reason:   e.to_string(),
      })?;
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, endpoint })
  }

  pub fn endpoint(&self) -> &Url { &self.endpoint }

  async fn post(
    &self,
    api_key: &str,
    email: &OutboundEmail,
  ) -> Result<Receipt, MailerError> {
    let resp = self
      .client
      .post(self.endpoint.clone())
      .bearer_auth(api_key)
      .json(email)
      .send()
      .await
      .map_err(transport_error)?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<ErrorPayload>()
        .await
        .ok()
        .and_then(|p| p.message);
      tracing::debug!(%status, ?message, "resend rejected email");
      return Err(MailerError::Rejected {
        status: status.as_u16(),
        message,
      });
    }

    resp.json::<Receipt>().await.map_err(|e| {
      if e.is_timeout() {
        MailerError::Timeout
      } else {
        MailerError::InvalidResponse(e.to_string())
      }
    })
  }
}

impl Mailer for ResendMailer {
  fn send<'a>(
    &'a self,
    api_key: &'a str,
    email: &'a OutboundEmail,
  ) -> impl Future<Output = Result<Receipt, MailerError>> + Send + 'a {
    self.post(api_key, email)
  }
}

/// Shape of a Resend error body, e.g.
/// `{"statusCode":422,"name":"validation_error","message":"..."}`.
#[derive(Deserialize)]
struct ErrorPayload {
  message: Option<String>,
}

fn transport_error(e: reqwest::Error) -> MailerError {
  if e.is_timeout() {
    MailerError::Timeout
  } else {
    MailerError::Transport(e.to_string())
  }
}
