//! Async HTTP client for the folio contact endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::{
  submission::SubmissionInput,
  wire::{ErrorBody, ErrorDetails, SEND_FAILED, SuccessBody},
};
use reqwest::Client;

use crate::form::SubmitOutcome;

/// Shown when the server cannot be reached or answers with garbage.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Connection settings for the contact API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `POST /api/contact`, mapped onto a form outcome. Never fails: transport
  /// errors become [`SubmitOutcome::Failed`].
  pub async fn submit(&self, input: &SubmissionInput) -> SubmitOutcome {
    match self.try_submit(input).await {
      Ok(outcome) => outcome,
      Err(e) => {
        tracing::warn!(error = %format!("{e:#}"), "contact submission failed");
        SubmitOutcome::Failed {
          message: GENERIC_FAILURE.to_owned(),
        }
      }
    }
  }

  async fn try_submit(&self, input: &SubmissionInput) -> Result<SubmitOutcome> {
    let resp = self
      .client
      .post(self.url("/contact"))
      .json(input)
      .send()
      .await
      .context("POST /contact failed")?;

    let status = resp.status();
    if status.is_success() {
      let body: SuccessBody =
        resp.json().await.context("deserialising success body")?;
      return Ok(SubmitOutcome::Accepted {
        message: body.message,
        id:      body.id,
      });
    }

    let body = resp.json::<ErrorBody>().await.ok();
    tracing::debug!(%status, ?body, "contact endpoint returned an error");
    Ok(classify(body))
  }
}

fn classify(body: Option<ErrorBody>) -> SubmitOutcome {
  let Some(body) = body else {
    return SubmitOutcome::Failed {
      message: SEND_FAILED.to_owned(),
    };
  };
  let message = if body.error.is_empty() {
    SEND_FAILED.to_owned()
  } else {
    body.error
  };
  match body.details {
    Some(ErrorDetails::Fields(field_errors)) if !field_errors.is_empty() => {
      SubmitOutcome::Rejected {
        message,
        field_errors,
      }
    }
    _ => SubmitOutcome::Failed { message },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{Router, http::StatusCode, routing::post};
  use folio_core::submission::Field;
  use tokio::net::TcpListener;

  async fn spawn(status: StatusCode, body: &'static str) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
      "/api/contact",
      post(move || async move {
        (status, [("content-type", "application/json")], body)
      }),
    );
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    ApiClient::new(ApiConfig {
      base_url: format!("http://{addr}/"),
    })
    .unwrap()
  }

  fn input() -> SubmissionInput {
    SubmissionInput {
      name:    "Jo".into(),
      email:   "jo@x.com".into(),
      subject: "Hello there".into(),
      message: "This is a test message.".into(),
    }
  }

  #[tokio::test]
  async fn success_is_accepted() {
    let client = spawn(
      StatusCode::OK,
      r#"{"success":true,"message":"Message sent successfully!","id":"abc123"}"#,
    )
    .await;
    assert_eq!(
      client.submit(&input()).await,
      SubmitOutcome::Accepted {
        message: "Message sent successfully!".into(),
        id:      Some("abc123".into()),
      }
    );
  }

  #[tokio::test]
  async fn validation_failure_is_rejected_with_fields() {
    let client = spawn(
      StatusCode::BAD_REQUEST,
      r#"{"error":"Validation failed","details":[{"field":"name","message":"Name must be at least 2 characters"}]}"#,
    )
    .await;
    let SubmitOutcome::Rejected {
      message,
      field_errors,
    } = client.submit(&input()).await
    else {
      panic!("expected rejection");
    };
    assert_eq!(message, "Validation failed");
    assert_eq!(field_errors.len(), 1);
    assert_eq!(field_errors[0].field, Field::Name);
  }

  #[tokio::test]
  async fn server_error_is_failed_with_error_text() {
    let client = spawn(
      StatusCode::INTERNAL_SERVER_ERROR,
      r#"{"error":"Failed to send message","details":"API key is invalid"}"#,
    )
    .await;
    assert_eq!(
      client.submit(&input()).await,
      SubmitOutcome::Failed {
        message: "Failed to send message".into(),
      }
    );
  }

  #[tokio::test]
  async fn unparseable_error_body_uses_default_message() {
    let client = spawn(StatusCode::BAD_GATEWAY, "upstream down").await;
    assert_eq!(
      client.submit(&input()).await,
      SubmitOutcome::Failed {
        message: SEND_FAILED.into(),
      }
    );
  }

  #[tokio::test]
  async fn unreachable_server_is_generic_failure() {
    let addr = {
      let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
      listener.local_addr().unwrap()
    };
    let client = ApiClient::new(ApiConfig {
      base_url: format!("http://{addr}"),
    })
    .unwrap();
    assert_eq!(
      client.submit(&input()).await,
      SubmitOutcome::Failed {
        message: GENERIC_FAILURE.into(),
      }
    );
  }

  #[test]
  fn url_joins_without_double_slash() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:3000/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/contact"), "http://localhost:3000/api/contact");
  }
}
