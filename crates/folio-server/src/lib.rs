//! Assembly of the folio HTTP service.
//!
//! Turns a [`ServerConfig`] into a ready-to-serve axum [`Router`]: Resend
//! mailer, dispatcher, contact API under `/api`, request tracing.

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::Router;
use folio_api::ConfigSource;
use folio_core::dispatch::{
  DEFAULT_FROM_ADDRESS, DEFAULT_SUBJECT_PREFIX, DeliveryConfig, Dispatcher,
};
use folio_resend::{DEFAULT_ENDPOINT, ResendConfig, ResendMailer};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Environment variable holding the Resend API key, read per request.
pub const API_KEY_VAR: &str = "RESEND_API_KEY";
/// Environment variable holding the destination inbox, read per request.
pub const CONTACT_EMAIL_VAR: &str = "CONTACT_EMAIL";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                  String,
  #[serde(default = "default_port")]
  pub port:                  u16,
  #[serde(default)]
  pub resend_api_key:        Option<String>,
  #[serde(default)]
  pub contact_email:         Option<String>,
  #[serde(default = "default_from_address")]
  pub from_address:          String,
  #[serde(default = "default_subject_prefix")]
  pub subject_prefix:        String,
  #[serde(default = "default_resend_endpoint")]
  pub resend_endpoint:       String,
  #[serde(default = "default_provider_timeout_secs")]
  pub provider_timeout_secs: u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 3000 }
fn default_from_address() -> String { DEFAULT_FROM_ADDRESS.to_owned() }
fn default_subject_prefix() -> String { DEFAULT_SUBJECT_PREFIX.to_owned() }
fn default_resend_endpoint() -> String { DEFAULT_ENDPOINT.to_owned() }
fn default_provider_timeout_secs() -> u64 { 10 }

impl ServerConfig {
  /// Read `path` (optional) and then `FOLIO_`-prefixed environment variables.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::with_prefix("FOLIO"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Delivery settings as written in the configuration file.
  pub fn delivery(&self) -> DeliveryConfig {
    DeliveryConfig {
      api_key:        self.resend_api_key.clone(),
      contact_email:  self.contact_email.clone(),
      from_address:   self.from_address.clone(),
      subject_prefix: self.subject_prefix.clone(),
    }
  }

  pub fn resend(&self) -> ResendConfig {
    ResendConfig {
      endpoint: self.resend_endpoint.clone(),
      timeout:  Duration::from_secs(self.provider_timeout_secs),
    }
  }
}

// ─── Environment-backed config source ─────────────────────────────────────────

/// Re-reads [`API_KEY_VAR`] and [`CONTACT_EMAIL_VAR`] on every request,
/// falling back to the configuration file values. Blank variables count as
/// unset.
pub struct EnvConfig {
  fallback: DeliveryConfig,
  lookup:   fn(&str) -> Option<String>,
}

impl EnvConfig {
  pub fn new(fallback: DeliveryConfig) -> Self {
    Self::with_lookup(fallback, |name| std::env::var(name).ok())
  }

  pub fn with_lookup(
    fallback: DeliveryConfig,
    lookup: fn(&str) -> Option<String>,
  ) -> Self {
    Self { fallback, lookup }
  }

  fn var(&self, name: &str) -> Option<String> {
    (self.lookup)(name).filter(|v| !v.trim().is_empty())
  }
}

impl ConfigSource for EnvConfig {
  fn delivery(&self) -> DeliveryConfig {
    DeliveryConfig {
      api_key: self
        .var(API_KEY_VAR)
        .or_else(|| self.fallback.api_key.clone()),
      contact_email: self
        .var(CONTACT_EMAIL_VAR)
        .or_else(|| self.fallback.contact_email.clone()),
      ..self.fallback.clone()
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `config`, resolving delivery
/// settings from `source` on each request.
pub fn app<C>(config: &ServerConfig, source: C) -> anyhow::Result<Router>
where
  C: ConfigSource + 'static,
{
  let mailer = ResendMailer::new(config.resend())?;
  let dispatcher = Dispatcher::new(mailer)?;

  Ok(
    Router::new()
      .nest(
        "/api",
        folio_api::api_router(Arc::new(dispatcher), Arc::new(source)),
      )
      .layer(TraceLayer::new_for_http()),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use folio_api::StaticConfig;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.resend_endpoint, "https://api.resend.com/emails");
    assert_eq!(cfg.provider_timeout_secs, 10);

    let delivery = cfg.delivery();
    assert_eq!(delivery.api_key, None);
    assert_eq!(delivery.from_address, DEFAULT_FROM_ADDRESS);
    assert_eq!(delivery.subject_prefix, "Portfolio: ");
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = parse(
      r#"
        host = "0.0.0.0"
        port = 8080
        resend_api_key = "re_file"
        contact_email = "me@portfolio.dev"
        subject_prefix = "[site] "
        provider_timeout_secs = 3
      "#,
    );
    assert_eq!(cfg.address(), "0.0.0.0:8080");
    assert_eq!(cfg.resend().timeout, Duration::from_secs(3));
    assert!(cfg.delivery().is_configured());
    assert_eq!(cfg.delivery().subject_prefix, "[site] ");
  }

  fn env_with_both(name: &str) -> Option<String> {
    match name {
      API_KEY_VAR => Some("re_env".to_owned()),
      CONTACT_EMAIL_VAR => Some("env@portfolio.dev".to_owned()),
      _ => None,
    }
  }

  fn env_blank(_: &str) -> Option<String> { Some("  ".to_owned()) }

  fn env_empty(_: &str) -> Option<String> { None }

  #[test]
  fn environment_overrides_file_values() {
    let source = EnvConfig::with_lookup(
      DeliveryConfig {
        api_key: Some("re_file".into()),
        ..DeliveryConfig::default()
      },
      env_with_both,
    );
    let delivery = source.delivery();
    assert_eq!(delivery.api_key.as_deref(), Some("re_env"));
    assert_eq!(delivery.contact_email.as_deref(), Some("env@portfolio.dev"));
    assert_eq!(delivery.from_address, DEFAULT_FROM_ADDRESS);
  }

  #[test]
  fn blank_environment_falls_back_to_file() {
    let fallback = DeliveryConfig {
      api_key: Some("re_file".into()),
      ..DeliveryConfig::default()
    };
    let delivery = EnvConfig::with_lookup(fallback, env_blank).delivery();
    assert_eq!(delivery.api_key.as_deref(), Some("re_file"));
    assert_eq!(delivery.contact_email, None);
    assert!(!delivery.is_configured());
  }

  #[test]
  fn nothing_set_means_unconfigured() {
    let delivery =
      EnvConfig::with_lookup(DeliveryConfig::default(), env_empty).delivery();
    assert!(!delivery.is_configured());
  }

  #[tokio::test]
  async fn app_serves_contact_api_under_prefix() {
    let router = app(&parse(""), StaticConfig::default()).unwrap();
    let body = json!({
      "name": "Jo",
      "email": "jo@x.com",
      "subject": "Hello there",
      "message": "This is a test message.",
    });
    let req = Request::builder()
      .method("POST")
      .uri("/api/contact")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();

    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["success"], true);
    assert!(value.get("id").is_none());
  }

  #[tokio::test]
  async fn unknown_routes_are_not_found() {
    let router = app(&parse(""), StaticConfig::default()).unwrap();
    let req = Request::builder()
      .uri("/api/projects")
      .body(Body::empty())
      .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
