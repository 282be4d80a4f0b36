//! Per-request delivery configuration.

use folio_core::dispatch::DeliveryConfig;

/// Produces the [`DeliveryConfig`] for one request.
///
/// Called once per submission, so implementations may re-read their backing
/// source (e.g. the process environment) each time.
pub trait ConfigSource: Send + Sync {
  fn delivery(&self) -> DeliveryConfig;
}

/// A fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub DeliveryConfig);

impl ConfigSource for StaticConfig {
  fn delivery(&self) -> DeliveryConfig { self.0.clone() }
}
