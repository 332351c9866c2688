//! Configuration for the beacon adapter, read from a TOML file or environment
//! variables prefixed with `BEACON_`.
//!

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use serde_with::with_prefix;
use tracing::subscriber::set_global_default;
use tracing_subscriber::fmt::{format, layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::service_info::Beacon;
use crate::config::FormattingStyle::{Compact, Full, Json, Pretty};
use crate::error::Error::{IoError, TracingError};
use crate::error::Result;

pub mod service_info;

const ENVIRONMENT_VARIABLE_PREFIX: &str = "BEACON_";

/// The GA4GH reference deployment queried when no other endpoint is configured.
pub(crate) fn default_gateway_url() -> &'static str {
  "http://1kgenomes.ga4gh.org/"
}

/// Determines which tracing formatting style to use.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default)]
pub enum FormattingStyle {
  #[default]
  Full,
  Compact,
  Pretty,
  Json,
}

with_prefix!(gateway_prefix "gateway_");

/// Configuration for the beacon adapter.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  formatting_style: FormattingStyle,
  #[serde(flatten, with = "gateway_prefix")]
  gateway: GatewayConfig,
  #[serde(flatten)]
  beacon: Beacon,
}

/// Configuration for the remote variant data gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
  url: String,
}

impl GatewayConfig {
  /// Create a new gateway config.
  pub fn new(url: impl Into<String>) -> Self {
    Self { url: url.into() }
  }

  /// Get the base url of the gateway.
  pub fn url(&self) -> &str {
    &self.url
  }
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      url: default_gateway_url().to_string(),
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      formatting_style: Full,
      gateway: GatewayConfig::default(),
      beacon: Beacon::default(),
    }
  }
}

impl Config {
  /// Create a new config.
  pub fn new(formatting_style: FormattingStyle, gateway: GatewayConfig, beacon: Beacon) -> Self {
    Self {
      formatting_style,
      gateway,
      beacon,
    }
  }

  /// Read a config struct from a TOML file, merging environment variables over
  /// the file contents.
  pub fn from_path(path: &Path) -> Result<Self> {
    Figment::from(Serialized::defaults(Config::default()))
      .merge(Toml::file(path))
      .merge(Env::prefixed(ENVIRONMENT_VARIABLE_PREFIX))
      .extract()
      .map_err(|err| IoError(err.to_string()))
  }

  /// Setup tracing, using a global subscriber.
  pub fn setup_tracing(&self) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = Registry::default().with(env_filter);

    match self.formatting_style() {
      Full => set_global_default(subscriber.with(layer())),
      Compact => set_global_default(subscriber.with(layer().event_format(format().compact()))),
      Pretty => set_global_default(subscriber.with(layer().event_format(format().pretty()))),
      Json => set_global_default(subscriber.with(layer().event_format(format().json()))),
    }
    .map_err(|err| TracingError(err.to_string()))?;

    Ok(())
  }

  /// Get the formatting style.
  pub fn formatting_style(&self) -> FormattingStyle {
    self.formatting_style
  }

  /// Get the gateway config.
  pub fn gateway(&self) -> &GatewayConfig {
    &self.gateway
  }

  /// Get the beacon identity.
  pub fn beacon(&self) -> &Beacon {
    &self.beacon
  }
}
