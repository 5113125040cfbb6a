//! Server configuration: a TOML file layered under `CASEFILE_*` environment
//! variables.

use std::{path::PathBuf, time::Duration};

use casefile_xref::{Strategy, enrich::DEFAULT_MAX_CONCURRENCY};
use config::{Config, ConfigError, Environment, Source};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "CASEFILE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// SQLite database file. A leading `~/` is expanded at startup.
  pub store_path:          PathBuf,
  pub strategy:            Strategy,
  /// In-flight resolutions under the `fan_out` strategy.
  pub max_concurrency:     usize,
  /// Per-request deadline for enrichment and lookups.
  pub enrich_timeout_secs: u64,
  /// Default length of the top repeat-offender list in `/stats`.
  pub top_n:               usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      store_path:          PathBuf::from("~/.local/share/casefile/casefile.db"),
      strategy:            Strategy::default(),
      max_concurrency:     DEFAULT_MAX_CONCURRENCY,
      enrich_timeout_secs: 30,
      top_n:               10,
    }
  }
}

impl ServerConfig {
  /// Read `file` (if present) and overlay the process environment.
  pub fn load(file: PathBuf) -> Result<Self, ConfigError> {
    Self::assemble(
      config::File::from(file).required(false),
      Environment::with_prefix(ENV_PREFIX).try_parsing(true),
    )
  }

  fn assemble<F>(file: F, env: Environment) -> Result<Self, ConfigError>
  where
    F: Source + Send + Sync + 'static,
  {
    Config::builder()
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn enrich_timeout(&self) -> Duration {
    Duration::from_secs(self.enrich_timeout_secs)
  }
}
