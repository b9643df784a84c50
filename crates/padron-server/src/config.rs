//! Layered server configuration.
//!
//! Sources, later ones winning: built-in defaults, the optional TOML file named
//! by `--config`, then `PADRON_*` environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use ::config::{Config, ConfigError, Environment, File};
use padron_api::Settings;
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `PADRON_PORT=8001`.
pub const ENV_PREFIX: &str = "PADRON";

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  /// SQLite file attached as the `bdi` schema; `:memory:` for a scratch store.
  pub store_path:        PathBuf,
  pub service_name:      String,
  pub peer_host:         String,
  pub peer_port:         u16,
  pub peer_timeout_secs: u64,
  pub hang_secs:         u64,
  pub leak_iterations:   usize,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
  }

  fn load_with_env(path: &Path, env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000_i64)?
      .set_default("store_path", "padron.db")?
      .set_default("service_name", "A")?
      .set_default("peer_host", "service_b")?
      .set_default("peer_port", 8001_i64)?
      .set_default("peer_timeout_secs", 5_i64)?
      .set_default("hang_secs", 15_i64)?
      .set_default("leak_iterations", 10_000_000_i64)?
      .add_source(File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn peer_timeout(&self) -> Duration {
    Duration::from_secs(self.peer_timeout_secs)
  }

  /// The handler-facing subset.
  pub fn settings(&self) -> Settings {
    Settings {
      service_name:    self.service_name.clone(),
      hang:            Duration::from_secs(self.hang_secs),
      leak_iterations: self.leak_iterations,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn env(vars: &[(&str, &str)]) -> Environment {
    let source: HashMap<String, String> = vars
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect();
    Environment::with_prefix(ENV_PREFIX).source(Some(source))
  }

  #[test]
  fn defaults_apply_without_file_or_env() {
    let cfg =
      ServerConfig::load_with_env(Path::new("does-not-exist.toml"), env(&[]))
        .unwrap();

    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.store_path, PathBuf::from("padron.db"));
    assert_eq!(cfg.service_name, "A");
    assert_eq!(cfg.peer_host, "service_b");
    assert_eq!(cfg.peer_port, 8001);
    assert_eq!(cfg.peer_timeout(), Duration::from_secs(5));

    let settings = cfg.settings();
    assert_eq!(settings.hang, Duration::from_secs(15));
    assert_eq!(settings.leak_iterations, 10_000_000);
  }

  #[test]
  fn env_overrides_file() {
    let path = std::env::temp_dir()
      .join(format!("padron-config-{}.toml", std::process::id()));
    std::fs::write(
      &path,
      "port = 9000\nservice_name = \"from-file\"\npeer_port = 9001\n",
    )
    .unwrap();

    let cfg = ServerConfig::load_with_env(
      &path,
      env(&[("PADRON_SERVICE_NAME", "B"), ("PADRON_STORE_PATH", ":memory:")]),
    )
    .unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.peer_port, 9001);
    assert_eq!(cfg.service_name, "B");
    assert_eq!(cfg.store_path, PathBuf::from(":memory:"));
  }
}
