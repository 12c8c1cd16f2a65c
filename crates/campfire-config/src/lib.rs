//! Shared configuration for the Campfire CLI.
//!
//! A flat TOML file merged with `CAMPFIRE_*` environment variables, and
//! translation to `campfire_core::CoreConfig`. The CLI layers its own
//! flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campfire_core::CoreConfig;

/// Prefix for environment overrides (`CAMPFIRE_BASE_URL`, ...).
pub const ENV_PREFIX: &str = "CAMPFIRE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Catalog service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Where the persisted snapshot lives. Platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Snapshot namespace key.
    #[serde(default = "default_persist_key")]
    pub persist_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            data_dir: None,
            persist_key: default_persist_key(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3001/".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_persist_key() -> String {
    campfire_core::config::DEFAULT_PERSIST_KEY.into()
}

impl Config {
    /// Validate and translate into the core runtime config.
    pub fn to_core_config(&self) -> Result<CoreConfig, ConfigError> {
        let url: url::Url = self
            .base_url
            .parse()
            .map_err(|e: url::ParseError| ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("{e}: {}", self.base_url),
            })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", url.scheme()),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        let key = self.persist_key.trim();
        if key.is_empty() {
            return Err(ConfigError::Validation {
                field: "persist_key".into(),
                reason: "must not be empty".into(),
            });
        }

        Ok(CoreConfig::new(url)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_persist_key(key))
    }

    /// The configured data directory, or the platform default.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(data_dir)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "campfire", "campfire")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for the persisted snapshot.
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn dirs_fallback(base: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(base);
    p.push("campfire");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` plus environment. A missing file yields the
/// defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&["base_url", "timeout", "data_dir", "persist_key"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Render config as pretty TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml(cfg)?)?;
    Ok(())
}

/// Serialize config to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let core = Config::default().to_core_config().unwrap();
        assert_eq!(core.base_url.as_str(), "http://localhost:3001/");
        assert_eq!(core.timeout, Duration::from_secs(30));
        assert_eq!(core.storage_key(), "persist:root");
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    base_url = "https://camp.example.com/api"
                    timeout = 5
                "#,
            )?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.base_url, "https://camp.example.com/api");
            assert_eq!(cfg.timeout, 5);
            assert_eq!(cfg.persist_key, "root");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "timeout = 5")?;
            jail.set_env("CAMPFIRE_TIMEOUT", "12");
            jail.set_env("CAMPFIRE_PERSIST_KEY", "staging");
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.timeout, 12);
            assert_eq!(cfg.persist_key, "staging");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_url = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            bad_url.to_core_config(),
            Err(ConfigError::Validation { field, .. }) if field == "base_url"
        ));

        let ftp = Config {
            base_url: "ftp://files.example.com/".into(),
            ..Config::default()
        };
        assert!(ftp.to_core_config().is_err());

        let zero = Config {
            timeout: 0,
            ..Config::default()
        };
        assert!(zero.to_core_config().is_err());

        let blank = Config {
            persist_key: "  ".into(),
            ..Config::default()
        };
        assert!(blank.to_core_config().is_err());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            base_url: "http://10.0.0.2:3001/".into(),
            timeout: 10,
            data_dir: Some(dir.path().join("data")),
            persist_key: "root".into(),
        };

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }
}
