// Copyright 2025 cvbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Service configuration.
//!
//! Values come from built-in defaults overlaid with `CVBENCH_*` environment
//! variables (a `.env` file is read first by the binaries). Nested keys use a
//! double underscore, e.g. `CVBENCH_MOCK_DATA__ENABLED=true`.
//!
//! | Key | Env | Default |
//! |---|---|---|
//! | `host` | `CVBENCH_HOST` | `127.0.0.1` |
//! | `port` | `CVBENCH_PORT` | `5000` |
//! | `data_dir` | `CVBENCH_DATA_DIR` | `data` |
//! | `static_dir` | `CVBENCH_STATIC_DIR` | `frontend/dist` |
//! | `fallback_file` | `CVBENCH_FALLBACK_FILE` | `default_mock_data.json` |
//! | `log_format` | `CVBENCH_LOG_FORMAT` | `text` |
//! | `mock_data.enabled` | `CVBENCH_MOCK_DATA__ENABLED` | `false` |
//! | `mock_data.count` | `CVBENCH_MOCK_DATA__COUNT` | `20` |
//! | `mock_data.seed` | `CVBENCH_MOCK_DATA__SEED` | unset |

use config::{Config, ConfigError, Environment, Map};
use cvbench_records::{RecordLoader, DEFAULT_FALLBACK_FILE, DEFAULT_MOCK_COUNT};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CVBENCH";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Placeholder data served when the data directory yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockDataConfig {
    /// Serve generated records instead of an empty list.
    pub enabled: bool,
    /// Records per response.
    pub count: usize,
    /// Fixed seed; every response is then identical.
    pub seed: Option<u64>,
}

impl Default for MockDataConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: DEFAULT_MOCK_COUNT,
            seed: None,
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Directory holding the benchmark JSON files.
    pub data_dir: PathBuf,
    /// Built frontend bundle.
    pub static_dir: PathBuf,
    /// Reserved fallback filename; empty disables the fallback.
    pub fallback_file: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Demo-mode placeholder records.
    pub mock_data: MockDataConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("frontend/dist"),
            fallback_file: DEFAULT_FALLBACK_FILE.to_string(),
            log_format: LogFormat::Text,
            mock_data: MockDataConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load defaults overlaid with the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(environment())
    }

    /// Load defaults overlaid with an explicit set of variables instead of
    /// the process environment.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, ConfigError> {
        Self::from_environment(environment().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("static_dir", defaults.static_dir.to_string_lossy().into_owned())?
            .set_default("fallback_file", defaults.fallback_file)?
            .set_default("log_format", "text")?
            .set_default("mock_data.enabled", defaults.mock_data.enabled)?
            .set_default("mock_data.count", defaults.mock_data.count as i64)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::Message(format!("Invalid host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Loader honouring the configured fallback filename.
    pub fn loader(&self) -> RecordLoader {
        if self.fallback_file.trim().is_empty() {
            RecordLoader::without_fallback()
        } else {
            RecordLoader::new(Some(self.fallback_file.as_str()))
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
