//! Service configuration.
//!
//! Sources, lowest precedence first:
//!   1) [`ServiceConfig::default`]
//!   2) an optional config file (any format the `config` crate recognizes)
//!   3) `DUST_`-prefixed environment variables, nested with `__`
//!
//! Examples:
//!   DUST_LOG_LEVEL=debug
//!   DUST_SNAPSHOT_PATH=/var/lib/dust/snapshot.json
//!   DUST_SCHEDULE__MONTH_DURATION=2592000

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use dust_core::error::DustError;
use dust_core::params::ScheduleParams;

const ENV_PREFIX: &str = "DUST";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// JSON snapshot the in-memory store is loaded from.
    pub snapshot_path: PathBuf,
    /// Log level filter string (e.g. "info", "dust_projection=debug").
    pub log_level: String,
    /// "text" or "json".
    pub log_format: String,
    pub schedule: ScheduleParams,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dust");

        Self {
            snapshot_path: data_dir.join("snapshot.json"),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            schedule: ScheduleParams::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from defaults, `path` if given, and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, DustError> {
        Self::load_with_env(path, environment())
    }

    /// Like [`load`](Self::load) with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, DustError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(DustError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }
        let cfg: Self = builder
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| DustError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DustError> {
        self.schedule
            .validate()
            .map_err(|e| DustError::Config(e.to_string()))?;
        if self.log_format != "text" && self.log_format != "json" {
            return Err(DustError::Config(format!(
                "log_format must be \"text\" or \"json\", got {:?}",
                self.log_format
            )));
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
