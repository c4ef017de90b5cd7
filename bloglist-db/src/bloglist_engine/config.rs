use std::{fmt::Display, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bloglist_engine::types::StoreError;

/// Runtime configuration shared by the storage core and the gateway.
///
/// Values come from `Config::default()`, optionally a `config.bloglist.json`
/// file, and finally `BLOGLIST_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub db_path: String,
    pub db_max_size_gb: Option<usize>,
    pub workers: usize,
    pub min_password_len: usize,
    pub min_username_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            db_path: "./bloglist-data".to_string(),
            db_max_size_gb: Some(1),
            workers: Self::DEFAULT_WORKERS,
            min_password_len: 3,
            min_username_len: 3,
        }
    }
}

impl Config {
    pub const DEFAULT_PORT: u16 = 3003;
    pub const DEFAULT_WORKERS: usize = 4;
    pub const CONFIG_FILE_NAME: &'static str = "config.bloglist.json";

    /// Reads a JSON config file. Missing keys fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::ConfigFileNotFound);
        }
        let raw = fs::read(path)?;
        Ok(sonic_rs::from_slice(&raw)?)
    }

    /// Builds the config from the process environment on top of the defaults.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlays `BLOGLIST_*` variables returned by `lookup`.
    ///
    /// Unparsable values are logged and ignored, keeping the current value.
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.port = parse_or("BLOGLIST_PORT", &lookup, self.port);
        self.workers = parse_or("BLOGLIST_WORKERS", &lookup, self.workers);
        if lookup("BLOGLIST_DB_MAX_SIZE_GB").is_some() {
            let current = self.db_max_size_gb.unwrap_or(1);
            self.db_max_size_gb = Some(parse_or("BLOGLIST_DB_MAX_SIZE_GB", &lookup, current));
        }
        if let Some(path) = lookup("BLOGLIST_DB_PATH") {
            info!(path = %path, "Using BLOGLIST_DB_PATH");
            self.db_path = path;
        }
        self
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// LMDB map size in bytes.
    pub fn db_map_size(&self) -> usize {
        let db_size = if self.db_max_size_gb.unwrap_or(1) >= 9999 {
            9998
        } else {
            self.db_max_size_gb.unwrap_or(1)
        };
        db_size * 1024 * 1024 * 1024
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, current: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => {
                info!("{key} set to {value}");
                value
            }
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}, keeping {current}");
                current
            }
        },
        None => current,
    }
}
