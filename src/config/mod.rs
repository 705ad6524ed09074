//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SETID_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_TOP_K;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SETID_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `{game}.vec` / `{game}_meta.json` index files.
    /// Default: `./index`.
    pub index_dir: PathBuf,

    /// Nearest neighbors retrieved per query vector. Default: `20`.
    pub top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_dir: PathBuf::from("./index"),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    const ENV_INDEX_DIR: &'static str = "SETID_INDEX_DIR";
    const ENV_TOP_K: &'static str = "SETID_TOP_K";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let index_dir = Self::parse_path_from_env(Self::ENV_INDEX_DIR, defaults.index_dir);
        let top_k = Self::parse_top_k_from_env(defaults.top_k)?;

        Ok(Self { index_dir, top_k })
    }

    /// Validates that the index directory exists and is a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.index_dir.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.index_dir.clone(),
            });
        }
        if !self.index_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.index_dir.clone(),
            });
        }
        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_top_k_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_TOP_K) {
            Ok(value) => {
                let top_k: usize = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidTopK {
                        value: value.clone(),
                    })?;
                if top_k == 0 {
                    return Err(ConfigError::InvalidTopK { value });
                }
                Ok(top_k)
            }
            Err(_) => Ok(default),
        }
    }
}
