// ⚙️ Configuration - environment-driven settings for the binaries

use crate::loader::{DatasetLoader, DirLoader, FallbackLoader};
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "IFSC_DATA_DIR";
pub const FALLBACK_DATA_DIR_VAR: &str = "IFSC_FALLBACK_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "IFSC_BIND_ADDR";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the five dataset files
    pub data_dir: PathBuf,

    /// Consulted for any dataset missing from `data_dir`
    pub fallback_data_dir: Option<PathBuf>,

    /// Server listen address
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            fallback_data_dir: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            data_dir: get(DATA_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.data_dir),
            fallback_data_dir: get(FALLBACK_DATA_DIR_VAR).map(PathBuf::from),
            bind_addr: get(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
        }
    }

    /// Loader chain for the configured directories
    pub fn loader(&self) -> Box<dyn DatasetLoader> {
        let primary = DirLoader::new(&self.data_dir);
        match &self.fallback_data_dir {
            Some(fallback) => Box::new(FallbackLoader::new(primary, DirLoader::new(fallback))),
            None => Box::new(primary),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
