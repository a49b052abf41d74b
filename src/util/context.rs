//! Global context for Cupboard operations.
//!
//! Provides centralized access to configuration, paths, and environment.
//!
//! The home directory is `~/.cupboard/` unless `CUPBOARD_HOME` points
//! elsewhere. It holds the global config and a `state/` directory with the
//! offline store and any stored credentials.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config};

/// Overrides the home directory.
pub const ENV_HOME: &str = "CUPBOARD_HOME";

pub const MOCK_STORE_FILE: &str = "mock-store.json";
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Global context containing the paths Cupboard reads and writes.
#[derive(Debug, Clone)]
pub struct CupboardContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Cupboard data (~/.cupboard/)
    home: PathBuf,
}

impl CupboardContext {
    /// Create a context for the current directory and the user's home.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = match std::env::var_os(ENV_HOME) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => default_home(),
        };

        Ok(CupboardContext { cwd, home })
    }

    /// Create a context with explicit directories.
    pub fn with_paths(cwd: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        CupboardContext {
            cwd: cwd.into(),
            home: home.into(),
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Cupboard home directory (~/.cupboard/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project-local configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.cwd.join(".cupboard").join("config.toml")
    }

    /// Directory for files written between invocations.
    pub fn state_dir(&self) -> PathBuf {
        self.home.join("state")
    }

    pub fn mock_store_path(&self) -> PathBuf {
        self.state_dir().join(MOCK_STORE_FILE)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.state_dir().join(CREDENTIALS_FILE)
    }

    /// Merged config files with process environment overrides applied.
    pub fn load_config(&self) -> Config {
        let mut config = load_config(&self.config_path(), &self.project_config_path());
        config.apply_env(|key| std::env::var(key).ok());
        config
    }
}

fn default_home() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.home_dir().join(".cupboard"))
        .unwrap_or_else(|| PathBuf::from(".cupboard"))
}
