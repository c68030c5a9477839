//! File system paths for the client.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client runtime files (~/.staffdesk)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.staffdesk`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".staffdesk"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.staffdesk).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.staffdesk/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the credentials file path (~/.staffdesk/credentials.json).
    pub fn credentials_file(&self) -> PathBuf {
        self.base_dir.join("credentials.json")
    }

    /// Get the logs directory (~/.staffdesk/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("Failed to determine home directory")
    }
}
