//! Path management for Quokka
//!
//! ## Path Resolution Order
//!
//! 1. `QUOKKA_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory as reported by `directories`
//!    (e.g. `~/.config/quokka` on Linux, `%APPDATA%\quokka` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::QuokkaError;

/// Where settings, the catalog cache and the audit log live
#[derive(Debug, Clone)]
pub struct QuokkaPaths {
    base_dir: PathBuf,
}

impl QuokkaPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Fails when `QUOKKA_DATA_DIR` is unset and the platform reports no home.
    pub fn new() -> Result<Self, QuokkaError> {
        let base_dir = if let Ok(custom) = std::env::var("QUOKKA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Root everything at `base_dir`, ignoring the environment
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Cached backend data
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Hourly-based ids and service types
    pub fn services_file(&self) -> PathBuf {
        self.data_dir().join("services.json")
    }

    pub fn ensure_directories(&self) -> Result<(), QuokkaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| QuokkaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| QuokkaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// `quokka init` has written the settings file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, QuokkaError> {
    ProjectDirs::from("", "", "quokka")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| QuokkaError::Config("Could not determine a home directory".into()))
}
