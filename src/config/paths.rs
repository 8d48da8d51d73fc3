//! Path management for spendscope
//!
//! Provides XDG-compliant path resolution for configuration and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDSCOPE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/spendscope` or `~/.config/spendscope`
//! 3. Windows: `%APPDATA%\spendscope`

use std::path::{Path, PathBuf};

use crate::error::SpendscopeError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "SPENDSCOPE_DATA_DIR";

/// Manages all paths used by spendscope
#[derive(Debug, Clone)]
pub struct SpendscopePaths {
    /// Base directory for all spendscope files
    base_dir: PathBuf,
}

impl SpendscopePaths {
    /// Create a new SpendscopePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SpendscopeError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SpendscopePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendscope/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default directory for exports (~/.config/spendscope/exports/)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendscopeError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SpendscopeError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.exports_dir()).map_err(|e| {
            SpendscopeError::Io(format!("Failed to create exports directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SpendscopeError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                SpendscopeError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("spendscope"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SpendscopeError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SpendscopeError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("spendscope"))
}
