//! Path resolution for cohere configuration and log files.
//!
//! All cohere data is stored in `~/.cohere/`:
//! - `config.yaml` - Main configuration file
//! - `cohere.log` - Log output while the TUI owns the terminal

use std::path::PathBuf;

use crate::error::CohereError;

/// Paths to cohere configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.cohere/`
    pub root: PathBuf,
    /// Config file: `~/.cohere/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.cohere/cohere.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CohereError> {
        let home = std::env::var("HOME")
            .map_err(|_| CohereError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".cohere")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("cohere.log"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), CohereError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                CohereError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
