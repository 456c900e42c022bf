//! Configuration settings for cohere.
//!
//! Settings are loaded from `~/.cohere/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::CohereError;
use crate::features::breathing::{SessionOptions, TimeLimit};

/// Presets reachable from the start screen.
pub const MAX_PRESETS: usize = 3;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session behaviour.
    pub session: SessionConfig,
    /// Animation settings.
    pub display: DisplayConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format for summaries.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored` output for the rest of the process.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Session behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Chime on every phase transition.
    #[serde(default)]
    pub sound: bool,
    /// Keep the display awake while a session runs.
    #[serde(default = "default_true")]
    pub keep_awake: bool,
    /// Preset session lengths in minutes, shown on the start screen.
    ///
    /// Only the first three are used; they are bound to keys `a`, `b`, `c`.
    #[serde(default = "default_presets")]
    pub presets: Vec<u32>,
    /// Limit pre-filled on the start screen.
    #[serde(default)]
    pub default_limit_minutes: Option<u32>,
}

/// Animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Frames per second requested from the terminal.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Marker radius in surface units.
    #[serde(default = "default_base_radius")]
    pub base_radius: f64,
    /// Guide line inset from the panel edges, in surface units.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_true() -> bool {
    true
}

fn default_presets() -> Vec<u32> {
    vec![2, 5, 10]
}

const fn default_frame_rate() -> u32 {
    30
}

const fn default_base_radius() -> f64 {
    1.5
}

const fn default_margin() -> f64 {
    2.0
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sound: false,
            keep_awake: default_true(),
            presets: default_presets(),
            default_limit_minutes: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            base_radius: default_base_radius(),
            margin: default_margin(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, CohereError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CohereError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            CohereError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), CohereError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| CohereError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            CohereError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Engine options derived from these settings.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            sound: self.session.sound,
            keep_awake: self.session.keep_awake,
            base_radius: self.display.base_radius,
            margin: self.display.margin,
        }
    }

    /// Configured presets, with zero entries dropped and at most
    /// [`MAX_PRESETS`] kept.
    #[must_use]
    pub fn presets(&self) -> Vec<TimeLimit> {
        self.session
            .presets
            .iter()
            .filter_map(|m| TimeLimit::from_minutes(*m))
            .take(MAX_PRESETS)
            .collect()
    }

    /// Default start-screen limit.
    #[must_use]
    pub fn default_limit(&self) -> Option<TimeLimit> {
        self.session
            .default_limit_minutes
            .and_then(TimeLimit::from_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(!config.session.sound);
        assert!(config.session.keep_awake);
        assert_eq!(config.session.presets, vec![2, 5, 10]);
        assert_eq!(config.display.frame_rate, 30);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.session.sound = true;
        config.session.presets = vec![3, 7];
        config.display.base_radius = 2.5;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert!(loaded.session.sound);
        assert_eq!(loaded.session.presets, vec![3, 7]);
        assert!((loaded.display.base_radius - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r"
session:
  sound: true
  default_limit_minutes: 5
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        // Custom values should be loaded
        assert!(config.session.sound);
        assert_eq!(config.default_limit(), TimeLimit::from_minutes(5));
        // Defaults should be used for missing fields
        assert!(config.session.keep_awake);
        assert_eq!(config.session.presets, vec![2, 5, 10]);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, CohereError::Config(_)));
    }

    #[test]
    fn test_presets_skip_zero() {
        let mut config = Config::default();
        config.session.presets = vec![0, 4];
        let presets: Vec<u32> = config.presets().into_iter().map(TimeLimit::minutes).collect();
        assert_eq!(presets, vec![4]);
    }

    #[test]
    fn test_presets_capped_at_three() {
        let mut config = Config::default();
        config.session.presets = vec![1, 0, 2, 3, 4, 5];
        let presets: Vec<u32> = config.presets().into_iter().map(TimeLimit::minutes).collect();
        assert_eq!(presets, vec![1, 2, 3]);
    }

    #[test]
    fn test_session_options() {
        let mut config = Config::default();
        config.session.keep_awake = false;
        let options = config.session_options();
        assert!(!options.keep_awake);
        assert!((options.margin - 2.0).abs() < f64::EPSILON);
    }
}
