//! Configuration management for cohere.
//!
//! This module handles loading and saving configuration from `~/.cohere/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DisplayConfig, GeneralConfig, SessionConfig};
