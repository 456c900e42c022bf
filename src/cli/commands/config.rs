//! Configuration commands.

use tracing::info;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::CohereError;
use crate::output::{format_config, to_json};

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn config(
    paths: &Paths,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, CohereError> {
    match cmd {
        ConfigCommands::Show => {
            let config = Config::load_from_path(&paths.config_file)?;
            format_config(&config, format)
        }
        ConfigCommands::Path => match format {
            OutputFormat::Json => to_json(&paths.config_file),
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
        },
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Ok(format!(
                    "Config already exists: {} (use --force to overwrite)",
                    paths.config_file.display()
                ));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            info!(path = %paths.config_file.display(), "wrote default config");
            Ok(format!("Wrote {}", paths.config_file.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> Paths {
        Paths::with_root(temp_dir.path().join(".cohere"))
    }

    #[test]
    fn test_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let out = config(&paths, ConfigCommands::Path, OutputFormat::Pretty).unwrap();
        assert!(out.ends_with("config.yaml"));
    }

    #[test]
    fn test_init_then_refuse() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);

        config(&paths, ConfigCommands::Init { force: false }, OutputFormat::Pretty).unwrap();
        assert!(paths.config_file.exists());

        let out = config(&paths, ConfigCommands::Init { force: false }, OutputFormat::Pretty)
            .unwrap();
        assert!(out.contains("already exists"));

        let out = config(&paths, ConfigCommands::Init { force: true }, OutputFormat::Pretty)
            .unwrap();
        assert!(out.starts_with("Wrote"));
    }

    #[test]
    fn test_show_defaults_as_json() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let out = config(&paths, ConfigCommands::Show, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["display"]["frame_rate"], 30);
    }
}
