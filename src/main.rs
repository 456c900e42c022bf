use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cohere::cli::args::{Cli, Commands};
use cohere::cli::commands;
use cohere::config::{Config, Paths};
use cohere::logging::{init_logging, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let interactive = matches!(cli.command, None | Some(Commands::Tui | Commands::Start(_)));
    if interactive {
        paths.ensure_dirs()?;
        init_logging(LogTarget::File(&paths.log_file), cli.verbose.saturating_add(1))?;
    } else {
        init_logging(LogTarget::Stderr, cli.verbose)?;
    }

    let output = match cli.command {
        None | Some(Commands::Tui) => {
            commands::session(&config, None, format).context("session failed")?
        }
        Some(Commands::Start(args)) => {
            commands::session(&config, Some(&args), format).context("session failed")?
        }
        Some(Commands::Simulate(args)) => commands::simulate(&config, &args, format)?,
        Some(Commands::Config(args)) => commands::config(&paths, args.command, format)?,
        Some(Commands::Completions { shell }) => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
