use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "cohere")]
#[command(about = "A guided coherent-breathing timer for the terminal")]
#[command(long_about = "cohere - coherent breathing in your terminal

Breathe in for 5.5 seconds, out for 5.5 seconds. A marker rises along a
guide line while you inhale and falls while you exhale. Optionally chime on
every phase change and stop automatically after a number of minutes.

QUICK START:
  cohere                    Open the start screen
  cohere start --limit 5    Start a 5-minute session right away
  cohere simulate -l 1      Print a 1-minute session timeline

KEYS (start screen):
  Enter/Space  start     s  sound on/off     0-9  session length
  a/b/c        presets   q  quit

KEYS (running):
  Space/p  pause     r  reset     a/b/c  restart with preset     q  quit

For more information on a specific command, run:
  cohere <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// Overridden by the COHERE_LOG environment variable.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the breathing timer (default)
    ///
    /// Shows the start screen where you can toggle sound, type a session
    /// length, or pick a preset. A summary of the last session is printed
    /// when you quit.
    ///
    /// # Examples
    ///
    ///   cohere tui
    ///   cohere                Same thing
    Tui,

    /// Start a session immediately
    ///
    /// Skips the start screen. Without --limit the session runs until you
    /// pause or quit; with it, the session completes at the end of the
    /// first full exhale after the limit is reached.
    ///
    /// # Examples
    ///
    ///   cohere start
    ///   cohere start --limit 10 --sound
    ///   cohere start -l 2 --no-sound
    #[command(alias = "s")]
    Start(StartArgs),

    /// Print a session timeline without waiting
    ///
    /// Runs the timing engine against a simulated clock and prints every
    /// phase change and the completion point.
    ///
    /// # Examples
    ///
    ///   cohere simulate --limit 1
    ///   cohere simulate --seconds 30 -o json
    #[command(alias = "sim")]
    Simulate(SimulateArgs),

    /// Show or create the configuration file
    ///
    /// # Examples
    ///
    ///   cohere config path
    ///   cohere config show
    ///   cohere config init
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   cohere completions zsh > ~/.zsh/completions/_cohere
    ///   cohere completions bash > /usr/local/etc/bash_completion.d/cohere
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `cohere start`.
#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// Session length in minutes
    ///
    /// Non-digit characters are ignored; 0 means no limit.
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Chime on every phase change
    #[arg(long, conflicts_with = "no_sound")]
    pub sound: bool,

    /// Never chime, even if enabled in the config
    #[arg(long)]
    pub no_sound: bool,
}

impl StartArgs {
    /// Sound override from the flags, if any.
    #[must_use]
    pub const fn sound_override(&self) -> Option<bool> {
        if self.sound {
            Some(true)
        } else if self.no_sound {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for `cohere simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Session length in minutes
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Stop after this many seconds if the session has not completed
    #[arg(long, default_value_t = 60)]
    pub seconds: u64,
}

/// Arguments for `cohere config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
