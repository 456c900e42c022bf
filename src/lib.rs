//! cohere - a guided coherent-breathing timer for the terminal
//!
//! This crate provides the breathing session engine (phase timer, session
//! clock, render loop and the controller that ties them together) and a
//! ratatui front end for it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod system;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::CohereError;
pub use features::breathing::{SessionController, SessionState};
