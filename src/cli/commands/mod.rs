//! Command implementations for cohere.
//!
//! Each command returns the text to print, already formatted for the
//! requested output format.

mod completions;
mod config;
mod session;
mod simulate;

pub use completions::completions;
pub use config::config;
pub use session::session;
pub use simulate::simulate;
