//! Platform collaborators for the breathing engine.
//!
//! Real implementations of the tone and stay-awake seams used by the TUI.

mod awake;
mod bell;

pub use awake::ProcessInhibitor;
pub use bell::TerminalBell;
