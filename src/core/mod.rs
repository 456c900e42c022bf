//! Core abstractions for cohere.
//!
//! This module provides the clock, timestamp and collaborator traits shared
//! by the breathing engine and its hosts.

mod time;
mod traits;

pub use time::{ManualClock, SystemClock, Timestamp};
pub use traits::{Clock, NoStayAwake, Silent, StayAwake, Surface, TonePlayer};

#[cfg(test)]
pub use traits::{MockStayAwake, MockTonePlayer};
