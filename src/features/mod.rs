//! Feature implementations for cohere.
//!
//! Currently a single feature: the guided breathing engine. Terminal and
//! CLI hosts live in `tui` and `cli`.

pub mod breathing;
