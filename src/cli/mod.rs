//! Command-line interface for cohere.

pub mod args;
pub mod commands;
