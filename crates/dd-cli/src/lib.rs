//! Allowed-day counter CLI library.
//!
//! This crate provides the CLI interface for `dd-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
