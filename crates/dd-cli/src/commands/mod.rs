//! CLI subcommand implementations.

pub mod batch;
pub mod count;
pub mod util;
