//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::batch::BatchArgs;
use crate::commands::count::CountArgs;

/// Allowed-day counter.
///
/// Counts the days between two dates whose weekday is allowed and whose date
/// is not excluded. The start day is counted, the end day never is.
#[derive(Debug, Parser)]
#[command(name = "daydiff", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count allowed days between two dates.
    Count(CountArgs),

    /// Count allowed days for every range in a JSONL file.
    Batch(BatchArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_count_flags() {
        let cli = Cli::parse_from([
            "daydiff",
            "count",
            "2020-01-06",
            "2020-01-13",
            "--weekdays",
            "1,2,3,4,5",
            "--exclude",
            "*-01-07",
            "-e",
            "2020-01-08",
        ]);

        let Some(Commands::Count(args)) = cli.command else {
            panic!("expected count subcommand");
        };
        assert_eq!(args.filters.weekdays, Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(args.filters.exclude, vec!["*-01-07", "2020-01-08"]);
        assert!(!args.json);
    }
}
