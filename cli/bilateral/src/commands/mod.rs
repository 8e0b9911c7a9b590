//! CLI commands.

mod generate;
mod solve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::output::OutputFormat;

/// bilateral - pick one attendee per two-person project team.
#[derive(Debug, Parser)]
#[command(name = "bilateral")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text, table, or json).
    #[arg(long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a synthetic project pool.
    Generate(generate::GenerateCommand),

    /// Select attendees for a project list.
    Solve(solve::SolveCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: OutputFormat::parse(&self.format),
        };

        match self.command {
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Solve(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("bilateral {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve the seed, preferring the flag over the environment.
    pub fn resolve_seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.config.seed)
    }

    /// Random source for the given seed, or an OS-seeded one.
    pub fn rng(&self, flag: Option<u64>) -> StdRng {
        match self.resolve_seed(flag) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve_args() {
        let cli = Cli::try_parse_from([
            "bilateral",
            "--format",
            "json",
            "solve",
            "dataset.txt",
            "--strategy",
            "exhaustive",
            "--preferred",
            "1009",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        assert!(matches!(cli.command, Commands::Solve(_)));
    }

    #[test]
    fn test_parse_rejects_bad_preferred() {
        let result = Cli::try_parse_from(["bilateral", "solve", "dataset.txt", "--preferred", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_flag_wins() {
        let ctx = CommandContext {
            config: Config {
                seed: Some(1),
                ..Config::default()
            },
            format: OutputFormat::Text,
        };
        assert_eq!(ctx.resolve_seed(Some(7)), Some(7));
        assert_eq!(ctx.resolve_seed(None), Some(1));
    }
}
