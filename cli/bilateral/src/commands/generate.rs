//! Project pool generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bilateral_id::EmployeeId;
use bilateral_pool::{build_pool, PoolConfig};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::error::CliError;
use crate::output::{print_json, print_success, OutputFormat};

use super::CommandContext;

/// Generate a project pool and write it as a dataset file.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Number of teams to generate (before duplicates are dropped).
    teams: usize,

    /// How many distinct Stockholm employees to draw from.
    stockholm_spread: usize,

    /// How many distinct London employees to draw from.
    london_spread: usize,

    /// How many teams include the preferred id.
    #[arg(default_value_t = 0)]
    preferred_teams: usize,

    /// Directory to write the dataset into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Also write the Prolog goal to `<dataset>.pl`.
    #[arg(long)]
    prolog: bool,

    /// Seed for a reproducible pool.
    #[arg(long)]
    seed: Option<u64>,

    /// Preferred employee id (defaults to BILATERAL_PREFERRED_ID or 1099).
    #[arg(long, value_name = "ID")]
    preferred: Option<EmployeeId>,
}

/// What was written.
#[derive(Debug, Serialize)]
struct GenerateReport {
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    prolog_path: Option<PathBuf>,
    teams: usize,
    participants: usize,
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let report = self.generate(&ctx)?;

        match ctx.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Table | OutputFormat::Text => {
                print_success(&format!(
                    "Wrote {} teams ({} people) to {}",
                    report.teams,
                    report.participants,
                    report.path.display()
                ));
                if let Some(prolog_path) = &report.prolog_path {
                    print_success(&format!("Wrote Prolog goal to {}", prolog_path.display()));
                }
            }
        }

        Ok(())
    }

    fn generate(&self, ctx: &CommandContext) -> Result<GenerateReport> {
        if self.out_dir.exists() && !self.out_dir.is_dir() {
            return Err(CliError::NotADirectory(self.out_dir.clone()).into());
        }

        let config = PoolConfig {
            teams: self.teams,
            stockholm_spread: self.stockholm_spread,
            london_spread: self.london_spread,
            preferred_teams: self.preferred_teams,
            preferred: self.preferred.unwrap_or(ctx.config.preferred),
        };

        let mut rng = ctx.rng(self.seed);
        let pool = build_pool(&config, &mut rng).context("Failed to build project pool")?;

        let path = self.out_dir.join(config.dataset_file_name());
        pool.write_to_file(&path)
            .with_context(|| format!("Failed to write dataset to {}", path.display()))?;

        let prolog_path = if self.prolog {
            let prolog_path = prolog_path_for(&path);
            pool.write_prolog_goal(&prolog_path).with_context(|| {
                format!("Failed to write Prolog goal to {}", prolog_path.display())
            })?;
            Some(prolog_path)
        } else {
            None
        };

        info!(path = %path.display(), teams = pool.len(), "Dataset written");

        Ok(GenerateReport {
            path,
            prolog_path,
            teams: pool.len(),
            participants: pool.participants(),
        })
    }
}

/// `dataset.txt` -> `dataset.txt.pl`
fn prolog_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".pl");
    PathBuf::from(name)
}
