//! Attendee selection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bilateral_format::{AttendeeList, ParseOptions, ProjectList};
use bilateral_id::EmployeeId;
use bilateral_select::exhaustive::minimum_cover;
use bilateral_select::{select_attendees, RandomTieBreak, ResolutionStep};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::error::CliError;
use crate::output::{print_info, print_json, render_table, OutputFormat};

use super::CommandContext;

/// Select one attendee per project team.
#[derive(Debug, Args)]
pub struct SolveCommand {
    /// Project list file.
    file: PathBuf,

    /// Selection strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Preferred employee id (defaults to BILATERAL_PREFERRED_ID or 1099).
    #[arg(long, value_name = "ID")]
    preferred: Option<EmployeeId>,

    /// Seed for reproducible tie-breaks.
    #[arg(long)]
    seed: Option<u64>,

    /// Require Stockholm ids first and London ids second on every line.
    #[arg(long)]
    enforce_offices: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    /// Favor busy people, one project at a time.
    Greedy,
    /// Smallest possible attendee set (small inputs only).
    Exhaustive,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Greedy => f.write_str("greedy"),
            Strategy::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

/// Solver output.
#[derive(Debug, Serialize)]
struct SolveReport {
    strategy: Strategy,
    count: usize,
    attendees: Vec<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<ResolutionStep<EmployeeId>>>,
}

/// One resolution step as a table row.
#[derive(Debug, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: usize,

    #[tabled(rename = "Project")]
    project: String,

    #[tabled(rename = "Participation")]
    participation: String,

    #[tabled(rename = "Attendee")]
    attendee: EmployeeId,

    #[tabled(rename = "Teammate")]
    teammate: String,

    #[tabled(rename = "Decision")]
    decision: String,

    #[tabled(rename = "Removed")]
    removed: usize,
}

#[derive(Debug, Tabled)]
struct AttendeeRow {
    #[tabled(rename = "#")]
    position: usize,

    #[tabled(rename = "Attendee")]
    attendee: EmployeeId,

    #[tabled(rename = "Office")]
    office: String,
}

impl SolveCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let report = self.solve(&ctx)?;

        match ctx.format {
            OutputFormat::Text => {
                print!("{}", AttendeeList::from(report.attendees).serialize());
            }
            OutputFormat::Json => print_json(&report),
            OutputFormat::Table => {
                let table = match &report.steps {
                    Some(steps) => render_table(&step_rows(steps)),
                    None => render_table(&attendee_rows(&report.attendees)),
                };
                println!("{table}");
                print_info(&format!(
                    "{} attendee(s) selected ({})",
                    report.count, report.strategy
                ));
            }
        }

        Ok(())
    }

    fn solve(&self, ctx: &CommandContext) -> Result<SolveReport> {
        if !self.file.exists() {
            return Err(CliError::InputNotFound(self.file.clone()).into());
        }

        let options = ParseOptions {
            enforce_offices: self.enforce_offices,
        };
        let list = ProjectList::read_from_file(&self.file, &options).with_context(|| {
            format!("Failed to read project list from {}", self.file.display())
        })?;

        let preferred = self.preferred.unwrap_or(ctx.config.preferred);
        info!(
            teams = list.len(),
            participants = list.participants(),
            strategy = %self.strategy,
            preferred = %preferred,
            "Project list loaded"
        );

        let report = match self.strategy {
            Strategy::Greedy => {
                let tie_break = RandomTieBreak::new(ctx.rng(self.seed));
                let selection = select_attendees(list.into_projects(), Some(preferred), tie_break);
                SolveReport {
                    strategy: self.strategy,
                    count: selection.attendees.len(),
                    attendees: selection.attendees,
                    steps: Some(selection.steps),
                }
            }
            Strategy::Exhaustive => {
                let attendees = minimum_cover(list.projects(), Some(&preferred))?;
                SolveReport {
                    strategy: self.strategy,
                    count: attendees.len(),
                    attendees,
                    steps: None,
                }
            }
        };

        Ok(report)
    }
}

fn step_rows(steps: &[ResolutionStep<EmployeeId>]) -> Vec<StepRow> {
    steps
        .iter()
        .enumerate()
        .map(|(position, step)| StepRow {
            step: position + 1,
            project: step.target.to_string(),
            participation: format!("{} / {}", step.first_index, step.second_index),
            attendee: step.attendee,
            teammate: step
                .target
                .other(&step.attendee)
                .map(|teammate| teammate.to_string())
                .unwrap_or_else(|| "-".to_string()),
            decision: step.decision.to_string(),
            removed: step.removed,
        })
        .collect()
}

fn attendee_rows(attendees: &[EmployeeId]) -> Vec<AttendeeRow> {
    attendees
        .iter()
        .enumerate()
        .map(|(position, attendee)| AttendeeRow {
            position: position + 1,
            attendee: *attendee,
            office: attendee
                .office()
                .map(|office| office.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
