//! Synthetic project pool generation.
//!
//! Builds a randomized project list for exercising the solvers:
//!
//! 1. Shuffle the Stockholm and London id ranges.
//! 2. For every team, pick a Stockholm member among the first
//!    `stockholm_spread` shuffled ids and a London member among the first
//!    `london_spread`. Small spreads give dense pools where the same people
//!    sit on many teams.
//! 3. Put the preferred id on the first `preferred_teams` teams (never on
//!    all of them).
//! 4. Drop repeated pairs, keeping the first, and shuffle.
//!
//! The resulting pool can hold fewer teams than requested.

use std::collections::HashSet;

use bilateral_format::{ProjectList, MAX_TEAMS};
use bilateral_id::{EmployeeId, Office, DEFAULT_PREFERRED_ID};
use bilateral_select::{Project, SelectError};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::info;

/// Pool generation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A configuration value is out of range.
    #[error("invalid pool configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A generated pair is not a valid team.
    #[error("generated an invalid team: {0}")]
    Team(#[from] SelectError),
}

/// Pool generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of teams to generate before de-duplication.
    pub teams: usize,

    /// How many distinct Stockholm employees to draw from.
    pub stockholm_spread: usize,

    /// How many distinct London employees to draw from.
    pub london_spread: usize,

    /// How many teams get the preferred id as their Stockholm member.
    pub preferred_teams: usize,

    /// The preferred id. Must be a Stockholm id.
    pub preferred: EmployeeId,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            teams: 100,
            stockholm_spread: 20,
            london_spread: 10,
            preferred_teams: 0,
            preferred: DEFAULT_PREFERRED_ID,
        }
    }
}

impl PoolConfig {
    /// Validate ranges.
    pub fn validate(&self) -> Result<(), PoolError> {
        if !(1..=MAX_TEAMS).contains(&self.teams) {
            return Err(invalid("teams", format!("must be in [1:{MAX_TEAMS}]")));
        }

        for (field, spread, office) in [
            ("stockholm_spread", self.stockholm_spread, Office::Stockholm),
            ("london_spread", self.london_spread, Office::London),
        ] {
            let size = office.ids().count();
            if !(1..=size).contains(&spread) {
                return Err(invalid(field, format!("must be in [1:{size}]")));
            }
        }

        if !Office::Stockholm.contains(self.preferred) {
            return Err(invalid(
                "preferred",
                format!("{} is not a stockholm id", self.preferred),
            ));
        }

        Ok(())
    }

    /// Number of teams that actually get the preferred id.
    pub fn effective_preferred_teams(&self) -> usize {
        self.preferred_teams.min(self.teams.saturating_sub(1))
    }

    /// Conventional file name for a dataset built from this configuration.
    pub fn dataset_file_name(&self) -> String {
        format!(
            "dataset_{}_{}_{}_{}.txt",
            self.teams, self.stockholm_spread, self.london_spread, self.preferred_teams
        )
    }
}

fn invalid(field: &'static str, reason: String) -> PoolError {
    PoolError::InvalidConfig { field, reason }
}

/// Build a randomized project pool.
pub fn build_pool<R: Rng>(config: &PoolConfig, rng: &mut R) -> Result<ProjectList, PoolError> {
    config.validate()?;

    let mut stockholm: Vec<EmployeeId> = Office::Stockholm.ids().collect();
    let mut london: Vec<EmployeeId> = Office::London.ids().collect();
    stockholm.shuffle(rng);
    london.shuffle(rng);

    let mut pairs: Vec<(EmployeeId, EmployeeId)> = (0..config.teams)
        .map(|_| {
            (
                stockholm[rng.random_range(0..config.stockholm_spread)],
                london[rng.random_range(0..config.london_spread)],
            )
        })
        .collect();

    for pair in pairs.iter_mut().take(config.effective_preferred_teams()) {
        pair.0 = config.preferred;
    }

    let mut seen = HashSet::with_capacity(pairs.len());
    pairs.retain(|pair| seen.insert(*pair));
    pairs.shuffle(rng);

    let projects = pairs
        .into_iter()
        .map(|(first, second)| Project::new(first, second))
        .collect::<Result<Vec<_>, _>>()?;

    let pool = ProjectList::new(projects);
    info!(
        requested = config.teams,
        generated = pool.len(),
        participants = pool.participants(),
        "Project pool built"
    );

    Ok(pool)
}
