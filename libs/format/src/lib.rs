//! Project list and attendee list text formats.
//!
//! # Project list
//!
//! ```text
//! 3
//! 1009 2011
//! 1017 2011
//! 1009 2032
//! ```
//!
//! The first line is the team count `m` (1 to 10 000). Each of the next `m`
//! lines holds two employee ids separated by whitespace: the Stockholm
//! member, then the London member. A pair may appear only once, in either
//! order. Lines after the `m`-th team are ignored.
//!
//! # Attendee list
//!
//! ```text
//! 2
//! 1009
//! 2011
//! ```
//!
//! The attendee count, then one id per line in the order they were chosen.
//!
//! # Solver goal
//!
//! The same project list as a Prolog goal:
//! `solve([(1009,2011),(1017,2011)], Solution)`.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bilateral_id::{EmployeeId, IdError, Office};
use bilateral_select::{Project, SelectError};
use thiserror::Error;
use tracing::debug;

/// Maximum number of teams in a project list.
pub const MAX_TEAMS: usize = 10_000;

/// Format errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input has no team count line.
    #[error("missing team count on the first line")]
    MissingHeader,

    /// A line could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The declared team count is outside `1..=MAX_TEAMS`.
    #[error("team count {declared} is out of range [1:{max}]")]
    CountOutOfRange { declared: usize, max: usize },

    /// Fewer entries than the header declared.
    #[error("expected {declared} entries, found {found}")]
    CountMismatch { declared: usize, found: usize },

    /// The same pair of employees appears twice.
    #[error("line {line}: team ({first}, {second}) already participates in another project")]
    DuplicateTeam {
        line: usize,
        first: EmployeeId,
        second: EmployeeId,
    },

    /// An id on the line is invalid.
    #[error("line {line}: {source}")]
    Id { line: usize, source: IdError },

    /// The two ids on the line do not form a valid team.
    #[error("line {line}: {source}")]
    Team { line: usize, source: SelectError },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Options for [`ProjectList::parse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Require the first id of each team in the Stockholm range and the
    /// second in the London range.
    pub enforce_offices: bool,
}

/// An ordered list of project teams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectList {
    projects: Vec<Project<EmployeeId>>,
}

impl ProjectList {
    pub fn new(projects: Vec<Project<EmployeeId>>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project<EmployeeId>] {
        &self.projects
    }

    pub fn into_projects(self) -> Vec<Project<EmployeeId>> {
        self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Number of distinct employees across all teams.
    pub fn participants(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|project| project.members().iter())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Serialize to the canonical text format.
    pub fn serialize(&self) -> String {
        let mut out = format!("{}\n", self.projects.len());
        for project in &self.projects {
            out.push_str(&format!("{} {}\n", project.first(), project.second()));
        }
        out
    }

    /// Render as the goal consumed by the Prolog solver.
    pub fn to_prolog_goal(&self) -> String {
        let teams: Vec<String> = self
            .projects
            .iter()
            .map(|project| format!("({},{})", project.first(), project.second()))
            .collect();
        format!("solve([{}], Solution)", teams.join(","))
    }

    /// Parse from the text format.
    pub fn parse(content: &str, options: &ParseOptions) -> Result<Self, FormatError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((header_line, header)) = lines.next() else {
            return Err(FormatError::MissingHeader);
        };
        let declared = parse_count(header_line, header)?;
        if !(1..=MAX_TEAMS).contains(&declared) {
            return Err(FormatError::CountOutOfRange {
                declared,
                max: MAX_TEAMS,
            });
        }

        let mut projects = Vec::with_capacity(declared);
        let mut seen = HashSet::with_capacity(declared);

        for (line_num, line) in lines {
            if projects.len() == declared {
                debug!(line = line_num, "Ignoring input after the declared team count");
                break;
            }

            let project = parse_team(line_num, line, options)?;
            let key = team_key(&project);
            if !seen.insert(key) {
                return Err(FormatError::DuplicateTeam {
                    line: line_num,
                    first: *project.first(),
                    second: *project.second(),
                });
            }
            projects.push(project);
        }

        if projects.len() != declared {
            return Err(FormatError::CountMismatch {
                declared,
                found: projects.len(),
            });
        }

        Ok(Self { projects })
    }

    /// Read from a file.
    pub fn read_from_file<P: AsRef<Path>>(
        path: P,
        options: &ParseOptions,
    ) -> Result<Self, FormatError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, options)
    }

    /// Write the canonical text format to a file atomically.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), FormatError> {
        write_atomic(path.as_ref(), &self.serialize())
    }

    /// Write the Prolog goal to a file atomically.
    pub fn write_prolog_goal<P: AsRef<Path>>(&self, path: P) -> Result<(), FormatError> {
        write_atomic(path.as_ref(), &format!("{}\n", self.to_prolog_goal()))
    }
}

impl From<Vec<Project<EmployeeId>>> for ProjectList {
    fn from(projects: Vec<Project<EmployeeId>>) -> Self {
        Self::new(projects)
    }
}

/// Attendees in the order they were chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AttendeeList {
    attendees: Vec<EmployeeId>,
}

impl AttendeeList {
    pub fn new(attendees: Vec<EmployeeId>) -> Self {
        Self { attendees }
    }

    pub fn attendees(&self) -> &[EmployeeId] {
        &self.attendees
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    /// Serialize as the count followed by one id per line.
    pub fn serialize(&self) -> String {
        let mut out = format!("{}\n", self.attendees.len());
        for attendee in &self.attendees {
            out.push_str(&attendee.to_string());
            out.push('\n');
        }
        out
    }

    /// Parse the count-prefixed list.
    ///
    /// An empty list is written as a single `0` line.
    pub fn parse(content: &str) -> Result<Self, FormatError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let Some((header_line, header)) = lines.next() else {
            return Err(FormatError::MissingHeader);
        };
        let declared = parse_count(header_line, header)?;

        let attendees = lines
            .map(|(line, text)| {
                EmployeeId::parse(text).map_err(|source| FormatError::Id { line, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if attendees.len() != declared {
            return Err(FormatError::CountMismatch {
                declared,
                found: attendees.len(),
            });
        }

        Ok(Self { attendees })
    }
}

impl From<Vec<EmployeeId>> for AttendeeList {
    fn from(attendees: Vec<EmployeeId>) -> Self {
        Self::new(attendees)
    }
}

fn parse_count(line: usize, text: &str) -> Result<usize, FormatError> {
    text.parse().map_err(|_| FormatError::Parse {
        line,
        reason: format!("expected a count, got '{text}'"),
    })
}

/// Parse a single team line.
fn parse_team(
    line: usize,
    text: &str,
    options: &ParseOptions,
) -> Result<Project<EmployeeId>, FormatError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [first, second] = fields[..] else {
        return Err(FormatError::Parse {
            line,
            reason: format!(
                "expected two employee ids separated by whitespace, got {} field(s)",
                fields.len()
            ),
        });
    };

    let id = |s: &str| EmployeeId::parse(s).map_err(|source| FormatError::Id { line, source });
    let mut first = id(first)?;
    let mut second = id(second)?;

    if options.enforce_offices {
        let office = |office: Office, id: EmployeeId| {
            office
                .check(id)
                .map_err(|source| FormatError::Id { line, source })
        };
        first = office(Office::Stockholm, first)?;
        second = office(Office::London, second)?;
    }

    Project::new(first, second).map_err(|source| FormatError::Team { line, source })
}

/// Order-independent key for duplicate detection.
fn team_key(project: &Project<EmployeeId>) -> (EmployeeId, EmployeeId) {
    let (a, b) = (*project.first(), *project.second());
    (a.min(b), a.max(b))
}

/// Write via temp file + rename so readers never see a partial file.
///
/// The temp file is removed if any step fails.
fn write_atomic(path: &Path, content: &str) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = write_and_rename(&temp_path, path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, path)
}

/// `dataset.txt` -> `dataset.txt.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
