//! Selection errors.

use thiserror::Error;

/// Errors raised while building projects or running a solver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// A project does not have exactly two members.
    #[error("a project must have exactly two members, found {found}")]
    Arity { found: usize },

    /// Both members of a project are the same person.
    #[error("a project must have two distinct members")]
    DuplicateMember,

    /// The input is too large for the exhaustive search.
    #[error("exhaustive search supports at most {max} projects, got {projects}")]
    TooLarge { projects: usize, max: usize },
}
