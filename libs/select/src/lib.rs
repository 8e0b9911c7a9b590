//! Fair attendee selection.
//!
//! Every project is a team of two. One person per team has to attend, and
//! people who sit on many teams should be the ones to go: they cover more
//! projects per seat. The selector is a greedy loop over three pieces of
//! state:
//!
//! - **Participation index**: how many remaining projects each person is on.
//! - **Remaining projects**: the teams that still need an attendee.
//! - **Attendees**: the people chosen so far, in order.
//!
//! Each resolution step picks the most imbalanced remaining project, sends
//! its busier member (ties go to the preferred id, then to a [`TieBreaker`]),
//! and drops every project that person is on.
//!
//! # Invariants
//!
//! - The index of a person always equals the number of remaining projects
//!   that contain them
//! - Every step removes at least one project, so a run over `n` projects
//!   takes at most `n` steps
//! - Given the same input and the same tie-break decisions the output is
//!   identical
//!
//! The greedy run makes no optimality promise. [`exhaustive::minimum_cover`]
//! computes a true minimum cover for small inputs when one is needed for
//! comparison.

mod error;
pub mod exhaustive;
mod index;
mod project;
mod selector;
mod tie_break;

pub use error::SelectError;
pub use index::ParticipationIndex;
pub use project::{Project, Side};
pub use selector::{select_attendees, Decision, ResolutionStep, Selection, Selector};
pub use tie_break::{FixedSide, FnTieBreak, RandomTieBreak, TieBreaker};
