//! # bilateral-id
//!
//! Employee identifiers for the bilateral project pool.
//!
//! ## Design Principles
//!
//! - An employee is identified by a positive integer; the integer is the
//!   canonical textual form (`1042`, `2317`)
//! - Each office owns a disjoint id range, so the office of an employee
//!   can be read off the id itself
//! - One id is reserved as the "preferred" attendee and wins every tie it
//!   takes part in
//!
//! ## Offices
//!
//! - Stockholm: `1000..=1999`
//! - London: `2000..=2999`

mod error;
mod types;

pub use error::IdError;
pub use types::*;
