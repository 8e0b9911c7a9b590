//! Two-person project teams.

use serde::Serialize;

use crate::SelectError;

/// One of the two member slots of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

/// A team of two distinct people.
///
/// Member order is kept for display (the first member is the Stockholm side
/// in the reference data) but equality ignores it: `(a, b) == (b, a)`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Project<T> {
    members: [T; 2],
}

impl<T: PartialEq> Project<T> {
    /// Creates a project from its two members.
    pub fn new(first: T, second: T) -> Result<Self, SelectError> {
        if first == second {
            return Err(SelectError::DuplicateMember);
        }
        Ok(Self {
            members: [first, second],
        })
    }

    /// Returns true if the person is on this team.
    pub fn contains(&self, person: &T) -> bool {
        self.members.iter().any(|member| member == person)
    }

    /// Returns the teammate of `person`, or `None` if they are not on the team.
    pub fn other(&self, person: &T) -> Option<&T> {
        match &self.members {
            [first, second] if first == person => Some(second),
            [first, second] if second == person => Some(first),
            _ => None,
        }
    }
}

impl<T> Project<T> {
    pub fn first(&self) -> &T {
        &self.members[0]
    }

    pub fn second(&self) -> &T {
        &self.members[1]
    }

    pub fn member(&self, side: Side) -> &T {
        match side {
            Side::First => self.first(),
            Side::Second => self.second(),
        }
    }

    /// Both members, in input order.
    pub fn members(&self) -> &[T; 2] {
        &self.members
    }
}

impl<T: PartialEq> PartialEq for Project<T> {
    fn eq(&self, other: &Self) -> bool {
        let [a, b] = &self.members;
        let [c, d] = &other.members;
        (a == c && b == d) || (a == d && b == c)
    }
}

impl<T: Eq> Eq for Project<T> {}

impl<T: PartialEq> TryFrom<Vec<T>> for Project<T> {
    type Error = SelectError;

    fn try_from(members: Vec<T>) -> Result<Self, Self::Error> {
        let found = members.len();
        let Ok([first, second]) = <[T; 2]>::try_from(members) else {
            return Err(SelectError::Arity { found });
        };
        Self::new(first, second)
    }
}

impl<T: PartialEq> TryFrom<(T, T)> for Project<T> {
    type Error = SelectError;

    fn try_from((first, second): (T, T)) -> Result<Self, Self::Error> {
        Self::new(first, second)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Project<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.members[0], self.members[1])
    }
}
