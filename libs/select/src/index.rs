//! Participation index.

use std::collections::HashMap;
use std::hash::Hash;

use crate::Project;

/// Number of remaining projects each person is on.
///
/// People that never appeared read as zero.
#[derive(Debug, Clone)]
pub struct ParticipationIndex<T> {
    counts: HashMap<T, usize>,
}

impl<T: Eq + Hash + Clone> ParticipationIndex<T> {
    /// Counts every member slot of every project.
    pub fn from_projects<'a, I>(projects: I) -> Self
    where
        I: IntoIterator<Item = &'a Project<T>>,
        T: 'a,
    {
        let mut counts = HashMap::new();
        for project in projects {
            for member in project.members() {
                *counts.entry(member.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Returns the participation count of a person.
    pub fn get(&self, person: &T) -> usize {
        self.counts.get(person).copied().unwrap_or(0)
    }

    /// Removes one project's worth of participation from a person.
    pub fn decrement(&mut self, person: &T) {
        if let Some(count) = self.counts.get_mut(person) {
            debug_assert!(*count > 0, "participation index underflow");
            *count = count.saturating_sub(1);
        }
    }

    /// Absolute difference between the counts of a project's two members.
    pub fn imbalance(&self, project: &Project<T>) -> usize {
        self.get(project.first()).abs_diff(self.get(project.second()))
    }

    /// Iterates over every person ever seen, with their current count.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(person, count)| (person, *count))
    }

    /// Number of people ever seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns true if every count equals a fresh recount over `projects`.
    pub fn matches(&self, projects: &[Project<T>]) -> bool {
        let fresh = Self::from_projects(projects);
        self.iter().all(|(person, count)| fresh.get(person) == count)
            && fresh.iter().all(|(person, count)| self.get(person) == count)
    }
}

impl<T: Eq + Hash> Default for ParticipationIndex<T> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}
