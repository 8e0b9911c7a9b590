//! Exact minimum cover for small inputs.
//!
//! Finds the smallest set of people such that every project has at least one
//! member in the set. When several smallest sets exist, one that contains
//! the preferred id is returned if there is one.
//!
//! The search branches on the first uncovered project: one of its two
//! members must be in any cover, so trying both is exhaustive. Branches that
//! can no longer beat the best cover found so far are pruned using a lower
//! bound: uncovered projects that share no member each need their own
//! person.

use std::hash::Hash;

use tracing::debug;

use crate::{Project, SelectError};

/// Largest input accepted by [`minimum_cover`].
pub const MAX_EXHAUSTIVE_PROJECTS: usize = 32;

/// Computes a minimum cover of `projects`.
///
/// The result is in the order people were added during the search.
pub fn minimum_cover<T>(projects: &[Project<T>], preferred: Option<&T>) -> Result<Vec<T>, SelectError>
where
    T: Eq + Hash + Clone,
{
    if projects.len() > MAX_EXHAUSTIVE_PROJECTS {
        return Err(SelectError::TooLarge {
            projects: projects.len(),
            max: MAX_EXHAUSTIVE_PROJECTS,
        });
    }

    let search = CoverSearch::run(projects, preferred);

    debug!(
        projects = projects.len(),
        visited = search.visited,
        "Exhaustive cover search complete"
    );

    Ok(search.best.unwrap_or_default())
}

struct CoverSearch<'a, T> {
    projects: &'a [Project<T>],
    preferred: Option<&'a T>,
    chosen: Vec<T>,
    best: Option<Vec<T>>,
    visited: u64,
}

impl<'a, T: Eq + Hash + Clone> CoverSearch<'a, T> {
    fn run(projects: &'a [Project<T>], preferred: Option<&'a T>) -> Self {
        let mut search = Self {
            projects,
            preferred,
            chosen: Vec::new(),
            best: None,
            visited: 0,
        };
        search.descend();
        search
    }

    fn descend(&mut self) {
        self.visited += 1;

        let projects = self.projects;
        let uncovered: Vec<&Project<T>> = projects
            .iter()
            .filter(|project| !self.is_covered(project))
            .collect();

        let Some(&project) = uncovered.first() else {
            self.offer();
            return;
        };

        if let Some(limit) = self.size_limit(&uncovered) {
            if self.chosen.len() + disjoint_count(&uncovered) > limit {
                return;
            }
        }

        for member in project.members() {
            self.chosen.push(member.clone());
            self.descend();
            self.chosen.pop();
        }
    }

    /// Largest cover this branch may still produce, once a best exists.
    ///
    /// Equal-size covers are only worth finding when they can hold the
    /// preferred id and the best does not.
    fn size_limit(&self, uncovered: &[&Project<T>]) -> Option<usize> {
        let best = self.best.as_ref()?;
        let may_gain_preferred = !self.has_preferred(best)
            && (self.has_preferred(&self.chosen)
                || self
                    .preferred
                    .is_some_and(|preferred| uncovered.iter().any(|p| p.contains(preferred))));

        if may_gain_preferred {
            Some(best.len())
        } else {
            Some(best.len().saturating_sub(1))
        }
    }

    fn is_covered(&self, project: &Project<T>) -> bool {
        self.chosen.iter().any(|person| project.contains(person))
    }

    fn offer(&mut self) {
        let better = match &self.best {
            None => true,
            Some(best) if self.chosen.len() < best.len() => true,
            Some(best) if self.chosen.len() == best.len() => {
                self.has_preferred(&self.chosen) && !self.has_preferred(best)
            }
            Some(_) => false,
        };

        if better {
            self.best = Some(self.chosen.clone());
        }
    }

    fn has_preferred(&self, people: &[T]) -> bool {
        self.preferred
            .is_some_and(|preferred| people.iter().any(|person| person == preferred))
    }
}

/// Size of a greedy set of pairwise disjoint projects.
///
/// Every cover needs a distinct person for each of them, so this never
/// exceeds the size of a minimum cover.
fn disjoint_count<T: PartialEq>(projects: &[&Project<T>]) -> usize {
    let mut taken: Vec<&T> = Vec::new();
    let mut count = 0;

    for project in projects {
        let [first, second] = project.members();
        if !taken.contains(&first) && !taken.contains(&second) {
            taken.push(first);
            taken.push(second);
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects(pairs: &[(u32, u32)]) -> Vec<Project<u32>> {
        pairs
            .iter()
            .map(|(a, b)| Project::new(*a, *b).unwrap())
            .collect()
    }

    fn is_cover(cover: &[u32], projects: &[Project<u32>]) -> bool {
        projects
            .iter()
            .all(|project| cover.iter().any(|person| project.contains(person)))
    }

    #[test]
    fn test_empty_input() {
        let cover = minimum_cover::<u32>(&[], None).unwrap();
        assert!(cover.is_empty());
    }

    #[test]
    fn test_star_needs_one() {
        let input = projects(&[(1, 2), (1, 3), (1, 4), (1, 5)]);
        assert_eq!(minimum_cover(&input, None).unwrap(), vec![1]);
    }

    #[test]
    fn test_triangle_needs_two() {
        let input = projects(&[(1, 2), (2, 3), (1, 3)]);
        let cover = minimum_cover(&input, None).unwrap();
        assert_eq!(cover.len(), 2);
        assert!(is_cover(&cover, &input));
    }

    #[test]
    fn test_prefers_cover_with_preferred() {
        // {1, 3} and {2, 3} are both minimum; only the second holds 2.
        let input = projects(&[(1, 2), (3, 4), (3, 5)]);
        let cover = minimum_cover(&input, Some(&2)).unwrap();
        assert_eq!(cover.len(), 2);
        assert!(cover.contains(&2));
        assert!(is_cover(&cover, &input));
    }

    #[test]
    fn test_preferred_never_inflates_size() {
        // Taking 9 would cost an extra seat.
        let input = projects(&[(1, 9), (1, 2), (1, 3)]);
        assert_eq!(minimum_cover(&input, Some(&9)).unwrap(), vec![1]);
    }

    fn disjoint(n: u32) -> Vec<Project<u32>> {
        projects(&(0..n).map(|i| (i * 2 + 1, i * 2 + 2)).collect::<Vec<_>>())
    }

    #[test]
    fn test_disjoint_teams_at_limit_stay_linear() {
        let input = disjoint(MAX_EXHAUSTIVE_PROJECTS as u32);
        let search = CoverSearch::run(&input, None);

        let cover = search.best.unwrap();
        assert_eq!(cover.len(), MAX_EXHAUSTIVE_PROJECTS);
        assert!(is_cover(&cover, &input));
        // One full descent plus one cut-off sibling per level.
        assert!(search.visited <= 2 * MAX_EXHAUSTIVE_PROJECTS as u64 + 1);
    }

    #[test]
    fn test_disjoint_teams_with_preferred_second_member() {
        let input = disjoint(MAX_EXHAUSTIVE_PROJECTS as u32);
        let search = CoverSearch::run(&input, Some(&2));

        let cover = search.best.unwrap();
        assert_eq!(cover.len(), MAX_EXHAUSTIVE_PROJECTS);
        assert!(cover.contains(&2));
        assert!(search.visited <= 4 * MAX_EXHAUSTIVE_PROJECTS as u64 + 2);
    }

    #[test]
    fn test_disjoint_count() {
        let input = projects(&[(1, 2), (2, 3), (3, 4), (5, 6)]);
        let refs: Vec<&Project<u32>> = input.iter().collect();
        // (1, 2) and (3, 4) and (5, 6) share no member.
        assert_eq!(disjoint_count(&refs), 3);
    }

    #[test]
    fn test_rejects_large_input() {
        let pairs: Vec<(u32, u32)> = (0..33).map(|i| (i * 2 + 1, i * 2 + 2)).collect();
        let input = projects(&pairs);
        assert_eq!(
            minimum_cover(&input, None),
            Err(SelectError::TooLarge {
                projects: 33,
                max: MAX_EXHAUSTIVE_PROJECTS
            })
        );
    }
}
