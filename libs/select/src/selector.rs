//! The greedy resolution loop.

use std::hash::Hash;

use serde::Serialize;
use tracing::{debug, info};

use crate::{ParticipationIndex, Project, Side, TieBreaker};

/// Why an attendee was chosen for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The attendee is on strictly more remaining projects than the teammate.
    Imbalance,
    /// Tied, and the attendee is the preferred id.
    Preferred,
    /// Tied without a preferred member; the tie-breaker decided.
    TieBreak,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Imbalance => "imbalance",
            Decision::Preferred => "preferred",
            Decision::TieBreak => "tie_break",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of a single resolution step.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionStep<T> {
    /// The project that was resolved.
    pub target: Project<T>,

    /// Participation of the first member when the step started.
    pub first_index: usize,

    /// Participation of the second member when the step started.
    pub second_index: usize,

    /// The chosen attendee.
    pub attendee: T,

    pub decision: Decision,

    /// Projects dropped by the cascade, the target included.
    pub removed: usize,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct Selection<T> {
    /// Attendees in the order they were chosen.
    pub attendees: Vec<T>,

    /// One entry per resolution step.
    pub steps: Vec<ResolutionStep<T>>,
}

impl<T: PartialEq> Selection<T> {
    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    /// Returns true if every project has at least one member among the attendees.
    pub fn covers(&self, projects: &[Project<T>]) -> bool {
        projects
            .iter()
            .all(|project| self.attendees.iter().any(|a| project.contains(a)))
    }
}

/// Greedy fair attendee selector.
///
/// Owns the remaining projects and the participation index for one run.
/// Drive it with [`Selector::step`] to observe intermediate state, or
/// consume it with [`Selector::run`].
#[derive(Debug, Clone)]
pub struct Selector<T> {
    remaining: Vec<Project<T>>,
    index: ParticipationIndex<T>,
    preferred: Option<T>,
    attendees: Vec<T>,
}

impl<T: Eq + Hash + Clone> Selector<T> {
    /// Creates a selector over `projects`.
    ///
    /// The input is taken as-is; duplicate teams are not collapsed.
    pub fn new<I>(projects: I, preferred: Option<T>) -> Self
    where
        I: IntoIterator<Item = Project<T>>,
    {
        let remaining: Vec<Project<T>> = projects.into_iter().collect();
        let index = ParticipationIndex::from_projects(&remaining);

        Self {
            remaining,
            index,
            preferred,
            attendees: Vec::new(),
        }
    }

    /// Projects that still need an attendee, in encounter order.
    pub fn remaining(&self) -> &[Project<T>] {
        &self.remaining
    }

    pub fn index(&self) -> &ParticipationIndex<T> {
        &self.index
    }

    /// Attendees chosen so far.
    pub fn attendees(&self) -> &[T] {
        &self.attendees
    }

    pub fn preferred(&self) -> Option<&T> {
        self.preferred.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Runs one resolution step.
    ///
    /// Returns `None` once no projects remain.
    pub fn step<B>(&mut self, tie_breaker: &mut B) -> Option<ResolutionStep<T>>
    where
        B: TieBreaker<T> + ?Sized,
    {
        let position = self.most_imbalanced()?;
        let target = self.remaining[position].clone();

        let first_index = self.index.get(target.first());
        let second_index = self.index.get(target.second());
        let (side, decision) = self.resolve(&target, first_index, second_index, tie_breaker);
        let attendee = target.member(side).clone();

        let removed = self.cascade(&attendee);
        debug_assert!(removed >= 1, "the target project always contains the attendee");
        self.attendees.push(attendee.clone());

        debug!(
            step = self.attendees.len(),
            first_index,
            second_index,
            side = ?side,
            decision = %decision,
            removed,
            remaining = self.remaining.len(),
            "Resolved project"
        );

        Some(ResolutionStep {
            target,
            first_index,
            second_index,
            attendee,
            decision,
            removed,
        })
    }

    /// Resolves every remaining project.
    pub fn run<B>(mut self, mut tie_breaker: B) -> Selection<T>
    where
        B: TieBreaker<T>,
    {
        let projects = self.remaining.len();
        let mut steps = Vec::new();

        // Each step removes at least one project.
        for _ in 0..projects {
            match self.step(&mut tie_breaker) {
                Some(step) => steps.push(step),
                None => break,
            }
        }
        debug_assert!(self.is_done());

        info!(
            projects,
            attendees = self.attendees.len(),
            "Attendee selection complete"
        );

        Selection {
            attendees: self.attendees,
            steps,
        }
    }

    /// Position of the remaining project with the largest imbalance.
    ///
    /// Among equal maxima the last one in encounter order wins.
    fn most_imbalanced(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for (position, project) in self.remaining.iter().enumerate() {
            let imbalance = self.index.imbalance(project);
            if best.is_none_or(|(_, max)| imbalance >= max) {
                best = Some((position, imbalance));
            }
        }

        best.map(|(position, _)| position)
    }

    fn resolve<B>(
        &self,
        target: &Project<T>,
        first_index: usize,
        second_index: usize,
        tie_breaker: &mut B,
    ) -> (Side, Decision)
    where
        B: TieBreaker<T> + ?Sized,
    {
        if first_index != second_index {
            let side = if first_index > second_index {
                Side::First
            } else {
                Side::Second
            };
            return (side, Decision::Imbalance);
        }

        if let Some(preferred) = &self.preferred {
            if target.first() == preferred {
                return (Side::First, Decision::Preferred);
            }
            if target.second() == preferred {
                return (Side::Second, Decision::Preferred);
            }
        }

        (tie_breaker.break_tie(target), Decision::TieBreak)
    }

    /// Drops every remaining project the attendee is on.
    ///
    /// Both members of each dropped project lose one count.
    fn cascade(&mut self, attendee: &T) -> usize {
        let before = self.remaining.len();
        let index = &mut self.index;

        self.remaining.retain(|project| {
            if !project.contains(attendee) {
                return true;
            }
            for member in project.members() {
                index.decrement(member);
            }
            false
        });

        before - self.remaining.len()
    }
}

/// Runs the selector to completion over `projects`.
pub fn select_attendees<T, I, B>(projects: I, preferred: Option<T>, tie_breaker: B) -> Selection<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = Project<T>>,
    B: TieBreaker<T>,
{
    Selector::new(projects, preferred).run(tie_breaker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedSide, FnTieBreak, RandomTieBreak};
    use rstest::rstest;

    fn projects(pairs: &[(&'static str, &'static str)]) -> Vec<Project<&'static str>> {
        pairs
            .iter()
            .map(|(a, b)| Project::new(*a, *b).unwrap())
            .collect()
    }

    fn no_ties() -> FnTieBreak<impl FnMut(&Project<&'static str>) -> Side> {
        FnTieBreak(|project: &Project<&'static str>| -> Side {
            panic!("unexpected tie on {project:?}")
        })
    }

    #[test]
    fn test_empty_input() {
        let selection = select_attendees(Vec::<Project<&str>>::new(), None, FixedSide(Side::First));
        assert!(selection.is_empty());
        assert!(selection.steps.is_empty());
    }

    #[test]
    fn test_busier_member_attends() {
        // a is on three teams, everyone else on one.
        let input = projects(&[("b", "a"), ("a", "c"), ("d", "a")]);
        let selection = select_attendees(input.clone(), None, no_ties());

        assert_eq!(selection.attendees, vec!["a"]);
        assert_eq!(selection.steps[0].decision, Decision::Imbalance);
        assert_eq!(selection.steps[0].removed, 3);
        assert!(selection.covers(&input));
    }

    #[test]
    fn test_triangle_needs_two_attendees() {
        let input = projects(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let selection = select_attendees(input.clone(), None, FixedSide(Side::First));

        // All tied at 2; the last project (a, c) is targeted and a attends.
        // That leaves (b, c) with b=1, c=1, resolved by the same tie-break.
        assert_eq!(selection.attendees, vec!["a", "b"]);
        assert_eq!(selection.steps[0].target, Project::new("a", "c").unwrap());
        assert_eq!(selection.steps[0].removed, 2);
        assert_eq!(selection.steps[1].removed, 1);
        assert!(selection.covers(&input));
    }

    #[rstest]
    #[case::preferred_second(("x", "pref"), Side::First)]
    #[case::preferred_first(("pref", "x"), Side::Second)]
    fn test_preferred_wins_ties(#[case] pair: (&'static str, &'static str), #[case] fallback: Side) {
        let input = vec![
            Project::new(pair.0, pair.1).unwrap(),
            Project::new("y", "z").unwrap(),
        ];
        let mut selector = Selector::new(input, Some("pref"));

        // Both projects are balanced at zero; the later one is targeted first.
        let step = selector.step(&mut FixedSide(fallback)).unwrap();
        assert_eq!(step.decision, Decision::TieBreak);

        let step = selector.step(&mut FixedSide(fallback)).unwrap();
        assert_eq!(step.attendee, "pref");
        assert_eq!(step.decision, Decision::Preferred);
        assert!(selector.is_done());
    }

    #[test]
    fn test_preferred_ignored_when_not_tied() {
        let input = projects(&[("pref", "a"), ("a", "b")]);
        let selection = select_attendees(input, Some("pref"), no_ties());

        assert_eq!(selection.attendees, vec!["a"]);
    }

    #[test]
    fn test_last_maximum_is_targeted() {
        // (a, b) and (a, c) both have imbalance 1.
        let input = projects(&[("a", "b"), ("a", "c"), ("d", "e")]);
        let mut selector = Selector::new(input, None);

        let step = selector.step(&mut FixedSide(Side::Second)).unwrap();
        assert_eq!(step.target, Project::new("a", "c").unwrap());
        assert_eq!(step.attendee, "a");
        assert_eq!(selector.remaining(), &[Project::new("d", "e").unwrap()][..]);
    }

    #[test]
    fn test_cascade_decrements_both_members() {
        let input = projects(&[("a", "b"), ("a", "c"), ("c", "d"), ("b", "e")]);
        let mut selector = Selector::new(input, None);
        assert_eq!(selector.index().get(&"a"), 2);

        selector.step(&mut FixedSide(Side::First)).unwrap();
        assert!(selector.index().matches(selector.remaining()));
        for project in selector.remaining() {
            assert!(!project.contains(&selector.attendees()[0]));
        }
    }

    #[test]
    fn test_loser_can_attend_later() {
        // b loses (a, b) but still has to attend (b, c).
        let input = projects(&[("a", "b"), ("a", "x"), ("a", "y"), ("b", "c")]);
        let selection = select_attendees(input.clone(), None, FixedSide(Side::First));

        assert_eq!(selection.attendees[0], "a");
        assert_eq!(selection.attendees.len(), 2);
        assert!(selection.covers(&input));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let input = projects(&[("a", "b"), ("c", "d"), ("e", "f"), ("g", "h")]);
        let first = select_attendees(input.clone(), None, RandomTieBreak::from_seed(3));
        let second = select_attendees(input, None, RandomTieBreak::from_seed(3));
        assert_eq!(first.attendees, second.attendees);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_step_json_shape() {
        let input = projects(&[("a", "b")]);
        let selection = select_attendees(input, Some("b"), FixedSide(Side::First));
        let json = serde_json::to_value(&selection.steps[0]).unwrap();

        assert_eq!(json["target"], serde_json::json!(["a", "b"]));
        assert_eq!(json["attendee"], "b");
        assert_eq!(json["decision"], "preferred");
        assert_eq!(json["removed"], 1);
    }
}
