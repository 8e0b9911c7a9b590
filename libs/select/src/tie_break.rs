//! Tie-break decisions for projects whose members are equally busy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Project, Side};

/// Chooses a side when neither member of a tied project is preferred.
pub trait TieBreaker<T> {
    fn break_tie(&mut self, project: &Project<T>) -> Side;
}

impl<T, B: TieBreaker<T> + ?Sized> TieBreaker<T> for &mut B {
    fn break_tie(&mut self, project: &Project<T>) -> Side {
        (**self).break_tie(project)
    }
}

impl<T, B: TieBreaker<T> + ?Sized> TieBreaker<T> for Box<B> {
    fn break_tie(&mut self, project: &Project<T>) -> Side {
        (**self).break_tie(project)
    }
}

/// Picks either member with equal probability.
#[derive(Debug, Clone)]
pub struct RandomTieBreak<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomTieBreak<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomTieBreak<StdRng> {
    /// Reproducible decisions for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<T, R: Rng> TieBreaker<T> for RandomTieBreak<R> {
    fn break_tie(&mut self, _project: &Project<T>) -> Side {
        if self.rng.random_bool(0.5) {
            Side::First
        } else {
            Side::Second
        }
    }
}

/// Always picks the same side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSide(pub Side);

impl<T> TieBreaker<T> for FixedSide {
    fn break_tie(&mut self, _project: &Project<T>) -> Side {
        self.0
    }
}

/// Adapts a closure into a [`TieBreaker`].
pub struct FnTieBreak<F>(pub F);

impl<T, F> TieBreaker<T> for FnTieBreak<F>
where
    F: FnMut(&Project<T>) -> Side,
{
    fn break_tie(&mut self, project: &Project<T>) -> Side {
        (self.0)(project)
    }
}
