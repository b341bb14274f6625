//! Population of candidate timetables.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::fitness::ConflictEvaluator;
use super::initializer::Initializer;
use super::timetable::Timetable;

/// Default population size.
pub const DEFAULT_POPULATION_SIZE: usize = 9;

/// An ordered collection of timetables.
///
/// After [`Population::sort_by_fitness`] the best candidate is first.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Timetable>,
}

impl Population {
    /// Wraps existing members (order preserved).
    pub fn from_members(members: Vec<Timetable>) -> Self {
        Self { members }
    }

    /// Builds `size` random timetables.
    ///
    /// Each member is built from its own RNG seeded from `rng`.
    pub fn random<R: Rng>(
        initializer: &Initializer<'_>,
        size: usize,
        rng: &mut R,
        parallel: bool,
    ) -> Self {
        let seeds: Vec<u64> = (0..size).map(|_| rng.random()).collect();
        let build = |seed: u64| initializer.build(&mut SmallRng::seed_from_u64(seed));
        let members = if parallel {
            seeds.into_par_iter().map(build).collect()
        } else {
            seeds.into_iter().map(build).collect()
        };
        Self { members }
    }

    /// Returns the members in their current order.
    pub fn members(&self) -> &[Timetable] {
        &self.members
    }

    /// Consumes the population, returning its members.
    pub fn into_members(self) -> Vec<Timetable> {
        self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Scores every member that has no cached score.
    ///
    /// Returns only after all members are scored.
    pub fn evaluate(&mut self, evaluator: &ConflictEvaluator<'_>, parallel: bool) {
        if parallel {
            self.members.par_iter_mut().for_each(|m| {
                m.ensure_evaluated(evaluator);
            });
        } else {
            for m in &mut self.members {
                m.ensure_evaluated(evaluator);
            }
        }
    }

    /// Sorts best-first by cached fitness. Stable, so equal candidates
    /// keep their relative order.
    pub fn sort_by_fitness(&mut self) {
        self.members
            .sort_by(|a, b| b.rank_fitness().total_cmp(&a.rank_fitness()));
    }

    /// First member (the best one once sorted).
    pub fn best(&self) -> Option<&Timetable> {
        self.members.first()
    }
}
