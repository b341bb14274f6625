//! Genetic operators for timetables.
//!
//! Provides tournament selection, scaffold-based uniform crossover,
//! mutation with a runtime-selectable strategy, and one generation of
//! evolution via [`GeneticOperators`].
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::{GeneticOperators, Initializer, MutationStrategy};
//! use u_timetable::models::Catalog;
//! use u_timetable::snapshot::EntitySnapshot;
//!
//! let snapshot = EntitySnapshot::new(Catalog::new()).unwrap();
//! let ops = GeneticOperators::new(Initializer::new(&snapshot));
//! assert_eq!(ops.tournament_size, 3);
//! assert_eq!(ops.mutation_strategy, MutationStrategy::Wholesale);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::initializer::Initializer;
use super::population::Population;
use super::timetable::Timetable;

/// Default tournament size.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;
/// Default mutation rate.
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;
/// Default number of elites carried over unchanged.
pub const DEFAULT_ELITE_COUNT: usize = 1;

/// How mutation perturbs a timetable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStrategy {
    /// With probability `rate`, replace the whole timetable with a freshly
    /// constructed one.
    #[default]
    Wholesale,
    /// Build one fresh timetable, then replace each gene independently with
    /// probability `rate` by the fresh gene at the same position.
    PerGene,
}

/// Selection, crossover, and mutation over timetables.
#[derive(Debug, Clone)]
pub struct GeneticOperators<'a> {
    initializer: Initializer<'a>,
    /// Candidates drawn per tournament.
    pub tournament_size: usize,
    /// Mutation probability (per timetable or per gene, by strategy).
    pub mutation_rate: f64,
    /// Mutation strategy.
    pub mutation_strategy: MutationStrategy,
    /// Top candidates copied unchanged into the next generation.
    pub elite_count: usize,
    /// Build offspring on the rayon pool.
    pub parallel: bool,
}

impl<'a> GeneticOperators<'a> {
    /// Creates operators with default parameters.
    pub fn new(initializer: Initializer<'a>) -> Self {
        Self {
            initializer,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            mutation_strategy: MutationStrategy::default(),
            elite_count: DEFAULT_ELITE_COUNT,
            parallel: true,
        }
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_strategy(mut self, strategy: MutationStrategy) -> Self {
        self.mutation_strategy = strategy;
        self
    }

    /// Sets the number of elites carried over.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Enables or disables parallel offspring construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the initializer used for scaffolds and mutation.
    pub fn initializer(&self) -> &Initializer<'a> {
        &self.initializer
    }

    /// Tournament selection.
    ///
    /// Draws `tournament_size` members uniformly with replacement and
    /// returns the fittest; on ties the earliest draw wins.
    ///
    /// # Panics
    /// Panics if `members` is empty.
    pub fn tournament_select<'p, R: Rng>(&self, members: &'p [Timetable], rng: &mut R) -> &'p Timetable {
        assert!(!members.is_empty(), "tournament over an empty population");
        let mut best = &members[rng.random_range(0..members.len())];
        for _ in 1..self.tournament_size {
            let challenger = &members[rng.random_range(0..members.len())];
            if challenger.rank_fitness() > best.rank_fitness() {
                best = challenger;
            }
        }
        best
    }

    /// Uniform crossover onto a fresh scaffold.
    ///
    /// Builds a new timetable with the initializer, then for every lab
    /// position present in the scaffold and both parents takes the gene
    /// from one parent or the other with equal probability; likewise for
    /// class positions. Positions past the shorter parent keep the
    /// scaffold's own gene, so the child never has more genes than the
    /// scaffold.
    pub fn crossover<R: Rng>(&self, p1: &Timetable, p2: &Timetable, rng: &mut R) -> Timetable {
        let mut child = self.initializer.build(rng);

        let shared_labs = child.labs().len().min(p1.labs().len()).min(p2.labs().len());
        for i in 0..shared_labs {
            let donor = if rng.random_bool(0.5) { p1 } else { p2 };
            child.set_lab(i, donor.labs()[i]);
        }

        let shared_classes = child
            .classes()
            .len()
            .min(p1.classes().len())
            .min(p2.classes().len());
        for i in 0..shared_classes {
            let donor = if rng.random_bool(0.5) { p1 } else { p2 };
            child.set_class(i, donor.classes()[i]);
        }

        child
    }

    /// Mutates a timetable in place according to the configured strategy.
    pub fn mutate<R: Rng>(&self, timetable: &mut Timetable, rng: &mut R) {
        match self.mutation_strategy {
            MutationStrategy::Wholesale => {
                if rng.random_bool(self.mutation_rate) {
                    *timetable = self.initializer.build(rng);
                }
            }
            MutationStrategy::PerGene => {
                let fresh = self.initializer.build(rng);
                for (i, &lab) in fresh.labs().iter().enumerate().take(timetable.labs().len()) {
                    if rng.random_bool(self.mutation_rate) {
                        timetable.set_lab(i, lab);
                    }
                }
                for (i, &class) in fresh
                    .classes()
                    .iter()
                    .enumerate()
                    .take(timetable.classes().len())
                {
                    if rng.random_bool(self.mutation_rate) {
                        timetable.set_class(i, class);
                    }
                }
            }
        }
    }

    /// Produces the next generation.
    ///
    /// The first `elite_count` members of `population` (which must be
    /// sorted best-first) are copied unchanged, cached scores included.
    /// The rest are children of two tournament winners, each mutated.
    /// The result has the same size as the input and is not yet
    /// evaluated or sorted.
    ///
    /// Every child draws from its own RNG seeded from `rng`, so results
    /// are identical whether built sequentially or in parallel.
    pub fn evolve<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let members = population.members();
        let size = members.len();
        let elites = self.elite_count.min(size);

        let seeds: Vec<u64> = (elites..size).map(|_| rng.random()).collect();
        let breed = |seed: u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let p1 = self.tournament_select(members, &mut rng);
            let p2 = self.tournament_select(members, &mut rng);
            let mut child = self.crossover(p1, p2, &mut rng);
            self.mutate(&mut child, &mut rng);
            child
        };
        let children: Vec<Timetable> = if self.parallel {
            seeds.into_par_iter().map(breed).collect()
        } else {
            seeds.into_iter().map(breed).collect()
        };

        let mut next = Vec::with_capacity(size);
        next.extend(members[..elites].iter().cloned());
        next.extend(children);
        Population::from_members(next)
    }
}
