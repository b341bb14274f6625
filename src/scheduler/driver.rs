//! Generational driver.
//!
//! # State machine
//!
//! ```text
//!            best ≥ threshold
//! Running ─────────────────────▶ Converged
//!    │  generation ≥ cap or deadline passed
//!    └─────────────────────────▶ Exhausted
//! ```
//!
//! Each [`GeneticScheduler::step`] first checks the stop conditions
//! against the current (sorted) population; if neither holds it evolves
//! one generation, evaluates it on the rayon pool, and re-sorts. Both
//! terminal states carry the best timetable found; running out of
//! generations or time is a normal outcome, not an error.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::ga::{ConflictEvaluator, GeneticOperators, Initializer, Population, Score, Timetable};
use crate::snapshot::EntitySnapshot;

use super::config::SchedulerConfig;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Still evolving.
    Running,
    /// Best fitness reached the threshold.
    Converged,
    /// Generation cap or deadline reached first.
    Exhausted,
}

impl RunState {
    /// Returns true for `Converged` and `Exhausted`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::Running)
    }
}

/// Best-of-generation summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationRecord {
    pub generation: usize,
    pub best_fitness: f64,
    pub best_conflicts: u32,
}

/// Receives one record per generation (including generation 0).
pub trait ProgressObserver {
    fn on_generation(&mut self, record: &GenerationRecord);
}

impl<F: FnMut(&GenerationRecord)> ProgressObserver for F {
    fn on_generation(&mut self, record: &GenerationRecord) {
        self(record)
    }
}

/// In-flight state of one run.
#[derive(Debug)]
pub struct SchedulerRun {
    population: Population,
    generation: usize,
    state: RunState,
    rng: SmallRng,
    started: Instant,
    deadline: Option<Instant>,
    history: Vec<GenerationRecord>,
}

impl SchedulerRun {
    /// Returns the current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns the number of generations evolved so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population, sorted best-first.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best candidate of the current population.
    pub fn best(&self) -> &Timetable {
        // Populations are never empty: the config rejects size 0.
        &self.population.members()[0]
    }

    /// Returns one record per generation so far.
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Best timetable found.
    pub best: Timetable,
    /// Its score.
    pub score: Score,
    /// Generations evolved before stopping.
    pub generations: usize,
    /// Terminal state.
    pub state: RunState,
    /// One record per generation, starting at 0.
    pub history: Vec<GenerationRecord>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Genetic-algorithm timetable scheduler.
///
/// # Example
///
/// ```no_run
/// use u_timetable::models::Catalog;
/// use u_timetable::scheduler::{GeneticScheduler, SchedulerConfig};
/// use u_timetable::snapshot::EntitySnapshot;
///
/// let snapshot = EntitySnapshot::new(Catalog::from_json_file("catalog.json")?)?;
/// let config = SchedulerConfig::default().with_seed(42);
/// let outcome = GeneticScheduler::new(&snapshot, config)?
///     .with_observer(|r: &u_timetable::scheduler::GenerationRecord| {
///         println!("gen {} fitness {:.3}", r.generation, r.best_fitness)
///     })
///     .run();
/// println!("{} conflicts", outcome.score.conflicts);
/// # Ok::<(), u_timetable::TimetableError>(())
/// ```
pub struct GeneticScheduler<'a> {
    config: SchedulerConfig,
    evaluator: ConflictEvaluator<'a>,
    operators: GeneticOperators<'a>,
    deadline: Option<Instant>,
    observers: Vec<Box<dyn ProgressObserver + 'a>>,
}

impl<'a> GeneticScheduler<'a> {
    /// Creates a scheduler for one snapshot.
    ///
    /// # Errors
    /// Returns [`crate::TimetableError::InvalidConfig`] if the config
    /// fails validation.
    pub fn new(
        snapshot: &'a EntitySnapshot,
        config: SchedulerConfig,
    ) -> Result<Self, crate::TimetableError> {
        config.validate()?;
        let initializer = Initializer::new(snapshot).with_retry_budget(config.retry_budget);
        let operators = GeneticOperators::new(initializer)
            .with_tournament_size(config.tournament_size)
            .with_mutation_rate(config.mutation_rate)
            .with_mutation_strategy(config.mutation_strategy)
            .with_elite_count(config.elite_count)
            .with_parallel(config.parallel);
        let evaluator =
            ConflictEvaluator::new(snapshot).with_capacity_check(config.count_capacity);
        Ok(Self {
            config,
            evaluator,
            operators,
            deadline: None,
            observers: Vec::new(),
        })
    }

    /// Registers a progress observer.
    pub fn with_observer(mut self, observer: impl ProgressObserver + 'a) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Sets an absolute deadline, overriding the configured time limit.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Builds, scores, and sorts the initial population (generation 0).
    pub fn start(&mut self) -> SchedulerRun {
        let started = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let deadline = self
            .deadline
            .or_else(|| self.config.time_limit().map(|limit| started + limit));

        info!(
            "starting timetable search: population {}, threshold {:.2}, max {} generations",
            self.config.population_size, self.config.fitness_threshold, self.config.max_generations
        );

        let mut population = Population::random(
            self.operators.initializer(),
            self.config.population_size,
            &mut rng,
            self.config.parallel,
        );
        population.evaluate(&self.evaluator, self.config.parallel);
        population.sort_by_fitness();

        let mut run = SchedulerRun {
            population,
            generation: 0,
            state: RunState::Running,
            rng,
            started,
            deadline,
            history: Vec::new(),
        };
        self.record(&mut run);
        run
    }

    /// Advances the run by one transition.
    pub fn step(&mut self, run: &mut SchedulerRun) -> RunState {
        if run.state.is_terminal() {
            return run.state;
        }

        let best = run.best().rank_fitness();
        if best >= self.config.fitness_threshold {
            run.state = RunState::Converged;
            return run.state;
        }
        let out_of_time = run.deadline.is_some_and(|d| Instant::now() >= d);
        if run.generation >= self.config.max_generations || out_of_time {
            run.state = RunState::Exhausted;
            return run.state;
        }

        let mut next = self.operators.evolve(&run.population, &mut run.rng);
        next.evaluate(&self.evaluator, self.config.parallel);
        next.sort_by_fitness();
        run.population = next;
        run.generation += 1;
        self.record(run);
        run.state
    }

    /// Steps until a terminal state and returns the outcome.
    pub fn run(mut self) -> ScheduleOutcome {
        let mut run = self.start();
        while !self.step(&mut run).is_terminal() {}
        self.finish(run)
    }

    /// Packages a terminal run.
    pub fn finish(&self, run: SchedulerRun) -> ScheduleOutcome {
        let elapsed = run.started.elapsed();
        let SchedulerRun {
            population,
            generation,
            state,
            history,
            ..
        } = run;
        let best = population
            .into_members()
            .into_iter()
            .next()
            .unwrap_or_default();
        let score = best
            .score()
            .unwrap_or_else(|| self.evaluator.score(&best));

        info!(
            "timetable search {:?} after {} generations in {:.2?}: fitness {:.4}, {} conflicts",
            state, generation, elapsed, score.fitness, score.conflicts
        );

        ScheduleOutcome {
            best,
            score,
            generations: generation,
            state,
            history,
            elapsed,
        }
    }

    fn record(&mut self, run: &mut SchedulerRun) {
        let score = run
            .best()
            .score()
            .unwrap_or_else(|| self.evaluator.score(run.best()));
        let record = GenerationRecord {
            generation: run.generation,
            best_fitness: score.fitness,
            best_conflicts: score.conflicts,
        };
        debug!(
            "generation {}: best fitness {:.4} ({} conflicts)",
            record.generation, record.best_fitness, record.best_conflicts
        );
        for observer in &mut self.observers {
            observer.on_generation(&record);
        }
        run.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;
    use std::cell::RefCell;

    fn config() -> SchedulerConfig {
        SchedulerConfig::default().with_seed(42).with_parallel(false)
    }

    #[test]
    fn test_zero_generation_cap_returns_initial_best() {
        // Every calculus lecture is over capacity, so 1.0 is out of reach.
        let snap = test_fixtures::snapshot(test_fixtures::oversubscribed());
        let cfg = config().with_max_generations(0).with_fitness_threshold(1.0);

        let mut scheduler = GeneticScheduler::new(&snap, cfg.clone()).unwrap();
        let run = scheduler.start();
        let initial_best = run.best().clone();

        let outcome = GeneticScheduler::new(&snap, cfg).unwrap().run();
        assert_eq!(outcome.generations, 0);
        assert!(outcome.best.same_assignments(&initial_best));
        assert_eq!(outcome.history.len(), 1);
        assert_eq!(outcome.state, RunState::Exhausted);
        assert!(outcome.score.conflicts >= 1);
    }

    #[test]
    fn test_converges_on_easy_catalog() {
        let snap = test_fixtures::snapshot(test_fixtures::single_lab());
        let outcome = GeneticScheduler::new(&snap, config()).unwrap().run();
        assert_eq!(outcome.state, RunState::Converged);
        assert_eq!(outcome.score.fitness, 1.0);
        assert_eq!(outcome.generations, 0);
        assert_eq!(outcome.best.labs().len(), 1);
    }

    #[test]
    fn test_exhausts_when_threshold_unreachable() {
        use crate::models::{Catalog, Course, Department, Instructor, MeetingSlot, Room, Section, Weekday};
        // Enrollment exceeds the only room, so every candidate has one
        // capacity conflict.
        let catalog = Catalog::new()
            .with_room(Room::lecture_hall("A1").with_capacity(10))
            .with_instructor(Instructor::new("I1"))
            .with_slots([MeetingSlot::new("Mon-1", Weekday::Monday, 1)])
            .with_course(Course::new("C1").with_max_students(99).with_instructor("I1"))
            .with_department(Department::new("D").with_course("C1"))
            .with_section(Section::new("S1", "D").with_classes_per_week(1));
        let snap = test_fixtures::snapshot(catalog);

        let outcome = GeneticScheduler::new(&snap, config().with_max_generations(5))
            .unwrap()
            .run();
        assert_eq!(outcome.state, RunState::Exhausted);
        assert_eq!(outcome.generations, 5);
        assert_eq!(outcome.score.conflicts, 1);
        assert!((outcome.score.fitness - 0.5).abs() < 1e-12);
        assert_eq!(outcome.history.len(), 6);
    }

    #[test]
    fn test_deadline_stops_run() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let cfg = config()
            .with_fitness_threshold(1.0)
            .with_max_generations(1_000_000);
        let mut scheduler = GeneticScheduler::new(&snap, cfg)
            .unwrap()
            .with_deadline(Instant::now());
        let mut run = scheduler.start();
        // Unreachable threshold so only the deadline can end the run.
        scheduler.config.fitness_threshold = 1.1;
        assert_eq!(scheduler.step(&mut run), RunState::Exhausted);
        assert_eq!(run.generation(), 0);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let seen = RefCell::new(Vec::new());
        let outcome = GeneticScheduler::new(
            &snap,
            config().with_fitness_threshold(1.0).with_max_generations(3),
        )
        .unwrap()
        .with_observer(|r: &GenerationRecord| seen.borrow_mut().push(r.generation))
        .run();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), outcome.history.len());
        assert_eq!(seen, (0..=outcome.generations).collect::<Vec<_>>());
    }

    #[test]
    fn test_elite_survives_and_best_never_worsens() {
        let snap = test_fixtures::snapshot(test_fixtures::oversubscribed());
        let cfg = config()
            .with_fitness_threshold(1.0)
            .with_max_generations(10)
            .with_mutation_rate(0.5);
        let mut scheduler = GeneticScheduler::new(&snap, cfg).unwrap();
        let mut run = scheduler.start();

        while run.state() == RunState::Running {
            let elite = run.best().clone();
            let before = elite.rank_fitness();
            if scheduler.step(&mut run).is_terminal() {
                break;
            }
            let after = run.best().rank_fitness();
            assert!(after >= before);
            if after == before {
                // No better candidate displaced it; the stable sort keeps
                // the carried-over elite ahead of equally fit children.
                assert!(run.best().same_assignments(&elite));
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let cfg = config().with_fitness_threshold(1.0).with_max_generations(4);
        let a = GeneticScheduler::new(&snap, cfg.clone()).unwrap().run();
        let b = GeneticScheduler::new(&snap, cfg.with_parallel(true)).unwrap().run();
        assert!(a.best.same_assignments(&b.best));
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let snap = test_fixtures::snapshot(test_fixtures::single_lab());
        assert!(GeneticScheduler::new(&snap, SchedulerConfig::default().with_population_size(0)).is_err());
    }
}
