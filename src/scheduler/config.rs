//! Scheduler configuration.
//!
//! Load run parameters from TOML to tune the search without code changes.
//!
//! ```
//! use u_timetable::scheduler::SchedulerConfig;
//! use std::time::Duration;
//!
//! let config = SchedulerConfig::from_toml_str(r#"
//!     population_size = 20
//!     max_generations = 500
//!     time_limit_ms = 30000
//!     mutation_strategy = "per_gene"
//! "#).unwrap();
//!
//! assert_eq!(config.population_size, 20);
//! assert_eq!(config.elite_count, 1);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::ga::operators::{DEFAULT_ELITE_COUNT, DEFAULT_MUTATION_RATE, DEFAULT_TOURNAMENT_SIZE};
use crate::ga::{DEFAULT_POPULATION_SIZE, DEFAULT_RETRY_BUDGET, MutationStrategy};

/// Default fitness at which the search stops.
pub const DEFAULT_FITNESS_THRESHOLD: f64 = 0.90;
/// Default generation cap.
pub const DEFAULT_MAX_GENERATIONS: usize = 200;

/// Parameters of one scheduling run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Best candidates carried over unchanged.
    pub elite_count: usize,
    /// Candidates drawn per tournament.
    pub tournament_size: usize,
    /// Mutation probability.
    pub mutation_rate: f64,
    /// Mutation strategy.
    pub mutation_strategy: MutationStrategy,
    /// Stop as soon as the best fitness reaches this value.
    pub fitness_threshold: f64,
    /// Stop after this many generations.
    pub max_generations: usize,
    /// Wall-clock budget for the whole run, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Random draws per unit during construction.
    pub retry_budget: usize,
    /// Count room-capacity shortfalls as conflicts (unreadable enrollment
    /// maxima always count).
    pub count_capacity: bool,
    /// Seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Use the rayon pool for construction and evaluation.
    pub parallel: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            elite_count: DEFAULT_ELITE_COUNT,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            mutation_strategy: MutationStrategy::Wholesale,
            fitness_threshold: DEFAULT_FITNESS_THRESHOLD,
            max_generations: DEFAULT_MAX_GENERATIONS,
            time_limit_ms: None,
            retry_budget: DEFAULT_RETRY_BUDGET,
            count_capacity: true,
            seed: None,
            parallel: true,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML,
    /// or fails [`SchedulerConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, TimetableError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), TimetableError> {
        let invalid = |msg: String| Err(TimetableError::InvalidConfig(msg));
        if self.population_size == 0 {
            return invalid("population_size must be at least 1".into());
        }
        if self.elite_count >= self.population_size {
            return invalid(format!(
                "elite_count ({}) must be less than population_size ({})",
                self.elite_count, self.population_size
            ));
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!("mutation_rate {} is outside [0, 1]", self.mutation_rate));
        }
        if !(0.0..=1.0).contains(&self.fitness_threshold) {
            return invalid(format!(
                "fitness_threshold {} is outside [0, 1]",
                self.fitness_threshold
            ));
        }
        if self.retry_budget == 0 {
            return invalid("retry_budget must be at least 1".into());
        }
        Ok(())
    }

    /// Wall-clock budget, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of elites carried over.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_strategy(mut self, strategy: MutationStrategy) -> Self {
        self.mutation_strategy = strategy;
        self
    }

    /// Sets the fitness at which the search stops.
    pub fn with_fitness_threshold(mut self, threshold: f64) -> Self {
        self.fitness_threshold = threshold;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the wall-clock budget (saturates at `u64::MAX` ms).
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Sets the draws per unit during construction.
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Enables or disables room-capacity shortfall conflicts.
    pub fn with_capacity_check(mut self, enabled: bool) -> Self {
        self.count_capacity = enabled;
        self
    }

    /// Sets the seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
