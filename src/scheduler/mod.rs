//! Generational scheduling loop and its configuration.
//!
//! # Algorithm
//!
//! [`GeneticScheduler`] builds a random initial population, then repeats
//! elitism, tournament selection, crossover and mutation until the best
//! timetable reaches the fitness threshold, the generation cap is hit, or
//! the wall-clock deadline passes. Each generation is fully scored before
//! the next one is bred.
//!
//! # Reference
//! Burke & Petrovic (2002), "Recent research directions in automated
//! timetabling", European Journal of Operational Research 140(2)

mod config;
mod driver;

pub use config::{DEFAULT_FITNESS_THRESHOLD, DEFAULT_MAX_GENERATIONS, SchedulerConfig};
pub use driver::{
    GenerationRecord, GeneticScheduler, ProgressObserver, RunState, ScheduleOutcome, SchedulerRun,
};
