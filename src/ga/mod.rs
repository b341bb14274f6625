//! Genetic-algorithm timetable search.
//!
//! # Encoding
//!
//! A [`Timetable`] holds two gene vectors, lab blocks and single lectures,
//! each gene fixing (section, course, instructor, room, time). Candidates
//! are built by the constrained random [`Initializer`] and never contain
//! structurally invalid genes (wrong room type, unqualified instructor,
//! malformed lab block, lunch slot); clashes between genes are allowed and
//! are what the [`ConflictEvaluator`] counts.
//!
//! # Submodules
//!
//! - [`initializer`]: labs-first bounded-retry construction
//! - [`fitness`]: pairwise conflict rules and `1 / (1 + conflicts)`
//! - [`operators`]: tournament selection, scaffold crossover, mutation
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning", Ch. 1 and 3

pub mod fitness;
pub mod initializer;
pub mod operators;
mod population;
mod timetable;

pub use fitness::{ConflictBreakdown, ConflictEvaluator, Score};
pub use initializer::{DEFAULT_RETRY_BUDGET, Initializer};
pub use operators::{GeneticOperators, MutationStrategy};
pub use population::{DEFAULT_POPULATION_SIZE, Population};
pub use timetable::{ClassAssignment, LabAssignment, Placement, Timetable};
