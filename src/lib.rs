//! Course timetabling with a genetic algorithm.
//!
//! Assigns weekly lectures and multi-slot lab blocks of every section to
//! instructors, rooms, and meeting slots, minimizing clashes.
//!
//! # Modules
//!
//! - **`models`**: Catalog records: `Room`, `Instructor`, `MeetingSlot`,
//!   `Course`, `Department`, `Section`, and the `Catalog` bundle
//! - **`validation`**: Referential-integrity checks over a `Catalog`
//! - **`snapshot`**: `EntitySnapshot`, the immutable index-resolved view
//!   shared by one run
//! - **`ga`**: `Timetable` candidates, constrained random construction,
//!   conflict counting, and genetic operators
//! - **`scheduler`**: `SchedulerConfig` and the generational
//!   `GeneticScheduler` driver
//! - **`report`**: Per-section grid view and JSON placement records
//!
//! # Example
//!
//! ```no_run
//! use u_timetable::models::Catalog;
//! use u_timetable::report::{build_grids, render_text};
//! use u_timetable::scheduler::{GeneticScheduler, SchedulerConfig};
//! use u_timetable::snapshot::EntitySnapshot;
//!
//! let snapshot = EntitySnapshot::new(Catalog::from_json_file("catalog.json")?)?;
//! let outcome = GeneticScheduler::new(&snapshot, SchedulerConfig::default())?.run();
//! for grid in build_grids(&snapshot, &outcome.best) {
//!     println!("{}", render_text(&grid));
//! }
//! # Ok::<(), u_timetable::TimetableError>(())
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

pub mod error;
pub mod ga;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod snapshot;
pub mod validation;

#[cfg(test)]
mod test_fixtures;

pub use error::TimetableError;
