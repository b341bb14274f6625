//! Conflict counting and fitness.
//!
//! # Rules
//!
//! Every unordered pair of placed units (i < j, never a unit with itself)
//! whose slots overlap contributes:
//! - +1 if both belong to the same section
//! - +1 if both use the same room
//! - +1 if both are taught by the same instructor
//!
//! The three checks are independent, so one pair can add up to 3.
//! "Overlap" means an identical slot for two lectures, a shared slot for
//! two labs, and the lecture's slot lying inside the block for a
//! lab/lecture pair.
//!
//! Each unit whose course has an unparseable enrollment maximum adds +1.
//! With capacity checking on, each unit whose room seats fewer students
//! than its course's enrollment maximum adds +1 as well.
//!
//! Fitness is `1 / (1 + conflicts)`: in (0, 1], and 1.0 exactly when the
//! timetable has no conflicts.

use serde::Serialize;

use crate::snapshot::EntitySnapshot;

use super::timetable::{Placement, Timetable};

/// Conflict count and derived fitness of one timetable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// Total conflicts.
    pub conflicts: u32,
    /// `1 / (1 + conflicts)`.
    pub fitness: f64,
}

impl Score {
    /// Builds a score from a conflict count.
    pub fn from_conflicts(conflicts: u32) -> Self {
        Self {
            conflicts,
            fitness: 1.0 / (1.0 + f64::from(conflicts)),
        }
    }

    /// Whether the timetable is conflict-free.
    #[inline]
    pub fn is_perfect(&self) -> bool {
        self.conflicts == 0
    }
}

/// Conflicts split by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConflictBreakdown {
    /// Same section meeting twice at once.
    pub section: u32,
    /// Same room booked twice at once.
    pub room: u32,
    /// Same instructor booked twice at once.
    pub instructor: u32,
    /// Room too small, or enrollment maximum unreadable.
    pub capacity: u32,
}

impl ConflictBreakdown {
    /// Sum over all causes.
    pub fn total(&self) -> u32 {
        self.section + self.room + self.instructor + self.capacity
    }
}

/// Scores timetables against a snapshot.
///
/// Pure: reads only the snapshot and the timetable passed in, so one
/// evaluator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct ConflictEvaluator<'a> {
    snapshot: &'a EntitySnapshot,
    count_capacity: bool,
}

impl<'a> ConflictEvaluator<'a> {
    /// Creates an evaluator with capacity checking on.
    pub fn new(snapshot: &'a EntitySnapshot) -> Self {
        Self {
            snapshot,
            count_capacity: true,
        }
    }

    /// Enables or disables room-capacity shortfall conflicts.
    ///
    /// Unreadable enrollment maxima count either way.
    pub fn with_capacity_check(mut self, enabled: bool) -> Self {
        self.count_capacity = enabled;
        self
    }

    /// Returns the snapshot being scored against.
    pub fn snapshot(&self) -> &'a EntitySnapshot {
        self.snapshot
    }

    /// Counts conflicts by cause.
    pub fn breakdown(&self, timetable: &Timetable) -> ConflictBreakdown {
        let units: Vec<&dyn Placement> = timetable.placements().collect();
        let mut counts = ConflictBreakdown::default();

        for (i, a) in units.iter().enumerate() {
            if self.capacity_short(*a) {
                counts.capacity += 1;
            }
            for b in &units[i + 1..] {
                if !a.overlaps(*b) {
                    continue;
                }
                if a.section() == b.section() {
                    counts.section += 1;
                }
                if a.room() == b.room() {
                    counts.room += 1;
                }
                if a.instructor() == b.instructor() {
                    counts.instructor += 1;
                }
            }
        }

        counts
    }

    /// Total conflicts.
    pub fn conflicts(&self, timetable: &Timetable) -> u32 {
        self.breakdown(timetable).total()
    }

    /// Conflicts and fitness.
    pub fn score(&self, timetable: &Timetable) -> Score {
        Score::from_conflicts(self.conflicts(timetable))
    }

    /// Unreadable enrollment always counts; the seat comparison only
    /// with capacity checking on.
    fn capacity_short(&self, unit: &dyn Placement) -> bool {
        match self.snapshot.enrollment_cap(unit.course()) {
            Some(cap) => self.count_capacity && self.snapshot.room(unit.room()).capacity < cap,
            None => true,
        }
    }
}
