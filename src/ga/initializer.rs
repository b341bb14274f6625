//! Constrained random construction of timetables.
//!
//! # Algorithm
//!
//! Two phases, labs first because lab rooms and 4-slot windows are the
//! scarcer resource:
//!
//! 1. **Labs**: for every section and every lab course its department
//!    offers, draw (day, start ∈ {1, 6}, lab room, qualified instructor)
//!    until the block is free for that room, instructor, and section.
//! 2. **Lectures**: for every section, walk its lecture courses
//!    round-robin until the weekly class count is reached; each meeting
//!    draws (non-lunch slot, non-lab room, qualified instructor) until free.
//!
//! Each unit gets at most `retry_budget` draws. A unit that finds no free
//! placement, or whose course has no qualified instructor, is left out of
//! the timetable; the missing unit is not an error.

use std::collections::HashSet;

use log::trace;
use rand::Rng;
use rand::prelude::IndexedRandom;

use crate::models::LAB_BLOCK_STARTS;
use crate::snapshot::{CourseIdx, EntitySnapshot, InstructorIdx, RoomIdx, SectionIdx, SlotIdx};

use super::timetable::{ClassAssignment, LabAssignment, Placement, Timetable};

/// Default number of random draws per unit.
pub const DEFAULT_RETRY_BUDGET: usize = 50;

/// Who is busy in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Occupant {
    Room(RoomIdx),
    Instructor(InstructorIdx),
    Section(SectionIdx),
}

/// Busy (occupant, slot) cells of a timetable under construction.
#[derive(Debug, Default)]
struct Occupancy {
    busy: HashSet<(Occupant, SlotIdx)>,
}

impl Occupancy {
    fn occupants(unit: &dyn Placement) -> [Occupant; 3] {
        [
            Occupant::Room(unit.room()),
            Occupant::Instructor(unit.instructor()),
            Occupant::Section(unit.section()),
        ]
    }

    fn is_free(&self, unit: &dyn Placement) -> bool {
        let occupants = Self::occupants(unit);
        unit.slots()
            .iter()
            .all(|&slot| occupants.iter().all(|&o| !self.busy.contains(&(o, slot))))
    }

    fn occupy(&mut self, unit: &dyn Placement) {
        for &slot in unit.slots() {
            for o in Self::occupants(unit) {
                self.busy.insert((o, slot));
            }
        }
    }
}

/// Builds structurally valid random timetables.
///
/// # Example
///
/// ```no_run
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::ga::Initializer;
/// use u_timetable::models::Catalog;
/// use u_timetable::snapshot::EntitySnapshot;
///
/// let snapshot = EntitySnapshot::new(Catalog::from_json_file("catalog.json")?)?;
/// let initializer = Initializer::new(&snapshot).with_retry_budget(100);
/// let timetable = initializer.build(&mut SmallRng::seed_from_u64(7));
/// assert!(timetable.is_valid(&snapshot));
/// # Ok::<(), u_timetable::TimetableError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Initializer<'a> {
    snapshot: &'a EntitySnapshot,
    retry_budget: usize,
}

impl<'a> Initializer<'a> {
    /// Creates an initializer with [`DEFAULT_RETRY_BUDGET`].
    pub fn new(snapshot: &'a EntitySnapshot) -> Self {
        Self {
            snapshot,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }

    /// Sets the number of draws per unit.
    pub fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Returns the number of draws per unit.
    pub fn retry_budget(&self) -> usize {
        self.retry_budget
    }

    /// Returns the snapshot placements are drawn from.
    pub fn snapshot(&self) -> &'a EntitySnapshot {
        self.snapshot
    }

    /// Builds one random timetable (unevaluated).
    pub fn build<R: Rng>(&self, rng: &mut R) -> Timetable {
        let mut timetable = Timetable::new();
        let mut occupancy = Occupancy::default();
        self.place_labs(&mut timetable, &mut occupancy, rng);
        self.place_lectures(&mut timetable, &mut occupancy, rng);
        timetable
    }

    fn place_labs<R: Rng>(&self, timetable: &mut Timetable, occupancy: &mut Occupancy, rng: &mut R) {
        let snap = self.snapshot;
        for section in 0..snap.sections().len() {
            for &course in snap.section_courses(section) {
                if !snap.course(course).requires_lab() {
                    continue;
                }
                if snap.qualified_instructors(course).is_empty() {
                    trace!(
                        "lab {} for section {}: no qualified instructor",
                        snap.course(course).id,
                        snap.section(section).id
                    );
                    continue;
                }
                match self.try_place_lab(section, course, occupancy, rng) {
                    Some(lab) => {
                        occupancy.occupy(&lab);
                        timetable.push_lab(lab);
                    }
                    None => trace!(
                        "lab {} for section {}: no free block after {} draws",
                        snap.course(course).id,
                        snap.section(section).id,
                        self.retry_budget
                    ),
                }
            }
        }
    }

    fn try_place_lab<R: Rng>(
        &self,
        section: SectionIdx,
        course: CourseIdx,
        occupancy: &Occupancy,
        rng: &mut R,
    ) -> Option<LabAssignment> {
        let snap = self.snapshot;
        let instructors = snap.qualified_instructors(course);

        for _ in 0..self.retry_budget {
            let Some(&day) = snap.days().choose(rng) else {
                continue;
            };
            let start = LAB_BLOCK_STARTS[rng.random_range(0..LAB_BLOCK_STARTS.len())];
            let Some(block) = snap.lab_block(day, start) else {
                continue;
            };
            let Some(&room) = snap.lab_rooms().choose(rng) else {
                continue;
            };
            let Some(&instructor) = instructors.choose(rng) else {
                continue;
            };

            let lab = LabAssignment {
                section,
                course,
                instructor,
                room,
                block,
            };
            if occupancy.is_free(&lab) {
                return Some(lab);
            }
        }
        None
    }

    fn place_lectures<R: Rng>(
        &self,
        timetable: &mut Timetable,
        occupancy: &mut Occupancy,
        rng: &mut R,
    ) {
        let snap = self.snapshot;
        for section in 0..snap.sections().len() {
            let courses: Vec<CourseIdx> = snap
                .section_courses(section)
                .iter()
                .copied()
                .filter(|&c| !snap.course(c).requires_lab())
                .collect();
            if courses.is_empty() {
                continue;
            }

            // A section cannot meet more often than there are teaching slots.
            let target = (snap.section(section).classes_per_week as usize)
                .min(snap.teaching_slots().len());

            for unit in 0..target {
                let course = courses[unit % courses.len()];
                if snap.qualified_instructors(course).is_empty() {
                    trace!(
                        "lecture {} for section {}: no qualified instructor",
                        snap.course(course).id,
                        snap.section(section).id
                    );
                    continue;
                }
                match self.try_place_class(section, course, occupancy, rng) {
                    Some(class) => {
                        occupancy.occupy(&class);
                        timetable.push_class(class);
                    }
                    None => trace!(
                        "lecture {} for section {}: no free slot after {} draws",
                        snap.course(course).id,
                        snap.section(section).id,
                        self.retry_budget
                    ),
                }
            }
        }
    }

    fn try_place_class<R: Rng>(
        &self,
        section: SectionIdx,
        course: CourseIdx,
        occupancy: &Occupancy,
        rng: &mut R,
    ) -> Option<ClassAssignment> {
        let snap = self.snapshot;
        let instructors = snap.qualified_instructors(course);

        for _ in 0..self.retry_budget {
            let Some(&slot) = snap.teaching_slots().choose(rng) else {
                continue;
            };
            let Some(&room) = snap.lecture_rooms().choose(rng) else {
                continue;
            };
            let Some(&instructor) = instructors.choose(rng) else {
                continue;
            };

            let class = ClassAssignment {
                section,
                course,
                instructor,
                room,
                slot,
            };
            if occupancy.is_free(&class) {
                return Some(class);
            }
        }
        None
    }
}
