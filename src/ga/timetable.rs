//! Timetable candidate and its assignment genes.
//!
//! # Encoding
//!
//! A candidate holds two gene vectors:
//! - **Labs**: one [`LabAssignment`] per placed (section, lab course) pair,
//!   each occupying a block of [`crate::models::LAB_BLOCK_LEN`] consecutive slots.
//! - **Classes**: one [`ClassAssignment`] per placed lecture meeting.
//!
//! Units that could not be placed during construction are simply absent.
//!
//! # Fitness cache
//!
//! The score is cached after [`Timetable::evaluate`]. Reading genes never
//! touches the cache; every structural write ([`Timetable::set_lab`],
//! [`Timetable::push_class`], ...) clears it, and the next evaluation
//! recomputes it.

use crate::models::LAB_BLOCK_STARTS;
use crate::snapshot::{
    CourseIdx, EntitySnapshot, InstructorIdx, LabBlock, RoomIdx, SectionIdx, SlotIdx,
};

use super::fitness::{ConflictEvaluator, Score};

/// A scheduled unit occupying one or more slots.
///
/// Implemented by both gene kinds so that conflict checks can treat
/// lectures and labs uniformly.
pub trait Placement {
    fn section(&self) -> SectionIdx;
    fn course(&self) -> CourseIdx;
    fn instructor(&self) -> InstructorIdx;
    fn room(&self) -> RoomIdx;
    /// Occupied slots, in slot order.
    fn slots(&self) -> &[SlotIdx];

    /// Whether two units share at least one slot.
    fn overlaps(&self, other: &dyn Placement) -> bool {
        let theirs = other.slots();
        self.slots().iter().any(|s| theirs.contains(s))
    }
}

/// A lab session: one section, one course, a 4-slot block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabAssignment {
    pub section: SectionIdx,
    pub course: CourseIdx,
    pub instructor: InstructorIdx,
    pub room: RoomIdx,
    pub block: LabBlock,
}

/// A single lecture meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassAssignment {
    pub section: SectionIdx,
    pub course: CourseIdx,
    pub instructor: InstructorIdx,
    pub room: RoomIdx,
    pub slot: SlotIdx,
}

impl Placement for LabAssignment {
    fn section(&self) -> SectionIdx {
        self.section
    }
    fn course(&self) -> CourseIdx {
        self.course
    }
    fn instructor(&self) -> InstructorIdx {
        self.instructor
    }
    fn room(&self) -> RoomIdx {
        self.room
    }
    fn slots(&self) -> &[SlotIdx] {
        &self.block
    }
}

impl Placement for ClassAssignment {
    fn section(&self) -> SectionIdx {
        self.section
    }
    fn course(&self) -> CourseIdx {
        self.course
    }
    fn instructor(&self) -> InstructorIdx {
        self.instructor
    }
    fn room(&self) -> RoomIdx {
        self.room
    }
    fn slots(&self) -> &[SlotIdx] {
        std::slice::from_ref(&self.slot)
    }
}

impl LabAssignment {
    /// Checks the structural invariants of this lab against the snapshot.
    ///
    /// The room must be a lab, the instructor qualified, and the block
    /// four contiguous same-day slots starting at 1 or 6 without lunch.
    pub fn is_valid(&self, snapshot: &EntitySnapshot) -> bool {
        if !snapshot.room(self.room).is_lab()
            || !snapshot.qualified_instructors(self.course).contains(&self.instructor)
        {
            return false;
        }
        let first = snapshot.slot(self.block[0]);
        if !LAB_BLOCK_STARTS.contains(&first.index) {
            return false;
        }
        snapshot.lab_block(first.day, first.index) == Some(self.block)
    }
}

impl ClassAssignment {
    /// Checks the structural invariants of this lecture against the snapshot.
    pub fn is_valid(&self, snapshot: &EntitySnapshot) -> bool {
        !snapshot.room(self.room).is_lab()
            && snapshot.qualified_instructors(self.course).contains(&self.instructor)
            && !snapshot.is_lunch(self.slot)
    }
}

/// One candidate timetable.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    labs: Vec<LabAssignment>,
    classes: Vec<ClassAssignment>,
    score: Option<Score>,
}

impl Timetable {
    /// Creates an empty, unevaluated timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timetable from gene vectors.
    pub fn from_parts(labs: Vec<LabAssignment>, classes: Vec<ClassAssignment>) -> Self {
        Self {
            labs,
            classes,
            score: None,
        }
    }

    /// Returns the lab assignments.
    pub fn labs(&self) -> &[LabAssignment] {
        &self.labs
    }

    /// Returns the lecture assignments.
    pub fn classes(&self) -> &[ClassAssignment] {
        &self.classes
    }

    /// Total number of placed units (labs + lectures).
    pub fn unit_count(&self) -> usize {
        self.labs.len() + self.classes.len()
    }

    /// Appends a lab gene.
    pub fn push_lab(&mut self, lab: LabAssignment) {
        self.labs.push(lab);
        self.score = None;
    }

    /// Appends a class gene.
    pub fn push_class(&mut self, class: ClassAssignment) {
        self.classes.push(class);
        self.score = None;
    }

    /// Replaces the lab gene at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    pub fn set_lab(&mut self, idx: usize, lab: LabAssignment) {
        self.labs[idx] = lab;
        self.score = None;
    }

    /// Replaces the class gene at `idx`.
    ///
    /// # Panics
    /// Panics if `idx` is out of bounds.
    pub fn set_class(&mut self, idx: usize, class: ClassAssignment) {
        self.classes[idx] = class;
        self.score = None;
    }

    /// Cached score, if evaluated since the last write.
    #[inline]
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Cached fitness, if evaluated since the last write.
    #[inline]
    pub fn fitness(&self) -> Option<f64> {
        self.score.map(|s| s.fitness)
    }

    /// Cached fitness for ranking; unevaluated candidates rank as 0.
    #[inline]
    pub(crate) fn rank_fitness(&self) -> f64 {
        self.fitness().unwrap_or(0.0)
    }

    /// Whether a score is cached.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.score.is_some()
    }

    /// Drops the cached score.
    pub fn invalidate(&mut self) {
        self.score = None;
    }

    /// Recomputes and caches the score.
    pub fn evaluate(&mut self, evaluator: &ConflictEvaluator<'_>) -> Score {
        let score = evaluator.score(self);
        self.score = Some(score);
        score
    }

    /// Returns the cached score, evaluating first if needed.
    pub fn ensure_evaluated(&mut self, evaluator: &ConflictEvaluator<'_>) -> Score {
        match self.score {
            Some(score) => score,
            None => self.evaluate(evaluator),
        }
    }

    /// Whether both timetables hold identical gene vectors.
    pub fn same_assignments(&self, other: &Timetable) -> bool {
        self.labs == other.labs && self.classes == other.classes
    }

    /// Validates every gene's structural invariants.
    pub fn is_valid(&self, snapshot: &EntitySnapshot) -> bool {
        self.labs.iter().all(|l| l.is_valid(snapshot))
            && self.classes.iter().all(|c| c.is_valid(snapshot))
    }

    /// Iterates over all units as placements (labs first).
    pub fn placements(&self) -> impl Iterator<Item = &dyn Placement> {
        self.labs
            .iter()
            .map(|l| l as &dyn Placement)
            .chain(self.classes.iter().map(|c| c as &dyn Placement))
    }
}
