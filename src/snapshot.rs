//! Immutable, run-scoped view of the catalog.
//!
//! [`EntitySnapshot`] is built once from a validated [`Catalog`] and then
//! shared read-only by every component of a run. String references are
//! resolved into indices up front so the search works with plain `usize`
//! handles; derived views (lab rooms, lecture rooms, per-day slot lists)
//! are materialized here as well.

use std::collections::HashMap;

use crate::error::TimetableError;
use crate::models::{
    Catalog, Course, Department, Instructor, LAB_BLOCK_LEN, MeetingSlot, Room, Section, Weekday,
};
use crate::validation::validate_catalog;

/// Index into [`EntitySnapshot::rooms`].
pub type RoomIdx = usize;
/// Index into [`EntitySnapshot::instructors`].
pub type InstructorIdx = usize;
/// Index into [`EntitySnapshot::slots`].
pub type SlotIdx = usize;
/// Index into [`EntitySnapshot::courses`].
pub type CourseIdx = usize;
/// Index into [`EntitySnapshot::departments`].
pub type DepartmentIdx = usize;
/// Index into [`EntitySnapshot::sections`].
pub type SectionIdx = usize;

/// Slot indices of one lab block, in slot order.
pub type LabBlock = [SlotIdx; LAB_BLOCK_LEN];

/// Read-only catalog data for one scheduling run.
#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    rooms: Vec<Room>,
    instructors: Vec<Instructor>,
    slots: Vec<MeetingSlot>,
    courses: Vec<Course>,
    departments: Vec<Department>,
    sections: Vec<Section>,

    course_instructors: Vec<Vec<InstructorIdx>>,
    department_courses: Vec<Vec<CourseIdx>>,
    section_department: Vec<DepartmentIdx>,
    enrollment_caps: Vec<Option<u32>>,

    lab_rooms: Vec<RoomIdx>,
    lecture_rooms: Vec<RoomIdx>,
    teaching_slots: Vec<SlotIdx>,
    days: Vec<Weekday>,
    day_slots: HashMap<Weekday, Vec<SlotIdx>>,
    cell_lookup: HashMap<(Weekday, u8), SlotIdx>,
}

impl EntitySnapshot {
    /// Validates the catalog and builds the snapshot.
    ///
    /// # Errors
    /// Returns [`TimetableError::InvalidCatalog`] listing every integrity
    /// problem found by [`validate_catalog`].
    pub fn new(catalog: Catalog) -> Result<Self, TimetableError> {
        validate_catalog(&catalog).map_err(TimetableError::InvalidCatalog)?;

        let Catalog {
            rooms,
            instructors,
            slots,
            courses,
            departments,
            sections,
        } = catalog;

        let instructor_index = index_by(&instructors, |i| i.id.as_str());
        let course_index = index_by(&courses, |c| c.id.as_str());
        let department_index = index_by(&departments, |d| d.name.as_str());

        // Validation guarantees every lookup below resolves.
        let course_instructors = courses
            .iter()
            .map(|c| {
                c.instructors
                    .iter()
                    .filter_map(|id| instructor_index.get(id.as_str()).copied())
                    .collect()
            })
            .collect();
        let department_courses = departments
            .iter()
            .map(|d| {
                d.courses
                    .iter()
                    .filter_map(|id| course_index.get(id.as_str()).copied())
                    .collect()
            })
            .collect();
        let section_department = sections
            .iter()
            .map(|s| department_index.get(s.department.as_str()).copied().unwrap_or(0))
            .collect();
        let enrollment_caps = courses.iter().map(Course::enrollment_cap).collect();

        let (lab_rooms, lecture_rooms): (Vec<RoomIdx>, Vec<RoomIdx>) =
            (0..rooms.len()).partition(|&r| rooms[r].is_lab());

        let teaching_slots = (0..slots.len()).filter(|&s| !slots[s].is_lunch()).collect();

        let mut day_slots: HashMap<Weekday, Vec<SlotIdx>> = HashMap::new();
        let mut cell_lookup = HashMap::new();
        for (idx, slot) in slots.iter().enumerate() {
            day_slots.entry(slot.day).or_default().push(idx);
            cell_lookup.insert((slot.day, slot.index), idx);
        }
        for list in day_slots.values_mut() {
            list.sort_by_key(|&s| slots[s].index);
        }
        let mut days: Vec<Weekday> = day_slots.keys().copied().collect();
        days.sort();

        Ok(Self {
            rooms,
            instructors,
            slots,
            courses,
            departments,
            sections,
            course_instructors,
            department_courses,
            section_department,
            enrollment_caps,
            lab_rooms,
            lecture_rooms,
            teaching_slots,
            days,
            day_slots,
            cell_lookup,
        })
    }

    /// Returns all rooms.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns all instructors.
    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    /// Returns all meeting slots.
    pub fn slots(&self) -> &[MeetingSlot] {
        &self.slots
    }

    /// Returns all courses.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Returns all departments.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Returns all sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    pub fn room(&self, idx: RoomIdx) -> &Room {
        &self.rooms[idx]
    }

    #[inline]
    pub fn instructor(&self, idx: InstructorIdx) -> &Instructor {
        &self.instructors[idx]
    }

    #[inline]
    pub fn slot(&self, idx: SlotIdx) -> &MeetingSlot {
        &self.slots[idx]
    }

    #[inline]
    pub fn course(&self, idx: CourseIdx) -> &Course {
        &self.courses[idx]
    }

    #[inline]
    pub fn section(&self, idx: SectionIdx) -> &Section {
        &self.sections[idx]
    }

    /// Department owning a section.
    pub fn section_department(&self, section: SectionIdx) -> &Department {
        &self.departments[self.section_department[section]]
    }

    /// Courses a section takes (its department's offering), in catalog order.
    pub fn section_courses(&self, section: SectionIdx) -> &[CourseIdx] {
        &self.department_courses[self.section_department[section]]
    }

    /// Instructors qualified to teach a course.
    pub fn qualified_instructors(&self, course: CourseIdx) -> &[InstructorIdx] {
        &self.course_instructors[course]
    }

    /// Parsed enrollment maximum; `None` when the catalog value is malformed.
    #[inline]
    pub fn enrollment_cap(&self, course: CourseIdx) -> Option<u32> {
        self.enrollment_caps[course]
    }

    /// Rooms of type Lab.
    pub fn lab_rooms(&self) -> &[RoomIdx] {
        &self.lab_rooms
    }

    /// Rooms of any type other than Lab.
    pub fn lecture_rooms(&self) -> &[RoomIdx] {
        &self.lecture_rooms
    }

    /// All slots except lunch.
    pub fn teaching_slots(&self) -> &[SlotIdx] {
        &self.teaching_slots
    }

    /// Days that have at least one slot, in calendar order.
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Slots on a day, ordered by slot index (lunch included).
    pub fn day_slots(&self, day: Weekday) -> &[SlotIdx] {
        self.day_slots.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up the slot at (day, index).
    pub fn slot_at(&self, day: Weekday, index: u8) -> Option<SlotIdx> {
        self.cell_lookup.get(&(day, index)).copied()
    }

    /// Whether a slot is the lunch slot.
    #[inline]
    pub fn is_lunch(&self, slot: SlotIdx) -> bool {
        self.slots[slot].is_lunch()
    }

    /// Derives the lab block starting at `(day, start)`.
    ///
    /// Returns `None` if any of the block's slots is missing from the
    /// catalog (the block would run past the end of the day) or is the
    /// lunch slot.
    pub fn lab_block(&self, day: Weekday, start: u8) -> Option<LabBlock> {
        let mut block = [0; LAB_BLOCK_LEN];
        for (offset, cell) in block.iter_mut().enumerate() {
            let index = start.checked_add(offset as u8)?;
            let slot = self.slot_at(day, index)?;
            if self.is_lunch(slot) {
                return None;
            }
            *cell = slot;
        }
        Some(block)
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &str) -> HashMap<&str, usize> {
    items.iter().enumerate().map(|(i, item)| (key(item), i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LUNCH_SLOT, RoomType};
    use crate::test_fixtures;

    #[test]
    fn test_snapshot_resolves_references() {
        let snap = EntitySnapshot::new(test_fixtures::small_college()).unwrap();
        let sci_a = snap
            .sections()
            .iter()
            .position(|s| s.id == "SCI-A")
            .unwrap();
        assert_eq!(snap.section_department(sci_a).name, "Science");
        let course_ids: Vec<&str> = snap
            .section_courses(sci_a)
            .iter()
            .map(|&c| snap.course(c).id.as_str())
            .collect();
        assert_eq!(course_ids, vec!["MATH101", "PHYS101", "CHEM101L"]);

        let cs = snap.courses().iter().position(|c| c.id == "CS101L").unwrap();
        assert_eq!(snap.qualified_instructors(cs).len(), 2);
    }

    #[test]
    fn test_room_views() {
        let snap = EntitySnapshot::new(test_fixtures::small_college()).unwrap();
        assert!(snap.lab_rooms().iter().all(|&r| snap.room(r).room_type == RoomType::Lab));
        assert!(snap.lecture_rooms().iter().all(|&r| !snap.room(r).is_lab()));
        assert_eq!(
            snap.lab_rooms().len() + snap.lecture_rooms().len(),
            snap.rooms().len()
        );
    }

    #[test]
    fn test_slot_views() {
        let snap = EntitySnapshot::new(test_fixtures::small_college()).unwrap();
        assert_eq!(snap.days().len(), 5);
        assert!(snap.teaching_slots().iter().all(|&s| !snap.is_lunch(s)));
        let monday = snap.day_slots(Weekday::Monday);
        assert_eq!(monday.len(), 9);
        assert!(snap.is_lunch(monday[(LUNCH_SLOT - 1) as usize]));
        assert!(snap.day_slots(Weekday::Saturday).is_empty());
    }

    #[test]
    fn test_lab_block_derivation() {
        let snap = EntitySnapshot::new(test_fixtures::small_college()).unwrap();
        let morning = snap.lab_block(Weekday::Tuesday, 1).unwrap();
        let indices: Vec<u8> = morning.iter().map(|&s| snap.slot(s).index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert!(morning.iter().all(|&s| snap.slot(s).day == Weekday::Tuesday));

        assert!(snap.lab_block(Weekday::Tuesday, 6).is_some());
        // Would cover lunch
        assert!(snap.lab_block(Weekday::Tuesday, 3).is_none());
        // Runs past the last slot
        assert!(snap.lab_block(Weekday::Tuesday, 7).is_none());
        // Day not in catalog
        assert!(snap.lab_block(Weekday::Saturday, 1).is_none());
    }

    #[test]
    fn test_malformed_enrollment_is_none() {
        let catalog = test_fixtures::small_college();
        let mut catalog = catalog;
        catalog.courses[0].max_students = "n/a".into();
        let snap = EntitySnapshot::new(catalog).unwrap();
        assert_eq!(snap.enrollment_cap(0), None);
        assert_eq!(snap.enrollment_cap(1), Some(40));
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let catalog = test_fixtures::small_college().with_section(
            crate::models::Section::new("X", "Nowhere"),
        );
        let err = EntitySnapshot::new(catalog).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidCatalog(ref e) if e.len() == 1));
    }
}
