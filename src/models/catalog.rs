//! Catalog input bundle.
//!
//! The catalog is everything a scheduling run reasons over, as handed over
//! by whatever owns the records (a database, a JSON file, a test fixture).

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Course, Department, Instructor, MeetingSlot, Room, Section};
use crate::error::TimetableError;

/// All catalog records for one scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub slots: Vec<MeetingSlot>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a catalog from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, TimetableError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds meeting slots.
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = MeetingSlot>) -> Self {
        self.slots.extend(slots);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a department.
    pub fn with_department(mut self, department: Department) -> Self {
        self.departments.push(department);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}
