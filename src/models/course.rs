//! Course, department, and section models.
//!
//! A department offers a set of courses; each section belongs to one
//! department and takes every course the department offers. Courses that
//! require a [`RoomType::Lab`] are taught as one lab block per week;
//! all others are taught as single-slot lectures, distributed round-robin
//! until the section's weekly class count is met.

use serde::{Deserialize, Serialize};

use super::RoomType;

/// A course offered by one or more departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier (course number).
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Maximum enrolled students, as entered in the catalog.
    ///
    /// Kept as text; see [`Course::enrollment_cap`].
    #[serde(default)]
    pub max_students: String,
    /// Room type this course must be taught in.
    #[serde(default)]
    pub room_required: RoomType,
    /// IDs of instructors qualified to teach this course.
    #[serde(default)]
    pub instructors: Vec<String>,
}

impl Course {
    /// Creates a lecture course with no instructors and no enrollment cap.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_students: "0".into(),
            room_required: RoomType::LectureHall,
            instructors: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the maximum enrollment.
    pub fn with_max_students(mut self, max_students: u32) -> Self {
        self.max_students = max_students.to_string();
        self
    }

    /// Sets the maximum enrollment from raw catalog text.
    pub fn with_raw_max_students(mut self, raw: impl Into<String>) -> Self {
        self.max_students = raw.into();
        self
    }

    /// Sets the required room type.
    pub fn with_room_required(mut self, room_type: RoomType) -> Self {
        self.room_required = room_type;
        self
    }

    /// Adds a qualified instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructors.push(instructor_id.into());
        self
    }

    /// Whether this course is taught as a lab block.
    #[inline]
    pub fn requires_lab(&self) -> bool {
        self.room_required.is_lab()
    }

    /// Parses the enrollment maximum.
    ///
    /// Returns `None` when the catalog text is not a non-negative integer.
    pub fn enrollment_cap(&self) -> Option<u32> {
        self.max_students.trim().parse().ok()
    }
}

/// An academic department and the courses it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department name.
    pub name: String,
    /// IDs of courses offered.
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Department {
    /// Creates a department with no courses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            courses: Vec::new(),
        }
    }

    /// Adds an offered course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.courses.push(course_id.into());
        self
    }
}

/// A student group that attends classes together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Owning department name.
    pub department: String,
    /// Target number of lecture meetings per week.
    #[serde(default)]
    pub classes_per_week: u32,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            department: department.into(),
            classes_per_week: 0,
        }
    }

    /// Sets the weekly lecture count.
    pub fn with_classes_per_week(mut self, count: u32) -> Self {
        self.classes_per_week = count;
        self
    }
}
