//! Input validation for timetabling catalogs.
//!
//! Checks structural integrity of the catalog before a snapshot is built.
//! Detects:
//! - Duplicate IDs (per record kind)
//! - Duplicate (day, index) meeting slots and zero slot indices
//! - Courses referencing unknown instructors
//! - Departments referencing unknown courses
//! - Sections referencing unknown departments
//!
//! All problems are collected; validation does not stop at the first one.

use crate::models::{Catalog, Weekday};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records of the same kind share an ID.
    DuplicateId,
    /// Two meeting slots share the same day and index.
    DuplicateSlot,
    /// A meeting slot has index 0 (indices are 1-based).
    InvalidSlotIndex,
    /// A course references an instructor that doesn't exist.
    UnknownInstructor,
    /// A department references a course that doesn't exist.
    UnknownCourse,
    /// A section references a department that doesn't exist.
    UnknownDepartment,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a catalog.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    collect_unique(catalog.rooms.iter().map(|r| r.id.as_str()), "room", &mut errors);
    let instructor_ids = collect_unique(
        catalog.instructors.iter().map(|i| i.id.as_str()),
        "instructor",
        &mut errors,
    );
    let course_ids = collect_unique(
        catalog.courses.iter().map(|c| c.id.as_str()),
        "course",
        &mut errors,
    );
    let department_names = collect_unique(
        catalog.departments.iter().map(|d| d.name.as_str()),
        "department",
        &mut errors,
    );
    collect_unique(catalog.slots.iter().map(|s| s.id.as_str()), "slot", &mut errors);
    collect_unique(
        catalog.sections.iter().map(|s| s.id.as_str()),
        "section",
        &mut errors,
    );

    // Slot grid
    let mut cells: HashSet<(Weekday, u8)> = HashSet::new();
    for slot in &catalog.slots {
        if slot.index == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlotIndex,
                format!("Slot '{}' has index 0; slot indices start at 1", slot.id),
            ));
        }
        if !cells.insert((slot.day, slot.index)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Slot '{}' duplicates {} slot {}", slot.id, slot.day, slot.index),
            ));
        }
    }

    // Course → instructor references
    for course in &catalog.courses {
        for inst in &course.instructors {
            if !instructor_ids.contains(inst.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownInstructor,
                    format!("Course '{}' references unknown instructor '{}'", course.id, inst),
                ));
            }
        }
    }

    // Department → course references
    for dept in &catalog.departments {
        for course in &dept.courses {
            if !course_ids.contains(course.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCourse,
                    format!("Department '{}' references unknown course '{}'", dept.name, course),
                ));
            }
        }
    }

    // Section → department references
    for section in &catalog.sections {
        if !department_names.contains(section.department.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDepartment,
                format!(
                    "Section '{}' references unknown department '{}'",
                    section.id, section.department
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Department, Instructor, MeetingSlot, Room, Section};
    use crate::test_fixtures;

    #[test]
    fn test_valid_catalog() {
        assert!(validate_catalog(&test_fixtures::small_college()).is_ok());
    }

    #[test]
    fn test_duplicate_room_id() {
        let catalog = test_fixtures::small_college().with_room(Room::lecture_hall("A101"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_duplicate_slot_cell() {
        let catalog = test_fixtures::small_college()
            .with_slots([MeetingSlot::new("extra", crate::models::Weekday::Monday, 2)]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateSlot));
    }

    #[test]
    fn test_zero_slot_index() {
        let catalog = Catalog::new().with_slots([MeetingSlot::new(
            "bad",
            crate::models::Weekday::Friday,
            0,
        )]);
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidSlotIndex);
    }

    #[test]
    fn test_unknown_instructor() {
        let catalog = Catalog::new()
            .with_instructor(Instructor::new("I1"))
            .with_course(Course::new("C1").with_instructor("GHOST"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownInstructor));
    }

    #[test]
    fn test_unknown_course_and_department() {
        let catalog = Catalog::new()
            .with_department(Department::new("Math").with_course("NOPE"))
            .with_section(Section::new("S1", "Physics"));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCourse));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownDepartment));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate room ID: R1");
        assert_eq!(err.to_string(), "DuplicateId: Duplicate room ID: R1");
    }
}
