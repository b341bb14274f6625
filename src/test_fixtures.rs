//! Shared catalogs for unit tests.

use crate::models::{
    Catalog, Course, Department, Instructor, MeetingSlot, Room, RoomType, Section, Weekday,
};
use crate::snapshot::EntitySnapshot;

/// Monday..Friday, slots 1..=9 (slot 5 is lunch).
pub fn weekday_slots() -> Vec<MeetingSlot> {
    MeetingSlot::week(&Weekday::ALL[..5], 9)
}

/// Two departments, three sections, two lecture and two lab courses.
pub fn small_college() -> Catalog {
    Catalog::new()
        .with_room(Room::lecture_hall("A101").with_capacity(60))
        .with_room(Room::lecture_hall("A102").with_capacity(60))
        .with_room(Room::seminar("S201").with_capacity(45))
        .with_room(Room::lab("L301").with_capacity(40))
        .with_room(Room::lab("L302").with_capacity(40))
        .with_instructor(Instructor::new("I1").with_name("Ada"))
        .with_instructor(Instructor::new("I2").with_name("Grace"))
        .with_instructor(Instructor::new("I3").with_name("Edsger"))
        .with_instructor(Instructor::new("I4").with_name("Barbara"))
        .with_instructor(Instructor::new("I5").with_name("Donald"))
        .with_slots(weekday_slots())
        .with_course(
            Course::new("MATH101")
                .with_name("Calculus")
                .with_max_students(40)
                .with_instructor("I1")
                .with_instructor("I2"),
        )
        .with_course(
            Course::new("PHYS101")
                .with_name("Mechanics")
                .with_max_students(40)
                .with_instructor("I2")
                .with_instructor("I3"),
        )
        .with_course(
            Course::new("CHEM101L")
                .with_name("Chemistry Lab")
                .with_max_students(30)
                .with_room_required(RoomType::Lab)
                .with_instructor("I4"),
        )
        .with_course(
            Course::new("CS101L")
                .with_name("Programming Lab")
                .with_max_students(30)
                .with_room_required(RoomType::Lab)
                .with_instructor("I5")
                .with_instructor("I4"),
        )
        .with_department(
            Department::new("Science")
                .with_course("MATH101")
                .with_course("PHYS101")
                .with_course("CHEM101L"),
        )
        .with_department(
            Department::new("Computing")
                .with_course("MATH101")
                .with_course("CS101L"),
        )
        .with_section(Section::new("SCI-A", "Science").with_classes_per_week(4))
        .with_section(Section::new("SCI-B", "Science").with_classes_per_week(4))
        .with_section(Section::new("CMP-A", "Computing").with_classes_per_week(3))
}

/// One section taking one lab course, with exactly one lab room and
/// one qualified instructor.
pub fn single_lab() -> Catalog {
    Catalog::new()
        .with_room(Room::lab("L1").with_capacity(30))
        .with_instructor(Instructor::new("I1"))
        .with_slots(weekday_slots())
        .with_course(
            Course::new("BIO1L")
                .with_max_students(20)
                .with_room_required(RoomType::Lab)
                .with_instructor("I1"),
        )
        .with_department(Department::new("Biology").with_course("BIO1L"))
        .with_section(Section::new("BIO-A", "Biology"))
}

/// A lab course but no lab rooms at all.
pub fn no_lab_rooms() -> Catalog {
    Catalog::new()
        .with_room(Room::lecture_hall("A1").with_capacity(100))
        .with_instructor(Instructor::new("I1"))
        .with_slots(weekday_slots())
        .with_course(
            Course::new("BIO1L")
                .with_max_students(20)
                .with_room_required(RoomType::Lab)
                .with_instructor("I1"),
        )
        .with_course(Course::new("BIO1").with_max_students(20).with_instructor("I1"))
        .with_department(
            Department::new("Biology")
                .with_course("BIO1L")
                .with_course("BIO1"),
        )
        .with_section(Section::new("BIO-A", "Biology").with_classes_per_week(2))
}

/// [`small_college`] with a calculus cohort larger than any room, so
/// every calculus lecture costs one capacity conflict.
pub fn oversubscribed() -> Catalog {
    let mut catalog = small_college();
    for course in catalog.courses.iter_mut().filter(|c| c.id == "MATH101") {
        course.max_students = "99".into();
    }
    catalog
}

/// Builds a snapshot from a fixture catalog.
pub fn snapshot(catalog: Catalog) -> EntitySnapshot {
    EntitySnapshot::new(catalog).expect("fixture catalog is valid")
}
