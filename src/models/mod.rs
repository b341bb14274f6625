//! Catalog domain models.
//!
//! Plain record types describing what a timetable is built from. They
//! carry string identifiers and cross-reference each other by ID; the
//! [`crate::snapshot::EntitySnapshot`] resolves those references into
//! indices once per run.
//!
//! | Record | Meaning |
//! |--------|---------|
//! | Room | Physical room with capacity and type |
//! | Instructor | Person who teaches courses |
//! | MeetingSlot | (day, slot index) time cell |
//! | Course | Subject with room type and qualified instructors |
//! | Department | Set of offered courses |
//! | Section | Student group belonging to a department |

mod catalog;
mod course;
mod instructor;
mod room;
mod slot;

pub use catalog::Catalog;
pub use course::{Course, Department, Section};
pub use instructor::Instructor;
pub use room::{Room, RoomType};
pub use slot::{LAB_BLOCK_LEN, LAB_BLOCK_STARTS, LUNCH_SLOT, MeetingSlot, Weekday};
