//! Room model.
//!
//! Rooms host class meetings. Each room has a seating capacity and a
//! type; lab sessions may only be placed in lab rooms and lectures only
//! in non-lab rooms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier (room number).
    pub id: String,
    /// Number of seats.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

/// Room type classification.
///
/// Courses declare the type of room they require; [`RoomType::Lab`]
/// courses are scheduled as multi-slot lab blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    /// General lecture room.
    #[default]
    #[serde(rename = "Lecture Hall", alias = "lecture_hall")]
    LectureHall,
    /// Laboratory.
    #[serde(rename = "Lab", alias = "lab")]
    Lab,
    /// Small-group seminar room.
    #[serde(rename = "Seminar Room", alias = "seminar_room")]
    SeminarRoom,
}

impl RoomType {
    /// Whether this is a lab room.
    #[inline]
    pub fn is_lab(self) -> bool {
        matches!(self, RoomType::Lab)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomType::LectureHall => "Lecture Hall",
            RoomType::Lab => "Lab",
            RoomType::SeminarRoom => "Seminar Room",
        };
        f.write_str(name)
    }
}

impl Room {
    /// Creates a room of the given type with zero capacity.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            capacity: 0,
            room_type,
        }
    }

    /// Creates a lecture hall.
    pub fn lecture_hall(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::LectureHall)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lab)
    }

    /// Creates a seminar room.
    pub fn seminar(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::SeminarRoom)
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether this room can host lab blocks.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.room_type.is_lab()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.room_type)
    }
}
