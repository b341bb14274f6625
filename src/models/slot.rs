//! Weekly meeting slots.
//!
//! A week is a fixed set of teaching days, each divided into numbered
//! slots (1-based). Slot [`LUNCH_SLOT`] is the lunch period on every day
//! and is never assignable.
//!
//! Lab sessions occupy a block of [`LAB_BLOCK_LEN`] consecutive slots
//! starting at one of [`LAB_BLOCK_STARTS`], so a lab sits entirely in the
//! morning or entirely in the afternoon.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot index reserved for lunch.
pub const LUNCH_SLOT: u8 = 5;

/// Number of consecutive slots in a lab block.
pub const LAB_BLOCK_LEN: usize = 4;

/// Slot indices at which a lab block may start.
pub const LAB_BLOCK_STARTS: [u8; 2] = [1, 6];

/// Teaching day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All teaching days in calendar order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A (day, slot index) meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeetingSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Day of the week.
    pub day: Weekday,
    /// Position within the day (1-based).
    pub index: u8,
}

impl MeetingSlot {
    /// Creates a meeting slot.
    pub fn new(id: impl Into<String>, day: Weekday, index: u8) -> Self {
        Self {
            id: id.into(),
            day,
            index,
        }
    }

    /// Whether this is the lunch slot.
    #[inline]
    pub fn is_lunch(&self) -> bool {
        self.index == LUNCH_SLOT
    }

    /// Generates a full week: every day in `days`, slots `1..=slots_per_day`.
    ///
    /// Identifiers have the form `"Mon-3"`.
    pub fn week(days: &[Weekday], slots_per_day: u8) -> Vec<MeetingSlot> {
        days.iter()
            .flat_map(|&day| {
                (1..=slots_per_day)
                    .map(move |index| MeetingSlot::new(format!("{}-{index}", day.short_name()), day, index))
            })
            .collect()
    }
}

impl fmt::Display for MeetingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.index)
    }
}
