//! Views of a finished timetable.
//!
//! [`build_grids`] lays each section's assignments onto a day × slot grid:
//! lunch cells are fixed, a lab occupies [`LAB_BLOCK_LEN`] consecutive
//! cells, and a lecture occupies one. [`render_text`] prints a grid as a
//! plain-text table with every lab merged into one wide cell.
//! [`placements`] and [`ScheduleReport`] flatten a timetable into
//! ID-based records for JSON export.

use serde::Serialize;

use crate::ga::{ConflictBreakdown, ConflictEvaluator, Score, Timetable};
use crate::models::{LAB_BLOCK_LEN, LUNCH_SLOT, Weekday};
use crate::scheduler::{RunState, ScheduleOutcome};
use crate::snapshot::{CourseIdx, EntitySnapshot, InstructorIdx, RoomIdx, SectionIdx, SlotIdx};

/// How a booking occupies its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Lecture,
    /// First cell of a lab block spanning `span` cells.
    LabStart { span: usize },
    /// A later cell of a lab block.
    LabContinued,
}

/// One assignment occupying a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub course: String,
    pub room: String,
    pub instructor: String,
    pub kind: BookingKind,
}

impl Booking {
    fn label(&self) -> String {
        let label = format!("{} @{} ({})", self.course, self.room, self.instructor);
        match self.kind {
            BookingKind::LabContinued => format!("{label} cont."),
            _ => label,
        }
    }
}

/// Content of one (day, slot) cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Lunch,
    Free,
    /// More than one booking means the cell holds a clash.
    Taken(Vec<Booking>),
}

impl GridCell {
    fn push(&mut self, booking: Booking) {
        match self {
            GridCell::Taken(bookings) => bookings.push(booking),
            _ => *self = GridCell::Taken(vec![booking]),
        }
    }
}

/// One section's weekly grid: a row per day, a column per slot index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGrid {
    pub section: String,
    pub days: Vec<Weekday>,
    pub slot_indices: Vec<u8>,
    pub rows: Vec<Vec<GridCell>>,
}

impl SectionGrid {
    fn empty(section: &str, days: &[Weekday], slot_indices: &[u8]) -> Self {
        let row: Vec<GridCell> = slot_indices
            .iter()
            .map(|&i| if i == LUNCH_SLOT { GridCell::Lunch } else { GridCell::Free })
            .collect();
        Self {
            section: section.to_string(),
            days: days.to_vec(),
            slot_indices: slot_indices.to_vec(),
            rows: vec![row; days.len()],
        }
    }

    /// Cell at (day, slot index), if both are on the grid.
    pub fn cell(&self, day: Weekday, index: u8) -> Option<&GridCell> {
        let (r, c) = self.position(day, index)?;
        Some(&self.rows[r][c])
    }

    fn position(&self, day: Weekday, index: u8) -> Option<(usize, usize)> {
        let r = self.days.iter().position(|&d| d == day)?;
        let c = self.slot_indices.iter().position(|&i| i == index)?;
        Some((r, c))
    }

    fn book(&mut self, snapshot: &EntitySnapshot, slot: SlotIdx, booking: Booking) {
        let slot = snapshot.slot(slot);
        if let Some((r, c)) = self.position(slot.day, slot.index) {
            self.rows[r][c].push(booking);
        }
    }
}

/// Builds one grid per section, in section order.
pub fn build_grids(snapshot: &EntitySnapshot, timetable: &Timetable) -> Vec<SectionGrid> {
    let mut slot_indices: Vec<u8> = snapshot.slots().iter().map(|s| s.index).collect();
    slot_indices.sort_unstable();
    slot_indices.dedup();

    let mut grids: Vec<SectionGrid> = snapshot
        .sections()
        .iter()
        .map(|s| SectionGrid::empty(&s.id, snapshot.days(), &slot_indices))
        .collect();

    for lab in timetable.labs() {
        let grid = &mut grids[lab.section];
        for (offset, &slot) in lab.block.iter().enumerate() {
            let kind = if offset == 0 {
                BookingKind::LabStart { span: LAB_BLOCK_LEN }
            } else {
                BookingKind::LabContinued
            };
            let booking = booking_for(snapshot, lab.course, lab.room, lab.instructor, kind);
            grid.book(snapshot, slot, booking);
        }
    }
    for class in timetable.classes() {
        let booking = booking_for(
            snapshot,
            class.course,
            class.room,
            class.instructor,
            BookingKind::Lecture,
        );
        grids[class.section].book(snapshot, class.slot, booking);
    }
    grids
}

fn booking_for(
    snapshot: &EntitySnapshot,
    course: CourseIdx,
    room: RoomIdx,
    instructor: InstructorIdx,
    kind: BookingKind,
) -> Booking {
    Booking {
        course: snapshot.course(course).id.clone(),
        room: snapshot.room(room).id.clone(),
        instructor: snapshot.instructor(instructor).id.clone(),
        kind,
    }
}

/// A rendered cell: text plus the number of columns it covers.
struct Span {
    text: String,
    width: usize,
}

fn row_spans(row: &[GridCell]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut col = 0;
    while col < row.len() {
        let (text, width) = match &row[col] {
            GridCell::Lunch => ("LUNCH".to_string(), 1),
            GridCell::Free => (String::new(), 1),
            GridCell::Taken(bookings) => {
                let width = bookings
                    .iter()
                    .filter_map(|b| match b.kind {
                        BookingKind::LabStart { span } => Some(span),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(1)
                    .min(row.len() - col);
                // Bookings in the covered columns that are not the tail of
                // a lab starting here still need to be shown.
                let labels: Vec<String> = row[col..col + width]
                    .iter()
                    .enumerate()
                    .flat_map(|(i, cell)| match cell {
                        GridCell::Taken(bs) => bs
                            .iter()
                            .filter(|b| i == 0 || b.kind != BookingKind::LabContinued)
                            .map(Booking::label)
                            .collect(),
                        _ => Vec::new(),
                    })
                    .collect();
                (labels.join(" / "), width)
            }
        };
        spans.push(Span { text, width });
        col += width;
    }
    spans
}

/// Renders a grid as a plain-text table.
///
/// Each row starts with the day's short name; a lab's text spans the
/// width of its four columns and separators.
pub fn render_text(grid: &SectionGrid) -> String {
    const SEP: &str = " | ";
    let rows: Vec<Vec<Span>> = grid.rows.iter().map(|r| row_spans(r)).collect();

    // Uniform column width wide enough for every (merged) cell.
    let width = rows
        .iter()
        .flatten()
        .map(|s| {
            let len = s.text.chars().count();
            let gaps = SEP.len() * (s.width - 1);
            len.saturating_sub(gaps).div_ceil(s.width)
        })
        .chain(grid.slot_indices.iter().map(|i| i.to_string().len()))
        .max()
        .unwrap_or(1)
        .max(1);

    let mut out = String::new();
    out.push_str(&grid.section);
    out.push('\n');

    let header: Vec<String> = grid
        .slot_indices
        .iter()
        .map(|i| format!("{:<width$}", i))
        .collect();
    out.push_str(&format!("Day{SEP}{}\n", header.join(SEP)));

    for (day, spans) in grid.days.iter().zip(&rows) {
        let cells: Vec<String> = spans
            .iter()
            .map(|s| {
                let w = width * s.width + SEP.len() * (s.width - 1);
                format!("{:<w$}", s.text)
            })
            .collect();
        out.push_str(&format!("{}{SEP}{}\n", day.short_name(), cells.join(SEP)));
    }
    out
}

/// ID-based record of one placed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementRecord {
    pub section: String,
    pub course: String,
    pub instructor: String,
    pub room: String,
    /// `"lab"` or `"lecture"`.
    pub kind: &'static str,
    pub day: Weekday,
    /// Slot IDs in time order.
    pub slots: Vec<String>,
}

/// Flattens a timetable into records, labs first.
pub fn placements(snapshot: &EntitySnapshot, timetable: &Timetable) -> Vec<PlacementRecord> {
    let record = |section: SectionIdx,
                  course: CourseIdx,
                  instructor: InstructorIdx,
                  room: RoomIdx,
                  kind: &'static str,
                  slots: &[SlotIdx]| PlacementRecord {
        section: snapshot.section(section).id.clone(),
        course: snapshot.course(course).id.clone(),
        instructor: snapshot.instructor(instructor).id.clone(),
        room: snapshot.room(room).id.clone(),
        kind,
        day: snapshot.slot(slots[0]).day,
        slots: slots.iter().map(|&s| snapshot.slot(s).id.clone()).collect(),
    };

    let labs = timetable
        .labs()
        .iter()
        .map(|l| record(l.section, l.course, l.instructor, l.room, "lab", l.block.as_slice()));
    let classes = timetable.classes().iter().map(|c| {
        record(
            c.section,
            c.course,
            c.instructor,
            c.room,
            "lecture",
            std::slice::from_ref(&c.slot),
        )
    });
    labs.chain(classes).collect()
}

/// Serializable summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub state: RunState,
    pub generations: usize,
    pub score: Score,
    pub breakdown: ConflictBreakdown,
    pub placements: Vec<PlacementRecord>,
}

impl ScheduleReport {
    /// Summarizes a finished run, scoring its best timetable with `evaluator`.
    pub fn new(evaluator: &ConflictEvaluator<'_>, outcome: &ScheduleOutcome) -> Self {
        Self {
            state: outcome.state,
            generations: outcome.generations,
            score: outcome.score,
            breakdown: evaluator.breakdown(&outcome.best),
            placements: placements(evaluator.snapshot(), &outcome.best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{ClassAssignment, LabAssignment};
    use crate::test_fixtures;

    fn sample(snap: &EntitySnapshot) -> Timetable {
        let lab = LabAssignment {
            section: 0,
            course: 2,
            instructor: 3,
            room: 3,
            block: snap.lab_block(Weekday::Monday, 1).unwrap(),
        };
        let class = ClassAssignment {
            section: 0,
            course: 0,
            instructor: 0,
            room: 0,
            slot: snap.slot_at(Weekday::Tuesday, 2).unwrap(),
        };
        Timetable::from_parts(vec![lab], vec![class])
    }

    #[test]
    fn test_grid_layout() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let grids = build_grids(&snap, &sample(&snap));
        assert_eq!(grids.len(), 3);

        let grid = &grids[0];
        assert_eq!(grid.section, "SCI-A");
        assert_eq!(grid.days.len(), 5);
        assert_eq!(grid.slot_indices, (1..=9).collect::<Vec<u8>>());

        match grid.cell(Weekday::Monday, 1) {
            Some(GridCell::Taken(b)) => {
                assert_eq!(b.len(), 1);
                assert_eq!(b[0].course, "CHEM101L");
                assert_eq!(b[0].kind, BookingKind::LabStart { span: 4 });
            }
            other => panic!("unexpected cell {other:?}"),
        }
        for index in 2..=4 {
            match grid.cell(Weekday::Monday, index) {
                Some(GridCell::Taken(b)) => assert_eq!(b[0].kind, BookingKind::LabContinued),
                other => panic!("unexpected cell {other:?}"),
            }
        }
        assert_eq!(grid.cell(Weekday::Monday, LUNCH_SLOT), Some(&GridCell::Lunch));
        assert_eq!(grid.cell(Weekday::Monday, 6), Some(&GridCell::Free));
        match grid.cell(Weekday::Tuesday, 2) {
            Some(GridCell::Taken(b)) => {
                assert_eq!(b[0].kind, BookingKind::Lecture);
                assert_eq!(b[0].room, "A101");
            }
            other => panic!("unexpected cell {other:?}"),
        }

        // Other sections are untouched.
        assert!(grids[1].rows.iter().flatten().all(|c| !matches!(c, GridCell::Taken(_))));
    }

    #[test]
    fn test_render_merges_lab() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let grids = build_grids(&snap, &sample(&snap));
        let text = render_text(&grids[0]);

        assert_eq!(text.lines().count(), 2 + 5);
        assert_eq!(text.matches("CHEM101L @L301 (I4)").count(), 1);
        assert!(!text.contains("cont."));
        assert_eq!(text.matches("LUNCH").count(), 5);

        let monday = text.lines().find(|l| l.starts_with("Mon")).unwrap();
        // Four lab columns merged into one leave 1 + 5 separators.
        assert_eq!(monday.matches(" | ").count(), 1 + 5);
        let tuesday = text.lines().find(|l| l.starts_with("Tue")).unwrap();
        assert_eq!(tuesday.matches(" | ").count(), 1 + 8);
        assert_eq!(monday.chars().count(), tuesday.chars().count());
    }

    #[test]
    fn test_render_shows_clash() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let mut tt = sample(&snap);
        let class = tt.classes()[0];
        tt.push_class(ClassAssignment { room: 1, ..class });
        let text = render_text(&build_grids(&snap, &tt)[0]);
        assert!(text.contains("MATH101 @A101 (I1) / MATH101 @A102 (I1)"));
    }

    #[test]
    fn test_placements() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let records = placements(&snap, &sample(&snap));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "lab");
        assert_eq!(records[0].slots, vec!["Mon-1", "Mon-2", "Mon-3", "Mon-4"]);
        assert_eq!(records[1].kind, "lecture");
        assert_eq!(records[1].day, Weekday::Tuesday);
        assert_eq!(records[1].slots, vec!["Tue-2"]);

        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["section"], "SCI-A");
        assert_eq!(json["room"], "L301");
        assert_eq!(json["day"], "Monday");
    }

    #[test]
    fn test_report_summary() {
        let snap = test_fixtures::snapshot(test_fixtures::small_college());
        let evaluator = ConflictEvaluator::new(&snap);
        let best = sample(&snap);
        let outcome = ScheduleOutcome {
            score: evaluator.score(&best),
            best,
            generations: 0,
            state: RunState::Converged,
            history: Vec::new(),
            elapsed: std::time::Duration::ZERO,
        };
        let report = ScheduleReport::new(&evaluator, &outcome);
        assert_eq!(report.breakdown.total(), 0);
        assert_eq!(report.placements.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["state"], "converged");
        assert_eq!(json["score"]["conflicts"], 0);
    }
}
