//! Timetable layout engine.
//!
//! [`Timetable`] turns an unordered list of [`LectureInterval`]s into a
//! 2-D grid of cells with correct row/col spans, so that overlapping lectures
//! render as a valid HTML table.
//!
//! # Passes
//!
//! | Pass | Method | Effect |
//! |---|---|---|
//! | Placement | [`place_lectures`](Timetable::place_lectures) | leftmost-fit packing per day, grows tracks on demand |
//! | Expansion | [`do_expansion`](Timetable::do_expansion) | widens blocks into tracks that stay empty, attaches rooms |
//! | Markers | [`add_markers`](Timetable::add_markers) / [`add_last_marker`](Timetable::add_last_marker) | `last`/`bottom` border flags |
//! | Time labels | [`insert_times`](Timetable::insert_times) | leading label column, idempotent |
//!
//! [`lay_out`](Timetable::lay_out) runs them in the order the HTML view needs.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use plan_timetable::layout::Timetable;
//! use plan_timetable::lecture::{LectureId, LectureInterval};
//! use plan_timetable::slots::SlotLayout;
//!
//! let lectures = vec![
//!     LectureInterval::new(LectureId(1), 0, 0, 1, "A"),
//!     LectureInterval::new(LectureId(2), 0, 1, 2, "B"),
//! ];
//! let mut timetable = Timetable::new(Arc::new(SlotLayout::default()), lectures);
//! timetable.place_lectures().unwrap();
//! assert_eq!(timetable.span()[0], 2);
//! ```

pub mod error;
pub mod grid;

mod expansion;
mod markers;

pub use error::{IntervalFault, LayoutError};
pub use grid::{Cell, Grid, LectureRef, Occupancy, Placement};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::lecture::{LectureId, LectureInterval};
use crate::slots::SlotLayout;

/// Display strings per lecture, joined in during expansion.
pub type RoomMap = HashMap<LectureId, Vec<String>>;

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Progress of one [`Timetable`].  Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    New,
    Placed,
    Expanded,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::New => "new",
            Phase::Placed => "placed",
            Phase::Expanded => "expanded",
        })
    }
}

// ── Timetable ─────────────────────────────────────────────────────────────────

/// One layout run: owns its lectures and grid, used once per rendering
/// request and then dropped.
///
/// `Send + Sync` whenever `P` is.
#[derive(Debug, Clone)]
pub struct Timetable<P> {
    layout: Arc<SlotLayout>,
    lectures: Vec<LectureInterval<P>>,
    rooms: RoomMap,
    grid: Grid,
    /// Track count per day.
    span: Vec<usize>,
    placements: Vec<Placement>,
    dates: Vec<NaiveDate>,
    phase: Phase,
    markers: bool,
}

impl<P> Timetable<P> {
    /// Create an engine with an empty grid of `layout.slots` rows and one
    /// track per configured day.
    pub fn new(layout: Arc<SlotLayout>, lectures: Vec<LectureInterval<P>>) -> Self {
        let days = layout.day_count();
        Self {
            grid: Grid::new(layout.slots, days),
            span: vec![1; days],
            layout,
            lectures,
            rooms: RoomMap::new(),
            placements: Vec::new(),
            dates: Vec::new(),
            phase: Phase::New,
            markers: false,
        }
    }

    /// Attach the room lookup used by [`do_expansion`](Self::do_expansion).
    pub fn with_rooms(mut self, rooms: RoomMap) -> Self {
        self.rooms = rooms;
        self
    }

    // ── Pipeline ──────────────────────────────────────────────────────────────

    /// Run the passes the HTML view needs: placement, expansion, optionally
    /// the `last` markers, then time labels.
    pub fn lay_out(&mut self, last_markers: bool) -> Result<(), LayoutError> {
        self.place_lectures()?;
        self.do_expansion()?;
        if last_markers {
            self.add_last_marker()?;
        }
        self.insert_times();
        Ok(())
    }

    // ── Placement ─────────────────────────────────────────────────────────────

    /// Pack every placeable lecture into the leftmost track of its day that
    /// is empty for the lecture's whole slot range, adding a track when none
    /// is.
    ///
    /// Lectures are handled in caller order.  Excluded lectures and lectures
    /// not shown this week are skipped.
    ///
    /// # Errors
    /// * [`LayoutError::PhaseOrder`] unless the engine is [`Phase::New`].
    /// * [`LayoutError::InvalidLectureInterval`] for the first placeable
    ///   lecture with an impossible interval.  Nothing is written in that
    ///   case.
    pub fn place_lectures(&mut self) -> Result<(), LayoutError> {
        self.require_exact("place_lectures", Phase::New)?;

        let days = self.layout.day_count();
        let slots = self.layout.slots;
        for lecture in self.lectures.iter().filter(|l| l.is_placeable()) {
            check_interval(lecture, days, slots).map_err(|reason| {
                LayoutError::InvalidLectureInterval {
                    lecture: lecture.id,
                    reason,
                }
            })?;
        }

        info!(
            lecture_count = self.lectures.len(),
            days = days,
            slots = slots,
            "=== Timetable::place_lectures() ==="
        );

        let mut skipped = 0usize;
        for index in 0..self.lectures.len() {
            let lecture = &self.lectures[index];
            if !lecture.is_placeable() {
                skipped += 1;
                debug!(
                    lecture = %lecture.id,
                    excluded = lecture.excluded,
                    show_week = lecture.show_week,
                    "skipped"
                );
                continue;
            }

            let (id, day, start, end) = (lecture.id, lecture.day, lecture.start_slot, lecture.end_slot);
            let track = self.find_free_track(day, start, end);
            self.occupy(LectureRef(index), id, day, track, start, end);

            debug!(
                lecture = %id,
                day = day,
                slots = ?(start..=end),
                track = track,
                "placed"
            );
        }

        self.phase = Phase::Placed;
        info!(
            placed = self.placements.len(),
            skipped = skipped,
            span = ?self.span,
            tracks = self.total_tracks(),
            "placement done"
        );
        Ok(())
    }

    /// Lowest-index track of `day` free over `start..=end`; grows the day by
    /// one track if there is none.
    fn find_free_track(&mut self, day: usize, start: usize, end: usize) -> usize {
        let tracks = self.grid.track_count(day);
        if let Some(track) = (0..tracks).find(|&t| self.grid.is_free(day, t, start..end + 1)) {
            return track;
        }

        self.grid.push_track(day);
        self.span[day] += 1;
        debug!(day = day, tracks = self.span[day], "added track");
        tracks
    }

    fn occupy(&mut self, lecture: LectureRef, id: LectureId, day: usize, track: usize, start: usize, end: usize) {
        let rowspan = end - start + 1;
        for slot in start..=end {
            *self.grid.slot_mut(slot, day, track) =
                Cell::Occupied(Occupancy::new(lecture, rowspan, slot != start));
        }
        self.placements.push(Placement {
            lecture,
            id,
            slot: start,
            day,
            track,
            height: rowspan,
            width: 1,
            rooms: Vec::new(),
        });
    }

    // ── Expansion ─────────────────────────────────────────────────────────────

    /// Widen every placed lecture into the tracks to its right that are
    /// empty for its whole height, and attach its rooms.
    ///
    /// # Errors
    /// [`LayoutError::PhaseOrder`] unless the engine is [`Phase::Placed`].
    pub fn do_expansion(&mut self) -> Result<(), LayoutError> {
        self.require_exact("do_expansion", Phase::Placed)?;

        info!(
            placements = self.placements.len(),
            "=== Timetable::do_expansion() ==="
        );
        let widened = expansion::expand_placements(&mut self.grid, &mut self.placements, &self.rooms);

        self.phase = Phase::Expanded;
        info!(widened = widened, "expansion done");
        Ok(())
    }

    // ── Markers & labels ──────────────────────────────────────────────────────

    /// Flag the last track of every day and the cells along the bottom edge.
    ///
    /// # Errors
    /// [`LayoutError::PhaseOrder`] before placement.
    pub fn add_markers(&mut self) -> Result<(), LayoutError> {
        self.require_at_least("add_markers", Phase::Placed)?;
        markers::mark_last_tracks(&mut self.grid);
        markers::mark_bottom_row(&mut self.grid);
        self.markers = true;
        debug!("added last and bottom markers");
        Ok(())
    }

    /// Flag only the last track of every day.
    ///
    /// # Errors
    /// [`LayoutError::PhaseOrder`] before placement.
    pub fn add_last_marker(&mut self) -> Result<(), LayoutError> {
        self.require_at_least("add_last_marker", Phase::Placed)?;
        markers::mark_last_tracks(&mut self.grid);
        self.markers = true;
        debug!("added last markers");
        Ok(())
    }

    /// Prepend the time-label column.  A second call is a no-op.
    pub fn insert_times(&mut self) {
        if self.grid.has_time_column() {
            debug!("time labels already present");
            return;
        }
        self.grid.prepend_time_column(self.layout.time_labels());
        debug!(rows = self.grid.slot_count(), "inserted time labels");
    }

    /// Compute the dates of the configured days in ISO week `week` of `year`.
    ///
    /// # Errors
    /// [`LayoutError::InvalidWeek`] if the week does not exist in that year.
    pub fn set_week(&mut self, year: i32, week: u32) -> Result<(), LayoutError> {
        self.dates = self
            .layout
            .week_dates(year, week)
            .ok_or(LayoutError::InvalidWeek { year, week })?;
        debug!(year = year, week = week, dates = ?self.dates, "week set");
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Track count per day.
    pub fn span(&self) -> &[usize] {
        &self.span
    }

    /// Absolute column of `day`'s first track: the spans of all earlier days
    /// summed.
    pub fn column_offset(&self, day: usize) -> usize {
        self.span.iter().take(day).sum()
    }

    /// Total number of day tracks across the week.
    pub fn total_tracks(&self) -> usize {
        self.span.iter().sum()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of the lecture behind `lecture`, if it was placed.
    pub fn placement(&self, lecture: LectureRef) -> Option<&Placement> {
        self.placements.iter().find(|p| p.lecture == lecture)
    }

    pub fn lecture(&self, lecture: LectureRef) -> Option<&LectureInterval<P>> {
        self.lectures.get(lecture.0)
    }

    pub fn lectures(&self) -> &[LectureInterval<P>] {
        &self.lectures
    }

    /// Empty until [`set_week`](Self::set_week) succeeds.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_markers(&self) -> bool {
        self.markers
    }

    /// Borrowed, serializable view of the finished layout.
    pub fn snapshot(&self) -> TimetableSnapshot<'_, P> {
        TimetableSnapshot {
            days: &self.layout.days,
            span: &self.span,
            dates: &self.dates,
            placements: &self.placements,
            lectures: &self.lectures,
            rows: self.grid.rows(),
        }
    }

    // ── Phase checks ──────────────────────────────────────────────────────────

    fn require_exact(&self, operation: &'static str, required: Phase) -> Result<(), LayoutError> {
        if self.phase == required {
            Ok(())
        } else {
            Err(LayoutError::PhaseOrder {
                operation,
                required,
                actual: self.phase,
            })
        }
    }

    fn require_at_least(&self, operation: &'static str, required: Phase) -> Result<(), LayoutError> {
        if self.phase >= required {
            Ok(())
        } else {
            Err(LayoutError::PhaseOrder {
                operation,
                required,
                actual: self.phase,
            })
        }
    }
}

/// Reject intervals that cannot be written into a `slots × days` grid.
fn check_interval<P>(lecture: &LectureInterval<P>, days: usize, slots: usize) -> Result<(), IntervalFault> {
    if lecture.day >= days {
        return Err(IntervalFault::DayOutOfRange {
            day: lecture.day,
            days,
        });
    }
    if lecture.start_slot > lecture.end_slot {
        return Err(IntervalFault::StartAfterEnd {
            start: lecture.start_slot,
            end: lecture.end_slot,
        });
    }
    if lecture.end_slot >= slots {
        return Err(IntervalFault::SlotOutOfRange {
            slot: lecture.end_slot,
            slots,
        });
    }
    Ok(())
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// What the JSON output contains.
#[derive(Debug, Serialize)]
pub struct TimetableSnapshot<'a, P> {
    pub days: &'a [String],
    pub span: &'a [usize],
    pub dates: &'a [NaiveDate],
    pub placements: &'a [Placement],
    pub lectures: &'a [LectureInterval<P>],
    pub rows: &'a [Vec<Vec<Cell>>],
}

// ── Tests ─────────────────────────────────────────────────────────────────────
