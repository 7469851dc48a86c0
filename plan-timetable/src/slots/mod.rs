//! Slot geometry of the timetable.
//!
//! A [`SlotLayout`] describes the visible part of a week: which hour the
//! first row starts at, how many one-hour rows there are and which days form
//! the columns.  It is the single place that converts between wall-clock
//! times and grid rows.
//!
//! ```text
//!   first_hour = 8, slots = 12
//!
//!   slot 0  ─  08:15 - 09:00
//!   slot 1  ─  09:15 - 10:00
//!    ...
//!   slot 11 ─  19:15 - 20:00
//! ```

pub mod clock;

use chrono::{Days, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::Serialize;

use clock::{clamp_hour_range, unwrap_past_midnight};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Hour of the first row.
pub const DEFAULT_FIRST_HOUR: u32 = 8;

/// Number of one-hour rows.
pub const DEFAULT_SLOTS: usize = 12;

/// Minute printed in the start half of each time label.
pub const DEFAULT_LABEL_MINUTE: u32 = 15;

/// Column days, Monday first.
pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// A week has at most this many day columns.
pub const MAX_DAYS: usize = 7;

/// Latest exclusive end of the visible window: 04:00 the next day.
pub const LAST_WINDOW_HOUR: u32 = 24 + clock::EARLY_MORNING_END;

// ── SlotLayout ────────────────────────────────────────────────────────────────

/// Visible window of the week.
///
/// [`ConfigManager`](crate::config::ConfigManager) only hands out layouts
/// with at least one slot and a window ending by [`LAST_WINDOW_HOUR`].  A
/// layout built by hand outside those bounds does not panic, but every
/// lecture maps to slot 0 and the engine rejects it when there are no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLayout {
    pub first_hour: u32,
    pub slots: usize,
    pub label_minute: u32,
    pub days: Vec<String>,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            first_hour: DEFAULT_FIRST_HOUR,
            slots: DEFAULT_SLOTS,
            label_minute: DEFAULT_LABEL_MINUTE,
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl SlotLayout {
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Exclusive end hour of the visible window.
    pub fn last_hour(&self) -> u32 {
        let slots = u32::try_from(self.slots).unwrap_or(u32::MAX);
        self.first_hour.saturating_add(slots)
    }

    pub fn day_name(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(String::as_str)
    }

    /// Map a lecture's wall-clock start/end onto an inclusive slot range.
    ///
    /// Only the hour components matter.  Times before 04:00 count as past
    /// midnight, a lecture starting and ending in the same hour occupies that
    /// hour, and anything outside the visible window is clamped to its edge.
    ///
    /// ```rust
    /// use chrono::NaiveTime;
    /// use plan_timetable::slots::SlotLayout;
    ///
    /// let layout = SlotLayout::default();
    /// let start = NaiveTime::from_hms_opt(10, 15, 0).unwrap();
    /// let end = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    /// assert_eq!(layout.map_to_slot(start, end), (2, 3));
    /// ```
    pub fn map_to_slot(&self, start: NaiveTime, end: NaiveTime) -> (usize, usize) {
        let (start, end) = clamp_hour_range(
            unwrap_past_midnight(start.hour()),
            unwrap_past_midnight(end.hour()),
            self.first_hour,
            self.last_hour(),
        );
        let start_slot = start.saturating_sub(self.first_hour) as usize;
        let end_slot = end.saturating_sub(self.first_hour).saturating_sub(1) as usize;
        (start_slot, end_slot)
    }

    /// Label for one row, e.g. `"08:15 - 09:00"`.  Hours past midnight wrap.
    pub fn time_label(&self, slot: usize) -> String {
        let hour = (self.first_hour as usize % 24 + slot % 24) % 24;
        format!(
            "{:02}:{:02} - {:02}:00",
            hour,
            self.label_minute,
            (hour + 1) % 24
        )
    }

    /// One label per row, top to bottom.
    pub fn time_labels(&self) -> Vec<String> {
        (0..self.slots).map(|slot| self.time_label(slot)).collect()
    }

    /// Calendar dates of the configured days in ISO week `week` of `year`.
    ///
    /// Returns `None` when the week does not exist in that year (e.g. week 53
    /// of a 52-week year).
    pub fn week_dates(&self, year: i32, week: u32) -> Option<Vec<NaiveDate>> {
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        (0..self.day_count().min(MAX_DAYS) as u64)
            .map(|offset| monday.checked_add_days(Days::new(offset)))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
