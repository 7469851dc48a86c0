/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure hour arithmetic: past-midnight wrap and range clamping.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of the `SlotLayout`.

/// Hours strictly below this value are treated as belonging to the previous
/// evening (a 01:00 end time means 25:00).
pub const EARLY_MORNING_END: u32 = 4;

/// Shift early-morning hours past midnight so they sort after the evening.
pub fn unwrap_past_midnight(hour: u32) -> u32 {
    if hour < EARLY_MORNING_END {
        hour + 24
    } else {
        hour
    }
}

/// Normalise a `[start, end)` hour range against the visible window
/// `[first_hour, last_hour)`.
///
/// * A zero-length range is widened to one hour.
/// * `start` is clamped into `[first_hour, last_hour - 1]`.
/// * `end` is clamped into `[first_hour + 1, last_hour]`.
///
/// The two clamps are independent, so an inverted input range stays inverted
/// and is rejected later by the layout engine.  An empty window
/// (`last_hour <= first_hour`) is treated as the single hour at `first_hour`.
pub fn clamp_hour_range(start: u32, end: u32, first_hour: u32, last_hour: u32) -> (u32, u32) {
    let end = if start == end { end.saturating_add(1) } else { end };
    let start_max = last_hour.saturating_sub(1).max(first_hour);
    let end_min = first_hour.saturating_add(1);
    let start = start.clamp(first_hour, start_max);
    let end = end.clamp(end_min, last_hour.max(end_min));
    (start, end)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── unwrap_past_midnight ──────────────────────────────────────────────────

    #[test]
    fn early_hours_wrap_to_next_day() {
        assert_eq!(unwrap_past_midnight(0), 24);
        assert_eq!(unwrap_past_midnight(3), 27);
    }

    #[test]
    fn daytime_hours_are_unchanged() {
        assert_eq!(unwrap_past_midnight(4), 4);
        assert_eq!(unwrap_past_midnight(8), 8);
        assert_eq!(unwrap_past_midnight(23), 23);
    }

    // ── clamp_hour_range ──────────────────────────────────────────────────────

    #[test]
    fn range_inside_window_is_unchanged() {
        assert_eq!(clamp_hour_range(10, 12, 8, 20), (10, 12));
    }

    #[test]
    fn zero_length_range_is_widened() {
        assert_eq!(clamp_hour_range(10, 10, 8, 20), (10, 11));
    }

    #[test]
    fn early_start_is_clamped_to_first_hour() {
        assert_eq!(clamp_hour_range(6, 7, 8, 20), (8, 9));
    }

    #[test]
    fn late_end_is_clamped_to_last_hour() {
        assert_eq!(clamp_hour_range(19, 25, 8, 20), (19, 20));
        assert_eq!(clamp_hour_range(22, 23, 8, 20), (19, 20));
    }

    #[test]
    fn empty_window_collapses_to_first_hour() {
        assert_eq!(clamp_hour_range(10, 12, 8, 8), (8, 9));
        assert_eq!(clamp_hour_range(10, 12, 0, 0), (0, 1));
        assert_eq!(clamp_hour_range(10, 12, 9, 8), (9, 10));
    }

    #[test]
    fn extreme_hours_do_not_overflow() {
        assert_eq!(clamp_hour_range(u32::MAX, u32::MAX, 8, 20), (19, 20));
        let (start, end) = clamp_hour_range(3, 5, u32::MAX, u32::MAX);
        assert_eq!((start, end), (u32::MAX, u32::MAX));
    }

    #[test]
    fn inverted_range_stays_inverted() {
        let (start, end) = clamp_hour_range(15, 10, 8, 20);
        assert!(start > end);
    }
}
