/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the timetable layout engine.
//!
//! Two error enums model the two failure layers:
//!
//! * [`IntervalFault`]: what exactly is wrong with one lecture interval
//!   (low-level, carries the offending values).
//! * [`LayoutError`]: top-level failure returned by the
//!   [`Timetable`](super::Timetable) passes.
//!
//! Running out of tracks is never an error: the engine grows the day instead.

use thiserror::Error;

use super::Phase;
use crate::lecture::LectureId;

// ── Interval validation ───────────────────────────────────────────────────────

/// Detailed reason why a lecture interval cannot be placed.
///
/// Carried inside [`LayoutError::InvalidLectureInterval`] so the caller always
/// knows both *which* lecture failed and *why*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalFault {
    /// `start_slot` lies after `end_slot`.
    StartAfterEnd { start: usize, end: usize },

    /// The day index is outside the configured days.
    DayOutOfRange { day: usize, days: usize },

    /// A slot index is outside the configured rows.
    SlotOutOfRange { slot: usize, slots: usize },
}

impl std::fmt::Display for IntervalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalFault::StartAfterEnd { start, end } => {
                write!(f, "start slot {} lies after end slot {}", start, end)
            }

            IntervalFault::DayOutOfRange { day, days } => {
                write!(f, "day {} is outside the {} configured day(s)", day, days)
            }

            IntervalFault::SlotOutOfRange { slot, slots } => {
                write!(f, "slot {} is outside the {} configured slot(s)", slot, slots)
            }
        }
    }
}

// ── Top-level layout errors ───────────────────────────────────────────────────

/// Top-level error type returned by the [`Timetable`](super::Timetable)
/// passes.
///
/// Every variant leaves the grid exactly as it was before the failing call.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A lecture that would be placed has an impossible interval.
    ///
    /// Raised before any cell is written, so one bad record never yields a
    /// half-placed grid.
    #[error("lecture {lecture} cannot be placed: {reason}")]
    InvalidLectureInterval {
        lecture: LectureId,
        reason: IntervalFault,
    },

    /// A pass was called out of order, e.g. expansion before placement or
    /// placement twice.
    #[error("{operation} requires phase {required}, but the timetable is in phase {actual}")]
    PhaseOrder {
        operation: &'static str,
        required: Phase,
        actual: Phase,
    },

    /// The ISO week does not exist in the given year.
    #[error("week {week} does not exist in ISO year {year}")]
    InvalidWeek { year: i32, week: u32 },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
