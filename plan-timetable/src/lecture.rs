/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Lecture data structures for the timetable layout engine.
//!
//! Two distinct types model the two sides of the layout pipeline:
//!
//! ```text
//! store  ──(YAML)──►  LectureRecord  ──(SlotLayout)──►  LectureInterval<P>  ──(Timetable)──►  Grid
//!                      ↑ wall-clock times                 ↑ slot indices + opaque payload
//! ```
//!
//! # Ownership model
//! A `Vec<LectureInterval<P>>` is **moved** into one [`Timetable`] for the
//! duration of one rendering request.  Grid cells never hold the payload
//! itself, only a [`LectureRef`] index back into that vector.
//!
//! [`Timetable`]: crate::layout::Timetable
//! [`LectureRef`]: crate::layout::LectureRef

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::slots::SlotLayout;
use crate::source::SourceError;

// ── LectureId ─────────────────────────────────────────────────────────────────

/// Identity of a lecture in the data-access layer.
///
/// Used as the key of the room side-channel and in error messages.  The
/// engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LectureId(pub u64);

impl fmt::Display for LectureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Term ──────────────────────────────────────────────────────────────────────

/// Semester half a subscription belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Spring,
    Fall,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Term::Spring => "spring",
            Term::Fall => "fall",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Term::Spring),
            "fall" => Ok(Term::Fall),
            other => Err(SourceError::InvalidTerm(other.to_string())),
        }
    }
}

// ── LectureInterval (engine input) ────────────────────────────────────────────

/// One lecture as the layout engine sees it: a day, an inclusive slot range
/// and an opaque payload for renderers.
///
/// Lectures sharing identical day/start/end are **not** merged; each one
/// occupies its own track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LectureInterval<P> {
    pub id: LectureId,

    /// 0-based day index (0 = Monday).
    pub day: usize,

    /// First occupied slot (inclusive).
    pub start_slot: usize,

    /// Last occupied slot (inclusive).  `start_slot <= end_slot`.
    pub end_slot: usize,

    /// The student opted out of this lecture; it is skipped during placement.
    pub excluded: bool,

    /// `false` when a specific week was requested and the lecture does not run
    /// that week.  Skipped during placement exactly like `excluded`.
    pub show_week: bool,

    pub payload: P,
}

impl<P> LectureInterval<P> {
    /// A visible, non-excluded interval.
    pub fn new(id: LectureId, day: usize, start_slot: usize, end_slot: usize, payload: P) -> Self {
        Self {
            id,
            day,
            start_slot,
            end_slot,
            excluded: false,
            show_week: true,
            payload,
        }
    }

    pub fn with_excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn with_show_week(mut self, show_week: bool) -> Self {
        self.show_week = show_week;
        self
    }

    /// Number of rows the lecture covers.  `0` for a malformed interval.
    pub fn rowspan(&self) -> usize {
        (self.end_slot + 1).saturating_sub(self.start_slot)
    }

    /// Returns `true` if the placement pass will put this lecture in the grid.
    pub fn is_placeable(&self) -> bool {
        !self.excluded && self.show_week
    }
}

// ── LectureRecord (data-access output) ────────────────────────────────────────

/// A lecture as delivered by a [`LectureSource`](crate::source::LectureSource):
/// wall-clock times plus everything a renderer wants to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LectureRecord {
    pub id: LectureId,

    /// Course code, e.g. `"TDT4120"`.
    pub course: String,

    /// Student-chosen display name for the course.  Overrides `course` in
    /// rendered output when set.
    pub alias: Option<String>,

    /// Lecture type name, e.g. `"Lecture"` or `"Exercise"`.
    pub kind: Option<String>,

    /// Lecture type is optional for the course (rendered in a lighter face).
    pub optional: bool,

    /// 0-based day index (0 = Monday).
    pub day: usize,

    pub start: NaiveTime,
    pub end: NaiveTime,

    pub rooms: Vec<String>,

    /// ISO week numbers the lecture runs in.
    pub weeks: Vec<u32>,

    pub excluded: bool,

    /// Filled by the source from the query's week (always `true` when no
    /// week was requested).
    pub show_week: bool,
}

impl LectureRecord {
    /// Display title: the alias if one is set, otherwise the course code.
    pub fn title(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.course)
    }

    /// Returns `true` if the lecture is scheduled in ISO week `week`.
    pub fn runs_in_week(&self, week: u32) -> bool {
        self.weeks.contains(&week)
    }

    /// Map wall-clock times onto `layout`'s slots and wrap `self` as the
    /// payload of the resulting interval.
    ///
    /// The day index is passed through unchecked. The engine rejects
    /// out-of-range days when placing.
    pub fn into_interval(self, layout: &SlotLayout) -> LectureInterval<LectureRecord> {
        let (start_slot, end_slot) = layout.map_to_slot(self.start, self.end);
        LectureInterval {
            id: self.id,
            day: self.day,
            start_slot,
            end_slot,
            excluded: self.excluded,
            show_week: self.show_week,
            payload: self,
        }
    }

    /// Human-readable `HH:MM-HH:MM` range for log lines.
    pub fn time_range(&self) -> String {
        format!(
            "{:02}:{:02}-{:02}:{:02}",
            self.start.hour(),
            self.start.minute(),
            self.end.hour(),
            self.end.minute()
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
