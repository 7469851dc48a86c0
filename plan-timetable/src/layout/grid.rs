/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Grid data structures produced by the layout engine.
//!
//! ```text
//!            day 0 (span 3)        day 1 (span 1)
//!          ┌──────┬──────┬──────┬──────┐
//! slot 0   │ L2   │ L4   │ ·    │ L9   │
//! slot 1   │ L2 ▒ │ L4 ▒ │ L5   │ L9 ▒ │    ▒ = covered (remove = true)
//!          └──────┴──────┴──────┴──────┘
//! ```
//!
//! `rows[slot][column][track]`: one column per day, plus a leading time
//! column once time labels have been inserted.  Renderers walk `rows()`
//! directly; code that thinks in days uses [`Grid::tracks`] / [`Grid::cell`].

use std::ops::Range;

use serde::Serialize;

use crate::lecture::LectureId;

// ── LectureRef ────────────────────────────────────────────────────────────────

/// Index of a lecture in the engine's lecture list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LectureRef(pub usize);

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A lecture occupying one grid position.
///
/// Exactly one cell per lecture has `remove == false`: the top-left one,
/// which carries the final `rowspan`/`colspan`.  Every other cell of the
/// block has `remove == true` and is skipped by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub lecture: LectureRef,
    pub rowspan: usize,
    pub colspan: usize,
    pub remove: bool,
    /// Cell sits in (or spans into) the last track of its day.
    pub last: bool,
    /// Span start whose rows reach the bottom of the grid.
    pub bottom: bool,
}

impl Occupancy {
    pub(crate) fn new(lecture: LectureRef, rowspan: usize, remove: bool) -> Self {
        Self {
            lecture,
            rowspan,
            colspan: 1,
            remove,
            last: false,
            bottom: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Occupancy),
    TimeLabel {
        text: String,
        last: bool,
    },
    /// An empty position decorated for the renderer's borders.
    Marker {
        last: bool,
        bottom: bool,
    },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn occupancy(&self) -> Option<&Occupancy> {
        match self {
            Cell::Occupied(occ) => Some(occ),
            _ => None,
        }
    }

    /// Returns `true` for cells covered by another cell's span.
    pub fn is_removed(&self) -> bool {
        matches!(self, Cell::Occupied(occ) if occ.remove)
    }

    pub fn is_last(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Occupied(occ) => occ.last,
            Cell::TimeLabel { last, .. } | Cell::Marker { last, .. } => *last,
        }
    }

    pub fn is_bottom(&self) -> bool {
        match self {
            Cell::Empty | Cell::TimeLabel { .. } => false,
            Cell::Occupied(occ) => occ.bottom,
            Cell::Marker { bottom, .. } => *bottom,
        }
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// Where one lecture ended up: its top-left position and block size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub lecture: LectureRef,
    /// Copied from the interval for the room lookup.
    pub id: LectureId,
    pub slot: usize,
    pub day: usize,
    pub track: usize,
    /// Rowspan.
    pub height: usize,
    /// Colspan; `1` until expansion has run.
    pub width: usize,
    /// Filled during expansion from the room map.
    pub rooms: Vec<String>,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: Vec<Vec<Vec<Cell>>>,
    time_column: bool,
}

impl Grid {
    /// A grid of `slots` rows and `days` day columns, one empty track each.
    pub(crate) fn new(slots: usize, days: usize) -> Self {
        Self {
            rows: vec![vec![vec![Cell::Empty]; days]; slots],
            time_column: false,
        }
    }

    /// Raw rows, including the time column once inserted.
    pub fn rows(&self) -> &[Vec<Vec<Cell>>] {
        &self.rows
    }

    pub fn slot_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_time_column(&self) -> bool {
        self.time_column
    }

    /// Index of `day` within a raw row.
    pub fn column_of(&self, day: usize) -> usize {
        day + usize::from(self.time_column)
    }

    /// Tracks of `day` at `slot`.
    pub fn tracks(&self, slot: usize, day: usize) -> Option<&[Cell]> {
        let column = self.column_of(day);
        self.rows
            .get(slot)
            .and_then(|row| row.get(column))
            .map(Vec::as_slice)
    }

    pub fn cell(&self, slot: usize, day: usize, track: usize) -> Option<&Cell> {
        self.tracks(slot, day).and_then(|tracks| tracks.get(track))
    }

    /// Current number of tracks of `day` (identical in every row).
    pub fn track_count(&self, day: usize) -> usize {
        self.tracks(0, day).map_or(0, <[Cell]>::len)
    }

    /// Returns `true` if every slot of `slots` is `Empty` in `(day, track)`.
    pub(crate) fn is_free(&self, day: usize, track: usize, slots: Range<usize>) -> bool {
        slots
            .into_iter()
            .all(|slot| self.cell(slot, day, track).is_some_and(Cell::is_empty))
    }

    /// Append one empty track to `day` in every row.
    pub(crate) fn push_track(&mut self, day: usize) {
        let column = self.column_of(day);
        for row in &mut self.rows {
            row[column].push(Cell::Empty);
        }
    }

    /// Mutable access for positions the engine has already validated.
    ///
    /// # Panics
    /// Panics if the position is outside the grid.
    pub(crate) fn slot_mut(&mut self, slot: usize, day: usize, track: usize) -> &mut Cell {
        let column = self.column_of(day);
        &mut self.rows[slot][column][track]
    }

    /// Day columns of one row, time column excluded.
    pub(crate) fn days_mut(&mut self, slot: usize) -> &mut [Vec<Cell>] {
        let offset = usize::from(self.time_column);
        &mut self.rows[slot][offset..]
    }

    /// Prepend a single-track time column, one label per row.
    pub(crate) fn prepend_time_column(&mut self, labels: Vec<String>) {
        for (row, text) in self.rows.iter_mut().zip(labels) {
            row.insert(0, vec![Cell::TimeLabel { text, last: true }]);
        }
        self.time_column = true;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
