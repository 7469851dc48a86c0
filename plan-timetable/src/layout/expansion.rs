/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Colspan expansion: widen each placed lecture into neighbouring tracks
//! that stay empty for its whole height.
//!
//! Free functions over [`Grid`] so the pass can be tested without an engine.

use tracing::debug;

use super::grid::{Cell, Grid, Occupancy, Placement};
use super::RoomMap;

/// Number of tracks `placement` can cover, counting its own.
///
/// Scans right from the track after the placement and stops at the first
/// track with any non-empty cell in the placement's rows.
pub(crate) fn safe_width(grid: &Grid, placement: &Placement) -> usize {
    let rows = placement.slot..placement.slot + placement.height;
    let extra = (placement.track + 1..grid.track_count(placement.day))
        .take_while(|&track| grid.is_free(placement.day, track, rows.clone()))
        .count();
    1 + extra
}

/// Expand every placement in order and attach its rooms.
///
/// Later placements see the cells covered by earlier ones as occupied.
/// Returns the number of placements that grew wider than one track.
pub(crate) fn expand_placements(
    grid: &mut Grid,
    placements: &mut [Placement],
    rooms: &RoomMap,
) -> usize {
    let mut widened = 0usize;

    for placement in placements.iter_mut() {
        placement.rooms = rooms.get(&placement.id).cloned().unwrap_or_default();

        let width = safe_width(grid, placement);
        let reaches_last = placement.track + width == grid.track_count(placement.day);

        if let Cell::Occupied(top) = grid.slot_mut(placement.slot, placement.day, placement.track) {
            top.colspan = width;
            if reaches_last {
                top.last = true;
            }
        }

        for track in placement.track + 1..placement.track + width {
            for slot in placement.slot..placement.slot + placement.height {
                let mut covered = Occupancy::new(placement.lecture, placement.height, true);
                covered.colspan = width;
                *grid.slot_mut(slot, placement.day, track) = Cell::Occupied(covered);
            }
        }

        placement.width = width;
        if width > 1 {
            widened += 1;
            debug!(
                lecture = %placement.id,
                day = placement.day,
                track = placement.track,
                colspan = width,
                "expanded"
            );
        }
    }

    widened
}

// ── Tests ─────────────────────────────────────────────────────────────────────
