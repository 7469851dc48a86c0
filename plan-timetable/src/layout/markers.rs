/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Border markers for renderers: `last` on the final track of each day,
//! `bottom` along the final row.

use super::grid::{Cell, Grid};

/// Flag the last track of every day in every row.
///
/// Empty cells turn into markers so the flag has somewhere to live.
pub(crate) fn mark_last_tracks(grid: &mut Grid) {
    for slot in 0..grid.slot_count() {
        for tracks in grid.days_mut(slot) {
            if let Some(cell) = tracks.last_mut() {
                set_last(cell);
            }
        }
    }
}

/// Flag cells that touch the bottom edge of the grid.
///
/// Span starts get `bottom` iff their rows reach the final row; covered
/// cells never do.  Empty cells in the final row turn into markers.
pub(crate) fn mark_bottom_row(grid: &mut Grid) {
    let slots = grid.slot_count();
    for slot in 0..slots {
        let final_row = slot + 1 == slots;
        for cell in grid.days_mut(slot).iter_mut().flatten() {
            match cell {
                Cell::Occupied(occ) => occ.bottom = !occ.remove && slot + occ.rowspan == slots,
                Cell::Empty if final_row => {
                    *cell = Cell::Marker {
                        last: false,
                        bottom: true,
                    }
                }
                Cell::Marker { bottom, .. } if final_row => *bottom = true,
                _ => {}
            }
        }
    }
}

fn set_last(cell: &mut Cell) {
    match cell {
        Cell::Empty => {
            *cell = Cell::Marker {
                last: true,
                bottom: false,
            }
        }
        Cell::Occupied(occ) => occ.last = true,
        Cell::TimeLabel { last, .. } | Cell::Marker { last, .. } => *last = true,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::{LectureRef, Occupancy};

    fn occupy(grid: &mut Grid, day: usize, track: usize, slots: (usize, usize)) {
        let height = slots.1 - slots.0 + 1;
        for slot in slots.0..=slots.1 {
            *grid.slot_mut(slot, day, track) =
                Cell::Occupied(Occupancy::new(LectureRef(0), height, slot != slots.0));
        }
    }

    #[test]
    fn last_track_of_each_day_is_flagged() {
        let mut grid = Grid::new(2, 2);
        grid.push_track(0);
        occupy(&mut grid, 0, 1, (0, 0));

        mark_last_tracks(&mut grid);

        assert!(grid.cell(0, 0, 1).unwrap().is_last());
        assert_eq!(
            grid.cell(1, 0, 1),
            Some(&Cell::Marker { last: true, bottom: false })
        );
        assert!(grid.cell(0, 0, 0).unwrap().is_empty(), "inner track untouched");
        assert!(grid.cell(0, 1, 0).unwrap().is_last());
    }

    #[test]
    fn final_row_empties_become_bottom_markers() {
        let mut grid = Grid::new(3, 1);
        mark_bottom_row(&mut grid);
        assert!(grid.cell(0, 0, 0).unwrap().is_empty());
        assert_eq!(
            grid.cell(2, 0, 0),
            Some(&Cell::Marker { last: false, bottom: true })
        );
    }

    #[test]
    fn bottom_goes_to_span_start_reaching_the_end() {
        let mut grid = Grid::new(4, 1);
        grid.push_track(0);
        occupy(&mut grid, 0, 0, (1, 3));
        occupy(&mut grid, 0, 1, (0, 1));

        mark_bottom_row(&mut grid);

        assert!(grid.cell(1, 0, 0).unwrap().is_bottom());
        assert!(!grid.cell(3, 0, 0).unwrap().is_bottom(), "covered cell");
        assert!(!grid.cell(0, 0, 1).unwrap().is_bottom(), "ends early");
        assert!(grid.cell(3, 0, 1).unwrap().is_bottom());
    }

    #[test]
    fn both_passes_combine_on_the_corner() {
        let mut grid = Grid::new(2, 1);
        mark_last_tracks(&mut grid);
        mark_bottom_row(&mut grid);
        assert_eq!(
            grid.cell(1, 0, 0),
            Some(&Cell::Marker { last: true, bottom: true })
        );
    }

    #[test]
    fn time_column_is_left_alone() {
        let mut grid = Grid::new(1, 1);
        grid.prepend_time_column(vec!["08:15 - 09:00".into()]);
        mark_bottom_row(&mut grid);
        assert_eq!(
            grid.rows()[0][0],
            vec![Cell::TimeLabel { text: "08:15 - 09:00".into(), last: true }]
        );
    }
}
