/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! HTML renderer: turns a laid-out [`Timetable`] into a `<table>` string.
//!
//! The grid already carries every span, so rendering is a straight walk:
//! covered cells are skipped, span starts get `rowspan`/`colspan`, and the
//! `last`/`bottom` flags become CSS classes for the border styling.

use crate::layout::{Cell, Occupancy, Timetable};
use crate::lecture::LectureRecord;

/// What a renderer needs to print for a lecture payload.
pub trait CellLabel {
    /// Main text of the cell.
    fn label(&self) -> String;

    /// Second line, e.g. the lecture type.
    fn detail(&self) -> Option<String> {
        None
    }

    /// Extra CSS class for the cell.
    fn css_class(&self) -> Option<&'static str> {
        None
    }
}

impl CellLabel for LectureRecord {
    fn label(&self) -> String {
        self.title().to_string()
    }

    fn detail(&self) -> Option<String> {
        self.kind.clone()
    }

    fn css_class(&self) -> Option<&'static str> {
        self.optional.then_some("optional")
    }
}

impl CellLabel for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl CellLabel for &str {
    fn label(&self) -> String {
        (*self).to_string()
    }
}

/// Render `timetable` as a standalone `<table class="timetable">`.
///
/// Day headers use the layout's day names, followed by the date when a week
/// has been set.  Works at any phase; a grid that was never placed renders
/// as an empty week.
pub fn render_html<P: CellLabel>(timetable: &Timetable<P>) -> String {
    let grid = timetable.grid();
    let mut html = String::with_capacity(grid.slot_count() * 256);

    html.push_str(r#"<table class="timetable">"#);
    html.push_str("<thead><tr>");
    if grid.has_time_column() {
        html.push_str("<th></th>");
    }
    for (day, name) in timetable.layout().days.iter().enumerate() {
        let span = timetable.span().get(day).copied().unwrap_or(1);
        html.push_str(&format!(r#"<th colspan="{span}">{}"#, escape_html(name)));
        if let Some(date) = timetable.dates().get(day) {
            html.push_str(&format!(
                r#" <span class="date">{}</span>"#,
                date.format("%Y-%m-%d")
            ));
        }
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for row in grid.rows() {
        html.push_str("<tr>");
        for cell in row.iter().flatten() {
            match cell {
                Cell::TimeLabel { text, .. } => {
                    html.push_str(&format!(r#"<th class="time">{}</th>"#, escape_html(text)));
                }
                Cell::Occupied(occ) if occ.remove => {}
                Cell::Occupied(occ) => render_lecture(&mut html, timetable, occ),
                Cell::Empty => html.push_str("<td></td>"),
                Cell::Marker { last, bottom } => {
                    html.push_str(&format!("<td{}></td>", class_attr(None, None, *last, *bottom)));
                }
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn render_lecture<P: CellLabel>(html: &mut String, timetable: &Timetable<P>, occ: &Occupancy) {
    let lecture = timetable.lecture(occ.lecture);
    let extra = lecture.and_then(|l| l.payload.css_class());

    html.push_str(&format!(
        "<td{}",
        class_attr(Some("lecture"), extra, occ.last, occ.bottom)
    ));
    if occ.rowspan > 1 {
        html.push_str(&format!(r#" rowspan="{}""#, occ.rowspan));
    }
    if occ.colspan > 1 {
        html.push_str(&format!(r#" colspan="{}""#, occ.colspan));
    }
    html.push('>');

    if let Some(lecture) = lecture {
        html.push_str(&format!(
            "<strong>{}</strong>",
            escape_html(&lecture.payload.label())
        ));
        if let Some(detail) = lecture.payload.detail() {
            html.push_str(&format!("<br/>{}", escape_html(&detail)));
        }
    }
    if let Some(placement) = timetable.placement(occ.lecture) {
        if !placement.rooms.is_empty() {
            html.push_str(&format!(
                r#"<br/><span class="rooms">{}</span>"#,
                escape_html(&placement.rooms.join(", "))
            ));
        }
    }
    html.push_str("</td>");
}

/// ` class="..."` or nothing when no class applies.
fn class_attr(base: Option<&str>, extra: Option<&str>, last: bool, bottom: bool) -> String {
    let classes: Vec<&str> = [
        base,
        extra,
        last.then_some("last"),
        bottom.then_some("bottom"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, classes.join(" "))
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::layout::RoomMap;
    use crate::lecture::{LectureId, LectureInterval};
    use crate::slots::SlotLayout;

    fn lec(id: u64, day: usize, start: usize, end: usize, label: &'static str) -> LectureInterval<&'static str> {
        LectureInterval::new(LectureId(id), day, start, end, label)
    }

    fn laid_out(lectures: Vec<LectureInterval<&'static str>>, rooms: RoomMap) -> Timetable<&'static str> {
        let mut tt = Timetable::new(Arc::new(SlotLayout::default()), lectures).with_rooms(rooms);
        tt.lay_out(true).unwrap();
        tt
    }

    #[test]
    fn header_has_corner_and_day_spans() {
        let tt = laid_out(vec![lec(1, 0, 0, 1, "A"), lec(2, 0, 1, 2, "B")], RoomMap::new());
        let html = render_html(&tt);
        assert!(html.starts_with(r#"<table class="timetable"><thead><tr><th></th><th colspan="2">Monday</th>"#));
        assert!(html.contains(r#"<th colspan="1">Friday</th>"#));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn one_row_per_slot_with_time_label() {
        let tt = laid_out(Vec::new(), RoomMap::new());
        let html = render_html(&tt);
        assert_eq!(html.matches(r#"<th class="time">"#).count(), 12);
        assert!(html.contains(r#"<th class="time">08:15 - 09:00</th>"#));
        assert_eq!(html.matches("<tr>").count(), 13);
    }

    #[test]
    fn span_start_gets_rowspan_and_covered_cells_vanish() {
        let tt = laid_out(vec![lec(1, 1, 2, 5, "Algdat")], RoomMap::new());
        let html = render_html(&tt);
        assert!(html.contains(r#"<td class="lecture last" rowspan="4"><strong>Algdat</strong></td>"#));
        assert_eq!(html.matches("Algdat").count(), 1);
        // 12 rows × 5 days minus the 3 covered cells
        assert_eq!(html.matches("<td").count(), 12 * 5 - 3);
    }

    #[test]
    fn expanded_lecture_gets_colspan() {
        let tt = laid_out(
            vec![lec(1, 0, 0, 0, "A"), lec(2, 0, 0, 0, "B"), lec(3, 0, 3, 3, "C")],
            RoomMap::new(),
        );
        let html = render_html(&tt);
        assert!(html.contains(r#"<td class="lecture last" colspan="2"><strong>C</strong></td>"#));
    }

    #[test]
    fn rooms_are_listed() {
        let mut rooms = RoomMap::new();
        rooms.insert(LectureId(1), vec!["S1".into(), "S2".into()]);
        let tt = laid_out(vec![lec(1, 0, 0, 0, "A")], rooms);
        assert!(render_html(&tt).contains(r#"<span class="rooms">S1, S2</span>"#));
    }

    #[test]
    fn text_is_escaped() {
        let tt = laid_out(vec![lec(1, 0, 0, 0, "<b>R&D</b>")], RoomMap::new());
        let html = render_html(&tt);
        assert!(html.contains("&lt;b&gt;R&amp;D&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn dates_follow_day_names() {
        let mut tt: Timetable<&str> = Timetable::new(Arc::new(SlotLayout::default()), Vec::new());
        tt.set_week(2009, 2).unwrap();
        tt.lay_out(false).unwrap();
        assert!(render_html(&tt).contains(r#"Monday <span class="date">2009-01-05</span>"#));
    }

    #[test]
    fn optional_record_gets_css_class() {
        let record = LectureRecord {
            id: LectureId(1),
            course: "TDT4120".into(),
            alias: None,
            kind: Some("Exercise".into()),
            optional: true,
            day: 0,
            start: chrono::NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            end: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            rooms: Vec::new(),
            weeks: Vec::new(),
            excluded: false,
            show_week: true,
        };
        let interval = record.into_interval(&SlotLayout::default());
        let mut tt = Timetable::new(Arc::new(SlotLayout::default()), vec![interval]);
        tt.lay_out(true).unwrap();
        assert!(render_html(&tt).contains(
            r#"<td class="lecture optional last"><strong>TDT4120</strong><br/>Exercise</td>"#
        ));
    }

    #[test]
    fn class_attr_is_omitted_when_empty() {
        assert_eq!(class_attr(None, None, false, false), "");
        assert_eq!(class_attr(None, None, true, true), r#" class="last bottom""#);
    }
}
