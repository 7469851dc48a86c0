/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end: YAML config + YAML store → engine → HTML / JSON.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use plan_timetable::config::ConfigManager;
use plan_timetable::layout::{Cell, LectureRef, Phase, Timetable};
use plan_timetable::lecture::{LectureRecord, Term};
use plan_timetable::render::render_html;
use plan_timetable::source::{room_map, LectureQuery, LectureSource, YamlLectureStore};

const CONFIG: &str = r#"
timetable:
  first_hour: 8
  slots: 12
  days: [Monday, Tuesday, Wednesday, Thursday, Friday]
"#;

/// The classic week: five Monday lectures, an all-day Tuesday lecture and
/// two single-hour Wednesday lectures, plus one excluded and one off-week
/// lecture that must not show up.
const STORE: &str = r#"
subscriptions:
  - year: 2009
    term: spring
    student: adamcik
    lectures:
      - { id: 2,  course: TDT4120, alias: Algdat, kind: Lecture, day: 0, start: "08:15", end: "10:00", rooms: [S1], weeks: [2] }
      - { id: 3,  course: TDT4120, kind: Exercise, day: 0, start: "10:15", end: "12:00", weeks: [2] }
      - { id: 4,  course: TMA4100, kind: Lecture, day: 0, start: "08:15", end: "14:00", rooms: [EL6, EL5], weeks: [2] }
      - { id: 5,  course: TMA4100, kind: Exercise, day: 0, start: "09:15", end: "11:00", weeks: [2] }
      - { id: 8,  course: TFE4101, day: 0, start: "15:15", end: "16:00", weeks: [2] }
      - { id: 9,  course: TFE4101, day: 1, start: "08:15", end: "20:00", weeks: [2] }
      - { id: 10, course: TDT4100, day: 2, start: "08:15", end: "09:00", weeks: [2] }
      - { id: 11, course: TDT4100, day: 2, start: "19:15", end: "20:00", weeks: [2] }
      - { id: 12, course: TDT4100, day: 3, start: "08:15", end: "10:00", weeks: [2], excluded: true }
      - { id: 13, course: TDT4100, day: 4, start: "08:15", end: "10:00", weeks: [5] }
"#;

fn tempfile_with(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f
}

fn build(week: Option<u32>, markers: bool) -> Timetable<LectureRecord> {
    let config_file = tempfile_with(CONFIG);
    let store_file = tempfile_with(STORE);

    let mut config = ConfigManager::new();
    config.load_from_file(config_file.path()).unwrap();
    let layout = config.shared_layout();

    let store = YamlLectureStore::load_from_file(store_file.path()).unwrap();
    let records = store
        .get_lectures(&LectureQuery {
            year: 2009,
            term: Term::Spring,
            student: "adamcik".into(),
            week,
        })
        .unwrap();

    let rooms = room_map(&records);
    let intervals = records
        .into_iter()
        .map(|r| r.into_interval(&layout))
        .collect();

    let mut timetable = Timetable::new(Arc::clone(&layout), intervals).with_rooms(rooms);
    if let Some(week) = week {
        timetable.set_week(2009, week).unwrap();
    }
    timetable.lay_out(markers).unwrap();
    timetable
}

#[test]
fn pipeline_places_the_classic_week() {
    let tt = build(Some(2), true);

    assert_eq!(tt.phase(), Phase::Expanded);
    assert_eq!(tt.span(), &[3, 1, 1, 1, 1]);
    assert_eq!(tt.placements().len(), 8, "excluded and off-week lectures skipped");

    let tracks: Vec<(u64, usize, usize)> = tt
        .placements()
        .iter()
        .map(|p| (p.id.0, p.track, p.width))
        .collect();
    assert_eq!(
        tracks,
        vec![
            (2, 0, 1),
            (3, 0, 1),
            (4, 1, 1),
            (5, 2, 1),
            (8, 0, 3),
            (9, 0, 1),
            (10, 0, 1),
            (11, 0, 1),
        ]
    );

    let four = tt.placement(LectureRef(2)).unwrap();
    assert_eq!(four.rooms, vec!["EL6".to_string(), "EL5".to_string()]);
    assert_eq!(tt.dates().len(), 5);
}

#[test]
fn without_week_every_non_excluded_lecture_shows() {
    let tt = build(None, false);
    assert_eq!(tt.placements().len(), 9);
    assert!(tt.dates().is_empty());
    // lecture 13 lands on Friday
    assert!(tt.grid().cell(0, 4, 0).and_then(Cell::occupancy).is_some());
}

#[test]
fn html_output_contains_spans_and_labels() {
    let tt = build(Some(2), true);
    let html = render_html(&tt);

    assert!(html.contains(r#"<th colspan="3">Monday <span class="date">2009-01-05</span></th>"#));
    assert!(html.contains(r#"<th class="time">08:15 - 09:00</th>"#));
    assert!(html.contains(r#"rowspan="12""#), "all-day Tuesday lecture");
    assert!(html.contains(r#"colspan="3""#), "expanded Monday lecture");
    assert!(html.contains("<strong>Algdat</strong>"));
    assert!(html.contains(r#"<span class="rooms">EL6, EL5</span>"#));
}

#[test]
fn json_snapshot_round_trips_through_serde_json() {
    let tt = build(Some(2), false);
    let text = serde_json::to_string(&tt.snapshot()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["span"], serde_json::json!([3, 1, 1, 1, 1]));
    assert_eq!(value["dates"][0], "2009-01-05");
    assert_eq!(value["lectures"][0]["payload"]["course"], "TDT4120");
    assert_eq!(value["rows"][0][1][0]["kind"], "occupied");
    assert_eq!(value["rows"][0][1][0]["rowspan"], 2);
}
