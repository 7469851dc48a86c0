/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Data access: where lecture records come from.
//!
//! The engine never queries storage itself.  A [`LectureSource`] answers
//! "which lectures does this student have this term (and week)?" and the
//! caller converts the records into intervals.
//!
//! [`YamlLectureStore`] is a file-backed source.  The expected YAML
//! structure is:
//! ```yaml
//! subscriptions:
//!   - year: 2009
//!     term: spring
//!     student: adamcik
//!     lectures:
//!       - id: 2
//!         course: TDT4120
//!         alias: Algdat
//!         kind: Lecture
//!         day: 0
//!         start: "08:15"
//!         end: "10:00"
//!         rooms: [S1]
//!         weeks: [2, 3, 4]
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info};

use crate::layout::RoomMap;
use crate::lecture::{LectureId, LectureRecord, Term};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read lecture store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lecture store: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown term '{0}' (valid: spring, fall)")]
    InvalidTerm(String),
}

// ── Query & trait ─────────────────────────────────────────────────────────────

/// Which timetable to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureQuery {
    pub year: i32,
    pub term: Term,
    pub student: String,
    /// ISO week; `None` shows every lecture of the term.
    pub week: Option<u32>,
}

/// Supplies lecture records for a query.
pub trait LectureSource {
    /// Every lecture the student is subscribed to in the given term.
    ///
    /// Excluded lectures are returned too (with `excluded = true`), so the
    /// caller can still list them.  `show_week` reflects the query's week.
    fn get_lectures(&self, query: &LectureQuery) -> Result<Vec<LectureRecord>, SourceError>;
}

/// Collect the non-empty room lists of `records`, keyed by lecture id.
pub fn room_map(records: &[LectureRecord]) -> RoomMap {
    records
        .iter()
        .filter(|r| !r.rooms.is_empty())
        .map(|r| (r.id, r.rooms.clone()))
        .collect()
}

// ── Private YAML deserialization types ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StoreFile {
    #[serde(default)]
    subscriptions: Vec<SubscriptionEntry>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionEntry {
    year: i32,
    term: Term,
    student: String,
    #[serde(default)]
    lectures: Vec<LectureEntry>,
}

#[derive(Debug, Deserialize)]
struct LectureEntry {
    id: u64,
    course: String,
    alias: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    optional: bool,
    day: usize,
    #[serde(deserialize_with = "hh_mm")]
    start: NaiveTime,
    #[serde(deserialize_with = "hh_mm")]
    end: NaiveTime,
    #[serde(default)]
    rooms: Vec<String>,
    #[serde(default)]
    weeks: Vec<u32>,
    #[serde(default)]
    excluded: bool,
}

/// Accept `"08:15"` as well as `"08:15:00"`.
fn hh_mm<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&text, "%H:%M:%S"))
        .map_err(|e| serde::de::Error::custom(format!("invalid time '{text}': {e}")))
}

impl LectureEntry {
    fn to_record(&self, week: Option<u32>) -> LectureRecord {
        let mut record = LectureRecord {
            id: LectureId(self.id),
            course: self.course.clone(),
            alias: self.alias.clone(),
            kind: self.kind.clone(),
            optional: self.optional,
            day: self.day,
            start: self.start,
            end: self.end,
            rooms: self.rooms.clone(),
            weeks: self.weeks.clone(),
            excluded: self.excluded,
            show_week: true,
        };
        if let Some(week) = week {
            record.show_week = record.runs_in_week(week);
        }
        record
    }
}

// ── YamlLectureStore ──────────────────────────────────────────────────────────

/// A lecture store read once from a YAML file and queried in memory.
#[derive(Debug)]
pub struct YamlLectureStore {
    subscriptions: Vec<SubscriptionEntry>,
}

impl YamlLectureStore {
    /// Read and parse `path`.
    ///
    /// # Errors
    /// [`SourceError::Io`] if the file cannot be read, [`SourceError::Parse`]
    /// if it is not a valid store.
    pub fn load_from_file(path: &Path) -> Result<Self, SourceError> {
        info!("Loading lecture store from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SourceError> {
        let file: StoreFile = serde_yaml::from_str(content)?;
        let store = Self {
            subscriptions: file.subscriptions,
        };
        info!(
            subscriptions = store.subscriptions.len(),
            lectures = store.lecture_count(),
            "Lecture store loaded"
        );
        Ok(store)
    }

    /// Total lectures over all subscriptions.
    pub fn lecture_count(&self) -> usize {
        self.subscriptions.iter().map(|s| s.lectures.len()).sum()
    }
}

impl LectureSource for YamlLectureStore {
    fn get_lectures(&self, query: &LectureQuery) -> Result<Vec<LectureRecord>, SourceError> {
        let records: Vec<LectureRecord> = self
            .subscriptions
            .iter()
            .filter(|s| s.year == query.year && s.term == query.term && s.student == query.student)
            .flat_map(|s| s.lectures.iter())
            .map(|entry| entry.to_record(query.week))
            .collect();

        for record in &records {
            debug!(
                lecture = %record.id,
                course = %record.course,
                day = record.day,
                time = %record.time_range(),
                show_week = record.show_week,
                "fetched"
            );
        }

        debug!(
            year = query.year,
            term = %query.term,
            student = %query.student,
            week = ?query.week,
            count = records.len(),
            "get_lectures"
        );
        Ok(records)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
