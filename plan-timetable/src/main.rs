/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use plan_timetable::config::ConfigManager;
use plan_timetable::layout::Timetable;
use plan_timetable::lecture::{LectureRecord, Term};
use plan_timetable::render::render_html;
use plan_timetable::source::{room_map, LectureQuery, LectureSource, YamlLectureStore};

// ── CLI argument definition ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

/// Lay out one student's weekly timetable.
///
/// Example:
///   plan-timetable --lectures lectures.yaml --year 2009 --term spring \
///                  --student adamcik --week 2 --markers
#[derive(Debug, Parser)]
#[command(
    name = "plan-timetable",
    about = "Timetable layout engine – prints a student's week as HTML or JSON",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML timetable configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Path to the YAML lecture store.
    #[arg(short = 'l', long = "lectures")]
    lectures: PathBuf,

    #[arg(short = 'y', long = "year")]
    year: i32,

    /// `spring` or `fall`.
    #[arg(short = 't', long = "term", default_value = "spring")]
    term: Term,

    #[arg(short = 's', long = "student")]
    student: String,

    /// ISO week; hides lectures that do not run that week and adds dates.
    #[arg(short = 'w', long = "week")]
    week: Option<u32>,

    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Flag the last track of every day for border styling.
    #[arg(short = 'm', long = "markers", default_value_t = false)]
    markers: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        config   = ?cli.config,
        lectures = %cli.lectures.display(),
        year     = cli.year,
        term     = %cli.term,
        student  = %cli.student,
        week     = ?cli.week,
        format   = ?cli.format,
        "Configuration"
    );

    if let Err(e) = run(&cli) {
        error!("Failed to build timetable: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Load configuration ────────────────────────────────────────────────────
    let mut config = ConfigManager::new();
    match &cli.config {
        Some(path) => config.load_from_file(path)?,
        None => warn!("No configuration file provided, using default timetable settings"),
    }
    let layout = config.shared_layout();

    // ── Fetch lectures ────────────────────────────────────────────────────────
    let store = YamlLectureStore::load_from_file(&cli.lectures)?;
    let query = LectureQuery {
        year: cli.year,
        term: cli.term,
        student: cli.student.clone(),
        week: cli.week,
    };
    let records = store.get_lectures(&query)?;
    if records.is_empty() {
        warn!(student = %cli.student, "No lectures found for query");
    }

    let rooms = room_map(&records);
    let intervals = records
        .into_iter()
        .map(|record: LectureRecord| record.into_interval(&layout))
        .collect();

    // ── Lay out ───────────────────────────────────────────────────────────────
    let mut timetable = Timetable::new(layout, intervals).with_rooms(rooms);
    if let Some(week) = cli.week {
        timetable.set_week(cli.year, week)?;
    }
    timetable.lay_out(cli.markers)?;

    // ── Output ────────────────────────────────────────────────────────────────
    let output = match cli.format {
        OutputFormat::Html => render_html(&timetable),
        OutputFormat::Json => serde_json::to_string_pretty(&timetable.snapshot())
            .context("Failed to serialise timetable")?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write output")?;

    info!(
        placed = timetable.placements().len(),
        span = ?timetable.span(),
        tracks = timetable.total_tracks(),
        "Timetable written"
    );
    Ok(())
}
