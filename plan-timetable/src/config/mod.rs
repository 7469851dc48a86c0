//! Timetable configuration loading and management.
//!
//! The expected YAML structure is:
//! ```yaml
//! timetable:
//!   first_hour: 8
//!   slots: 12
//!   label_minute: 15
//!   days: [Monday, Tuesday, Wednesday, Thursday, Friday]
//! ```
//!
//! Every key is optional; anything missing falls back to the defaults in
//! [`crate::slots`].

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::slots::{SlotLayout, LAST_WINDOW_HOUR, MAX_DAYS};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// This is kept private – callers work with [`SlotLayout`] / [`ConfigManager`]
/// instead.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    timetable: TimetableEntry,
}

/// The `timetable:` section as it appears in the YAML file.
#[derive(Debug, Default, Deserialize)]
struct TimetableEntry {
    first_hour: Option<u32>,
    slots: Option<usize>,
    label_minute: Option<u32>,
    days: Option<Vec<String>>,
}

impl TimetableEntry {
    /// Merge the entry over the defaults and check the result.
    fn into_layout(self) -> Result<SlotLayout> {
        let defaults = SlotLayout::default();

        let days = match self.days {
            Some(days) if days.is_empty() => {
                warn!("Empty day list in configuration file, using default days");
                defaults.days
            }
            Some(days) => days,
            None => defaults.days,
        };

        let layout = SlotLayout {
            first_hour: self.first_hour.unwrap_or(defaults.first_hour),
            slots: self.slots.unwrap_or(defaults.slots),
            label_minute: self.label_minute.unwrap_or(defaults.label_minute),
            days,
        };

        if layout.slots == 0 {
            bail!("timetable.slots must be at least 1");
        }
        // Hours 0..4 are read as 24..28, so the window may reach 28:00.
        let window_end = u32::try_from(layout.slots)
            .ok()
            .and_then(|slots| layout.first_hour.checked_add(slots));
        if !matches!(window_end, Some(end) if end <= LAST_WINDOW_HOUR) {
            bail!(
                "timetable window {}:00 + {} slots runs past 04:00 the next day",
                layout.first_hour,
                layout.slots
            );
        }
        if layout.label_minute >= 60 {
            bail!("timetable.label_minute must be below 60, got {}", layout.label_minute);
        }
        if layout.days.len() > MAX_DAYS {
            bail!(
                "timetable.days lists {} days, at most {} are allowed",
                layout.days.len(),
                MAX_DAYS
            );
        }

        Ok(layout)
    }
}

// ── ConfigManager ─────────────────────────────────────────────────────────────

/// Loads and holds the [`SlotLayout`] from a YAML file.
///
/// Before a successful [`load_from_file`](Self::load_from_file) the manager
/// hands out the default layout.
#[derive(Debug, Default)]
pub struct ConfigManager {
    layout: SlotLayout,

    /// Set to `true` after a successful [`load_from_file`](Self::load_from_file).
    loaded: bool,
}

impl ConfigManager {
    /// Creates a manager holding the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path` and replaces the current layout.
    ///
    /// * An empty file or a file without a `timetable:` section yields the
    ///   defaults.
    /// * Calling this method a second time replaces the previously loaded
    ///   layout.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, if the YAML is
    /// structurally invalid, or if the values describe an impossible grid.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading timetable configuration from: {}", path.display());

        // Reset state before (re-)loading
        self.layout = SlotLayout::default();
        self.loaded = false;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // serde_yaml rejects an empty document, treat it as "all defaults"
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        self.layout = file
            .timetable
            .into_layout()
            .with_context(|| format!("Invalid timetable configuration: {}", path.display()))?;
        self.loaded = true;

        debug!("  Days: {:?}", self.layout.days);
        info!(
            first_hour = self.layout.first_hour,
            slots = self.layout.slots,
            days = self.layout.day_count(),
            "Successfully loaded timetable configuration"
        );

        Ok(())
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Clone the layout into an `Arc` for sharing with engine instances.
    pub fn shared_layout(&self) -> Arc<SlotLayout> {
        Arc::new(self.layout.clone())
    }

    /// Returns `true` after a successful call to [`load_from_file`](Self::load_from_file).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
