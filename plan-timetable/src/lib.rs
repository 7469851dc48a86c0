/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! plan-timetable – weekly timetable layout engine
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── lecture       – lecture records, engine intervals, ids, terms
//! ├── config/       – YAML timetable configuration
//! ├── slots/        – wall-clock → slot mapping, time labels, week dates
//! │   └── clock     – past-midnight / clamping arithmetic
//! ├── layout/       – the engine: placement, expansion, markers, labels
//! ├── source        – LectureSource trait + YAML lecture store
//! └── render/       – HTML table renderer
//! ```

pub mod config;
pub mod layout;
pub mod lecture;
pub mod render;
pub mod slots;
pub mod source;
