//! Renderers that consume a finished [`Timetable`](crate::layout::Timetable).
//!
//! Only HTML lives here for now; renderers never mutate the grid.

pub mod html;

pub use html::{render_html, CellLabel};
