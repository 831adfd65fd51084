//! Core library for the attendance-totals command line application.
//!
//! Registers (one spreadsheet per group, names down the side, dates across
//! the top, `Y` where someone attended) are checked by [`validate`], folded
//! into per-person counts by [`aggregate`], and laid out as a single table by
//! [`totals`]. Spreadsheet adapters live under [`io`], batch composition in
//! [`batch`], and the end-to-end runs in [`pipeline`].

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod totals;
pub mod validate;

pub use error::{AttendanceError, Result};
