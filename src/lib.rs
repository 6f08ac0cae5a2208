//! City-scale electricity consumption projection under energy-efficiency plans.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Measure catalog, climate plans, simulator and summary metrics.
pub mod plan;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;
