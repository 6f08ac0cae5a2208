//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::plan::measure::HexColor;

/// Projected consumption line color.
pub const CONSUMPTION_COLOR: Color = Color::LightGreen;
/// Base consumption reference line color.
pub const BASE_COLOR: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Error message color.
pub const ERROR_FG: Color = Color::Red;

/// Terminal colour of a measure badge.
pub const fn measure_color(c: HexColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(series: &[&[(f64, f64)]]) -> [f64; 2] {
    let all = series.iter().flat_map(|s| s.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [(min - pad).max(0.0), max + pad]
}
