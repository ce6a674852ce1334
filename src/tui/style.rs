//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Original consumption line color.
pub const ORIGINAL_COLOR: Color = Color::Cyan;
/// Adjusted consumption line color.
pub const ADJUSTED_COLOR: Color = Color::Green;
/// Threshold reference line color.
pub const THRESHOLD_COLOR: Color = Color::Red;
/// Waste-hour highlight in tables.
pub const WASTE_FG: Color = Color::Yellow;
/// Metric values.
pub const METRIC_FG: Color = Color::LightGreen;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Status message color.
pub const STATUS_FG: Color = Color::Magenta;

/// Computes Y-axis bounds from zero to the tallest point plus 10% headroom.
///
/// Consumption is never negative, so the axis is anchored at zero and
/// always leaves room for `floor` (the threshold line).
pub fn auto_bounds_y(series: &[&[(f64, f64)]], floor: f64) -> [f64; 2] {
    let max = series
        .iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .fold(floor, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return [0.0, 1.0];
    }
    [0.0, max * 1.1]
}
