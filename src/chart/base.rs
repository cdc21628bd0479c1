//! Base constants for the chart module.
//!
//! Colors are CSS color strings as understood by plotly.js.

// Line colors
pub const LINE_COLOR: &str = "black";
pub const BAND_COLOR: &str = "red";

// Price movement colors
pub const UP_COLOR: &str = "green";
pub const DOWN_COLOR: &str = "red";

// Trade marker colors
pub const BUY_COLOR: &str = "yellow";
pub const SELL_COLOR: &str = "blue";
pub const MARKER_SIZE: u32 = 10;

/// Moving average overlay colors, one per configured period
pub const MA_COLOR_LIST: [&str; 4] = ["#FFAE42", "green", "blue", "red"];

/// Oversold/overbought reference levels for RSI panels
pub const RSI_THRESHOLD: (f64, f64) = (20.0, 80.0);

/// Number of trailing rows shown by the static candlestick chart
pub const LATEST: usize = 30;

// Figure layout
pub const FIGURE_WIDTH: u32 = 700;
pub const FIGURE_HEIGHT: u32 = 700;
pub const MARGIN: u32 = 50;
pub const MARGIN_PAD: u32 = 4;
pub const PAPER_BGCOLOR: &str = "LightSteelBlue";
pub const VERTICAL_SPACING: f64 = 0.2;

// Horizontal reference lines
pub const HLINE_DASH: &str = "dash";
pub const HLINE_WIDTH: f64 = 0.7;

/// Date format used for x values and range breaks
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Spacing between stacked rows, shrunk so that all rows keep a positive height
pub fn vertical_spacing(rows: usize) -> f64 {
    if rows <= 1 {
        return 0.0;
    }
    VERTICAL_SPACING.min(0.5 / (rows - 1) as f64)
}

/// Vertical domains of stacked rows, top row first.
///
/// Heights are relative weights; the caller guarantees one positive weight per row.
pub fn row_domains(row_heights: &[f64]) -> Vec<[f64; 2]> {
    let spacing = vertical_spacing(row_heights.len());
    let total: f64 = row_heights.iter().sum();
    let available = 1.0 - spacing * row_heights.len().saturating_sub(1) as f64;

    let mut top = 1.0_f64;
    let mut domains = Vec::with_capacity(row_heights.len());
    for (ix, weight) in row_heights.iter().enumerate() {
        let height = available * weight / total;
        let bottom = if ix + 1 == row_heights.len() {
            0.0
        } else {
            (top - height).max(0.0)
        };
        domains.push([bottom, top]);
        top = (bottom - spacing).max(0.0);
    }
    domains
}
