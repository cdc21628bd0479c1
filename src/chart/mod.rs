//! Chart module for composing candlestick charts with indicator overlays.
//!
//! This module provides:
//! - `Figure` - Serializable figure of stacked rows and traces
//! - `ChartComposer` - Incremental multi-row chart builder
//! - `exclude_dates` - Non-trading day detection for the time axis
//! - `HtmlRenderer` / `MemoryRenderer` - Rendering backends
//!
//! # Example
//!
//! ```ignore
//! use stock_chart::chart::{ChartComposer, ComposerConfig, HtmlRenderer};
//!
//! let mut chart = ChartComposer::new(table, ComposerConfig::default())?;
//! chart.show(&mut HtmlRenderer::from_settings("AAPL"))?;
//! ```

mod base;
mod composer;
mod figure;
mod rangebreak;
mod render;

pub use base::*;
pub use composer::{ChartComposer, ChartType, ColumnBinding, ComposerConfig, LineOptions, MarkerOptions};
pub use figure::{Axis, Figure, Fill, Layout, Line, Marker, MarkerSymbol, Mode, Trace, TraceType};
pub use rangebreak::{exclude_dates, format_date};
pub use render::{to_html, ChartRenderer, HtmlRenderer, MemoryRenderer};
