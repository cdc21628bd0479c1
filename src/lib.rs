//! Stock Chart - daily price history and interactive chart composition
//!
//! This crate provides:
//!
//! - Daily OHLCV history from a pluggable datafeed (Yahoo Finance by default)
//! - Derived columns: normalized prices, simple moving averages, RSI
//! - Static candlestick charts with moving average overlays
//! - A multi-row chart composer with lines, bands, buy/sell markers and
//!   automatic hiding of non-trading days
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stock_chart::chart::HtmlRenderer;
//! use stock_chart::Stock;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut stock = Stock::from_settings();
//!     if stock.fetch("AAPL", None, None, Some(365)).await.is_ok() {
//!         let _ = stock.add_sma(10);
//!         let mut renderer = HtmlRenderer::from_settings("AAPL");
//!         let _ = stock.render(30, true, &mut renderer);
//!     }
//! }
//! ```

pub mod chart;
pub mod dataset;
pub mod error;
pub mod gateway;
pub mod stock;
pub mod trader;

// Re-export commonly used types
pub use chart::{
    ChartComposer, ChartRenderer, ChartType, ColumnBinding, ComposerConfig, Figure, HtmlRenderer,
    LineOptions, MarkerOptions, MemoryRenderer,
};
pub use dataset::{Column, DataTable};
pub use error::{ChartError, DatafeedError, StockError, TableError};
pub use gateway::YahooDatafeed;
pub use stock::Stock;
pub use trader::{
    create_datafeed, init_logger, BarData, BaseDatafeed, HistoryRequest, MemoryDatafeed,
    SETTINGS,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
