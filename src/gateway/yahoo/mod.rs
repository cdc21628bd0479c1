//! Yahoo Finance datafeed.
//!
//! Daily OHLCV history is read from the public v8 chart endpoint:
//!
//! ```ignore
//! use stock_chart::gateway::yahoo::YahooDatafeed;
//! use stock_chart::trader::{BaseDatafeed, HistoryRequest};
//!
//! let datafeed = YahooDatafeed::from_settings()?;
//! let bars = datafeed.query_bar_history(HistoryRequest::new("AAPL", start, end)).await?;
//! ```

pub mod constants;
mod datafeed;
mod parser;
mod rest_client;

pub use datafeed::YahooDatafeed;
pub use parser::parse_chart_response;
pub use rest_client::YahooRestClient;
