//! Basic data structures exchanged with market data providers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily price bar of a single symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub symbol: String,
    pub date: NaiveDate,

    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl BarData {
    /// Create a new BarData
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }
}

/// Request sending to a datafeed for querying daily history data.
///
/// Both `start` and `end` are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryRequest {
    /// Create a new daily HistoryRequest
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }

    /// Check whether a date falls inside the requested range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
