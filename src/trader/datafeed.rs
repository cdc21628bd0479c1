//! Datafeed module for connecting to different data sources.

use std::collections::HashMap;

use async_trait::async_trait;

use super::object::{BarData, HistoryRequest};
use super::setting::SETTINGS;
use crate::error::DatafeedError;
use crate::gateway::yahoo::YahooDatafeed;

/// Abstract datafeed trait for connecting to different data sources
#[async_trait]
pub trait BaseDatafeed: Send + Sync {
    /// Name of the datafeed, used in log messages
    fn name(&self) -> &str;

    /// Initialize datafeed service connection
    async fn init(&self) -> Result<bool, DatafeedError> {
        Ok(false)
    }

    /// Query history bar data, ordered by date
    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>, DatafeedError>;
}

/// Empty datafeed implementation for when no datafeed is configured
#[derive(Debug, Default)]
pub struct EmptyDatafeed;

impl EmptyDatafeed {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BaseDatafeed for EmptyDatafeed {
    fn name(&self) -> &str {
        "empty"
    }

    async fn init(&self) -> Result<bool, DatafeedError> {
        tracing::warn!("no datafeed configured, set datafeed.name in the settings file");
        Ok(false)
    }

    async fn query_bar_history(&self, _req: HistoryRequest) -> Result<Vec<BarData>, DatafeedError> {
        Err(DatafeedError::NotConfigured)
    }
}

/// In-memory datafeed serving bars registered per symbol.
#[derive(Debug, Default)]
pub struct MemoryDatafeed {
    bars: HashMap<String, Vec<BarData>>,
}

impl MemoryDatafeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register history for a symbol, replacing any previous bars
    pub fn insert_bars(&mut self, symbol: impl Into<String>, bars: Vec<BarData>) {
        self.bars.insert(symbol.into(), bars);
    }
}

#[async_trait]
impl BaseDatafeed for MemoryDatafeed {
    fn name(&self) -> &str {
        "memory"
    }

    async fn init(&self) -> Result<bool, DatafeedError> {
        Ok(true)
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>, DatafeedError> {
        let bars = self
            .bars
            .get(&req.symbol)
            .ok_or_else(|| DatafeedError::NotFound(req.symbol.clone()))?;

        let mut selected: Vec<BarData> = bars
            .iter()
            .filter(|bar| req.contains(bar.date))
            .cloned()
            .collect();
        selected.sort_by_key(|bar| bar.date);

        if selected.is_empty() {
            return Err(DatafeedError::Empty(req.symbol));
        }
        Ok(selected)
    }
}

/// Get the configured datafeed name
pub fn get_datafeed_name() -> String {
    SETTINGS.get_string("datafeed.name").unwrap_or_default()
}

/// Create the datafeed selected by the `datafeed.name` setting
pub fn create_datafeed() -> Box<dyn BaseDatafeed> {
    let name = get_datafeed_name();
    match name.as_str() {
        "yahoo" => match YahooDatafeed::from_settings() {
            Ok(datafeed) => Box::new(datafeed),
            Err(e) => {
                tracing::warn!("failed to create yahoo datafeed: {}", e);
                Box::new(EmptyDatafeed::new())
            }
        },
        _ => {
            tracing::warn!("unknown datafeed {:?}, falling back to empty datafeed", name);
            Box::new(EmptyDatafeed::new())
        }
    }
}
