//! Yahoo Finance implementation of [`BaseDatafeed`].

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime};
use tracing::{debug, info};

use super::constants::{CHART_PATH, DAILY_INTERVAL, DATAFEED_NAME, REST_HOST};
use super::parser::parse_chart_response;
use super::rest_client::{timeout_or_default, RestResponse, YahooRestClient};
use crate::error::DatafeedError;
use crate::trader::datafeed::BaseDatafeed;
use crate::trader::object::{BarData, HistoryRequest};
use crate::trader::setting::SETTINGS;

/// Datafeed querying daily history from the Yahoo Finance chart API
#[derive(Debug, Clone)]
pub struct YahooDatafeed {
    rest_client: YahooRestClient,
}

impl YahooDatafeed {
    pub fn new(rest_client: YahooRestClient) -> Self {
        Self { rest_client }
    }

    /// Create a datafeed from the `datafeed.host` and `datafeed.timeout` settings
    pub fn from_settings() -> Result<Self, DatafeedError> {
        let host = SETTINGS
            .get_string("datafeed.host")
            .unwrap_or_else(|| REST_HOST.to_string());
        let timeout = timeout_or_default(SETTINGS.get_int("datafeed.timeout"));
        Ok(Self::new(YahooRestClient::new(&host, timeout)?))
    }
}

/// Seconds since epoch at UTC midnight of `date`
fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp()
}

/// Query parameters for an inclusive date range; `period2` is exclusive upstream.
fn build_params(req: &HistoryRequest) -> Vec<(&'static str, String)> {
    let end = req.end.checked_add_days(Days::new(1)).unwrap_or(req.end);
    vec![
        ("period1", midnight_timestamp(req.start).to_string()),
        ("period2", midnight_timestamp(end).to_string()),
        ("interval", DAILY_INTERVAL.to_string()),
        ("events", "history".to_string()),
    ]
}

/// Bars of a chart response that fall inside the requested range.
///
/// Unknown symbols come back as a failed status with a chart error body and
/// map to `NotFound`; any other failed status is an HTTP error.
fn bars_from_response(
    req: &HistoryRequest,
    symbol: &str,
    response: RestResponse,
) -> Result<Vec<BarData>, DatafeedError> {
    let parsed = parse_chart_response(symbol, &response.text);
    if !response.is_success() {
        return match parsed {
            Err(DatafeedError::NotFound(message)) => Err(DatafeedError::NotFound(message)),
            _ => Err(DatafeedError::Http {
                status: response.status,
                message: response.text,
            }),
        };
    }

    let bars: Vec<BarData> = parsed?
        .into_iter()
        .filter(|bar| req.contains(bar.date))
        .collect();
    if bars.is_empty() {
        return Err(DatafeedError::Empty(symbol.to_string()));
    }
    Ok(bars)
}

#[async_trait]
impl BaseDatafeed for YahooDatafeed {
    fn name(&self) -> &str {
        DATAFEED_NAME
    }

    async fn init(&self) -> Result<bool, DatafeedError> {
        info!("yahoo datafeed ready: {}", self.rest_client.host());
        Ok(true)
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>, DatafeedError> {
        let symbol = req.symbol.trim();
        if symbol.is_empty() {
            return Err(DatafeedError::NotFound(req.symbol.clone()));
        }

        let path = format!("{}{}", CHART_PATH, symbol);
        let response = self.rest_client.get(&path, &build_params(&req)).await?;

        let bars = bars_from_response(&req, symbol, response)?;
        debug!("yahoo returned {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}
