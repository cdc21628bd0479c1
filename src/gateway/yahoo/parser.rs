//! Parsing of the Yahoo Finance chart response.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::error::DatafeedError;
use crate::trader::object::BarData;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChartErrorBody {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Convert a bar timestamp to the exchange-local trading date
fn to_local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}

fn value_at(values: &[Option<f64>], ix: usize) -> Option<f64> {
    values.get(ix).copied().flatten().filter(|v| v.is_finite())
}

/// Parse a chart API body into daily bars ordered by date.
///
/// Rows with a missing open, high, low or close are skipped; a missing volume
/// counts as zero.
pub fn parse_chart_response(symbol: &str, text: &str) -> Result<Vec<BarData>, DatafeedError> {
    let response: ChartResponse =
        serde_json::from_str(text).map_err(|e| DatafeedError::Parse(e.to_string()))?;

    if let Some(error) = response.chart.error {
        let description = error.description.unwrap_or(error.code);
        return Err(DatafeedError::NotFound(format!("{}: {}", symbol, description)));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DatafeedError::Empty(symbol.to_string()))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let gmtoffset = result.meta.gmtoffset;

    let mut bars: Vec<BarData> = Vec::with_capacity(result.timestamp.len());
    for (ix, &timestamp) in result.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, ix),
            value_at(&quote.high, ix),
            value_at(&quote.low, ix),
            value_at(&quote.close, ix),
        ) else {
            continue;
        };
        let Some(date) = to_local_date(timestamp, gmtoffset) else {
            continue;
        };
        let volume = value_at(&quote.volume, ix).unwrap_or(0.0);

        bars.push(BarData::new(symbol, date, open, high, low, close, volume));
    }

    // Stable sort, then keep the last bar of a repeated date
    bars.sort_by_key(|bar| bar.date);
    bars.reverse();
    bars.dedup_by_key(|bar| bar.date);
    bars.reverse();

    if bars.is_empty() {
        return Err(DatafeedError::Empty(symbol.to_string()));
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"currency": "USD", "symbol": "AAPL", "gmtoffset": -18000},
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{
                        "open": [187.15, null, 182.15],
                        "high": [188.44, 185.88, 183.09],
                        "low": [183.89, 183.43, 180.88],
                        "close": [185.64, 184.25, 181.91],
                        "volume": [82488700, 58414500, null]
                    }],
                    "adjclose": [{"adjclose": [184.9, 183.5, 181.2]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response() {
        let bars = parse_chart_response("AAPL", SAMPLE).unwrap();

        // The second row has no open price
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].open_price, 187.15);
        assert_eq!(bars[0].volume, 82488700.0);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 4).unwrap());
        assert_eq!(bars[1].volume, 0.0);
        assert_eq!(bars[1].symbol, "AAPL");
    }

    #[test]
    fn test_repeated_date_keeps_last_bar() {
        // Two timestamps of the same session, e.g. a live quote after the daily bar
        let body = r#"{"chart":{"result":[{
            "meta":{"gmtoffset":-18000},
            "timestamp":[1704205800,1704292200,1704315600],
            "indicators":{"quote":[{
                "open":[187.15,184.22,184.30],"high":[188.44,185.88,186.00],
                "low":[183.89,183.43,183.40],"close":[185.64,184.25,185.10],
                "volume":[1,2,3]}]}}],"error":null}}"#;
        let bars = parse_chart_response("AAPL", body).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(bars[1].close_price, 185.10);
        assert_eq!(bars[1].volume, 3.0);
    }

    #[test]
    fn test_parse_chart_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("NOPE", body).unwrap_err();
        assert_eq!(
            err,
            DatafeedError::NotFound("NOPE: No data found, symbol may be delisted".to_string())
        );
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert_eq!(
            parse_chart_response("AAPL", body),
            Err(DatafeedError::Empty("AAPL".to_string()))
        );

        assert!(matches!(
            parse_chart_response("AAPL", "<html>"),
            Err(DatafeedError::Parse(_))
        ));
    }

    #[test]
    fn test_local_date_uses_offset() {
        // 2024-01-02 03:00 UTC is still 2024-01-01 in New York
        let date = to_local_date(1704164400, -18000).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
