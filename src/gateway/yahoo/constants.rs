//! Yahoo Finance API constants.

/// Default REST host
pub const REST_HOST: &str = "https://query1.finance.yahoo.com";

/// Chart endpoint, followed by the symbol
pub const CHART_PATH: &str = "/v8/finance/chart/";

/// The chart endpoint rejects requests without a browser-like agent
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Bar interval of the chart request
pub const DAILY_INTERVAL: &str = "1d";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Datafeed name used in logs and settings
pub const DATAFEED_NAME: &str = "yahoo";
