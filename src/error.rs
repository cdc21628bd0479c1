//! Error types for tables, charts, datafeeds and the stock fetcher.

use thiserror::Error;

/// Errors raised by typed column access on a [`crate::dataset::DataTable`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column {name} is a {actual} column, expected {expected}")]
    ColumnType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("column {name} has {actual} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors raised while composing or rendering a chart.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("unknown chart type: {0} (expected Candlestick, Line, OHLC or Area)")]
    UnknownChartType(String),

    #[error("chart needs at least one row")]
    NoRows,

    #[error("{heights} row heights given for {rows} rows")]
    RowHeights { rows: usize, heights: usize },

    #[error("row height {0} must be a positive number")]
    InvalidRowHeight(f64),

    #[error("row {row} is out of range (chart has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("series {name} has {actual} values, table has {expected} rows")]
    SeriesLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("cannot chart an empty table")]
    EmptyTable,

    #[error("{periods} moving averages configured but only {colors} colors available")]
    TooManyAverages { periods: usize, colors: usize },

    #[error("chart has already been shown")]
    AlreadyShown,

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to serialize figure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by market data providers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatafeedError {
    #[error("no datafeed configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("symbol not found: {0}")]
    NotFound(String),

    #[error("no data returned for {0}")]
    Empty(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors raised by [`crate::stock::Stock`].
#[derive(Error, Debug)]
pub enum StockError {
    #[error("no price history loaded, call fetch first")]
    NotLoaded,

    #[error("indicator period must be positive, got {0}")]
    InvalidPeriod(usize),

    #[error("cannot normalize {column}: first value is {value}")]
    InvalidBase { column: String, value: f64 },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}
