//! Price history fetcher and static candlestick plotter.

use chrono::{Days, Local, NaiveDate};
use tracing::{info, warn};

use crate::chart::{
    ChartComposer, ChartRenderer, ChartType, ComposerConfig, LineOptions, DOWN_COLOR,
    MA_COLOR_LIST, UP_COLOR,
};
use crate::dataset::{Column, DataTable, CLOSE};
use crate::error::{ChartError, DatafeedError, StockError};
use crate::trader::datafeed::{create_datafeed, BaseDatafeed};
use crate::trader::object::HistoryRequest;
use crate::trader::utility::{rsi_array, sma_array};

/// Name of the moving average column for a period
pub fn sma_column(period: usize) -> String {
    format!("SMA_{}", period)
}

/// Name of the RSI column for a period
pub fn rsi_column(period: usize) -> String {
    format!("RSI_{}", period)
}

/// Name of the normalized copy of a column
pub fn norm_column(column: &str) -> String {
    format!("Norm_{}", column)
}

/// Resolve the inclusive date range of a fetch.
///
/// A lookback replaces any explicit bounds with `[today - lookback, today]`.
pub fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    lookback_days: Option<u64>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    if let Some(days) = lookback_days {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        return (start, today);
    }
    // NaiveDate::default() is 1970-01-01
    (start.unwrap_or_default(), end.unwrap_or(today))
}

/// Price history of one symbol with derived columns.
///
/// Operations other than `fetch` need a successfully fetched history.
pub struct Stock {
    datafeed: Box<dyn BaseDatafeed>,
    ticker: String,
    table: Option<DataTable>,
    n: usize,
    /// Moving average periods drawn by `render`, in insertion order
    sma_list: Vec<usize>,
}

impl Stock {
    pub fn new(datafeed: Box<dyn BaseDatafeed>) -> Self {
        Self {
            datafeed,
            ticker: String::new(),
            table: None,
            n: 0,
            sma_list: Vec::new(),
        }
    }

    /// Use the datafeed selected in the settings
    pub fn from_settings() -> Self {
        Self::new(create_datafeed())
    }

    /// Initialize the datafeed; `Ok(false)` when it cannot serve data
    pub async fn init(&self) -> Result<bool, DatafeedError> {
        self.datafeed.init().await
    }

    /// Fetch daily history of `symbol` and return the number of rows.
    ///
    /// On failure the reason is logged and returned, and any previously
    /// fetched history stays in place.
    pub async fn fetch(
        &mut self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        lookback_days: Option<u64>,
    ) -> Result<usize, DatafeedError> {
        let today = Local::now().date_naive();
        let (start, end) = resolve_range(start, end, lookback_days, today);
        let req = HistoryRequest::new(symbol, start, end);

        let bars = match self.datafeed.query_bar_history(req).await {
            Ok(bars) if !bars.is_empty() => bars,
            Ok(_) => {
                warn!("No stock is found: {} returned no data", symbol);
                return Err(DatafeedError::Empty(symbol.to_string()));
            }
            Err(e) => {
                warn!("No stock is found: {} ({}, datafeed {})", symbol, e, self.datafeed.name());
                return Err(e);
            }
        };

        let table = DataTable::from_bars(&bars);
        self.n = table.len();
        self.table = Some(table);
        self.ticker = symbol.to_string();
        self.sma_list.clear();

        info!("fetched {} trading days of {} ({} to {})", self.n, symbol, start, end);
        Ok(self.n)
    }

    fn table_mut(&mut self) -> Result<&mut DataTable, StockError> {
        self.table.as_mut().ok_or(StockError::NotLoaded)
    }

    /// Append `Norm_<column>`: the column divided by its first value
    pub fn normalize(&mut self, column: &str) -> Result<&DataTable, StockError> {
        let table = self.table_mut()?;
        let values = table.floats(column)?;

        let base = values.first().copied().unwrap_or(f64::NAN);
        if !base.is_finite() || base == 0.0 {
            return Err(StockError::InvalidBase {
                column: column.to_string(),
                value: base,
            });
        }

        let normalized: Vec<f64> = values.iter().map(|v| v / base).collect();
        table.insert_column(norm_column(column), Column::Float(normalized))?;
        Ok(table)
    }

    /// Append `SMA_<period>` of the close and draw it in `render`
    pub fn add_sma(&mut self, period: usize) -> Result<&DataTable, StockError> {
        if period == 0 {
            return Err(StockError::InvalidPeriod(period));
        }
        let table = self.table.as_mut().ok_or(StockError::NotLoaded)?;

        let sma = sma_array(table.floats(CLOSE)?, period)
            .map_err(|_| StockError::InvalidPeriod(period))?;
        table.insert_column(sma_column(period), Column::Float(sma))?;

        if !self.sma_list.contains(&period) {
            self.sma_list.push(period);
        }
        Ok(table)
    }

    /// Append `RSI_<period>` of the close
    pub fn add_rsi(&mut self, period: usize) -> Result<&DataTable, StockError> {
        if period == 0 {
            return Err(StockError::InvalidPeriod(period));
        }
        let table = self.table_mut()?;

        let rsi = rsi_array(table.floats(CLOSE)?, period)
            .map_err(|_| StockError::InvalidPeriod(period))?;
        table.insert_column(rsi_column(period), Column::Float(rsi))?;
        Ok(table)
    }

    /// Draw a candlestick chart of the last `lookback` rows.
    ///
    /// With `show_moving_averages`, every period added with `add_sma` is
    /// overlaid using `MA_COLOR_LIST`; more periods than colors is an error.
    /// A `lookback` of 0 selects no rows and fails with `ChartError::EmptyTable`.
    pub fn render(
        &self,
        lookback: usize,
        show_moving_averages: bool,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<(), StockError> {
        let table = self.table.as_ref().ok_or(StockError::NotLoaded)?;

        if show_moving_averages && self.sma_list.len() > MA_COLOR_LIST.len() {
            return Err(ChartError::TooManyAverages {
                periods: self.sma_list.len(),
                colors: MA_COLOR_LIST.len(),
            }
            .into());
        }

        let config = ComposerConfig {
            chart_type: ChartType::Candlestick,
            show_legend: false,
            range_slider: false,
            title: Some(self.ticker.clone()),
            candle_colors: Some((UP_COLOR.to_string(), DOWN_COLOR.to_string())),
            ..ComposerConfig::default()
        };
        let mut chart = ChartComposer::new(table.tail(lookback), config)?;

        if show_moving_averages {
            for (period, color) in self.sma_list.iter().zip(MA_COLOR_LIST) {
                chart.add_column_line(&sma_column(*period), 1, LineOptions::color(color))?;
            }
        }

        chart.show(renderer)?;
        Ok(())
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of fetched trading days
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    pub fn sma_periods(&self) -> &[usize] {
        &self.sma_list
    }
}
