//! Multi-row interactive chart composition.
//!
//! A [`ChartComposer`] owns a price table and a [`Figure`]. Row 1 holds the
//! main price series, further rows hold indicator lines, reference lines and
//! bands. Layers are appended until [`ChartComposer::show`] hands the figure
//! to a renderer; after that the composer rejects further changes.
//!
//! ```ignore
//! let config = ComposerConfig {
//!     chart_type: "Line".parse()?,
//!     rows: 2,
//!     row_heights: Some(vec![3.0, 1.0]),
//!     ..ComposerConfig::default()
//! };
//! let mut chart = ChartComposer::new(table, config)?;
//! chart.add_column_line("RSI_14", 2, LineOptions::default())?;
//! chart.add_horizontal_band(RSI_THRESHOLD, 2, BAND_COLOR)?;
//! chart.show(&mut HtmlRenderer::from_settings("AAPL"))?;
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::base::{
    BAND_COLOR, BUY_COLOR, FIGURE_HEIGHT, FIGURE_WIDTH, HLINE_DASH, HLINE_WIDTH, LINE_COLOR,
    MARGIN, MARGIN_PAD, MARKER_SIZE, PAPER_BGCOLOR, SELL_COLOR,
};
use super::figure::{Figure, Fill, Line, Margin, Marker, MarkerSymbol, Title, Trace};
use super::rangebreak::{exclude_dates, format_date};
use super::render::ChartRenderer;
use crate::dataset::{DataTable, CLOSE, DATE, HIGH, LOW, OPEN};
use crate::error::ChartError;

/// Style of the main price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    #[default]
    Candlestick,
    Line,
    Ohlc,
    Area,
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Candlestick" => Ok(ChartType::Candlestick),
            "Line" => Ok(ChartType::Line),
            "OHLC" => Ok(ChartType::Ohlc),
            "Area" => Ok(ChartType::Area),
            other => Err(ChartError::UnknownChartType(other.to_string())),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Candlestick => write!(f, "Candlestick"),
            ChartType::Line => write!(f, "Line"),
            ChartType::Ohlc => write!(f, "OHLC"),
            ChartType::Area => write!(f, "Area"),
        }
    }
}

/// Names of the table columns the composer reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub time: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

impl Default for ColumnBinding {
    fn default() -> Self {
        Self {
            time: DATE.to_string(),
            open: OPEN.to_string(),
            high: HIGH.to_string(),
            low: LOW.to_string(),
            close: CLOSE.to_string(),
        }
    }
}

/// Construction options of a [`ChartComposer`]
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerConfig {
    pub columns: ColumnBinding,
    pub chart_type: ChartType,
    /// Legend entry for the main series
    pub show_legend: bool,
    pub range_slider: bool,
    pub rows: usize,
    /// Relative row heights, one per row; `None` means a single row of weight 1
    pub row_heights: Option<Vec<f64>>,
    pub title: Option<String>,
    /// Colors of rising and falling bars for candlestick and OHLC styles
    pub candle_colors: Option<(String, String)>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            chart_type: ChartType::Candlestick,
            show_legend: false,
            range_slider: true,
            rows: 1,
            row_heights: None,
            title: None,
            candle_colors: None,
        }
    }
}

impl ComposerConfig {
    /// Validated row heights
    fn resolve_row_heights(&self) -> Result<Vec<f64>, ChartError> {
        if self.rows == 0 {
            return Err(ChartError::NoRows);
        }
        let heights = self.row_heights.clone().unwrap_or_else(|| vec![1.0]);
        if heights.len() != self.rows {
            return Err(ChartError::RowHeights {
                rows: self.rows,
                heights: heights.len(),
            });
        }
        if let Some(&bad) = heights.iter().find(|h| !h.is_finite() || **h <= 0.0) {
            return Err(ChartError::InvalidRowHeight(bad));
        }
        Ok(heights)
    }
}

/// Style of an added line
#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub show_legend: bool,
    pub color: String,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            show_legend: true,
            color: LINE_COLOR.to_string(),
        }
    }
}

impl LineOptions {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }
}

/// Style of buy/sell markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub buy_color: String,
    pub sell_color: String,
    pub marker_size: u32,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            buy_color: BUY_COLOR.to_string(),
            sell_color: SELL_COLOR.to_string(),
            marker_size: MARKER_SIZE,
        }
    }
}

/// Incrementally built multi-row chart
#[derive(Debug, Clone)]
pub struct ChartComposer {
    table: DataTable,
    config: ComposerConfig,
    /// Formatted time axis shared by every row
    x: Vec<String>,
    figure: Figure,
    shown: bool,
}

impl ChartComposer {
    /// Create the row layout and add the main series to row 1
    pub fn new(table: DataTable, config: ComposerConfig) -> Result<Self, ChartError> {
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }
        let row_heights = config.resolve_row_heights()?;
        let x: Vec<String> = table
            .dates(&config.columns.time)?
            .iter()
            .map(|d| format_date(*d))
            .collect();

        let mut composer = Self {
            figure: Figure::with_rows(&row_heights),
            table,
            config,
            x,
            shown: false,
        };
        composer.main_plot()?;
        Ok(composer)
    }

    fn main_plot(&mut self) -> Result<(), ChartError> {
        let columns = &self.config.columns;
        let close = self.table.floats(&columns.close)?.to_vec();

        let trace = match self.config.chart_type {
            ChartType::Candlestick | ChartType::Ohlc => {
                let open = self.table.floats(&columns.open)?.to_vec();
                let high = self.table.floats(&columns.high)?.to_vec();
                let low = self.table.floats(&columns.low)?.to_vec();
                let trace = if self.config.chart_type == ChartType::Candlestick {
                    Trace::candlestick(self.x.clone(), open, high, low, close).name("Candlestick")
                } else {
                    Trace::ohlc(self.x.clone(), open, high, low, close).name("OHLC")
                };
                match &self.config.candle_colors {
                    Some((up, down)) => trace.candle_colors(up, down),
                    None => trace,
                }
            }
            ChartType::Line => Trace::scatter(self.x.clone(), close).name("Close"),
            ChartType::Area => Trace::scatter(self.x.clone(), close)
                .name("Close")
                .fill(Fill::ToZeroY),
        };

        self.figure
            .add_trace(trace.show_legend(self.config.show_legend), 1);
        Ok(())
    }

    fn check_open(&self) -> Result<(), ChartError> {
        if self.shown {
            return Err(ChartError::AlreadyShown);
        }
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<(), ChartError> {
        if row == 0 || row > self.figure.rows() {
            return Err(ChartError::RowOutOfRange {
                row,
                rows: self.figure.rows(),
            });
        }
        Ok(())
    }

    /// Constant series spanning the full time range
    fn constant(&self, value: f64) -> Vec<f64> {
        vec![value; self.x.len()]
    }

    /// Add a line of `series` against the time axis at a 1-indexed row
    pub fn add_line(
        &mut self,
        series: &[f64],
        name: &str,
        row: usize,
        options: LineOptions,
    ) -> Result<(), ChartError> {
        self.check_open()?;
        self.check_row(row)?;
        if series.len() != self.x.len() {
            return Err(ChartError::SeriesLength {
                name: name.to_string(),
                expected: self.x.len(),
                actual: series.len(),
            });
        }

        let trace = Trace::scatter(self.x.clone(), series.to_vec())
            .name(name)
            .line(Line::color(options.color))
            .show_legend(options.show_legend);
        self.figure.add_trace(trace, row);
        debug!("added line {} to row {}", name, row);
        Ok(())
    }

    /// Add a line of a float table column, named after the column
    pub fn add_column_line(
        &mut self,
        column: &str,
        row: usize,
        options: LineOptions,
    ) -> Result<(), ChartError> {
        let series = self.table.floats(column)?.to_vec();
        self.add_line(&series, column, row, options)
    }

    /// Add a dashed constant line at `value`
    pub fn add_horizontal_line(
        &mut self,
        value: f64,
        name: &str,
        row: usize,
        options: LineOptions,
    ) -> Result<(), ChartError> {
        self.check_open()?;
        self.check_row(row)?;

        let trace = Trace::scatter(self.x.clone(), self.constant(value))
            .name(name)
            .line(
                Line::color(options.color)
                    .width(HLINE_WIDTH)
                    .dash(HLINE_DASH),
            )
            .show_legend(options.show_legend);
        self.figure.add_trace(trace, row);
        Ok(())
    }

    /// Shade the area between `range.0` and `range.1`; never shown in the legend
    pub fn add_horizontal_band(
        &mut self,
        range: (f64, f64),
        row: usize,
        color: &str,
    ) -> Result<(), ChartError> {
        self.check_open()?;
        self.check_row(row)?;

        let (low, high) = range;
        let upper = Trace::scatter(self.x.clone(), self.constant(high))
            .line(Line::color(color).width(0.0))
            .show_legend(false);
        let lower = Trace::scatter(self.x.clone(), self.constant(low))
            .line(Line::color(color).width(0.0))
            .fill(Fill::ToNextY)
            .show_legend(false);

        self.figure.add_trace(upper, row);
        self.figure.add_trace(lower, row);
        Ok(())
    }

    /// Shade a band with the default color
    pub fn add_default_band(&mut self, range: (f64, f64), row: usize) -> Result<(), ChartError> {
        self.add_horizontal_band(range, row, BAND_COLOR)
    }

    /// Mark buy rows (signal 1) at their low and sell rows (signal -1) at their high
    pub fn add_buy_sell_markers(
        &mut self,
        signal_column: &str,
        options: MarkerOptions,
    ) -> Result<(), ChartError> {
        self.check_open()?;

        let columns = &self.config.columns;
        let signals = self.table.signals(signal_column)?;
        let low = self.table.floats(&columns.low)?;
        let high = self.table.floats(&columns.high)?;

        let mut buy_x = Vec::new();
        let mut buy_y = Vec::new();
        let mut sell_x = Vec::new();
        let mut sell_y = Vec::new();
        for (ix, signal) in signals.iter().enumerate() {
            match signal {
                Some(1) => {
                    buy_x.push(self.x[ix].clone());
                    buy_y.push(low[ix]);
                }
                Some(-1) => {
                    sell_x.push(self.x[ix].clone());
                    sell_y.push(high[ix]);
                }
                _ => {}
            }
        }

        let buy = Trace::markers(
            buy_x,
            buy_y,
            Marker {
                color: options.buy_color,
                size: options.marker_size,
                symbol: MarkerSymbol::TriangleUp,
            },
        )
        .name("buy");
        let sell = Trace::markers(
            sell_x,
            sell_y,
            Marker {
                color: options.sell_color,
                size: options.marker_size,
                symbol: MarkerSymbol::TriangleDown,
            },
        )
        .name("sell");

        self.figure.add_trace(buy, 1);
        self.figure.add_trace(sell, 1);
        Ok(())
    }

    /// Hide non-trading days, apply the fixed layout and render the figure once
    pub fn show(&mut self, renderer: &mut dyn ChartRenderer) -> Result<(), ChartError> {
        self.check_open()?;

        let exclude = exclude_dates(self.table.dates(&self.config.columns.time)?);
        debug!("hiding {} non-trading days", exclude.len());

        let mut figure = self.figure.clone();
        let layout = figure.layout_mut();
        layout.title = self.config.title.clone().map(|text| Title { text });
        layout.autosize = Some(true);
        layout.width = Some(FIGURE_WIDTH);
        layout.height = Some(FIGURE_HEIGHT);
        layout.margin = Some(Margin {
            l: MARGIN,
            r: MARGIN,
            b: MARGIN,
            t: MARGIN,
            pad: MARGIN_PAD,
        });
        layout.paper_bgcolor = Some(PAPER_BGCOLOR.to_string());
        figure.set_rangeslider(self.config.range_slider);
        figure.set_rangebreaks(exclude);

        renderer.render(&figure)?;

        self.figure = figure;
        self.shown = true;
        Ok(())
    }

    /// The figure built so far
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn rows(&self) -> usize {
        self.figure.rows()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figure::{Mode, TraceType};
    use crate::chart::render::MemoryRenderer;
    use crate::dataset::Column;
    use crate::trader::object::BarData;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Five trading days Thu 2024-01-04 .. Wed 2024-01-10 with a weekend inside
    fn table() -> DataTable {
        let days = [
            date(2024, 1, 4),
            date(2024, 1, 5),
            date(2024, 1, 8),
            date(2024, 1, 9),
            date(2024, 1, 10),
        ];
        let bars: Vec<BarData> = days
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let base = 100.0 + i as f64;
                BarData::new("TEST", *d, base, base + 2.0, base - 2.0, base + 1.0, 1000.0)
            })
            .collect();
        DataTable::from_bars(&bars)
    }

    fn config(chart_type: ChartType, rows: usize, heights: Option<Vec<f64>>) -> ComposerConfig {
        ComposerConfig {
            chart_type,
            rows,
            row_heights: heights,
            ..ComposerConfig::default()
        }
    }

    #[test]
    fn test_chart_type_from_str() {
        assert_eq!("Candlestick".parse::<ChartType>().unwrap(), ChartType::Candlestick);
        assert_eq!("OHLC".parse::<ChartType>().unwrap(), ChartType::Ohlc);
        assert_eq!("Area".parse::<ChartType>().unwrap(), ChartType::Area);
        assert!(matches!(
            "Bar".parse::<ChartType>(),
            Err(ChartError::UnknownChartType(name)) if name == "Bar"
        ));
        assert_eq!(ChartType::Ohlc.to_string(), "OHLC");
    }

    #[test]
    fn test_main_trace_per_style() {
        let chart = ChartComposer::new(table(), config(ChartType::Candlestick, 1, None)).unwrap();
        let main = &chart.figure().traces()[0];
        assert_eq!(main.trace_type, TraceType::Candlestick);
        assert_eq!(main.name.as_deref(), Some("Candlestick"));
        assert!(main.open.is_some() && main.close.is_some());
        assert!(!main.showlegend);

        let mut cfg = config(ChartType::Ohlc, 1, None);
        cfg.candle_colors = Some(("green".to_string(), "red".to_string()));
        let chart = ChartComposer::new(table(), cfg).unwrap();
        let main = &chart.figure().traces()[0];
        assert_eq!(main.trace_type, TraceType::Ohlc);
        assert_eq!(main.increasing.as_ref().unwrap().line.color.as_deref(), Some("green"));

        let chart = ChartComposer::new(table(), config(ChartType::Line, 1, None)).unwrap();
        let main = &chart.figure().traces()[0];
        assert_eq!(main.trace_type, TraceType::Scatter);
        assert_eq!(main.y.as_ref().unwrap()[0], 101.0);
        assert!(main.fill.is_none());
        assert!(main.open.is_none());

        let chart = ChartComposer::new(table(), config(ChartType::Area, 1, None)).unwrap();
        assert_eq!(chart.figure().traces()[0].fill, Some(Fill::ToZeroY));
    }

    #[test]
    fn test_row_configuration_errors() {
        assert!(matches!(
            ChartComposer::new(table(), config(ChartType::Line, 2, None)),
            Err(ChartError::RowHeights { rows: 2, heights: 1 })
        ));
        assert!(matches!(
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![1.0, 1.0, 1.0]))),
            Err(ChartError::RowHeights { rows: 2, heights: 3 })
        ));
        assert!(matches!(
            ChartComposer::new(table(), config(ChartType::Line, 0, Some(vec![]))),
            Err(ChartError::NoRows)
        ));
        assert!(matches!(
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![1.0, 0.0]))),
            Err(ChartError::InvalidRowHeight(_))
        ));
        assert!(matches!(
            ChartComposer::new(DataTable::new(), ComposerConfig::default()),
            Err(ChartError::EmptyTable)
        ));
    }

    #[test]
    fn test_missing_bound_column() {
        let mut cfg = ComposerConfig::default();
        cfg.columns.close = "Adj Close".to_string();
        assert!(matches!(
            ChartComposer::new(table(), cfg),
            Err(ChartError::Table(_))
        ));
    }

    #[test]
    fn test_add_line_validation() {
        let mut chart =
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![3.0, 1.0]))).unwrap();

        assert!(matches!(
            chart.add_line(&[1.0; 5], "ind", 3, LineOptions::default()),
            Err(ChartError::RowOutOfRange { row: 3, rows: 2 })
        ));
        assert!(matches!(
            chart.add_line(&[1.0; 5], "ind", 0, LineOptions::default()),
            Err(ChartError::RowOutOfRange { row: 0, .. })
        ));
        assert!(matches!(
            chart.add_line(&[1.0; 4], "ind", 2, LineOptions::default()),
            Err(ChartError::SeriesLength { expected: 5, actual: 4, .. })
        ));
        assert_eq!(chart.figure().trace_count(), 1);

        chart
            .add_line(&[1.0; 5], "ind", 2, LineOptions::color("purple"))
            .unwrap();
        let line = &chart.figure().traces()[1];
        assert_eq!(line.row, 2);
        assert_eq!(line.line.as_ref().unwrap().color.as_deref(), Some("purple"));
        assert!(line.showlegend);
    }

    #[test]
    fn test_add_column_line() {
        let mut t = table();
        t.insert_column("Signal", Column::Float(vec![0.5; 5])).unwrap();
        let mut chart = ChartComposer::new(t, ComposerConfig::default()).unwrap();

        chart.add_column_line("Signal", 1, LineOptions::default()).unwrap();
        assert_eq!(chart.figure().traces()[1].name.as_deref(), Some("Signal"));
        assert!(matches!(
            chart.add_column_line("Missing", 1, LineOptions::default()),
            Err(ChartError::Table(_))
        ));
    }

    #[test]
    fn test_horizontal_line_and_band() {
        let mut chart =
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![3.0, 1.0]))).unwrap();

        chart
            .add_horizontal_line(50.0, "mid", 2, LineOptions::default())
            .unwrap();
        chart.add_horizontal_band((20.0, 80.0), 2, "red").unwrap();

        let traces = chart.figure().traces();
        assert_eq!(traces.len(), 4);

        let hline = &traces[1];
        assert_eq!(hline.y.as_ref().unwrap(), &vec![50.0; 5]);
        let style = hline.line.as_ref().unwrap();
        assert_eq!(style.dash.as_deref(), Some("dash"));
        assert_eq!(style.width, Some(0.7));
        assert_eq!(style.color.as_deref(), Some("black"));

        let (upper, lower) = (&traces[2], &traces[3]);
        assert_eq!(upper.y.as_ref().unwrap()[0], 80.0);
        assert_eq!(lower.y.as_ref().unwrap()[0], 20.0);
        assert_eq!(upper.fill, None);
        assert_eq!(lower.fill, Some(Fill::ToNextY));
        assert!(!upper.showlegend && !lower.showlegend);
        assert_eq!(lower.line.as_ref().unwrap().width, Some(0.0));
    }

    #[test]
    fn test_horizontal_layers_check_row() {
        let mut chart =
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![3.0, 1.0]))).unwrap();

        assert!(matches!(
            chart.add_horizontal_line(50.0, "mid", 3, LineOptions::default()),
            Err(ChartError::RowOutOfRange { row: 3, rows: 2 })
        ));
        assert!(matches!(
            chart.add_horizontal_line(50.0, "mid", 0, LineOptions::default()),
            Err(ChartError::RowOutOfRange { row: 0, rows: 2 })
        ));
        assert!(matches!(
            chart.add_horizontal_band((20.0, 80.0), 3, "red"),
            Err(ChartError::RowOutOfRange { row: 3, rows: 2 })
        ));
        assert!(matches!(
            chart.add_default_band((20.0, 80.0), 0),
            Err(ChartError::RowOutOfRange { row: 0, rows: 2 })
        ));
        assert_eq!(chart.figure().trace_count(), 1);
    }

    #[test]
    fn test_buy_sell_markers() {
        let mut t = table();
        t.insert_column("Signal", Column::Int(vec![1, 0, -1, 0, 1])).unwrap();
        let mut chart = ChartComposer::new(t, ComposerConfig::default()).unwrap();

        chart
            .add_buy_sell_markers("Signal", MarkerOptions::default())
            .unwrap();

        let traces = chart.figure().traces();
        let (buy, sell) = (&traces[1], &traces[2]);

        assert_eq!(buy.name.as_deref(), Some("buy"));
        assert_eq!(buy.mode, Some(Mode::Markers));
        assert_eq!(buy.x, vec!["2024-01-04", "2024-01-10"]);
        // Lows of rows 0 and 4
        assert_eq!(buy.y.as_ref().unwrap(), &vec![98.0, 102.0]);
        let marker = buy.marker.as_ref().unwrap();
        assert_eq!(marker.symbol, MarkerSymbol::TriangleUp);
        assert_eq!(marker.color, "yellow");
        assert_eq!(marker.size, 10);

        assert_eq!(sell.name.as_deref(), Some("sell"));
        assert_eq!(sell.x, vec!["2024-01-08"]);
        // High of row 2
        assert_eq!(sell.y.as_ref().unwrap(), &vec![104.0]);
        assert_eq!(sell.marker.as_ref().unwrap().symbol, MarkerSymbol::TriangleDown);
        assert_eq!(sell.marker.as_ref().unwrap().color, "blue");
    }

    #[test]
    fn test_markers_ignore_absent_signals() {
        let mut t = table();
        t.insert_column("Signal", Column::Float(vec![f64::NAN, 2.0, -1.0, 0.5, 1.0]))
            .unwrap();
        let mut chart = ChartComposer::new(t, ComposerConfig::default()).unwrap();
        chart
            .add_buy_sell_markers("Signal", MarkerOptions::default())
            .unwrap();

        let traces = chart.figure().traces();
        assert_eq!(traces[1].len(), 1);
        assert_eq!(traces[2].len(), 1);
    }

    #[test]
    fn test_show_two_rows_end_to_end() {
        let mut chart =
            ChartComposer::new(table(), config(ChartType::Line, 2, Some(vec![3.0, 1.0]))).unwrap();
        chart
            .add_line(&[30.0, 40.0, 50.0, 60.0, 70.0], "RSI", 2, LineOptions::default())
            .unwrap();

        let mut renderer = MemoryRenderer::new();
        chart.show(&mut renderer).unwrap();

        let figure = renderer.last().unwrap();
        assert_eq!(figure.rows(), 2);
        assert_eq!(figure.trace_count(), 2);
        assert!(figure.rangeslider_visible());
        assert_eq!(figure.excluded_dates(), &["2024-01-06", "2024-01-07"]);
        assert_eq!(
            figure.axis("xaxis2").unwrap().rangebreaks[0].values,
            vec!["2024-01-06", "2024-01-07"]
        );

        let layout = figure.layout();
        assert_eq!(layout.width, Some(700));
        assert_eq!(layout.height, Some(700));
        assert_eq!(layout.paper_bgcolor.as_deref(), Some("LightSteelBlue"));
        assert_eq!(layout.margin.as_ref().unwrap().pad, 4);
        assert_eq!(chart.figure(), figure);
        assert!(chart.is_shown());
    }

    #[test]
    fn test_range_slider_hidden() {
        let mut cfg = config(ChartType::Candlestick, 1, None);
        cfg.range_slider = false;
        cfg.title = Some("AAPL".to_string());
        let mut chart = ChartComposer::new(table(), cfg).unwrap();

        let mut renderer = MemoryRenderer::new();
        chart.show(&mut renderer).unwrap();

        let figure = renderer.last().unwrap();
        assert!(!figure.rangeslider_visible());
        assert_eq!(figure.layout().title.as_ref().unwrap().text, "AAPL");
    }

    #[test]
    fn test_changes_after_show_are_rejected() {
        let mut t = table();
        t.insert_column("Signal", Column::Int(vec![1, 0, -1, 0, 1])).unwrap();
        let mut chart = ChartComposer::new(t, ComposerConfig::default()).unwrap();
        let mut renderer = MemoryRenderer::new();
        chart.show(&mut renderer).unwrap();

        assert!(matches!(
            chart.add_line(&[1.0; 5], "late", 1, LineOptions::default()),
            Err(ChartError::AlreadyShown)
        ));
        assert!(matches!(
            chart.add_horizontal_band((1.0, 2.0), 1, "red"),
            Err(ChartError::AlreadyShown)
        ));
        assert!(matches!(
            chart.add_horizontal_line(1.0, "late", 1, LineOptions::default()),
            Err(ChartError::AlreadyShown)
        ));
        assert!(matches!(
            chart.add_buy_sell_markers("Signal", MarkerOptions::default()),
            Err(ChartError::AlreadyShown)
        ));
        assert!(matches!(chart.show(&mut renderer), Err(ChartError::AlreadyShown)));
        assert_eq!(renderer.figures.len(), 1);
        assert_eq!(chart.figure().trace_count(), 1);
    }
}
