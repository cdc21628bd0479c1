//! Figure model serialized as plotly.js `{data, layout}` JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use super::base::row_domains;

/// Kind of trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceType {
    Candlestick,
    Ohlc,
    Scatter,
}

/// Scatter drawing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
    Markers,
}

/// Area fill of a scatter trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    /// Fill down to y = 0
    ToZeroY,
    /// Fill to the previous trace
    ToNextY,
}

/// Marker glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    TriangleUp,
    TriangleDown,
}

/// Line style of a trace
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn dash(mut self, dash: impl Into<String>) -> Self {
        self.dash = Some(dash.into());
        self
    }
}

/// Marker style of a scatter trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: u32,
    pub symbol: MarkerSymbol,
}

/// Color of rising or falling candles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleStyle {
    pub line: Line,
}

/// One layer of the figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: TraceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increasing: Option<CandleStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decreasing: Option<CandleStyle>,
    pub showlegend: bool,
    pub xaxis: String,
    pub yaxis: String,
    /// 1-indexed row the trace is drawn in
    #[serde(skip)]
    pub row: usize,
}

impl Trace {
    fn empty(trace_type: TraceType, x: Vec<String>) -> Self {
        Self {
            trace_type,
            name: None,
            x,
            y: None,
            open: None,
            high: None,
            low: None,
            close: None,
            mode: None,
            fill: None,
            line: None,
            marker: None,
            increasing: None,
            decreasing: None,
            showlegend: true,
            xaxis: "x".to_string(),
            yaxis: "y".to_string(),
            row: 1,
        }
    }

    fn with_ohlc(
        trace_type: TraceType,
        x: Vec<String>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
    ) -> Self {
        Self {
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            ..Self::empty(trace_type, x)
        }
    }

    /// Candlestick trace
    pub fn candlestick(x: Vec<String>, open: Vec<f64>, high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Self {
        Self::with_ohlc(TraceType::Candlestick, x, open, high, low, close)
    }

    /// OHLC bar trace
    pub fn ohlc(x: Vec<String>, open: Vec<f64>, high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Self {
        Self::with_ohlc(TraceType::Ohlc, x, open, high, low, close)
    }

    /// Scatter trace drawn as a line
    pub fn scatter(x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            y: Some(y),
            mode: Some(Mode::Lines),
            ..Self::empty(TraceType::Scatter, x)
        }
    }

    /// Scatter trace drawn as markers
    pub fn markers(x: Vec<String>, y: Vec<f64>, marker: Marker) -> Self {
        Self {
            y: Some(y),
            mode: Some(Mode::Markers),
            marker: Some(marker),
            ..Self::empty(TraceType::Scatter, x)
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn show_legend(mut self, show: bool) -> Self {
        self.showlegend = show;
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Colors of rising and falling candles
    pub fn candle_colors(mut self, up: &str, down: &str) -> Self {
        self.increasing = Some(CandleStyle { line: Line::color(up) });
        self.decreasing = Some(CandleStyle { line: Line::color(down) });
        self
    }

    /// Number of points in the trace
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
    pub pad: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

/// Values hidden from a date axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBreak {
    pub values: Vec<String>,
}

/// A cartesian axis of one row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangeslider: Option<RangeSlider>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rangebreaks: Vec<RangeBreak>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    /// `xaxis`, `xaxis2`, `yaxis`, ... keyed by their layout names
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
}

/// Axis reference used by traces: `x`, `x2`, ...
fn axis_ref(prefix: &str, row: usize) -> String {
    if row == 1 {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, row)
    }
}

/// Axis key used by the layout: `xaxis`, `xaxis2`, ...
fn axis_key(prefix: &str, row: usize) -> String {
    if row == 1 {
        format!("{}axis", prefix)
    } else {
        format!("{}axis{}", prefix, row)
    }
}

/// Stacked rows sharing one time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    data: Vec<Trace>,
    layout: Layout,
    #[serde(skip)]
    rows: usize,
}

impl Figure {
    /// Create a figure with one row per height weight, top row first.
    pub fn with_rows(row_heights: &[f64]) -> Self {
        let rows = row_heights.len();
        let mut layout = Layout::default();

        for (ix, domain) in row_domains(row_heights).into_iter().enumerate() {
            let row = ix + 1;
            layout.axes.insert(
                axis_key("x", row),
                Axis {
                    domain: Some([0.0, 1.0]),
                    anchor: Some(axis_ref("y", row)),
                    matches: (row > 1).then(|| "x".to_string()),
                    showticklabels: Some(row == rows),
                    ..Axis::default()
                },
            );
            layout.axes.insert(
                axis_key("y", row),
                Axis {
                    domain: Some(domain),
                    anchor: Some(axis_ref("x", row)),
                    ..Axis::default()
                },
            );
        }

        Self {
            data: Vec::new(),
            layout,
            rows,
        }
    }

    /// Append a trace to a 1-indexed row. The row must exist.
    pub fn add_trace(&mut self, mut trace: Trace, row: usize) {
        debug_assert!(row >= 1 && row <= self.rows);
        trace.row = row;
        trace.xaxis = axis_ref("x", row);
        trace.yaxis = axis_ref("y", row);
        self.data.push(trace);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn traces(&self) -> &[Trace] {
        &self.data
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Traces drawn in a 1-indexed row
    pub fn traces_in_row(&self, row: usize) -> impl Iterator<Item = &Trace> {
        self.data.iter().filter(move |t| t.row == row)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Axis by layout name, e.g. `xaxis2`
    pub fn axis(&self, key: &str) -> Option<&Axis> {
        self.layout.axes.get(key)
    }

    /// Hide the given dates on every x axis
    pub fn set_rangebreaks(&mut self, values: Vec<String>) {
        for (key, axis) in self.layout.axes.iter_mut() {
            if key.starts_with("xaxis") {
                axis.rangebreaks = vec![RangeBreak {
                    values: values.clone(),
                }];
            }
        }
    }

    /// Show or hide the range slider under the first x axis
    pub fn set_rangeslider(&mut self, visible: bool) {
        if let Some(axis) = self.layout.axes.get_mut("xaxis") {
            axis.rangeslider = Some(RangeSlider { visible });
        }
    }

    /// Whether the range slider is visible
    pub fn rangeslider_visible(&self) -> bool {
        self.axis("xaxis")
            .and_then(|axis| axis.rangeslider.as_ref())
            .map(|slider| slider.visible)
            .unwrap_or(false)
    }

    /// Dates hidden from the time axis
    pub fn excluded_dates(&self) -> &[String] {
        self.axis("xaxis")
            .and_then(|axis| axis.rangebreaks.first())
            .map(|rb| rb.values.as_slice())
            .unwrap_or(&[])
    }

    /// Serialize to plotly.js JSON. NaN values become `null`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
