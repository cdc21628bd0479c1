//! Stock Chart - demo application
//!
//! Usage: `stock_chart_app <SYMBOL> [LOOKBACK_DAYS]`
//!
//! Fetches daily history, writes a candlestick chart with moving averages and
//! a two-row close/RSI chart with moving average crossover markers.

use std::error::Error;

use tracing::{error, info};

use stock_chart::chart::{
    ChartComposer, ChartType, ComposerConfig, HtmlRenderer, LineOptions, MarkerOptions, LATEST,
    RSI_THRESHOLD,
};
use stock_chart::dataset::{Column, DataTable, CLOSE};
use stock_chart::error::DatafeedError;
use stock_chart::stock::{rsi_column, sma_column};
use stock_chart::trader::init_logger;
use stock_chart::Stock;

const DEFAULT_LOOKBACK_DAYS: u64 = 365;
const FAST_PERIOD: usize = 10;
const SLOW_PERIOD: usize = 20;
const RSI_PERIOD: usize = 14;
const SIGNAL: &str = "Signal";

/// 1 where the fast average crosses above the slow one, -1 where it crosses below
fn crossover_signals(fast: &[f64], slow: &[f64]) -> Vec<i64> {
    let mut signals = vec![0; fast.len()];
    for i in 1..fast.len().min(slow.len()) {
        let before = fast[i - 1] - slow[i - 1];
        let now = fast[i] - slow[i];
        if before.is_nan() || now.is_nan() {
            continue;
        }
        if before <= 0.0 && now > 0.0 {
            signals[i] = 1;
        } else if before >= 0.0 && now < 0.0 {
            signals[i] = -1;
        }
    }
    signals
}

fn compose(symbol: &str, mut table: DataTable) -> Result<(), Box<dyn Error>> {
    let signals = crossover_signals(
        table.floats(&sma_column(FAST_PERIOD))?,
        table.floats(&sma_column(SLOW_PERIOD))?,
    );
    table.insert_column(SIGNAL, Column::Int(signals))?;

    let config = ComposerConfig {
        chart_type: ChartType::Line,
        show_legend: true,
        rows: 2,
        row_heights: Some(vec![0.7, 0.3]),
        title: Some(format!("{} close and RSI", symbol)),
        ..ComposerConfig::default()
    };
    let mut chart = ChartComposer::new(table, config)?;
    chart.add_column_line(&sma_column(FAST_PERIOD), 1, LineOptions::color("#FFAE42"))?;
    chart.add_column_line(&sma_column(SLOW_PERIOD), 1, LineOptions::color("green"))?;
    chart.add_column_line(&rsi_column(RSI_PERIOD), 2, LineOptions::color("blue"))?;
    chart.add_default_band(RSI_THRESHOLD, 2)?;
    chart.add_buy_sell_markers(SIGNAL, MarkerOptions::default())?;

    let mut renderer = HtmlRenderer::from_settings(format!("{}_composed", symbol));
    chart.show(&mut renderer)?;
    Ok(())
}

async fn run(symbol: &str, lookback_days: u64) -> Result<(), Box<dyn Error>> {
    let mut stock = Stock::from_settings();
    if !stock.init().await? {
        return Err(DatafeedError::NotConfigured.into());
    }
    stock.fetch(symbol, None, None, Some(lookback_days)).await?;

    stock.add_sma(FAST_PERIOD)?;
    stock.add_sma(SLOW_PERIOD)?;
    stock.add_rsi(RSI_PERIOD)?;
    stock.normalize(CLOSE)?;

    let mut renderer = HtmlRenderer::from_settings(symbol);
    stock.render(LATEST, true, &mut renderer)?;

    if let Some(table) = stock.table() {
        compose(symbol, table.clone())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logger();

    let mut args = std::env::args().skip(1);
    let Some(symbol) = args.next() else {
        eprintln!("usage: stock_chart_app <SYMBOL> [LOOKBACK_DAYS]");
        std::process::exit(2);
    };
    let lookback_days = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_LOOKBACK_DAYS,
        Some(Ok(days)) => days,
        Some(Err(e)) => {
            eprintln!("invalid LOOKBACK_DAYS: {}", e);
            std::process::exit(2);
        }
    };

    info!("Stock Chart v{} starting for {}", stock_chart::VERSION, symbol);
    if let Err(e) = run(&symbol, lookback_days).await {
        error!("{} failed: {}", symbol, e);
        std::process::exit(1);
    }
}
