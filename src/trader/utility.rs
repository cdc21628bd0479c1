//! General utility functions.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

// Technical Analysis imports from ta crate
use ta::errors::TaError;
use ta::indicators::{RelativeStrengthIndex, SimpleMovingAverage};
use ta::Next;

/// Name of the folder holding settings, logs and rendered charts
const TEMP_NAME: &str = ".stockchart";

/// Get temp directory, preferring the working directory over home
fn get_temp_dir(temp_name: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    // If the temp folder exists in current working directory, use it
    if temp_path.exists() {
        return temp_path;
    }

    // Otherwise use home path
    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);

    if !temp_path.exists() {
        let _ = fs::create_dir_all(&temp_path);
    }

    temp_path
}

/// Temp directory
pub static TEMP_DIR: LazyLock<PathBuf> = LazyLock::new(|| get_temp_dir(TEMP_NAME));

/// Get path for temp file with filename
pub fn get_file_path(filename: &str) -> PathBuf {
    TEMP_DIR.join(filename)
}

/// Get path for temp folder with folder name
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = TEMP_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

// ==================== Indicators ====================

/// Simple Moving Average over `values`.
///
/// Rows before the first full window are NaN.
pub fn sma_array(values: &[f64], n: usize) -> Result<Vec<f64>, TaError> {
    let mut indicator = SimpleMovingAverage::new(n)?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let value = indicator.next(v);
            if i + 1 < n {
                f64::NAN
            } else {
                value
            }
        })
        .collect())
}

/// Relative Strength Index over `values`.
///
/// The first `n` rows are NaN, the indicator needs `n` price changes.
/// Gains and losses are smoothed with an EMA of period `n`
/// (alpha = 2 / (n + 1)), not Wilder's alpha = 1 / n, so values differ from
/// Wilder-smoothed RSI.
pub fn rsi_array(values: &[f64], n: usize) -> Result<Vec<f64>, TaError> {
    let mut indicator = RelativeStrengthIndex::new(n)?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let value = indicator.next(v);
            if i < n {
                f64::NAN
            } else {
                value
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_array_window() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sma = sma_array(&closes, 3).unwrap();

        assert_eq!(sma.len(), closes.len());
        assert!(sma[0].is_nan());
        assert!(sma[1].is_nan());
        for i in 2..closes.len() {
            let expected = closes[i - 2..=i].iter().sum::<f64>() / 3.0;
            assert!((sma[i] - expected).abs() < 1e-9, "row {}", i);
        }
    }

    #[test]
    fn test_sma_array_zero_period() {
        assert!(sma_array(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_rsi_array_bounds() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + ((i * 7) % 5) as f64).collect();
        let rsi = rsi_array(&closes, 14).unwrap();

        assert!(rsi[..14].iter().all(|v| v.is_nan()));
        assert!(rsi[14..].iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn test_folder_path_created() {
        let folder = get_folder_path("test_folder");
        assert!(folder.exists());
        assert!(folder.starts_with(&*TEMP_DIR));
    }
}
