//! Trader module - market data plumbing shared by the charting tools.
//!
//! - **object**: `BarData` and `HistoryRequest`
//! - **datafeed**: datafeed abstraction for market data
//! - **setting**: global settings management
//! - **logger**: logging setup
//! - **utility**: folders and indicator helpers

pub mod datafeed;
pub mod logger;
pub mod object;
pub mod setting;
pub mod utility;

// Re-exports for convenience
pub use datafeed::{create_datafeed, get_datafeed_name, BaseDatafeed, EmptyDatafeed, MemoryDatafeed};
pub use logger::{init_logger, CRITICAL, DEBUG, ERROR, INFO, WARNING};
pub use object::{BarData, HistoryRequest};
pub use setting::{SettingValue, Settings, SETTINGS};
pub use utility::{get_file_path, get_folder_path, rsi_array, sma_array, TEMP_DIR};
