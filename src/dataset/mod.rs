//! Dataset module - typed tabular price data.

pub mod table;

pub use table::{Column, DataTable, CLOSE, DATE, HIGH, LOW, OPEN, VOLUME};
