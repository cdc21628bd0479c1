//! Typed columnar table holding a price series and its derived columns.

use chrono::NaiveDate;

use crate::error::TableError;
use crate::trader::object::BarData;

/// Default column names produced by [`DataTable::from_bars`]
pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";

/// A single typed column. Missing float values are NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Date(Vec<NaiveDate>),
    Float(Vec<f64>),
    Int(Vec<i64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Date(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Date(_) => "date",
            Column::Float(_) => "float",
            Column::Int(_) => "int",
        }
    }

    /// Copy of the last `n` values
    fn tail(&self, n: usize) -> Column {
        let start = self.len().saturating_sub(n);
        match self {
            Column::Date(v) => Column::Date(v[start..].to_vec()),
            Column::Float(v) => Column::Float(v[start..].to_vec()),
            Column::Int(v) => Column::Int(v[start..].to_vec()),
        }
    }
}

fn type_error(name: &str, expected: &'static str, column: &Column) -> TableError {
    TableError::ColumnType {
        name: name.to_string(),
        expected,
        actual: column.type_name(),
    }
}

/// Ordered list of named, typed columns of equal length.
///
/// Columns are appended and replaced but never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    names: Vec<String>,
    columns: Vec<Column>,
    len: usize,
}

impl DataTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with Date/Open/High/Low/Close/Volume columns.
    ///
    /// Bars are sorted by date; when a date repeats the last bar wins.
    pub fn from_bars(bars: &[BarData]) -> Self {
        let mut sorted: Vec<&BarData> = bars.iter().collect();
        sorted.sort_by_key(|bar| bar.date);

        let mut unique: Vec<&BarData> = Vec::with_capacity(sorted.len());
        for bar in sorted {
            match unique.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => unique.push(bar),
            }
        }

        let mut table = Self::new();
        table.len = unique.len();
        table.push(DATE, Column::Date(unique.iter().map(|b| b.date).collect()));
        table.push(OPEN, Column::Float(unique.iter().map(|b| b.open_price).collect()));
        table.push(HIGH, Column::Float(unique.iter().map(|b| b.high_price).collect()));
        table.push(LOW, Column::Float(unique.iter().map(|b| b.low_price).collect()));
        table.push(CLOSE, Column::Float(unique.iter().map(|b| b.close_price).collect()));
        table.push(VOLUME, Column::Float(unique.iter().map(|b| b.volume).collect()));
        table
    }

    fn push(&mut self, name: &str, column: Column) {
        self.names.push(name.to_string());
        self.columns.push(column);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|ix| &self.columns[ix])
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Add a column, or replace the values of an existing one in place.
    ///
    /// The first column of an empty table sets the row count.
    pub fn insert_column(&mut self, name: impl Into<String>, column: Column) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.len = column.len();
        } else if column.len() != self.len {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.len,
                actual: column.len(),
            });
        }

        match self.names.iter().position(|n| *n == name) {
            Some(ix) => self.columns[ix] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Date column values
    pub fn dates(&self, name: &str) -> Result<&[NaiveDate], TableError> {
        match self.column(name)? {
            Column::Date(v) => Ok(v),
            other => Err(type_error(name, "date", other)),
        }
    }

    /// Float column values
    pub fn floats(&self, name: &str) -> Result<&[f64], TableError> {
        match self.column(name)? {
            Column::Float(v) => Ok(v),
            other => Err(type_error(name, "float", other)),
        }
    }

    /// Int column values
    pub fn ints(&self, name: &str) -> Result<&[i64], TableError> {
        match self.column(name)? {
            Column::Int(v) => Ok(v),
            other => Err(type_error(name, "int", other)),
        }
    }

    /// Signal values of an int or float column.
    ///
    /// NaN and non-integral floats read as absent.
    pub fn signals(&self, name: &str) -> Result<Vec<Option<i64>>, TableError> {
        match self.column(name)? {
            Column::Int(v) => Ok(v.iter().copied().map(Some).collect()),
            Column::Float(v) => Ok(v
                .iter()
                .map(|&x| (x.is_finite() && x.fract() == 0.0).then_some(x as i64))
                .collect()),
            other => Err(type_error(name, "int or float", other)),
        }
    }

    /// New table with the last `n` rows, or every row if there are fewer
    pub fn tail(&self, n: usize) -> DataTable {
        DataTable {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.tail(n)).collect(),
            len: self.len.min(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bar(d: NaiveDate, close: f64) -> BarData {
        BarData::new("TEST", d, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_from_bars_sorts_and_dedups() {
        let bars = vec![
            bar(date(2024, 1, 3), 3.0),
            bar(date(2024, 1, 2), 2.0),
            bar(date(2024, 1, 3), 4.0),
        ];
        let table = DataTable::from_bars(&bars);

        assert_eq!(table.len(), 2);
        assert_eq!(table.dates(DATE).unwrap(), &[date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(table.floats(CLOSE).unwrap(), &[2.0, 4.0]);
        assert_eq!(table.floats(HIGH).unwrap(), &[3.0, 5.0]);
        assert_eq!(table.column_names(), &["Date", "Open", "High", "Low", "Close", "Volume"]);
    }

    #[test]
    fn test_insert_and_replace_column() {
        let mut table = DataTable::from_bars(&[bar(date(2024, 1, 2), 1.0), bar(date(2024, 1, 3), 2.0)]);

        table.insert_column("SMA_2", Column::Float(vec![f64::NAN, 1.5])).unwrap();
        assert!(table.has_column("SMA_2"));

        table.insert_column("SMA_2", Column::Float(vec![0.0, 0.0])).unwrap();
        assert_eq!(table.floats("SMA_2").unwrap(), &[0.0, 0.0]);
        assert_eq!(table.column_names().len(), 7);
        assert_eq!(table.column_names().last().map(String::as_str), Some("SMA_2"));
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut table = DataTable::from_bars(&[bar(date(2024, 1, 2), 1.0)]);
        let err = table.insert_column("Bad", Column::Int(vec![1, 2])).unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                name: "Bad".to_string(),
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_typed_access_errors() {
        let table = DataTable::from_bars(&[bar(date(2024, 1, 2), 1.0)]);
        assert_eq!(
            table.floats("Missing"),
            Err(TableError::ColumnNotFound("Missing".to_string()))
        );
        assert!(matches!(table.floats(DATE), Err(TableError::ColumnType { .. })));
        assert!(matches!(table.dates(CLOSE), Err(TableError::ColumnType { .. })));
        assert!(matches!(table.signals(DATE), Err(TableError::ColumnType { .. })));

        let err = table.ints(CLOSE).unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnType {
                name: CLOSE.to_string(),
                expected: "int",
                actual: "float",
            }
        );
        assert_eq!(err.to_string(), "column Close is a float column, expected int");
    }

    #[test]
    fn test_signals_from_float_and_int() {
        let mut table = DataTable::new();
        table.insert_column("Int", Column::Int(vec![1, 0, -1])).unwrap();
        table.insert_column("Float", Column::Float(vec![1.0, f64::NAN, -1.0])).unwrap();

        assert_eq!(table.signals("Int").unwrap(), vec![Some(1), Some(0), Some(-1)]);
        assert_eq!(table.signals("Float").unwrap(), vec![Some(1), None, Some(-1)]);
        assert_eq!(table.ints("Int").unwrap(), &[1, 0, -1]);
    }

    #[test]
    fn test_tail() {
        let bars: Vec<BarData> = (1..=5).map(|d| bar(date(2024, 1, d), d as f64)).collect();
        let table = DataTable::from_bars(&bars);

        let tail = table.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.floats(CLOSE).unwrap(), &[4.0, 5.0]);

        let all = table.tail(30);
        assert_eq!(all.len(), 5);
        assert_eq!(all, table);
    }
}
