use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One intraday OHLCV bar.
///
/// Sequences handed to the engine must be sorted ascending by `time` with no
/// duplicate timestamps. Nothing downstream re-sorts or deduplicates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time, milliseconds since the Unix epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(open: f64, high: f64, low: f64, close: f64, volume: f64, time: i64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.time = timestamp.timestamp_millis();
        self
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}
