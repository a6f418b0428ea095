use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{OVERBOUGHT_RANGE, OVERSOLD_RANGE, PERIOD_RANGE};

/// Averaging model used to smooth RSI gains and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingMethod {
    /// Unweighted mean over the trailing window.
    Sma,
    /// Conventional EMA, alpha = 2 / (period + 1).
    Ema,
    /// Wilder's running average, alpha = 1 / period.
    #[default]
    Rma,
}

impl SmoothingMethod {
    pub fn label(&self) -> &'static str {
        match self {
            SmoothingMethod::Sma => "Simple (SMA)",
            SmoothingMethod::Ema => "Exponential (EMA)",
            SmoothingMethod::Rma => "Wilder (RMA)",
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            SmoothingMethod::Sma => "sma",
            SmoothingMethod::Ema => "ema",
            SmoothingMethod::Rma => "rma",
        };
        f.write_str(code)
    }
}

impl FromStr for SmoothingMethod {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(SmoothingMethod::Sma),
            "ema" => Ok(SmoothingMethod::Ema),
            "rma" | "wilder" => Ok(SmoothingMethod::Rma),
            other => Err(IndicatorError::InvalidSmoothing(other.to_string())),
        }
    }
}

/// User-tunable RSI parameters, passed by value into every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiSettings {
    pub period: u32,
    pub overbought: f64,
    pub oversold: f64,
    pub smoothing: SmoothingMethod,
}

impl Default for RsiSettings {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
            smoothing: SmoothingMethod::Rma,
        }
    }
}

impl RsiSettings {
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingMethod) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_thresholds(mut self, overbought: f64, oversold: f64) -> Self {
        self.overbought = overbought;
        self.oversold = oversold;
        self
    }

    /// Pull every field back into its allowed range.
    pub fn clamped(self) -> Self {
        Self {
            period: self
                .period
                .clamp(*PERIOD_RANGE.start(), *PERIOD_RANGE.end()),
            overbought: self
                .overbought
                .clamp(*OVERBOUGHT_RANGE.start(), *OVERBOUGHT_RANGE.end()),
            oversold: self
                .oversold
                .clamp(*OVERSOLD_RANGE.start(), *OVERSOLD_RANGE.end()),
            smoothing: self.smoothing,
        }
    }
}

/// One RSI reading aligned to the bar it was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorPoint {
    pub time: i64,
    pub value: f64,
}

/// High/low band printed by the first bars of the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningRange {
    pub high: f64,
    pub low: f64,
    /// Time of the first opening bar (ms epoch).
    pub start: i64,
    /// Time of the last opening bar (ms epoch).
    pub end: i64,
}

impl OpeningRange {
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.low && price <= self.high
    }

    /// `HH:MM–HH:MM` in UTC, or an empty string if a timestamp is out of range.
    pub fn window_label(&self) -> String {
        match (
            DateTime::from_timestamp_millis(self.start),
            DateTime::from_timestamp_millis(self.end),
        ) {
            (Some(start), Some(end)) => {
                format!("{}–{}", start.format("%H:%M"), end.format("%H:%M"))
            }
            _ => String::new(),
        }
    }
}

/// Projected resistance and support ladders, nearest level first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Levels {
    pub resistances: Vec<f64>,
    pub supports: Vec<f64>,
}

/// Last print and change versus the prior bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub last: f64,
    pub change: f64,
    pub change_percent: f64,
}
