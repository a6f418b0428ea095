//! Runtime configuration loaded from the environment (and `.env`).

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::validation::validate_settings;
use crate::indicators::IndicatorError;
use crate::models::indicators::{RsiSettings, SmoothingMethod};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Settings(#[from] IndicatorError),
}

/// Deployment environment name, `sandbox` when unset.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Per-category weights feeding the confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub oscillator_extreme: f64,
    pub oscillator_depth_bonus: f64,
    pub level_test: f64,
    pub range_break: f64,
    pub range_extension_bonus: f64,
    pub momentum_shift: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            oscillator_extreme: 0.30,
            oscillator_depth_bonus: 0.15,
            level_test: 0.25,
            range_break: 0.35,
            range_extension_bonus: 0.15,
            momentum_shift: 0.15,
        }
    }
}

/// Thresholds for the insight rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Max distance from a level, as a fraction of the level, to count as a test.
    pub level_tolerance_pct: f64,
    /// RSI value whose crossing marks a momentum shift.
    pub momentum_midline: f64,
    pub weights: CategoryWeights,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            level_tolerance_pct: 0.0005,
            momentum_midline: 50.0,
            weights: CategoryWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    pub symbol: String,
    pub settings: RsiSettings,
    pub insights: InsightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            symbol: "NSE:NIFTY".to_string(),
            settings: RsiSettings::default(),
            insights: InsightConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = parse_var("PORT")? {
            config.port = port;
        }
        if let Ok(symbol) = env::var("SYMBOL") {
            config.symbol = symbol;
        }
        if let Some(period) = parse_var("RSI_PERIOD")? {
            config.settings.period = period;
        }
        if let Some(overbought) = parse_var("RSI_OVERBOUGHT")? {
            config.settings.overbought = overbought;
        }
        if let Some(oversold) = parse_var("RSI_OVERSOLD")? {
            config.settings.oversold = oversold;
        }
        if let Ok(smoothing) = env::var("RSI_SMOOTHING") {
            config.settings.smoothing = smoothing.parse::<SmoothingMethod>()?;
        }
        if let Some(tolerance) = parse_var::<f64>("LEVEL_TOLERANCE_PCT")? {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "LEVEL_TOLERANCE_PCT",
                    value: tolerance.to_string(),
                });
            }
            config.insights.level_tolerance_pct = tolerance;
        }

        validate_settings(&config.settings)?;
        Ok(config)
    }
}
