//! Range checks for user-supplied RSI settings

use std::ops::RangeInclusive;

use crate::indicators::error::IndicatorError;
use crate::models::indicators::RsiSettings;

pub const PERIOD_RANGE: RangeInclusive<u32> = 2..=100;
pub const OVERBOUGHT_RANGE: RangeInclusive<f64> = 50.0..=95.0;
pub const OVERSOLD_RANGE: RangeInclusive<f64> = 5.0..=50.0;

/// Reject settings outside the ranges the settings form allows.
pub fn validate_settings(settings: &RsiSettings) -> Result<(), IndicatorError> {
    if !PERIOD_RANGE.contains(&settings.period) {
        return Err(IndicatorError::InvalidSettings(format!(
            "period must be between {} and {}, got {}",
            PERIOD_RANGE.start(),
            PERIOD_RANGE.end(),
            settings.period
        )));
    }

    if !settings.overbought.is_finite() || !OVERBOUGHT_RANGE.contains(&settings.overbought) {
        return Err(IndicatorError::InvalidSettings(format!(
            "overbought must be between {} and {}, got {}",
            OVERBOUGHT_RANGE.start(),
            OVERBOUGHT_RANGE.end(),
            settings.overbought
        )));
    }

    if !settings.oversold.is_finite() || !OVERSOLD_RANGE.contains(&settings.oversold) {
        return Err(IndicatorError::InvalidSettings(format!(
            "oversold must be between {} and {}, got {}",
            OVERSOLD_RANGE.start(),
            OVERSOLD_RANGE.end(),
            settings.oversold
        )));
    }

    Ok(())
}
