//! Score normalization and confidence calculation

use crate::models::signal::Severity;

/// Normalize a value to the 0 to 1 range, clamped.
pub fn normalize_score(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// How far RSI has pushed past the overbought threshold toward 100.
pub fn overbought_depth(rsi: f64, overbought: f64) -> f64 {
    normalize_score(rsi, overbought, 100.0)
}

/// How far RSI has pushed past the oversold threshold toward 0.
pub fn oversold_depth(rsi: f64, oversold: f64) -> f64 {
    normalize_score(oversold - rsi, 0.0, oversold)
}

/// Distance travelled beyond an opening-range edge, in range widths.
///
/// A flat range has no width to measure against, so any excursion counts
/// as a full extension.
pub fn range_extension(distance: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 1.0;
    }
    normalize_score(distance, 0.0, width)
}

/// Combine same-direction weights into one strength in `[0, 1)`.
///
/// Noisy-OR: `1 - Π(1 - w)`. Each weight is clamped into `[0, 1)` first, so
/// every additional positive weight strictly raises the result.
pub fn directional_strength<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let miss: f64 = weights
        .into_iter()
        .map(|w| 1.0 - w.clamp(0.0, MAX_SIGNAL_WEIGHT))
        .product();
    1.0 - miss
}

/// Ceiling for a single rule weight.
pub const MAX_SIGNAL_WEIGHT: f64 = 0.99;

/// Net conviction as a percentage.
///
/// Opposing strengths cancel, so conflicting evidence never scores higher
/// than the stronger side alone.
pub fn calculate_confidence(bullish: f64, bearish: f64) -> f64 {
    ((bullish - bearish).abs() * 100.0).clamp(0.0, 100.0)
}

/// Side carrying the larger strength.
pub fn dominant_bias(bullish: f64, bearish: f64) -> Severity {
    if bullish > bearish {
        Severity::Bullish
    } else if bearish > bullish {
        Severity::Bearish
    } else {
        Severity::Neutral
    }
}
