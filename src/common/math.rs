//! Rolling-average primitives shared by the indicators.

/// Simple moving average over the trailing `period` values.
///
/// Returns `None` when fewer than `period` values are available.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Smoothing factor of a conventional EMA: `2 / (period + 1)`.
pub fn ema_alpha(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Advance an EMA by one observation.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let alpha = ema_alpha(period);
    previous * (1.0 - alpha) + value * alpha
}

/// Advance Wilder's running average (RMA) by one observation.
///
/// Decay is `1 / period`, slower than the EMA for the same period.
pub fn rma_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let period = period as f64;
    (previous * (period - 1.0) + value) / period
}
