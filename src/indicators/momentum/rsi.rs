//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::bar::PriceBar;
use crate::models::indicators::{OscillatorPoint, RsiSettings, SmoothingMethod};

impl SmoothingMethod {
    /// Advance a smoothed average by one observation.
    ///
    /// `window` holds the trailing `period` raw values, the newest last.
    /// SMA recomputes over it; EMA and RMA only use the newest value and the
    /// window length as the period.
    pub fn next(&self, previous: f64, window: &[f64]) -> f64 {
        let period = window.len();
        let Some(&current) = window.last() else {
            return previous;
        };

        match self {
            SmoothingMethod::Sma => math::sma(window, period).unwrap_or(previous),
            SmoothingMethod::Ema => math::ema_from_previous(current, previous, period),
            SmoothingMethod::Rma => math::rma_from_previous(current, previous, period),
        }
    }
}

/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss
///
/// A zero average loss reads as exactly 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Split close-to-close changes into gain and loss series.
fn gains_and_losses(bars: &[PriceBar]) -> (Vec<f64>, Vec<f64>) {
    let mut gains = Vec::with_capacity(bars.len().saturating_sub(1));
    let mut losses = Vec::with_capacity(bars.len().saturating_sub(1));

    for pair in bars.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    (gains, losses)
}

/// Calculate the full RSI series.
///
/// The first `period` bars are warm-up; point `i` belongs to bar
/// `i + period`. Fewer than `period + 1` bars yields an empty series.
pub fn calculate_rsi_series(bars: &[PriceBar], settings: &RsiSettings) -> Vec<OscillatorPoint> {
    let period = settings.period as usize;
    if period == 0 || bars.len() < period + 1 {
        return Vec::new();
    }

    let (gains, losses) = gains_and_losses(bars);

    // Seed with a simple average of the first `period` changes
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let mut series = Vec::with_capacity(bars.len() - period);
    series.push(OscillatorPoint {
        time: bars[period].time,
        value: rsi_from_averages(avg_gain, avg_loss),
    });

    // change k sits between bars k and k + 1
    for k in period..gains.len() {
        let window = k + 1 - period..=k;
        avg_gain = settings.smoothing.next(avg_gain, &gains[window.clone()]);
        avg_loss = settings.smoothing.next(avg_loss, &losses[window]);

        series.push(OscillatorPoint {
            time: bars[k + 1].time,
            value: rsi_from_averages(avg_gain, avg_loss),
        });
    }

    series
}

/// Most recent RSI value, `None` while the series is still warming up.
pub fn latest_rsi(series: &[OscillatorPoint]) -> Option<f64> {
    series.last().map(|point| point.value)
}

/// Calculate only the latest RSI value
pub fn calculate_rsi(bars: &[PriceBar], settings: &RsiSettings) -> Option<f64> {
    latest_rsi(&calculate_rsi_series(bars, settings))
}
