//! Shared builders for unit tests

#![allow(dead_code)]

use confluence::models::{OscillatorPoint, PriceBar};

pub const MINUTE_MS: i64 = 60_000;
/// 2026-10-16 03:45 UTC (09:15 IST)
pub const SESSION_OPEN_MS: i64 = 1_792_122_300_000;

pub fn bar(index: usize, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    PriceBar::new(
        open,
        high,
        low,
        close,
        1_000.0,
        SESSION_OPEN_MS + index as i64 * MINUTE_MS,
    )
}

/// Bars whose open/high/low hug each close by half a point.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| bar(i, close, close + 0.5, close - 0.5, close))
        .collect()
}

/// Five bars spanning exactly 99.0 to 100.0, then `tail` closes.
pub fn session_with_tail(tail: &[f64]) -> Vec<PriceBar> {
    let mut bars = vec![
        bar(0, 99.5, 100.0, 99.2, 99.8),
        bar(1, 99.8, 99.9, 99.0, 99.3),
        bar(2, 99.3, 99.7, 99.1, 99.6),
        bar(3, 99.6, 99.8, 99.4, 99.5),
        bar(4, 99.5, 99.6, 99.3, 99.5),
    ];
    for (offset, &close) in tail.iter().enumerate() {
        bars.push(bar(5 + offset, close, close, close, close));
    }
    bars
}

pub fn rsi_points(values: &[f64]) -> Vec<OscillatorPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| OscillatorPoint {
            time: SESSION_OPEN_MS + i as i64 * MINUTE_MS,
            value,
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
