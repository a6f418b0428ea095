//! Test utilities for API server integration tests

use axum_test::TestServer;
use confluence::config::Config;
use confluence::core::http::{create_router, AppState};
use confluence::metrics::Metrics;
use serde_json::{json, Value};
use std::sync::Arc;

/// 2026-10-16 03:45 UTC
const SESSION_OPEN_MS: i64 = 1_792_122_300_000;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let state = AppState::new(Config::default(), metrics.clone());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self { server, metrics }
    }
}

/// JSON bars: a 99.0 to 100.0 opening range, then a climb to `last`.
pub fn session_bars(count: usize, last: f64) -> Value {
    let opening = [
        (99.5, 100.0, 99.2, 99.8),
        (99.8, 99.9, 99.0, 99.3),
        (99.3, 99.7, 99.1, 99.6),
        (99.6, 99.8, 99.4, 99.5),
        (99.5, 99.6, 99.3, 99.5),
    ];
    let tail = count.saturating_sub(opening.len());
    let step = if tail == 0 { 0.0 } else { (last - 99.5) / tail as f64 };

    let bars: Vec<Value> = (0..count)
        .map(|i| {
            let (open, high, low, close) = match opening.get(i) {
                Some(&ohlc) => ohlc,
                None => {
                    let close = 99.5 + step * (i + 1 - opening.len()) as f64;
                    (close, close, close, close)
                }
            };
            json!({
                "time": SESSION_OPEN_MS + i as i64 * 60_000,
                "open": open,
                "high": high,
                "low": low,
                "close": close,
                "volume": 1000.0,
            })
        })
        .collect();

    Value::Array(bars)
}
