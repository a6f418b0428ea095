//! Confluence engine: RSI momentum, opening-range level geometry and
//! rule-based insights for a single intraday instrument.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod signals;
