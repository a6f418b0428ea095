//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod signal;

pub use bar::PriceBar;
pub use indicators::{
    Levels, MarketSummary, OpeningRange, OscillatorPoint, RsiSettings, SmoothingMethod,
};
pub use signal::{Insight, InsightReport, Severity};
