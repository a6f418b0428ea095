//! Full-pipeline evaluation: opening range, levels, RSI and insights.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InsightConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_rsi_series, latest_rsi};
use crate::indicators::structure::{derive_opening_range, project_from_range};
use crate::indicators::validation::validate_settings;
use crate::models::bar::PriceBar;
use crate::models::indicators::{
    Levels, MarketSummary, OpeningRange, OscillatorPoint, RsiSettings, SmoothingMethod,
};
use crate::models::signal::InsightReport;
use crate::signals::insights::InsightSynthesizer;

/// Everything the presentation layer renders for one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub opening_range: OpeningRange,
    pub levels: Levels,
    pub market: MarketSummary,
    pub rsi_series: Vec<OscillatorPoint>,
    pub latest_rsi: Option<f64>,
    pub smoothing: SmoothingMethod,
    pub report: InsightReport,
}

/// Last close and its change against the prior bar.
///
/// A single bar compares against itself (zero change).
pub fn market_summary(bars: &[PriceBar]) -> Option<MarketSummary> {
    let latest = bars.last()?;
    let previous = bars.len().checked_sub(2).map_or(latest, |i| &bars[i]);

    let last = latest.close;
    let change = last - previous.close;
    let base = last - change;
    let base = if base == 0.0 { 1.0 } else { base };

    Some(MarketSummary {
        last,
        change,
        change_percent: change / base * 100.0,
    })
}

pub struct SignalEngine;

impl SignalEngine {
    /// Recompute the whole picture from scratch.
    pub fn analyze(
        bars: &[PriceBar],
        settings: &RsiSettings,
        config: &InsightConfig,
    ) -> Result<MarketAnalysis, IndicatorError> {
        validate_settings(settings)?;
        let market = market_summary(bars).ok_or(IndicatorError::EmptySeries)?;

        let opening_range = derive_opening_range(bars)?;
        let levels = project_from_range(&opening_range);
        let rsi_series = calculate_rsi_series(bars, settings);

        let report = InsightSynthesizer::new(config.clone()).synthesize(
            bars,
            &levels,
            &opening_range,
            &rsi_series,
            settings,
        );

        debug!(
            bars = bars.len(),
            rsi_points = rsi_series.len(),
            smoothing = %settings.smoothing,
            "Market analysis computed"
        );

        Ok(MarketAnalysis {
            opening_range,
            levels,
            market,
            latest_rsi: latest_rsi(&rsi_series),
            rsi_series,
            smoothing: settings.smoothing,
            report,
        })
    }

    /// [`analyze`](Self::analyze) with the default insight thresholds.
    pub fn analyze_default(
        bars: &[PriceBar],
        settings: &RsiSettings,
    ) -> Result<MarketAnalysis, IndicatorError> {
        Self::analyze(bars, settings, &InsightConfig::default())
    }
}
