//! Command-driven recomputation of the market picture.
//!
//! A session holds the latest bars and settings. Every command re-runs the
//! whole pipeline and swaps in the new analysis; nothing is updated
//! incrementally.

use tracing::{debug, warn};

use crate::config::InsightConfig;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::validate_settings;
use crate::models::bar::PriceBar;
use crate::models::indicators::RsiSettings;
use crate::signals::engine::{MarketAnalysis, SignalEngine};

/// Mutation applied to a session.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// A data refresh delivered a new bar sequence.
    ReplaceBars(Vec<PriceBar>),
    /// The user changed the RSI settings.
    UpdateSettings(RsiSettings),
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    bars: Vec<PriceBar>,
    settings: RsiSettings,
    insight_config: InsightConfig,
    analysis: Option<MarketAnalysis>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(RsiSettings::default(), InsightConfig::default())
    }
}

impl AnalysisSession {
    pub fn new(settings: RsiSettings, insight_config: InsightConfig) -> Self {
        Self {
            bars: Vec::new(),
            settings,
            insight_config,
            analysis: None,
        }
    }

    pub fn settings(&self) -> &RsiSettings {
        &self.settings
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Latest analysis, `None` while waiting for data.
    pub fn analysis(&self) -> Option<&MarketAnalysis> {
        self.analysis.as_ref()
    }

    /// Apply a command and recompute.
    ///
    /// On error the session keeps its previous bars, settings and analysis.
    pub fn apply(
        &mut self,
        command: SessionCommand,
    ) -> Result<Option<&MarketAnalysis>, IndicatorError> {
        match command {
            SessionCommand::ReplaceBars(bars) => {
                let analysis = SignalEngine::analyze(&bars, &self.settings, &self.insight_config)
                    .inspect_err(|e| warn!(error = %e, bars = bars.len(), "Rejected bar refresh"))?;
                self.bars = bars;
                self.analysis = Some(analysis);
            }
            SessionCommand::UpdateSettings(settings) => {
                validate_settings(&settings)?;
                if !self.bars.is_empty() {
                    let analysis =
                        SignalEngine::analyze(&self.bars, &settings, &self.insight_config)?;
                    self.analysis = Some(analysis);
                }
                self.settings = settings;
            }
        }

        debug!(
            bars = self.bars.len(),
            has_analysis = self.analysis.is_some(),
            "Session recomputed"
        );
        Ok(self.analysis.as_ref())
    }
}
