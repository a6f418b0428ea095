//! Rule-based insight synthesis.
//!
//! Each rule looks at the latest bar, the latest RSI reading, the projected
//! levels or the opening range and, when it fires, yields an [`Insight`] with
//! a weight. Weights are fused per direction by
//! [`directional_strength`](crate::signals::scoring::directional_strength)
//! and netted into one confidence percentage.

use tracing::debug;

use crate::config::InsightConfig;
use crate::indicators::momentum::latest_rsi;
use crate::models::bar::PriceBar;
use crate::models::indicators::{Levels, OpeningRange, OscillatorPoint, RsiSettings};
use crate::models::signal::{Insight, InsightReport, Severity};
use crate::signals::categories::InsightCategory;
use crate::signals::scoring::{
    calculate_confidence, directional_strength, dominant_bias, overbought_depth, oversold_depth,
    range_extension,
};

/// An insight together with the weight it contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredInsight {
    pub insight: Insight,
    pub category: InsightCategory,
    pub weight: f64,
}

pub struct InsightSynthesizer {
    config: InsightConfig,
}

impl Default for InsightSynthesizer {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}

impl InsightSynthesizer {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Evaluate every rule and aggregate the ones that fire.
    pub fn synthesize(
        &self,
        bars: &[PriceBar],
        levels: &Levels,
        opening_range: &OpeningRange,
        rsi_series: &[OscillatorPoint],
        settings: &RsiSettings,
    ) -> InsightReport {
        let scored = self.evaluate(bars, levels, opening_range, rsi_series, settings);
        let report = self.aggregate(scored);

        debug!(
            insights = report.insights.len(),
            confidence = report.confidence,
            bias = %report.bias,
            "Insights synthesized"
        );

        report
    }

    /// Run the rule battery, returning fired rules in evaluation order.
    pub fn evaluate(
        &self,
        bars: &[PriceBar],
        levels: &Levels,
        opening_range: &OpeningRange,
        rsi_series: &[OscillatorPoint],
        settings: &RsiSettings,
    ) -> Vec<ScoredInsight> {
        let Some(latest) = bars.last() else {
            return Vec::new();
        };
        let close = latest.close;
        let mut scored = Vec::new();

        if let Some(rsi) = latest_rsi(rsi_series) {
            match self.analyze_rsi(rsi, settings) {
                RsiAnalysis::Overbought(weight) => scored.push(ScoredInsight {
                    insight: Insight::new(
                        "RSI overbought",
                        format!(
                            "RSI at {:.2} is at or above the {:.0} overbought threshold; momentum is stretched and a pullback is likely.",
                            rsi, settings.overbought
                        ),
                        Severity::Bearish,
                    ),
                    category: InsightCategory::OscillatorExtreme,
                    weight,
                }),
                RsiAnalysis::Oversold(weight) => scored.push(ScoredInsight {
                    insight: Insight::new(
                        "RSI oversold",
                        format!(
                            "RSI at {:.2} is at or below the {:.0} oversold threshold; selling is exhausted and a bounce is likely.",
                            rsi, settings.oversold
                        ),
                        Severity::Bullish,
                    ),
                    category: InsightCategory::OscillatorExtreme,
                    weight,
                }),
                RsiAnalysis::Neutral => {}
            }
        }

        if let Some(previous) = rsi_series.len().checked_sub(2).map(|i| rsi_series[i].value) {
            if let Some(rsi) = latest_rsi(rsi_series) {
                match self.analyze_momentum(previous, rsi) {
                    MomentumAnalysis::TurningUp(weight) => scored.push(ScoredInsight {
                        insight: Insight::new(
                            "Momentum turning up",
                            format!(
                                "RSI crossed above {:.0} ({:.2} → {:.2}); buyers are taking control.",
                                self.config.momentum_midline, previous, rsi
                            ),
                            Severity::Bullish,
                        ),
                        category: InsightCategory::MomentumShift,
                        weight,
                    }),
                    MomentumAnalysis::TurningDown(weight) => scored.push(ScoredInsight {
                        insight: Insight::new(
                            "Momentum turning down",
                            format!(
                                "RSI crossed below {:.0} ({:.2} → {:.2}); sellers are taking control.",
                                self.config.momentum_midline, previous, rsi
                            ),
                            Severity::Bearish,
                        ),
                        category: InsightCategory::MomentumShift,
                        weight,
                    }),
                    MomentumAnalysis::Flat => {}
                }
            }
        }

        if let Some(test) = self.nearest_level(close, &levels.resistances) {
            scored.push(ScoredInsight {
                insight: Insight::new(
                    format!("Testing resistance R{}", test.rank),
                    format!(
                        "Price {:.2} is within {:.2}% of R{} at {:.2}; expect supply to cap the advance.",
                        close,
                        test.distance_pct * 100.0,
                        test.rank,
                        test.level
                    ),
                    Severity::Bearish,
                ),
                category: InsightCategory::LevelTest,
                weight: self.config.weights.weigh(InsightCategory::LevelTest, 1.0),
            });
        }

        if let Some(test) = self.nearest_level(close, &levels.supports) {
            scored.push(ScoredInsight {
                insight: Insight::new(
                    format!("Testing support S{}", test.rank),
                    format!(
                        "Price {:.2} is within {:.2}% of S{} at {:.2}; expect demand to absorb the decline.",
                        close,
                        test.distance_pct * 100.0,
                        test.rank,
                        test.level
                    ),
                    Severity::Bullish,
                ),
                category: InsightCategory::LevelTest,
                weight: self.config.weights.weigh(InsightCategory::LevelTest, 1.0),
            });
        }

        let window = opening_range.window_label();
        let window = if window.is_empty() {
            String::new()
        } else {
            format!(" ({window})")
        };
        match self.analyze_range(close, opening_range) {
            RangeAnalysis::Breakout(weight) => scored.push(ScoredInsight {
                insight: Insight::new(
                    "Opening range breakout",
                    format!(
                        "Price {:.2} is trading {:.2} above the opening range high {:.2}{}.",
                        close,
                        close - opening_range.high,
                        opening_range.high,
                        window
                    ),
                    Severity::Bullish,
                ),
                category: InsightCategory::RangeBreak,
                weight,
            }),
            RangeAnalysis::Breakdown(weight) => scored.push(ScoredInsight {
                insight: Insight::new(
                    "Opening range breakdown",
                    format!(
                        "Price {:.2} is trading {:.2} below the opening range low {:.2}{}.",
                        close,
                        opening_range.low - close,
                        opening_range.low,
                        window
                    ),
                    Severity::Bearish,
                ),
                category: InsightCategory::RangeBreak,
                weight,
            }),
            RangeAnalysis::Inside => {}
        }

        scored
    }

    /// Rank fired rules and fold their weights into a confidence score.
    pub fn aggregate(&self, mut scored: Vec<ScoredInsight>) -> InsightReport {
        if scored.is_empty() {
            return InsightReport::empty();
        }

        let bullish = directional_strength(
            scored
                .iter()
                .filter(|s| s.insight.severity == Severity::Bullish)
                .map(|s| s.weight),
        );
        let bearish = directional_strength(
            scored
                .iter()
                .filter(|s| s.insight.severity == Severity::Bearish)
                .map(|s| s.weight),
        );

        // stable: equal weights keep evaluation order
        scored.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let mut insights: Vec<Insight> = scored.into_iter().map(|s| s.insight).collect();

        if bullish > 0.0 && bearish > 0.0 {
            insights.push(Insight::new(
                "Mixed signals",
                format!(
                    "Bullish ({:.0}%) and bearish ({:.0}%) evidence offset each other; conviction is reduced.",
                    bullish * 100.0,
                    bearish * 100.0
                ),
                Severity::Neutral,
            ));
        }

        InsightReport {
            insights,
            confidence: calculate_confidence(bullish, bearish),
            bias: dominant_bias(bullish, bearish),
        }
    }

    fn analyze_rsi(&self, rsi: f64, settings: &RsiSettings) -> RsiAnalysis {
        let weights = &self.config.weights;
        if rsi >= settings.overbought {
            let depth = overbought_depth(rsi, settings.overbought);
            RsiAnalysis::Overbought(weights.weigh(InsightCategory::OscillatorExtreme, depth))
        } else if rsi <= settings.oversold {
            let depth = oversold_depth(rsi, settings.oversold);
            RsiAnalysis::Oversold(weights.weigh(InsightCategory::OscillatorExtreme, depth))
        } else {
            RsiAnalysis::Neutral
        }
    }

    fn analyze_momentum(&self, previous: f64, latest: f64) -> MomentumAnalysis {
        let midline = self.config.momentum_midline;
        let weight = self.config.weights.weigh(InsightCategory::MomentumShift, 1.0);
        if previous < midline && latest >= midline {
            MomentumAnalysis::TurningUp(weight)
        } else if previous > midline && latest <= midline {
            MomentumAnalysis::TurningDown(weight)
        } else {
            MomentumAnalysis::Flat
        }
    }

    fn analyze_range(&self, close: f64, range: &OpeningRange) -> RangeAnalysis {
        let weights = &self.config.weights;
        if close > range.high {
            let extension = range_extension(close - range.high, range.width());
            RangeAnalysis::Breakout(weights.weigh(InsightCategory::RangeBreak, extension))
        } else if close < range.low {
            let extension = range_extension(range.low - close, range.width());
            RangeAnalysis::Breakdown(weights.weigh(InsightCategory::RangeBreak, extension))
        } else {
            RangeAnalysis::Inside
        }
    }

    /// Closest level within tolerance of `close`, if any.
    fn nearest_level(&self, close: f64, ladder: &[f64]) -> Option<LevelTest> {
        ladder
            .iter()
            .enumerate()
            .filter(|&(_, &level)| level != 0.0)
            .map(|(i, &level)| LevelTest {
                rank: i + 1,
                level,
                distance_pct: ((close - level) / level).abs(),
            })
            .filter(|test| test.distance_pct <= self.config.level_tolerance_pct)
            .min_by(|a, b| a.distance_pct.total_cmp(&b.distance_pct))
    }
}

/// Synthesize insights with the default thresholds and weights.
pub fn synthesize(
    bars: &[PriceBar],
    levels: &Levels,
    opening_range: &OpeningRange,
    rsi_series: &[OscillatorPoint],
    settings: &RsiSettings,
) -> InsightReport {
    InsightSynthesizer::default().synthesize(bars, levels, opening_range, rsi_series, settings)
}

struct LevelTest {
    rank: usize,
    level: f64,
    distance_pct: f64,
}

enum RsiAnalysis {
    Overbought(f64),
    Oversold(f64),
    Neutral,
}

enum MomentumAnalysis {
    TurningUp(f64),
    TurningDown(f64),
    Flat,
}

enum RangeAnalysis {
    Breakout(f64),
    Breakdown(f64),
    Inside,
}
