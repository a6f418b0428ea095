//! Insight rule categories and their weights

use crate::config::CategoryWeights;

/// Family of rule an insight came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightCategory {
    /// RSI inside the overbought / oversold band
    OscillatorExtreme,
    /// Last close sitting on a projected level
    LevelTest,
    /// Last close outside the opening range
    RangeBreak,
    /// RSI crossing its midline
    MomentumShift,
}

impl InsightCategory {
    pub fn all() -> [InsightCategory; 4] {
        [
            InsightCategory::OscillatorExtreme,
            InsightCategory::LevelTest,
            InsightCategory::RangeBreak,
            InsightCategory::MomentumShift,
        ]
    }
}

impl CategoryWeights {
    /// Weight a category contributes before any intensity bonus
    pub fn base(&self, category: InsightCategory) -> f64 {
        match category {
            InsightCategory::OscillatorExtreme => self.oscillator_extreme,
            InsightCategory::LevelTest => self.level_test,
            InsightCategory::RangeBreak => self.range_break,
            InsightCategory::MomentumShift => self.momentum_shift,
        }
    }

    /// Extra weight granted at full intensity (zero for flat-weight rules)
    pub fn intensity_bonus(&self, category: InsightCategory) -> f64 {
        match category {
            InsightCategory::OscillatorExtreme => self.oscillator_depth_bonus,
            InsightCategory::RangeBreak => self.range_extension_bonus,
            InsightCategory::LevelTest | InsightCategory::MomentumShift => 0.0,
        }
    }

    /// Final weight for a category at `intensity` in `[0, 1]`
    pub fn weigh(&self, category: InsightCategory, intensity: f64) -> f64 {
        self.base(category) + self.intensity_bonus(category) * intensity.clamp(0.0, 1.0)
    }

    /// Every category's full-intensity weight must sit in `[0, 1)`
    pub fn verify(&self) -> bool {
        InsightCategory::all().iter().all(|&category| {
            let max = self.weigh(category, 1.0);
            self.base(category) >= 0.0 && max < 1.0
        })
    }
}
