use std::fmt;

use serde::{Deserialize, Serialize};

/// Directional tag attached to an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Bullish,
    Neutral,
    Bearish,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Bullish => "bullish",
            Severity::Neutral => "neutral",
            Severity::Bearish => "bearish",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable observation produced by one fired rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
    pub severity: Severity,
}

impl Insight {
    pub fn new(title: impl Into<String>, detail: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            severity,
        }
    }
}

/// Ranked insights plus the aggregate conviction they imply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Strongest contribution first.
    pub insights: Vec<Insight>,
    /// Net directional conviction in `[0, 100]`.
    pub confidence: f64,
    /// Side that dominates the confidence score.
    pub bias: Severity,
}

impl InsightReport {
    /// Nothing fired: the "waiting for data" state.
    pub fn empty() -> Self {
        Self {
            insights: Vec::new(),
            confidence: 0.0,
            bias: Severity::Neutral,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }
}

impl Default for InsightReport {
    fn default() -> Self {
        Self::empty()
    }
}
