pub mod delta;

use serde::{Deserialize, Serialize};

/// A metric's latest value and, when history exists, the value it is
/// compared against. A zero prior is a real observation, not "missing".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub current: f64,
    #[serde(default)]
    pub prior: Option<f64>,
}

impl MetricPoint {
    pub fn new(current: f64, prior: Option<f64>) -> Self {
        Self { current, prior }
    }

    pub fn pct_change(&self) -> Option<f64> {
        delta::pct_change(self.current, self.prior)
    }

    pub fn abs_change(&self) -> Option<f64> {
        delta::abs_change(self.current, self.prior)
    }
}

/// A metric with the name it is reported under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMetric {
    pub name: String,
    #[serde(flatten)]
    pub point: MetricPoint,
}

/// One weighted input to a composite grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDimension {
    pub label: String,
    pub score: f64, // 0-100
    pub weight: f64,
}

impl ScoredDimension {
    pub fn new(label: impl Into<String>, score: f64, weight: f64) -> Self {
        Self {
            label: label.into(),
            score,
            weight,
        }
    }
}

/// A category's slice of a total, e.g. streams per platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub value: f64,
}

/// A labelled growth rate in percent, e.g. follower growth on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub label: String,
    pub growth_pct: f64,
}

/// A target for a single metric. Complete once `current >= target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneTarget {
    pub label: String,
    pub current: f64,
    pub target: f64,
    pub daily_growth: Option<f64>,
}

impl MilestoneTarget {
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// Mention counts from sentiment classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}
