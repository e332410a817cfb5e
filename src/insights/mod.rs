pub mod sentiment;

use serde::{Deserialize, Serialize};

use crate::config::AlertThresholds;
use crate::core::NamedMetric;
use crate::scoring::bands::Ladder;

/// Direction and size of a notable period-over-period move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Spike, // >= major, up
    Rise,  // >= minor, up
    Dip,   // >= minor, down
    Drop,  // >= major, down
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Major,
    Minor,
    Quiet,
}

impl Severity {
    pub fn verb(&self) -> &'static str {
        match self {
            Severity::Spike => "spiked",
            Severity::Rise => "rose",
            Severity::Dip => "dipped",
            Severity::Drop => "dropped",
        }
    }
}

/// Maps percent changes to a [`Severity`]. Built once from the alert
/// thresholds and reused for every metric.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    tiers: Ladder<Tier>,
}

impl SeverityClassifier {
    pub fn new(thresholds: &AlertThresholds) -> Self {
        Self {
            tiers: Ladder::at_least(
                [(thresholds.major, Tier::Major), (thresholds.minor, Tier::Minor)],
                Tier::Quiet,
            ),
        }
    }

    /// Moves smaller than the minor threshold (and NaN) are not notable.
    pub fn classify(&self, pct: f64) -> Option<Severity> {
        let up = pct >= 0.0;
        match (self.tiers.classify(pct.abs()), up) {
            (Tier::Major, true) => Some(Severity::Spike),
            (Tier::Major, false) => Some(Severity::Drop),
            (Tier::Minor, true) => Some(Severity::Rise),
            (Tier::Minor, false) => Some(Severity::Dip),
            (Tier::Quiet, _) => None,
        }
    }
}

/// A notable move in one metric. Rebuilt from scratch on every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub metric: String,
    pub severity: Severity,
    pub pct_change: f64,
    pub label: String,
}

/// Insights for every metric whose change clears the minor threshold,
/// largest absolute move first.
pub fn generate(metrics: &[NamedMetric], classifier: &SeverityClassifier) -> Vec<Insight> {
    let mut insights: Vec<Insight> = metrics
        .iter()
        .filter_map(|m| {
            let pct = m.point.pct_change()?;
            let severity = classifier.classify(pct)?;
            Some(Insight {
                label: format!("{} {} {:.1}%", m.name, severity.verb(), pct.abs()),
                metric: m.name.clone(),
                severity,
                pct_change: pct,
            })
        })
        .collect();
    insights.sort_by(|a, b| b.pct_change.abs().total_cmp(&a.pct_change.abs()));
    insights
}

/// Growth velocity label for a percent change.
pub fn growth_label(pct: f64, bands: &Ladder<String>) -> &str {
    bands.label(pct)
}
