use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::delta::daily_growth;
use crate::core::{CategoryShare, GrowthEntry, MilestoneTarget, NamedMetric, ScoredDimension, SentimentCounts};
use crate::error::SnapshotError;
use crate::insights::sentiment::{self, SentimentSummary};
use crate::insights::{self, Insight, SeverityClassifier};
use crate::scoring::composite::{self, CompositeGrade};
use crate::scoring::diversity::{self, DistributionAnalysis};
use crate::scoring::milestone::{self, MilestoneOutlook};
use crate::scoring::momentum::{MomentumScorer, TrackMomentum, TrackSignals};
use crate::scoring::sync::{self, SyncAnalysis};

/// Everything the dashboard knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    pub as_of: Option<NaiveDate>,
    /// Days between this snapshot and the one its priors come from.
    pub period_days: Option<f64>,
    pub metrics: Vec<NamedMetric>,
    pub health: Vec<ScoredDimension>,
    pub platform_shares: Vec<CategoryShare>,
    pub growth: Vec<GrowthEntry>,
    pub milestones: Vec<MilestoneInput>,
    pub tracks: Vec<TrackSignals>,
    pub sentiment: Option<SentimentCounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneInput {
    pub label: String,
    pub current: f64,
    #[serde(default)]
    pub prior: Option<f64>,
    pub target: f64,
}

impl DashboardSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&contents)?;
        info!(
            "Snapshot loaded from {}: {} metrics, {} tracks",
            path.display(),
            snapshot.metrics.len(),
            snapshot.tracks.len()
        );
        Ok(snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub name: String,
    pub current: f64,
    pub prior: Option<f64>,
    pub pct_change: Option<f64>,
    pub abs_change: Option<f64>,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneReport {
    pub label: String,
    pub current: f64,
    pub target: f64,
    pub progress_pct: Option<f64>,
    pub daily_growth: Option<f64>,
    pub outlook: MilestoneOutlook,
}

/// Every analyzer's output for one snapshot. Sections whose input is
/// missing or degenerate are `None` or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub metrics: Vec<MetricDelta>,
    pub insights: Vec<Insight>,
    pub health: Option<CompositeGrade>,
    pub distribution: Option<DistributionAnalysis>,
    pub sync: Option<SyncAnalysis>,
    pub milestones: Vec<MilestoneReport>,
    pub tracks: Vec<TrackMomentum>,
    pub sentiment: Option<SentimentSummary>,
}

/// Runs all analyzers with one configuration.
pub struct Scorer {
    config: Config,
    momentum: MomentumScorer,
    severity: SeverityClassifier,
}

impl Scorer {
    pub fn new(config: Config) -> Self {
        let momentum = MomentumScorer::new(&config.momentum);
        let severity = SeverityClassifier::new(&config.alerts);
        Self {
            config,
            momentum,
            severity,
        }
    }

    /// Score a snapshot. `today` anchors milestone projections.
    pub fn report(&self, snapshot: &DashboardSnapshot, today: NaiveDate) -> DashboardReport {
        let bands = &self.config.bands;

        let metrics = snapshot
            .metrics
            .iter()
            .map(|m| {
                let pct_change = m.point.pct_change();
                MetricDelta {
                    name: m.name.clone(),
                    current: m.point.current,
                    prior: m.point.prior,
                    pct_change,
                    abs_change: m.point.abs_change(),
                    trend: pct_change.map(|p| insights::growth_label(p, &bands.growth).to_string()),
                }
            })
            .collect();

        let insights = insights::generate(&snapshot.metrics, &self.severity);

        let health = if snapshot.health.is_empty() {
            None
        } else {
            match composite::grade(&snapshot.health, &bands.grade) {
                Ok(grade) => Some(grade),
                Err(e) => {
                    warn!("Skipping health grade: {e}");
                    None
                }
            }
        };

        let distribution = diversity::analyze(
            &snapshot.platform_shares,
            self.config.distribution.top_k,
            &bands.diversity,
        );
        if distribution.is_none() && !snapshot.platform_shares.is_empty() {
            debug!(
                "Distribution not computable from {} platform shares",
                snapshot.platform_shares.len()
            );
        }

        let sync = sync::analyze(&snapshot.growth, &bands.sync);
        if sync.is_none() && !snapshot.growth.is_empty() {
            debug!("Sync not computable from {} growth entries", snapshot.growth.len());
        }

        let milestones = self.milestones(snapshot, today);

        let tracks = match self.momentum.rank(&snapshot.tracks) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("Skipping track momentum: {e}");
                Vec::new()
            }
        };

        let sentiment = snapshot
            .sentiment
            .as_ref()
            .and_then(|counts| sentiment::summarize(counts, &bands.sentiment));

        DashboardReport {
            as_of: today,
            metrics,
            insights,
            health,
            distribution,
            sync,
            milestones,
            tracks,
            sentiment,
        }
    }

    fn milestones(&self, snapshot: &DashboardSnapshot, today: NaiveDate) -> Vec<MilestoneReport> {
        if snapshot.milestones.is_empty() {
            return Vec::new();
        }
        let fallback = self.config.milestone.fallback_period_days;
        let period_days = match snapshot.period_days {
            Some(days) if days.is_finite() && days > 0.0 => days,
            Some(days) => {
                warn!("Ignoring invalid period_days {days}, assuming {fallback}");
                fallback
            }
            None => {
                debug!("Snapshot has no period_days, assuming {fallback}");
                fallback
            }
        };

        snapshot
            .milestones
            .iter()
            .map(|m| {
                let target = MilestoneTarget {
                    label: m.label.clone(),
                    current: m.current,
                    target: m.target,
                    daily_growth: daily_growth(m.current, m.prior, period_days),
                };
                MilestoneReport {
                    progress_pct: milestone::progress_pct(target.current, target.target),
                    outlook: milestone::outlook(&target, today, &self.config.bands.pace),
                    daily_growth: target.daily_growth,
                    label: target.label,
                    current: target.current,
                    target: target.target,
                }
            })
            .collect()
    }
}
