use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scoring::bands::{Ladder, Order};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub momentum: MomentumConfig,
    pub bands: BandConfig,
    pub alerts: AlertThresholds,
    pub milestone: MilestoneConfig,
    pub distribution: DistributionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub weights: MomentumWeights,
    /// Expected daily streams by track age in days (upper bounds). Tracks
    /// older than every step are held to the fallback.
    pub velocity_expectations: Ladder<f64>,
    pub grades: Ladder<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumWeights {
    pub velocity: f64,
    pub virality: f64,
    pub acceleration: f64,
    pub engagement: f64,
}

/// Label tables for every classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub grade: Ladder<String>,
    pub sync: Ladder<String>,
    pub diversity: Ladder<String>,
    /// Days to target, upper bounds.
    pub pace: Ladder<String>,
    /// Percent growth.
    pub growth: Ladder<String>,
    /// Net sentiment score.
    pub sentiment: Ladder<String>,
}

/// Absolute percent change needed to raise an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub major: f64,
    pub minor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneConfig {
    /// Days between the two latest snapshots when a snapshot does not say.
    /// Matches a five-day reporting cadence.
    pub fallback_period_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    pub top_k: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            weights: MomentumWeights::default(),
            velocity_expectations: Ladder::at_most(
                [(7.0, 5_000.0), (30.0, 20_000.0), (90.0, 40_000.0)],
                60_000.0,
            ),
            grades: Ladder::labels(
                Order::AtLeast,
                &[(85.0, "On Fire"), (70.0, "Hot"), (55.0, "Rising"), (40.0, "Building")],
                "Early",
            ),
        }
    }
}

impl Default for MomentumWeights {
    fn default() -> Self {
        Self {
            velocity: 0.30,
            virality: 0.25,
            acceleration: 0.25,
            engagement: 0.20,
        }
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            grade: Ladder::labels(
                Order::AtLeast,
                &[
                    (90.0, "Exceptional"),
                    (80.0, "Strong"),
                    (70.0, "Good"),
                    (60.0, "Solid"),
                    (50.0, "Average"),
                    (40.0, "Below Average"),
                ],
                "Needs Work",
            ),
            sync: Ladder::labels(
                Order::AtLeast,
                &[
                    (80.0, "Highly Synced"),
                    (60.0, "Well Synced"),
                    (40.0, "Moderate"),
                    (20.0, "Imbalanced"),
                ],
                "Disconnected",
            ),
            diversity: Ladder::labels(
                Order::AtLeast,
                &[
                    (80.0, "Highly Diversified"),
                    (60.0, "Diversified"),
                    (40.0, "Moderately Concentrated"),
                    (20.0, "Concentrated"),
                ],
                "Highly Concentrated",
            ),
            pace: Ladder::labels(
                Order::AtMost,
                &[
                    (30.0, "On fire"),
                    (90.0, "Strong pace"),
                    (180.0, "Steady"),
                    (365.0, "Slow"),
                ],
                "Long road",
            ),
            growth: Ladder::labels(
                Order::AtLeast,
                &[
                    (25.0, "Surging"),
                    (10.0, "Climbing"),
                    (2.0, "Growing"),
                    (-2.0, "Flat"),
                ],
                "Declining",
            ),
            sentiment: Ladder::labels(
                Order::AtLeast,
                &[
                    (50.0, "Glowing"),
                    (20.0, "Positive"),
                    (-10.0, "Neutral"),
                    (-30.0, "Mixed"),
                ],
                "Negative",
            ),
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            major: 15.0,
            minor: 5.0,
        }
    }
}

impl Default for MilestoneConfig {
    fn default() -> Self {
        Self {
            fallback_period_days: 5.0,
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if the file is
    /// missing, unreadable or invalid.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Invalid config {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ladders = [
            ("bands.grade", &self.bands.grade),
            ("bands.sync", &self.bands.sync),
            ("bands.diversity", &self.bands.diversity),
            ("bands.pace", &self.bands.pace),
            ("bands.growth", &self.bands.growth),
            ("bands.sentiment", &self.bands.sentiment),
            ("momentum.grades", &self.momentum.grades),
        ];
        for (name, ladder) in ladders {
            ladder
                .validate()
                .map_err(|source| ConfigError::Ladder { name, source })?;
        }
        self.momentum
            .velocity_expectations
            .validate()
            .map_err(|source| ConfigError::Ladder {
                name: "momentum.velocity_expectations",
                source,
            })?;

        let w = &self.momentum.weights;
        let weights = [w.velocity, w.virality, w.acceleration, w.engagement];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "momentum weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::Invalid("momentum weights sum to zero".into()));
        }

        if !(self.alerts.minor >= 0.0 && self.alerts.major >= self.alerts.minor) {
            return Err(ConfigError::Invalid(format!(
                "alert thresholds need 0 <= minor <= major, got minor={} major={}",
                self.alerts.minor, self.alerts.major
            )));
        }
        if !(self.milestone.fallback_period_days.is_finite() && self.milestone.fallback_period_days > 0.0) {
            return Err(ConfigError::Invalid(
                "milestone.fallback_period_days must be positive".into(),
            ));
        }
        if self.distribution.top_k == 0 {
            return Err(ConfigError::Invalid("distribution.top_k must be at least 1".into()));
        }
        Ok(())
    }
}
