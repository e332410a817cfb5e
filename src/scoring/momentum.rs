use serde::{Deserialize, Serialize};

use super::bands::Ladder;
use super::clamp_score;
use super::composite::{self, Contribution};
use crate::config::MomentumConfig;
use crate::core::ScoredDimension;
use crate::core::delta::streams_per_listener;
use crate::error::ScoreError;

/// Raw per-track signals for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSignals {
    pub name: String,
    /// Streams per day, latest period.
    pub daily_rate: f64,
    /// Social creates (videos, shares) using the track.
    pub total_creates: f64,
    pub total_volume: f64,
    #[serde(default)]
    pub prior_volume: Option<f64>,
    /// Saves per day, latest period.
    pub save_count: f64,
    pub listener_count: f64,
    pub age_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMomentum {
    pub rank: usize,
    pub name: String,
    pub score: f64, // 0-100
    pub grade: String,
    pub breakdown: Vec<Contribution>,
}

/// One axis of track momentum. Returns a score in [0,100].
pub trait Dimension {
    fn name(&self) -> &str;
    fn weight(&self) -> f64;
    fn evaluate(&self, track: &TrackSignals) -> f64;
}

/// `num / den`, or 0 when the denominator is not a positive finite number.
fn ratio(num: f64, den: f64) -> f64 {
    if den.is_finite() && den > 0.0 { num / den } else { 0.0 }
}

// --- Dimensions ---

/// Daily streams against what a track of its age is expected to do.
struct Velocity {
    weight: f64,
    expectations: Ladder<f64>,
}
impl Dimension for Velocity {
    fn name(&self) -> &str { "velocity" }
    fn weight(&self) -> f64 { self.weight }
    fn evaluate(&self, track: &TrackSignals) -> f64 {
        let expected = *self.expectations.classify(track.age_days);
        clamp_score(ratio(track.daily_rate, expected) * 100.0)
    }
}

/// Social creates per 1,000 streams; 50 per 1,000 maps to 100.
struct Virality {
    weight: f64,
}
impl Dimension for Virality {
    fn name(&self) -> &str { "virality" }
    fn weight(&self) -> f64 { self.weight }
    fn evaluate(&self, track: &TrackSignals) -> f64 {
        let per_thousand = ratio(track.total_creates, track.total_volume) * 1000.0;
        clamp_score(per_thousand * 2.0)
    }
}

/// Period-over-period volume growth; +50% maps to 100, no history is 50.
struct Acceleration {
    weight: f64,
}
impl Dimension for Acceleration {
    fn name(&self) -> &str { "acceleration" }
    fn weight(&self) -> f64 { self.weight }
    fn evaluate(&self, track: &TrackSignals) -> f64 {
        match track.prior_volume {
            Some(prior) if prior.is_finite() && prior > 0.0 => {
                let growth_pct = (track.total_volume - prior) / prior * 100.0;
                clamp_score(growth_pct * 2.0)
            }
            _ => 50.0,
        }
    }
}

/// Save rate and replay depth (streams per listener).
struct Engagement {
    weight: f64,
}
impl Dimension for Engagement {
    fn name(&self) -> &str { "engagement" }
    fn weight(&self) -> f64 { self.weight }
    fn evaluate(&self, track: &TrackSignals) -> f64 {
        let save_rate = ratio(track.save_count, track.daily_rate) * 100.0;
        let replay_depth = streams_per_listener(track.daily_rate, track.listener_count).unwrap_or(0.0);
        clamp_score(save_rate * 8.0 + replay_depth * 20.0)
    }
}

/// Scores tracks on all momentum dimensions and grades the composite.
pub struct MomentumScorer {
    dimensions: Vec<Box<dyn Dimension + Send + Sync>>,
    grades: Ladder<String>,
}

impl MomentumScorer {
    pub fn new(config: &MomentumConfig) -> Self {
        let w = &config.weights;
        Self {
            dimensions: vec![
                Box::new(Velocity {
                    weight: w.velocity,
                    expectations: config.velocity_expectations.clone(),
                }),
                Box::new(Virality { weight: w.virality }),
                Box::new(Acceleration { weight: w.acceleration }),
                Box::new(Engagement { weight: w.engagement }),
            ],
            grades: config.grades.clone(),
        }
    }

    /// Score a single track. `rank` is left at 0; see [`MomentumScorer::rank`].
    pub fn score(&self, track: &TrackSignals) -> Result<TrackMomentum, ScoreError> {
        let dimensions: Vec<ScoredDimension> = self
            .dimensions
            .iter()
            .map(|d| ScoredDimension::new(d.name(), d.evaluate(track), d.weight()))
            .collect();

        let graded = composite::grade(&dimensions, &self.grades)?;
        Ok(TrackMomentum {
            rank: 0,
            name: track.name.clone(),
            score: graded.score,
            grade: graded.label,
            breakdown: graded.breakdown,
        })
    }

    /// Score all tracks and order them by momentum, highest first. Ties keep
    /// input order.
    pub fn rank(&self, tracks: &[TrackSignals]) -> Result<Vec<TrackMomentum>, ScoreError> {
        let mut scored = tracks
            .iter()
            .map(|t| self.score(t))
            .collect::<Result<Vec<_>, _>>()?;
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (i, track) in scored.iter_mut().enumerate() {
            track.rank = i + 1;
        }
        Ok(scored)
    }
}
