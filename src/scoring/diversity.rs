//! Concentration of a total across categories (platforms, regions, sources).
//!
//! Diversity is the inverse Herfindahl-Hirschman Index normalized for the
//! number of categories: 0 when one category holds everything, 100 when all
//! categories hold the same amount.

use serde::{Deserialize, Serialize};

use super::bands::Ladder;
use super::clamp_score;
use crate::core::CategoryShare;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionAnalysis {
    pub diversity: f64, // 0-100
    pub label: String,
    pub hhi: f64,
    /// Percent of the total held by the `top_k` largest categories.
    pub top_k_share: f64,
    pub top_k: usize,
    pub leader: String,
    pub leader_share: f64,
}

/// Shares of the total, or `None` for fewer than two categories, a
/// non-positive total, or any negative or non-finite value.
fn shares(values: &[f64]) -> Option<Vec<f64>> {
    if values.len() < 2 || values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return None;
    }
    // Scale by the largest value first so the total cannot overflow.
    let max = values.iter().fold(0.0, |m: f64, v| m.max(*v));
    if max <= 0.0 {
        return None;
    }
    let total: f64 = values.iter().map(|v| v / max).sum();
    Some(values.iter().map(|v| v / max / total).collect())
}

/// Herfindahl-Hirschman Index: sum of squared shares, in [1/N, 1].
pub fn hhi(values: &[f64]) -> Option<f64> {
    shares(values).map(|s| s.iter().map(|x| x * x).sum())
}

/// Normalized diversity, 0-100, rounded.
pub fn diversity(values: &[f64]) -> Option<f64> {
    let n = values.len() as f64;
    let hhi = hhi(values)?;
    let normalized = (1.0 - hhi) / (1.0 - 1.0 / n) * 100.0;
    Some(clamp_score(normalized.round()))
}

/// Percent of the total held by the `k` largest values. Not normalized.
pub fn concentration_ratio(values: &[f64], k: usize) -> Option<f64> {
    let mut shares = shares(values)?;
    shares.sort_by(|a, b| b.total_cmp(a));
    Some(shares.iter().take(k).sum::<f64>() * 100.0)
}

pub fn analyze(shares: &[CategoryShare], top_k: usize, bands: &Ladder<String>) -> Option<DistributionAnalysis> {
    let values: Vec<f64> = shares.iter().map(|s| s.value).collect();
    let diversity = diversity(&values)?;
    let hhi = hhi(&values)?;
    let top_k_share = concentration_ratio(&values, top_k)?;

    let fractions = self::shares(&values)?;
    // First category wins ties.
    let (leader, leader_fraction) = shares
        .iter()
        .zip(fractions)
        .reduce(|best, s| if s.1 > best.1 { s } else { best })?;

    Some(DistributionAnalysis {
        diversity,
        label: bands.label(diversity).to_string(),
        hhi,
        top_k_share,
        top_k,
        leader: leader.category.clone(),
        leader_share: leader_fraction * 100.0,
    })
}
