//! Net Sentiment Score (NSS): positive share minus negative share, in
//! percentage points, so the range is -100 to 100.

use serde::{Deserialize, Serialize};

use crate::core::SentimentCounts;
use crate::scoring::bands::Ladder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub nss: f64,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
    pub mood: String,
}

/// `None` when there are no mentions or a count is negative or not finite.
pub fn net_sentiment(counts: &SentimentCounts) -> Option<f64> {
    shares(counts).map(|(pos, _, neg)| pos - neg)
}

fn shares(counts: &SentimentCounts) -> Option<(f64, f64, f64)> {
    let parts = [counts.positive, counts.neutral, counts.negative];
    if parts.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return None;
    }
    // Scaled by the largest count so the total stays finite.
    let max = parts.iter().fold(0.0, |m: f64, c| m.max(*c));
    if max <= 0.0 {
        return None;
    }
    let total: f64 = parts.iter().map(|c| c / max).sum();
    let pct = |c: f64| c / max / total * 100.0;
    Some((pct(counts.positive), pct(counts.neutral), pct(counts.negative)))
}

pub fn mood(nss: f64, bands: &Ladder<String>) -> &str {
    bands.label(nss)
}

pub fn summarize(counts: &SentimentCounts, bands: &Ladder<String>) -> Option<SentimentSummary> {
    let nss = net_sentiment(counts)?;
    let (positive_pct, neutral_pct, negative_pct) = shares(counts)?;
    Some(SentimentSummary {
        nss,
        positive_pct,
        neutral_pct,
        negative_pct,
        mood: mood(nss, bands).to_string(),
    })
}
