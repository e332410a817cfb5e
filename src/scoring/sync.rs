//! How evenly a set of growth rates move together.
//!
//! The score is the inverse coefficient of variation: identical rates give
//! 100, rates whose spread is twice their mean (or more) give 0.

use serde::{Deserialize, Serialize};

use super::bands::Ladder;
use super::clamp_score;
use crate::core::GrowthEntry;

/// Below this absolute mean the CV is unstable and is replaced by a fixed value.
const NEAR_ZERO_MEAN: f64 = 0.1;
/// CV assigned when the mean is near zero but the rates still diverge.
const NEAR_ZERO_MEAN_CV: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncAnalysis {
    pub score: f64, // 0-100
    pub label: String,
    pub mean: f64,
    pub std_dev: f64,
    pub cv: f64,
    pub fastest: GrowthEntry,
    pub slowest: GrowthEntry,
    /// Fastest minus slowest, in percentage points.
    pub gap: f64,
}

struct Dispersion {
    mean: f64,
    std_dev: f64,
    cv: f64,
}

fn dispersion(rates: &[f64]) -> Option<Dispersion> {
    if rates.len() < 2 {
        return None;
    }
    // Work on rates divided by the largest magnitude so sums cannot
    // overflow; CV is scale-free and mean/std dev are scaled back.
    let scale = rates.iter().fold(0.0, |m: f64, r| m.max(r.abs()));
    if scale == 0.0 {
        return Some(Dispersion {
            mean: 0.0,
            std_dev: 0.0,
            cv: 0.0,
        });
    }
    let n = rates.len() as f64;
    let scaled_mean = rates.iter().map(|r| r / scale).sum::<f64>() / n;
    let scaled_variance = rates
        .iter()
        .map(|r| (r / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    let scaled_std_dev = scaled_variance.sqrt();
    let mean = scaled_mean * scale;
    let std_dev = scaled_std_dev * scale;

    let cv = if mean.abs() > NEAR_ZERO_MEAN {
        scaled_std_dev / scaled_mean.abs()
    } else if std_dev > NEAR_ZERO_MEAN {
        NEAR_ZERO_MEAN_CV
    } else {
        0.0
    };
    Some(Dispersion { mean, std_dev, cv })
}

fn score_from_cv(cv: f64) -> f64 {
    clamp_score(((1.0 - cv / 2.0) * 100.0).round())
}

/// Sync score (0-100) over the finite rates in `rates`; `None` if fewer than
/// two remain.
pub fn sync_score(rates: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = rates.iter().copied().filter(|r| r.is_finite()).collect();
    dispersion(&finite).map(|d| score_from_cv(d.cv))
}

pub fn analyze(series: &[GrowthEntry], bands: &Ladder<String>) -> Option<SyncAnalysis> {
    let entries: Vec<&GrowthEntry> = series.iter().filter(|e| e.growth_pct.is_finite()).collect();
    let rates: Vec<f64> = entries.iter().map(|e| e.growth_pct).collect();
    let Dispersion { mean, std_dev, cv } = dispersion(&rates)?;
    let score = score_from_cv(cv);

    // Earliest entry wins ties in both directions.
    let fastest = entries
        .iter()
        .copied()
        .reduce(|best, e| if e.growth_pct > best.growth_pct { e } else { best })?;
    let slowest = entries
        .iter()
        .copied()
        .reduce(|worst, e| if e.growth_pct < worst.growth_pct { e } else { worst })?;

    Some(SyncAnalysis {
        score,
        label: bands.label(score).to_string(),
        mean,
        std_dev,
        cv,
        gap: fastest.growth_pct - slowest.growth_pct,
        fastest: fastest.clone(),
        slowest: slowest.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandConfig;
    use proptest::prelude::*;

    fn entry(label: &str, growth_pct: f64) -> GrowthEntry {
        GrowthEntry {
            label: label.into(),
            growth_pct,
        }
    }

    #[test]
    fn needs_two_rates() {
        assert_eq!(sync_score(&[]), None);
        assert_eq!(sync_score(&[4.0]), None);
    }

    #[test]
    fn nan_rates_are_dropped() {
        assert_eq!(sync_score(&[4.0, f64::NAN]), None);
        assert_eq!(sync_score(&[4.0, f64::NAN, 4.0]), Some(100.0));
    }

    #[test]
    fn identical_rates_are_fully_synced() {
        assert_eq!(sync_score(&[5.0, 5.0, 5.0]), Some(100.0));
        assert_eq!(sync_score(&[-3.0, -3.0]), Some(100.0));
    }

    #[test]
    fn worked_example() {
        // mean 10.33, std dev 1.25, cv 0.121
        assert_eq!(sync_score(&[10.0, 12.0, 9.0]), Some(94.0));
    }

    #[test]
    fn huge_rates_do_not_overflow() {
        assert_eq!(sync_score(&[1e308, 1e308]), Some(100.0));
        assert_eq!(sync_score(&[f64::MAX, f64::MAX, f64::MAX]), Some(100.0));
        // Same shape as the worked example, scaled up
        assert_eq!(sync_score(&[10e300, 12e300, 9e300]), Some(94.0));
    }

    #[test]
    fn all_zero_rates_are_synced() {
        assert_eq!(sync_score(&[0.0, 0.0]), Some(100.0));
    }

    #[test]
    fn divergent_rates_score_zero() {
        // mean 10, std dev 30, cv 3
        assert_eq!(sync_score(&[40.0, -20.0]), Some(0.0));
    }

    #[test]
    fn near_zero_mean_with_spread() {
        // mean 0, std dev 5 -> cv forced to 2
        assert_eq!(sync_score(&[5.0, -5.0]), Some(0.0));
    }

    #[test]
    fn near_zero_mean_without_spread() {
        assert_eq!(sync_score(&[0.05, 0.05]), Some(100.0));
        assert_eq!(sync_score(&[0.0, 0.1]), Some(100.0));
    }

    #[test]
    fn analysis_reports_extremes() {
        let bands = BandConfig::default().sync;
        let a = analyze(
            &[entry("Spotify", 10.0), entry("TikTok", 12.0), entry("YouTube", 9.0)],
            &bands,
        )
        .unwrap();
        assert_eq!(a.score, 94.0);
        assert_eq!(a.label, "Highly Synced");
        assert_eq!(a.fastest.label, "TikTok");
        assert_eq!(a.slowest.label, "YouTube");
        assert!((a.gap - 3.0).abs() < 1e-9);
        assert!((a.mean - 31.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn extremes_use_raw_growth_not_magnitude() {
        let bands = BandConfig::default().sync;
        let a = analyze(&[entry("a", -30.0), entry("b", 2.0)], &bands).unwrap();
        assert_eq!(a.fastest.label, "b");
        assert_eq!(a.slowest.label, "a");
        assert!((a.gap - 32.0).abs() < 1e-9);
        // mean -14, std dev 16, cv 1.14
        assert_eq!(a.score, 43.0);
        assert_eq!(a.label, "Moderate");
    }

    #[test]
    fn analysis_bands() {
        let bands = BandConfig::default().sync;
        assert_eq!(bands.label(80.0), "Highly Synced");
        assert_eq!(bands.label(60.0), "Well Synced");
        assert_eq!(bands.label(40.0), "Moderate");
        assert_eq!(bands.label(20.0), "Imbalanced");
        assert_eq!(bands.label(19.0), "Disconnected");
    }

    proptest! {
        #[test]
        fn score_in_range(rates in prop::collection::vec(-1e6f64..1e6, 2..10)) {
            let s = sync_score(&rates).unwrap();
            prop_assert!((0.0..=100.0).contains(&s));
        }

        #[test]
        fn identical_rates_always_score_hundred(
            rate in prop_oneof![-1e6f64..1e6, 1e300f64..f64::MAX],
            n in 2usize..10
        ) {
            prop_assert_eq!(sync_score(&vec![rate; n]), Some(100.0));
        }
    }
}
