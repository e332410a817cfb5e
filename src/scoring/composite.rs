use serde::{Deserialize, Serialize};

use super::bands::Ladder;
use super::clamp_score;
use crate::core::ScoredDimension;
use crate::error::ScoreError;

/// One dimension's share of a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub label: String,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

/// A composite score with its grade label and per-dimension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGrade {
    pub score: f64, // 0-100
    pub label: String,
    pub breakdown: Vec<Contribution>,
}

/// Weighted mean of dimension scores, rounded to a whole number (0-100).
///
/// Scores are clamped to [0,100] before weighting, so the result stays in
/// range even when a caller forgot to normalize.
pub fn composite(dimensions: &[ScoredDimension]) -> Result<f64, ScoreError> {
    let contributions = contributions(dimensions)?;
    weighted_mean(&contributions)
}

/// Composite score plus its label from `grades`.
pub fn grade(dimensions: &[ScoredDimension], grades: &Ladder<String>) -> Result<CompositeGrade, ScoreError> {
    let breakdown = contributions(dimensions)?;
    let score = weighted_mean(&breakdown)?;
    Ok(CompositeGrade {
        score,
        label: grades.label(score).to_string(),
        breakdown,
    })
}

fn contributions(dimensions: &[ScoredDimension]) -> Result<Vec<Contribution>, ScoreError> {
    if dimensions.is_empty() {
        return Err(ScoreError::NoDimensions);
    }
    dimensions
        .iter()
        .map(|d| {
            if !(d.weight.is_finite() && d.weight >= 0.0) {
                return Err(ScoreError::InvalidWeight {
                    label: d.label.clone(),
                    weight: d.weight,
                });
            }
            let score = clamp_score(d.score);
            Ok(Contribution {
                label: d.label.clone(),
                score,
                weight: d.weight,
                weighted_score: score * d.weight,
            })
        })
        .collect()
}

fn weighted_mean(contributions: &[Contribution]) -> Result<f64, ScoreError> {
    // Weights are scaled by the largest one so the sums cannot overflow.
    let max_weight = contributions.iter().map(|c| c.weight).fold(0.0, f64::max);
    if max_weight <= 0.0 {
        return Err(ScoreError::ZeroTotalWeight);
    }
    let (total_weight, total_weighted) = contributions.iter().fold((0.0, 0.0), |(w, ws), c| {
        let scaled = c.weight / max_weight;
        (w + scaled, ws + c.score * scaled)
    });
    Ok(clamp_score((total_weighted / total_weight).round()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BandConfig;
    use proptest::prelude::*;

    fn dim(label: &str, score: f64, weight: f64) -> ScoredDimension {
        ScoredDimension::new(label, score, weight)
    }

    #[test]
    fn empty_dimensions() {
        assert_eq!(composite(&[]), Err(ScoreError::NoDimensions));
    }

    #[test]
    fn zero_total_weight() {
        let dims = vec![dim("a", 80.0, 0.0), dim("b", 60.0, 0.0)];
        assert_eq!(composite(&dims), Err(ScoreError::ZeroTotalWeight));
    }

    #[test]
    fn negative_weight_rejected() {
        let dims = vec![dim("a", 80.0, 1.0), dim("b", 60.0, -0.5)];
        assert_eq!(
            composite(&dims),
            Err(ScoreError::InvalidWeight {
                label: "b".into(),
                weight: -0.5,
            })
        );
    }

    #[test]
    fn five_dimension_health_score() {
        let dims = vec![
            dim("streaming", 80.0, 0.25),
            dim("social", 60.0, 0.15),
            dim("playlists", 90.0, 0.25),
            dim("press", 70.0, 0.15),
            dim("sentiment", 50.0, 0.20),
        ];
        // 20 + 9 + 22.5 + 10.5 + 10 = 72
        assert_eq!(composite(&dims), Ok(72.0));
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let dims = vec![dim("a", 100.0, 6.0), dim("b", 50.0, 4.0)];
        // (600 + 200) / 10
        assert_eq!(composite(&dims), Ok(80.0));
    }

    #[test]
    fn huge_weights_do_not_overflow() {
        let dims = vec![dim("a", 80.0, 1e308), dim("b", 80.0, 1e308)];
        assert_eq!(composite(&dims), Ok(80.0));
        let dims = vec![dim("a", 100.0, f64::MAX), dim("b", 0.0, f64::MAX)];
        assert_eq!(composite(&dims), Ok(50.0));
    }

    #[test]
    fn rounds_to_whole_number() {
        let dims = vec![dim("a", 70.0, 1.0), dim("b", 71.0, 1.0)];
        assert_eq!(composite(&dims), Ok(71.0)); // 70.5 rounds away from zero
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let dims = vec![dim("a", 250.0, 1.0), dim("b", -40.0, 1.0)];
        // 100 and 0 after clamping
        assert_eq!(composite(&dims), Ok(50.0));
    }

    #[test]
    fn grade_labels_follow_bands() {
        let grades = BandConfig::default().grade;
        let g = grade(&[dim("a", 90.0, 1.0)], &grades).unwrap();
        assert_eq!(g.label, "Exceptional");
        let g = grade(&[dim("a", 72.0, 1.0)], &grades).unwrap();
        assert_eq!(g.label, "Good");
        let g = grade(&[dim("a", 39.0, 1.0)], &grades).unwrap();
        assert_eq!(g.label, "Needs Work");
    }

    #[test]
    fn grade_breakdown() {
        let grades = BandConfig::default().grade;
        let g = grade(&[dim("a", 80.0, 0.5), dim("b", 40.0, 0.5)], &grades).unwrap();
        assert_eq!(g.score, 60.0);
        assert_eq!(g.breakdown.len(), 2);
        assert_eq!(g.breakdown[0].weighted_score, 40.0);
        assert_eq!(g.breakdown[1].weighted_score, 20.0);
    }

    proptest! {
        #[test]
        fn uniform_scores_give_that_score(
            score in 0u32..=100,
            weights in prop::collection::vec(
                prop_oneof![0.01f64..100.0, 1e300f64..f64::MAX],
                1..8
            )
        ) {
            let dims: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| dim(&format!("d{i}"), score as f64, *w))
                .collect();
            prop_assert_eq!(composite(&dims), Ok(score as f64));
        }

        #[test]
        fn always_in_range(
            dims in prop::collection::vec((-1e6f64..1e6, 0.01f64..10.0), 1..10)
        ) {
            let dims: Vec<_> = dims
                .iter()
                .map(|(s, w)| dim("d", *s, *w))
                .collect();
            let score = composite(&dims).unwrap();
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
