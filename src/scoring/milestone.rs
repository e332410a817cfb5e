use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bands::Ladder;
use crate::core::MilestoneTarget;

/// ETA for a milestone at the current daily pace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub days_to_target: u64,
    pub projected_date: NaiveDate,
    pub pace_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MilestoneOutlook {
    Complete,
    Projected(Projection),
    /// Flat, declining or unknown growth: no ETA is given.
    Stalled,
}

/// Project when `current` reaches `target` growing `daily_growth` per day.
///
/// Returns `None` when the target is already reached, when growth is unknown
/// or not positive, or when the date would fall outside the calendar.
pub fn project(
    current: f64,
    target: f64,
    daily_growth: Option<f64>,
    today: NaiveDate,
    pace: &Ladder<String>,
) -> Option<Projection> {
    if !(current.is_finite() && target.is_finite()) || current >= target {
        return None;
    }
    let daily_growth = daily_growth.filter(|g| g.is_finite() && *g > 0.0)?;

    let days = ((target - current) / daily_growth).ceil();
    if !(days.is_finite() && days <= u32::MAX as f64) {
        return None;
    }
    let days_to_target = days as u64;
    let projected_date = today.checked_add_days(Days::new(days_to_target))?;

    Some(Projection {
        days_to_target,
        projected_date,
        pace_label: pace.label(days).to_string(),
    })
}

pub fn outlook(milestone: &MilestoneTarget, today: NaiveDate, pace: &Ladder<String>) -> MilestoneOutlook {
    if milestone.is_complete() {
        return MilestoneOutlook::Complete;
    }
    match project(milestone.current, milestone.target, milestone.daily_growth, today, pace) {
        Some(projection) => MilestoneOutlook::Projected(projection),
        None => MilestoneOutlook::Stalled,
    }
}

/// Percent of the way to `target`, clamped to [0,100].
pub fn progress_pct(current: f64, target: f64) -> Option<f64> {
    if !(target.is_finite() && target > 0.0 && current.is_finite()) {
        return None;
    }
    Some((current / target * 100.0).clamp(0.0, 100.0))
}
