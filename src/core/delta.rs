//! Period-over-period arithmetic on raw metrics.
//!
//! Every helper returns `None` when the comparison is undefined (no prior,
//! zero denominator) rather than 0, NaN or infinity.

/// Signed percent change from `prior` to `current`, unclamped.
pub fn pct_change(current: f64, prior: Option<f64>) -> Option<f64> {
    let prior = prior.filter(|p| p.is_finite() && *p != 0.0)?;
    if !current.is_finite() {
        return None;
    }
    Some((current - prior) / prior * 100.0)
}

/// Absolute change from `prior` to `current`.
pub fn abs_change(current: f64, prior: Option<f64>) -> Option<f64> {
    let prior = prior.filter(|p| p.is_finite())?;
    current.is_finite().then(|| current - prior)
}

/// Average change per day between two snapshots `elapsed_days` apart.
pub fn daily_growth(current: f64, prior: Option<f64>, elapsed_days: f64) -> Option<f64> {
    if !(elapsed_days.is_finite() && elapsed_days > 0.0) {
        return None;
    }
    abs_change(current, prior).map(|change| change / elapsed_days)
}

/// Streams per listener (SPL), a replay-depth proxy.
pub fn streams_per_listener(streams: f64, listeners: f64) -> Option<f64> {
    if !(listeners.is_finite() && listeners > 0.0 && streams.is_finite()) {
        return None;
    }
    Some(streams / listeners)
}
