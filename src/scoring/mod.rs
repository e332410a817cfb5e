pub mod bands;
pub mod composite;
pub mod diversity;
pub mod milestone;
pub mod momentum;
pub mod sync;

/// Clamp a raw score into [0,100]. NaN maps to 0 so a degenerate input
/// can never leak into a composite.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_range() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(140.0), 100.0);
    }

    #[test]
    fn non_finite() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0.0);
    }
}
