use serde::{Deserialize, Serialize};

use crate::error::LadderError;

/// Which side of each bound a value must fall on to match a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Inclusive lower bounds, steps sorted high to low.
    AtLeast,
    /// Inclusive upper bounds, steps sorted low to high.
    AtMost,
}

impl Order {
    fn name(self) -> &'static str {
        match self {
            Order::AtLeast => "at_least",
            Order::AtMost => "at_most",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<L> {
    pub bound: f64,
    pub label: L,
}

/// Ordered breakpoint table. Steps are checked in order and the first match
/// wins; values matching no step (including NaN) get the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder<L> {
    pub order: Order,
    pub steps: Vec<Step<L>>,
    pub fallback: L,
}

impl<L> Ladder<L> {
    /// Build a lower-bound ladder from `(bound, label)` pairs, highest first.
    pub fn at_least(steps: impl IntoIterator<Item = (f64, L)>, fallback: L) -> Self {
        Self::build(Order::AtLeast, steps, fallback)
    }

    /// Build an upper-bound ladder from `(bound, label)` pairs, lowest first.
    pub fn at_most(steps: impl IntoIterator<Item = (f64, L)>, fallback: L) -> Self {
        Self::build(Order::AtMost, steps, fallback)
    }

    fn build(order: Order, steps: impl IntoIterator<Item = (f64, L)>, fallback: L) -> Self {
        Self {
            order,
            steps: steps
                .into_iter()
                .map(|(bound, label)| Step { bound, label })
                .collect(),
            fallback,
        }
    }

    pub fn classify(&self, value: f64) -> &L {
        self.steps
            .iter()
            .find(|step| match self.order {
                Order::AtLeast => value >= step.bound,
                Order::AtMost => value <= step.bound,
            })
            .map(|step| &step.label)
            .unwrap_or(&self.fallback)
    }

    /// Check that bounds are finite and strictly ordered for the ladder's
    /// direction, so that first-match-wins equals best-match-wins.
    pub fn validate(&self) -> Result<(), LadderError> {
        for (index, step) in self.steps.iter().enumerate() {
            if !step.bound.is_finite() {
                return Err(LadderError::NonFiniteBound { index });
            }
            if index == 0 {
                continue;
            }
            let prev = self.steps[index - 1].bound;
            let ordered = match self.order {
                Order::AtLeast => step.bound < prev,
                Order::AtMost => step.bound > prev,
            };
            if !ordered {
                return Err(LadderError::OutOfOrder {
                    index,
                    bound: step.bound,
                    order: self.order.name(),
                });
            }
        }
        Ok(())
    }
}

impl Ladder<String> {
    /// Convenience for building text ladders from string literals.
    pub fn labels(order: Order, steps: &[(f64, &str)], fallback: &str) -> Self {
        Self::build(
            order,
            steps.iter().map(|&(bound, label)| (bound, label.to_string())),
            fallback.to_string(),
        )
    }

    pub fn label(&self, value: f64) -> &str {
        self.classify(value).as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades() -> Ladder<String> {
        Ladder::labels(
            Order::AtLeast,
            &[(90.0, "A"), (80.0, "B"), (70.0, "C")],
            "F",
        )
    }

    #[test]
    fn lower_bound_is_inclusive() {
        let ladder = grades();
        assert_eq!(ladder.label(90.0), "A");
        assert_eq!(ladder.label(89.999), "B");
        assert_eq!(ladder.label(80.0), "B");
        assert_eq!(ladder.label(70.0), "C");
    }

    #[test]
    fn falls_through_to_fallback() {
        let ladder = grades();
        assert_eq!(ladder.label(69.9), "F");
        assert_eq!(ladder.label(-5.0), "F");
    }

    #[test]
    fn nan_gets_fallback() {
        assert_eq!(grades().label(f64::NAN), "F");
    }

    #[test]
    fn upper_bound_ladder() {
        let pace = Ladder::labels(Order::AtMost, &[(30.0, "fast"), (90.0, "ok")], "slow");
        assert_eq!(pace.label(1.0), "fast");
        assert_eq!(pace.label(30.0), "fast");
        assert_eq!(pace.label(31.0), "ok");
        assert_eq!(pace.label(90.0), "ok");
        assert_eq!(pace.label(91.0), "slow");
    }

    #[test]
    fn generic_labels() {
        let ladder = Ladder::at_least([(10.0, 2u8), (5.0, 1u8)], 0u8);
        assert_eq!(*ladder.classify(12.0), 2);
        assert_eq!(*ladder.classify(7.0), 1);
        assert_eq!(*ladder.classify(1.0), 0);
    }

    #[test]
    fn validate_accepts_ordered() {
        assert!(grades().validate().is_ok());
        let empty: Ladder<String> = Ladder::labels(Order::AtMost, &[], "x");
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn validate_rejects_misordered() {
        let ladder = Ladder::labels(Order::AtLeast, &[(70.0, "C"), (90.0, "A")], "F");
        assert_eq!(
            ladder.validate(),
            Err(LadderError::OutOfOrder {
                index: 1,
                bound: 90.0,
                order: "at_least",
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_bounds() {
        let ladder = Ladder::labels(Order::AtMost, &[(30.0, "a"), (30.0, "b")], "c");
        assert!(ladder.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_bound() {
        let ladder = Ladder::labels(Order::AtLeast, &[(f64::NAN, "A")], "F");
        assert_eq!(
            ladder.validate(),
            Err(LadderError::NonFiniteBound { index: 0 })
        );
    }

    #[test]
    fn deserializes_from_toml() {
        let ladder: Ladder<String> = toml::from_str(
            r#"
            order = "at_most"
            fallback = "Long road"
            steps = [
                { bound = 30.0, label = "On fire" },
                { bound = 90.0, label = "Strong pace" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(ladder.order, Order::AtMost);
        assert_eq!(ladder.label(45.0), "Strong pace");
        assert_eq!(ladder.label(400.0), "Long road");
    }
}
