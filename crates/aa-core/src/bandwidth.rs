use serde::{Deserialize, Serialize};

/// Attention as a finite resource.
///
/// Value semantics: every update returns a new snapshot, so the engine's
/// current resource state is always an inspectable value. `current` may go
/// negative after a `deplete` (the overdraft for the step just taken); the
/// next `recover` or `reset_to` clamps it back into `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bandwidth {
    pub current: f64,
    pub maximum: f64,
}

impl Bandwidth {
    /// Full resource at the given ceiling. `maximum` must be positive.
    pub fn full(maximum: f64) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn with_current(current: f64, maximum: f64) -> Self {
        Self { current, maximum }
    }

    pub fn ratio(&self) -> f64 {
        self.current / self.maximum
    }

    pub fn exhausted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.current >= cost
    }

    pub fn above_threshold(&self, threshold: f64) -> bool {
        self.ratio() > threshold
    }

    /// Subtract unconditionally. Overdraft is permitted and meaningful:
    /// exhaustion is detected from the negative balance one check later.
    pub fn deplete(self, amount: f64) -> Self {
        Self {
            current: self.current - amount,
            ..self
        }
    }

    /// Add and clamp into `[0, maximum]`.
    pub fn recover(self, rate: f64) -> Self {
        Self {
            current: (self.current + rate).clamp(0.0, self.maximum),
            ..self
        }
    }

    /// Set `current` directly (used after forced returns).
    pub fn reset_to(self, value: f64) -> Self {
        Self {
            current: value,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn deplete_may_overdraft() {
        let b = Bandwidth::full(10.0).deplete(15.0);
        assert_eq!(b.current, -5.0);
        assert!(b.exhausted());
    }

    #[test]
    fn recover_clamps_to_maximum() {
        let b = Bandwidth::with_current(95.0, 100.0).recover(20.0);
        assert_eq!(b.current, 100.0);
    }

    #[test]
    fn recover_clamps_overdraft_to_zero() {
        let b = Bandwidth::with_current(-50.0, 100.0).recover(20.0);
        assert_eq!(b.current, 0.0);
    }

    #[test]
    fn reset_to_sets_directly() {
        let b = Bandwidth::with_current(-3.0, 100.0).reset_to(20.0);
        assert_eq!(b.current, 20.0);
        assert_eq!(b.maximum, 100.0);
    }

    #[test]
    fn threshold_is_strict() {
        let b = Bandwidth::with_current(30.0, 100.0);
        assert!(!b.above_threshold(0.3));
        assert!(b.above_threshold(0.29));
    }

    #[test]
    fn can_afford_exact_cost() {
        let b = Bandwidth::with_current(20.0, 100.0);
        assert!(b.can_afford(20.0));
        assert!(!b.can_afford(20.1));
    }

    proptest! {
        #[test]
        fn recover_lands_in_range(current in -500.0..500.0f64, rate in 0.0..500.0f64) {
            let b = Bandwidth::with_current(current, 100.0).recover(rate);
            prop_assert!(b.current >= 0.0);
            prop_assert!(b.current <= b.maximum);
        }
    }
}
