use crate::history::AttentionHistory;

/// Detects when accumulated attention crystallizes into a goal.
///
/// At most one goal precipitates per engine lifetime, and only after the
/// history has accumulated `minimum_attention` total dwell, so a handful of
/// early visits cannot crystallize prematurely.
#[derive(Clone, Debug)]
pub struct GoalPrecipitator {
    pub threshold: f64,
    pub minimum_attention: f64,
    precipitated: Option<String>,
}

impl GoalPrecipitator {
    pub fn new(threshold: f64, minimum_attention: f64) -> Self {
        Self {
            threshold,
            minimum_attention,
            precipitated: None,
        }
    }

    /// Returns the newly crystallized goal, if any. Idempotent after the
    /// first precipitation regardless of further history growth.
    pub fn check(&mut self, history: &AttentionHistory) -> Option<String> {
        if self.precipitated.is_some() {
            return None;
        }
        if history.total() < self.minimum_attention {
            return None;
        }
        let (label, salience) = history.most_salient()?;
        if salience >= self.threshold {
            self.precipitated = Some(label.clone());
            return Some(label);
        }
        None
    }

    pub fn precipitated(&self) -> Option<&str> {
        self.precipitated.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heavy_history() -> AttentionHistory {
        let mut h = AttentionHistory::default();
        for _ in 0..6 {
            h.record("well", 1.9);
        }
        h.record("passing", 1.1);
        h
    }

    #[test]
    fn minimum_attention_guards_early_crystallization() {
        let mut p = GoalPrecipitator::new(0.15, 10.0);
        let mut h = AttentionHistory::default();
        h.record("well", 1.9);
        assert_eq!(p.check(&h), None, "total below minimum must not crystallize");
    }

    #[test]
    fn crystallizes_most_salient_above_threshold() {
        let mut p = GoalPrecipitator::new(0.4, 10.0);
        let h = heavy_history();
        assert_eq!(p.check(&h), Some("well".to_string()));
        assert_eq!(p.precipitated(), Some("well"));
    }

    #[test]
    fn at_most_one_precipitation() {
        let mut p = GoalPrecipitator::new(0.4, 10.0);
        let mut h = heavy_history();
        assert!(p.check(&h).is_some());
        for _ in 0..100 {
            h.record("other", 5.0);
            assert_eq!(p.check(&h), None);
        }
        assert_eq!(p.precipitated(), Some("well"));
    }

    #[test]
    fn below_threshold_salience_does_not_crystallize() {
        let mut p = GoalPrecipitator::new(0.95, 10.0);
        let h = heavy_history();
        assert_eq!(p.check(&h), None);
        assert_eq!(p.precipitated(), None);
    }
}
