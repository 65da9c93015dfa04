use std::collections::BTreeSet;

/// Mutable traversal state: the path walked so far, accumulated momentum,
/// and an optional goal label. Created fresh on every return to observer
/// mode and on every zoom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub path: Vec<String>,
    pub momentum: f64,
    pub goal: Option<String>,
}

impl Trajectory {
    pub fn with_goal(goal: Option<String>) -> Self {
        Self {
            goal,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// True iff any label appears more than once anywhere in the path,
    /// not just adjacent repeats.
    pub fn has_cycle(&self) -> bool {
        let distinct: BTreeSet<&String> = self.path.iter().collect();
        self.path.len() != distinct.len()
    }

    pub fn is_drifting(&self) -> bool {
        self.path.len() > 5 && self.goal.is_none()
    }

    pub fn high_momentum_without_goal(&self) -> bool {
        self.momentum > 0.7 && self.goal.is_none()
    }

    pub fn step(&mut self, label: String) {
        self.path.push(label);
    }

    /// Momentum builds when falling along gravity.
    pub fn accelerate(&mut self) {
        self.momentum += 0.2;
    }

    /// Momentum decays when climbing toward a goal.
    pub fn decelerate(&mut self) {
        self.momentum *= 0.8;
    }

    pub fn reached_goal(&self, position: &str) -> bool {
        self.goal.as_deref() == Some(position)
    }
}
