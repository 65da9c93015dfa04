use serde::Serialize;

use crate::sigil::Sigil;
use crate::trajectory::Trajectory;

/// A sign that attention may be captured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CaptureSignal {
    pub name: String,
    pub severity: u32,
}

impl CaptureSignal {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            severity: 1,
        }
    }
}

/// Result of checking for capture.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CaptureAssessment {
    pub signals: Vec<CaptureSignal>,
}

impl CaptureAssessment {
    pub fn detected(&self) -> bool {
        !self.signals.is_empty()
    }

    pub fn severity(&self) -> u32 {
        self.signals.iter().map(|s| s.severity).sum()
    }

    pub fn signal_names(&self) -> Vec<String> {
        self.signals.iter().map(|s| s.name.clone()).collect()
    }

    pub fn warrants_regulation(&self, threshold: u32) -> bool {
        self.severity() >= threshold
    }
}

/// Detects signs of attention capture. Stateless: a pure assessment over the
/// trajectory and the current sigil, never mutating either.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureDetector;

impl CaptureDetector {
    pub fn assess(&self, trajectory: &Trajectory, current: Option<&Sigil>) -> CaptureAssessment {
        let mut signals = Vec::new();

        if trajectory.has_cycle() {
            signals.push(CaptureSignal::new("circular_traversal"));
        }
        if trajectory.is_drifting() {
            signals.push(CaptureSignal::new("goalless_drift"));
        }
        if trajectory.high_momentum_without_goal() {
            signals.push(CaptureSignal::new("high_momentum_no_goal"));
        }
        if current.is_some_and(Sigil::is_high_gravity) {
            signals.push(CaptureSignal::new("gravity_well"));
        }

        CaptureAssessment { signals }
    }
}
