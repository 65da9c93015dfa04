use crate::bandwidth::Bandwidth;
use crate::capture::CaptureAssessment;

/// Decides whether to interrupt generation.
///
/// The regulator runs on the same resource the traversal consumes: once
/// bandwidth falls under `bandwidth_threshold` it can no longer act, however
/// severe the capture signals. That failure mode is capture itself.
#[derive(Clone, Copy, Debug)]
pub struct Regulator {
    pub bandwidth_threshold: f64,
    pub severity_threshold: u32,
}

impl Regulator {
    pub fn new(bandwidth_threshold: f64, severity_threshold: u32) -> Self {
        Self {
            bandwidth_threshold,
            severity_threshold,
        }
    }

    pub fn can_act(&self, bandwidth: &Bandwidth) -> bool {
        bandwidth.above_threshold(self.bandwidth_threshold)
    }

    pub fn should_interrupt(&self, bandwidth: &Bandwidth, assessment: &CaptureAssessment) -> bool {
        self.can_act(bandwidth) && assessment.warrants_regulation(self.severity_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureDetector;
    use crate::trajectory::Trajectory;

    fn severe_assessment() -> CaptureAssessment {
        // cycle + drift + high momentum: severity 3
        let mut t = Trajectory::default();
        for label in ["a", "b", "a", "c", "d", "e"] {
            t.step(label.to_string());
        }
        t.momentum = 0.9;
        CaptureDetector.assess(&t, None)
    }

    #[test]
    fn interrupts_when_funded_and_severe() {
        let r = Regulator::new(0.3, 2);
        let b = Bandwidth::with_current(80.0, 100.0);
        assert!(r.should_interrupt(&b, &severe_assessment()));
    }

    #[test]
    fn depleted_regulator_cannot_act() {
        let r = Regulator::new(0.3, 2);
        let b = Bandwidth::with_current(25.0, 100.0);
        assert!(!r.can_act(&b));
        assert!(!r.should_interrupt(&b, &severe_assessment()));
    }

    #[test]
    fn mild_signals_do_not_interrupt() {
        let r = Regulator::new(0.3, 2);
        let b = Bandwidth::with_current(80.0, 100.0);
        let mut t = Trajectory::default();
        for label in ["a", "b", "a"] {
            t.step(label.to_string());
        }
        let mild = CaptureDetector.assess(&t, None);
        assert_eq!(mild.severity(), 1);
        assert!(!r.should_interrupt(&b, &mild));
    }
}
