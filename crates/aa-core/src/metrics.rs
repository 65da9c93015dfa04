use serde::Serialize;

/// Observable outcomes of agent operation. Monotone counters, updated only
/// as side effects of specific transitions; each update returns a new copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub sigils_entered: u32,
    pub sigils_exited: u32,
    pub goals_precipitated: u32,
    pub captures_detected: u32,
    pub forced_returns: u32,
    pub completions: u32,
}

impl Metrics {
    pub fn entered_sigil(self) -> Self {
        Self {
            sigils_entered: self.sigils_entered + 1,
            ..self
        }
    }

    pub fn exited_sigil(self) -> Self {
        Self {
            sigils_exited: self.sigils_exited + 1,
            ..self
        }
    }

    pub fn precipitated_goal(self) -> Self {
        Self {
            goals_precipitated: self.goals_precipitated + 1,
            ..self
        }
    }

    pub fn detected_capture(self) -> Self {
        Self {
            captures_detected: self.captures_detected + 1,
            ..self
        }
    }

    pub fn forced_return(self) -> Self {
        Self {
            forced_returns: self.forced_returns + 1,
            ..self
        }
    }

    pub fn completed(self) -> Self {
        Self {
            completions: self.completions + 1,
            ..self
        }
    }
}
