use serde::{Deserialize, Serialize};

/// Configuration for agent behavior. Every field has a default so partial
/// config files deserialize cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Resource ceiling; also the initial bandwidth.
    pub max_bandwidth: f64,
    /// Depletion per traversal step.
    pub generation_cost: f64,
    /// Cost of any capture assessment with signals present.
    pub metacognition_cost: f64,
    /// Added on each return to observer mode; also the post-exhaustion
    /// reset value.
    pub recovery_rate: f64,
    /// Bandwidth ratio at or below which the regulator cannot act.
    pub capture_threshold: f64,
    /// Combined signal severity the regulator requires to interrupt.
    pub severity_threshold: u32,
    /// Salience a region needs for a goal to crystallize.
    pub precipitation_threshold: f64,
    /// Total dwell required before any crystallization.
    pub minimum_attention: f64,
    /// Hard cap on steps per traversal, shared across zoom recursion.
    /// Hitting it triggers the same cleanup as exhaustion.
    pub step_budget: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_bandwidth: 100.0,
            generation_cost: 5.0,
            metacognition_cost: 10.0,
            recovery_rate: 20.0,
            capture_threshold: 0.3,
            severity_threshold: 2,
            precipitation_threshold: 0.4,
            minimum_attention: 10.0,
            step_budget: 1024,
        }
    }
}
