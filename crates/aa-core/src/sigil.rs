use serde::{Deserialize, Serialize};

fn default_entry_cost() -> f64 {
    20.0
}

/// A labeled region in the traversal graph.
///
/// Opaque from the outside: either a plain node, or, when `interior` is
/// present, a door into an entire nested sub-graph at a deeper scale.
/// `gravity` in `[0, 1]` models local attractiveness; it biases both lateral
/// movement and the probability of being drawn through the door.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sigil {
    pub label: String,
    pub gravity: f64,
    #[serde(default)]
    pub edges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior: Option<Vec<Sigil>>,
    #[serde(default = "default_entry_cost")]
    pub entry_cost: f64,
}

impl Sigil {
    pub fn new(label: &str, gravity: f64) -> Self {
        Self {
            label: label.to_string(),
            gravity,
            edges: Vec::new(),
            interior: None,
            entry_cost: default_entry_cost(),
        }
    }

    pub fn with_edges(mut self, edges: &[&str]) -> Self {
        self.edges = edges.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_interior(mut self, interior: Vec<Sigil>, entry_cost: f64) -> Self {
        self.interior = Some(interior);
        self.entry_cost = entry_cost;
        self
    }

    pub fn is_enterable(&self) -> bool {
        self.interior.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn is_high_gravity(&self) -> bool {
        self.gravity > 0.8
    }

    /// Dwell weight recorded per visit: high gravity holds attention longer.
    pub fn dwell_weight(&self) -> f64 {
        1.0 + self.gravity
    }

    /// Entry cost grows linearly with nesting depth.
    pub fn scaled_entry_cost(&self, depth: usize) -> f64 {
        self.entry_cost * (1.0 + depth as f64 * 0.5)
    }
}
