use serde::Serialize;

/// Why a sigil entry or exit was refused.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// The sigil has no interior to enter.
    NoInterior { label: String },
    /// Entry cost at the current depth exceeds available bandwidth.
    InsufficientBandwidth { needed: f64, available: f64 },
    /// Exit requested with nothing on the context stack.
    EmptyStack,
}

/// One structured trace event per discrete state-machine transition.
/// Rendering these as human-readable text is a presentation concern and
/// lives outside the core.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Returned to observer mode: bandwidth recovered, trajectory reset.
    Observer {
        depth: usize,
        bandwidth: f64,
        maximum: f64,
    },
    /// One traversal step paid for and recorded.
    Step {
        label: String,
        gravity: f64,
        depth: usize,
        bandwidth: f64,
    },
    /// Capture signals observed; metacognition cost paid.
    Meta { signals: Vec<String>, severity: u32 },
    /// The regulator forced a hard return.
    Interrupted,
    /// Terminal sigil reached.
    Converged { label: String },
    /// Goal position reached (checked before the terminal condition).
    GoalReached { label: String },
    /// Edges exist but none resolve to loaded sigils. No completion credit.
    DeadEnd { label: String },
    /// Bandwidth ran out mid-traversal; stack unwound, resource reset.
    Exhausted { bandwidth: f64 },
    /// Zoomed into a sigil's interior.
    Entered {
        label: String,
        depth: usize,
        cost: f64,
        bandwidth: f64,
    },
    /// Popped back out to the enclosing scope.
    Exited { label: String, depth: usize },
    /// A requested entry or exit was refused; nothing was mutated.
    Blocked { reason: BlockReason },
    /// Undirected wandering began.
    WanderStart { steps: u32 },
    /// One wandering visit.
    Wander { label: String, gravity: f64 },
    /// Accumulated attention crystallized into a goal.
    Precipitated { label: String },
    /// User-input fault (unknown label, empty topology, nothing to pursue).
    Error { message: String },
}
