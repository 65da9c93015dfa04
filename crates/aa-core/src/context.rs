use crate::topology::Topology;
use crate::trajectory::Trajectory;

/// Saved outer scope for a sigil entry: the topology being left, the label
/// of the sigil being entered, and the trajectory to resume on exit.
#[derive(Clone, Debug)]
pub struct ContextFrame {
    pub topology: Topology,
    pub position: String,
    pub trajectory: Trajectory,
}

/// Explicit stack of zoom frames. Its depth is the scale the engine
/// currently operates at and feeds entry-cost scaling.
#[derive(Clone, Debug, Default)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ContextFrame> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
