//! Attention-constrained traversal engine.
//!
//! Models an agent moving through a weighted graph of labeled regions
//! (sigils), spending a depletable bandwidth as it acts, detecting signs of
//! lost self-control (capture), and self-interrupting via a regulator that
//! runs on the same bandwidth it protects. Sigils may own interior
//! sub-graphs: entering one pushes the outer scope onto a context stack,
//! with entry cost scaling in stack depth. Undirected wandering accumulates
//! an attention history from which a goal may precipitate.
//!
//! Zero I/O: the engine emits structured events; rendering them is a
//! consumer concern.

pub mod agent;
pub mod bandwidth;
pub mod capture;
pub mod config;
pub mod context;
pub mod event;
pub mod history;
pub mod metrics;
pub mod precipitate;
pub mod regulator;
pub mod sigil;
pub mod topology;
pub mod trajectory;

pub use agent::{Agent, Mode};
pub use bandwidth::Bandwidth;
pub use capture::{CaptureAssessment, CaptureDetector, CaptureSignal};
pub use config::AgentConfig;
pub use context::{ContextFrame, ContextStack};
pub use event::{AgentEvent, BlockReason};
pub use history::AttentionHistory;
pub use metrics::Metrics;
pub use precipitate::GoalPrecipitator;
pub use regulator::Regulator;
pub use sigil::Sigil;
pub use topology::Topology;
pub use trajectory::Trajectory;
