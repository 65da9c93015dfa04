use rand::Rng;

use crate::bandwidth::Bandwidth;
use crate::capture::CaptureDetector;
use crate::config::AgentConfig;
use crate::context::{ContextFrame, ContextStack};
use crate::event::{AgentEvent, BlockReason};
use crate::history::AttentionHistory;
use crate::metrics::Metrics;
use crate::precipitate::GoalPrecipitator;
use crate::regulator::Regulator;
use crate::sigil::Sigil;
use crate::topology::Topology;
use crate::trajectory::Trajectory;

/// Operating mode of the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Registering, recovering bandwidth. Initial and terminal state of
    /// every episode.
    Observer,
    /// Generating: traversing the topology, consuming bandwidth.
    Agent,
}

enum StepOutcome {
    Done,
    Continue(String),
}

/// An attention-constrained agent over a sigil topology.
///
/// Every public operation runs a whole episode to completion and returns the
/// finite event sequence for it, so no call can leave the state machine
/// suspended mid-traversal: whatever happens inside, the agent is back in
/// observer mode (or untouched, for refused requests) when the call returns.
/// The event sequence is deterministic for a seeded RNG, a fixed topology,
/// and a fixed configuration.
pub struct Agent<R: Rng> {
    config: AgentConfig,
    rng: R,
    mode: Mode,
    bandwidth: Bandwidth,
    topology: Topology,
    trajectory: Trajectory,
    stack: ContextStack,
    history: AttentionHistory,
    metrics: Metrics,
    detector: CaptureDetector,
    regulator: Regulator,
    precipitator: GoalPrecipitator,
}

impl<R: Rng> Agent<R> {
    pub fn new(config: AgentConfig, rng: R) -> Self {
        Self {
            rng,
            mode: Mode::Observer,
            bandwidth: Bandwidth::full(config.max_bandwidth),
            topology: Topology::default(),
            trajectory: Trajectory::default(),
            stack: ContextStack::default(),
            history: AttentionHistory::default(),
            metrics: Metrics::default(),
            detector: CaptureDetector,
            regulator: Regulator::new(config.capture_threshold, config.severity_threshold),
            precipitator: GoalPrecipitator::new(
                config.precipitation_threshold,
                config.minimum_attention,
            ),
            config,
        }
    }

    pub fn load_topology(&mut self, sigils: Vec<Sigil>) {
        self.topology = Topology::from_sigils(sigils);
    }

    /// Override the current bandwidth (demo/test setup for starting an
    /// episode already depleted).
    pub fn set_bandwidth(&mut self, current: f64) {
        self.bandwidth = self.bandwidth.reset_to(current);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn position(&self) -> Option<&str> {
        self.trajectory.current()
    }

    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn history(&self) -> &AttentionHistory {
        &self.history
    }

    pub fn precipitated_goal(&self) -> Option<&str> {
        self.precipitator.precipitated()
    }

    // ── Observer mode ───────────────────────────────────────────────────

    /// Enter observer mode: recover bandwidth, reset the trajectory, poll
    /// for goal precipitation.
    pub fn observe(&mut self) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        self.observe_into(&mut events);
        events
    }

    fn observe_into(&mut self, events: &mut Vec<AgentEvent>) {
        self.mode = Mode::Observer;
        self.trajectory = Trajectory::default();
        self.bandwidth = self.bandwidth.recover(self.config.recovery_rate);
        events.push(AgentEvent::Observer {
            depth: self.depth(),
            bandwidth: self.bandwidth.current,
            maximum: self.bandwidth.maximum,
        });
        self.poll_precipitation(events);
    }

    fn poll_precipitation(&mut self, events: &mut Vec<AgentEvent>) {
        if let Some(goal) = self.precipitator.check(&self.history) {
            self.metrics = self.metrics.precipitated_goal();
            events.push(AgentEvent::Precipitated { label: goal });
        }
    }

    // ── Generation ──────────────────────────────────────────────────────

    /// Traverse the topology from `start`, optionally toward a goal.
    pub fn generate(
        &mut self,
        start: &str,
        goal: Option<&str>,
        allow_entry: bool,
    ) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        if !self.topology.contains(start) {
            events.push(AgentEvent::Error {
                message: format!("unknown sigil: {start}"),
            });
            return events;
        }

        self.mode = Mode::Agent;
        self.trajectory = Trajectory::with_goal(goal.map(str::to_string));

        let mut budget = self.config.step_budget;
        self.run_from(start.to_string(), allow_entry, &mut budget, &mut events);
        events
    }

    /// Traverse toward the precipitated goal, from a random position.
    /// The goal was never injected: it emerged from accumulated attention.
    pub fn pursue(&mut self, allow_entry: bool) -> Vec<AgentEvent> {
        let Some(goal) = self.precipitator.precipitated().map(str::to_string) else {
            return vec![AgentEvent::Error {
                message: "no precipitated goal to pursue".to_string(),
            }];
        };
        let Some(start) = self.topology.random_position(&mut self.rng) else {
            return vec![AgentEvent::Error {
                message: "no topology loaded".to_string(),
            }];
        };
        self.generate(&start, Some(&goal), allow_entry)
    }

    /// Cancel an in-flight scope: unwind the context stack and force the
    /// observer-return transition, with the same cleanup as exhaustion.
    /// A no-op for an idle observer with an empty stack.
    pub fn abort(&mut self) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        if self.mode == Mode::Observer && self.stack.is_empty() {
            return events;
        }
        while !self.stack.is_empty() {
            self.exit_into(&mut events);
        }
        self.metrics = self.metrics.forced_return();
        self.bandwidth = self.bandwidth.reset_to(self.config.recovery_rate);
        self.observe_into(&mut events);
        events
    }

    fn run_from(
        &mut self,
        start: String,
        allow_entry: bool,
        budget: &mut u32,
        events: &mut Vec<AgentEvent>,
    ) {
        let mut current = start;
        loop {
            if *budget == 0 {
                self.handle_exhaustion(events);
                return;
            }
            *budget -= 1;
            match self.step(current, allow_entry, budget, events) {
                StepOutcome::Done => return,
                StepOutcome::Continue(next) => current = next,
            }
        }
    }

    fn step(
        &mut self,
        current: String,
        allow_entry: bool,
        budget: &mut u32,
        events: &mut Vec<AgentEvent>,
    ) -> StepOutcome {
        // run_from is only ever started on a loaded label and next positions
        // come from traversable edges, but stay total anyway
        let Some(sigil) = self.topology.get(&current).cloned() else {
            events.push(AgentEvent::Error {
                message: format!("unknown sigil: {current}"),
            });
            self.observe_into(events);
            return StepOutcome::Done;
        };

        self.bandwidth = self.bandwidth.deplete(self.config.generation_cost);
        self.trajectory.step(current.clone());
        self.history.record(&current, sigil.dwell_weight());
        events.push(AgentEvent::Step {
            label: current.clone(),
            gravity: sigil.gravity,
            depth: self.depth(),
            bandwidth: self.bandwidth.current,
        });

        if self.check_regulation(&sigil, events) {
            return StepOutcome::Done;
        }

        if allow_entry && self.try_enter(&sigil, budget, events) {
            return StepOutcome::Done;
        }

        // goal-reached wins over terminal when both hold at once
        if self.trajectory.reached_goal(&current) {
            self.metrics = self.metrics.completed();
            events.push(AgentEvent::GoalReached { label: current });
            self.observe_into(events);
            return StepOutcome::Done;
        }

        if sigil.is_terminal() {
            self.metrics = self.metrics.completed();
            events.push(AgentEvent::Converged { label: current });
            self.observe_into(events);
            return StepOutcome::Done;
        }

        let Some(next) = self.choose_next(&sigil) else {
            events.push(AgentEvent::DeadEnd { label: current });
            self.observe_into(events);
            return StepOutcome::Done;
        };

        // exhaustion fires on the step that spent the last of the resource
        if self.bandwidth.exhausted() {
            self.handle_exhaustion(events);
            return StepOutcome::Done;
        }

        StepOutcome::Continue(next)
    }

    /// Assess for capture; pay the metacognition cost whenever signals are
    /// present, whether or not the regulator ends up able to act.
    fn check_regulation(&mut self, sigil: &Sigil, events: &mut Vec<AgentEvent>) -> bool {
        let assessment = self.detector.assess(&self.trajectory, Some(sigil));
        if !assessment.detected() {
            return false;
        }

        events.push(AgentEvent::Meta {
            signals: assessment.signal_names(),
            severity: assessment.severity(),
        });
        self.bandwidth = self.bandwidth.deplete(self.config.metacognition_cost);

        if self.regulator.should_interrupt(&self.bandwidth, &assessment) {
            self.metrics = self.metrics.detected_capture().forced_return();
            events.push(AgentEvent::Interrupted);
            self.observe_into(events);
            return true;
        }
        false
    }

    /// Probabilistic zoom: enterable, affordable at the depth-scaled cost,
    /// and drawn in with probability equal to the sigil's gravity.
    fn try_enter(&mut self, sigil: &Sigil, budget: &mut u32, events: &mut Vec<AgentEvent>) -> bool {
        if !sigil.is_enterable() {
            return false;
        }
        let cost = sigil.scaled_entry_cost(self.depth());
        if !self.bandwidth.can_afford(cost) {
            return false;
        }
        if self.rng.random::<f64>() >= sigil.gravity {
            return false;
        }

        self.push_into(sigil, cost, events);
        if let Some(interior_start) = self.topology.random_position(&mut self.rng) {
            self.run_from(interior_start, true, budget, events);
        }
        // exhaustion inside the interior already unwound the stack; the
        // exit then reports blocked instead of popping twice
        self.exit_into(events);
        self.observe_into(events);
        true
    }

    fn choose_next(&mut self, sigil: &Sigil) -> Option<String> {
        let candidates = self.topology.traversable_edges(sigil);
        if candidates.is_empty() {
            return None;
        }

        if let Some(goal) = self.trajectory.goal.clone()
            && candidates.contains(&goal)
        {
            // the only goal-seeking behavior: one-hop adjacency
            self.trajectory.decelerate();
            return Some(goal);
        }

        self.trajectory.accelerate();
        self.topology.choose_by_gravity(&candidates, &mut self.rng)
    }

    fn handle_exhaustion(&mut self, events: &mut Vec<AgentEvent>) {
        events.push(AgentEvent::Exhausted {
            bandwidth: self.bandwidth.current,
        });
        while !self.stack.is_empty() {
            self.exit_into(events);
        }
        self.metrics = self.metrics.forced_return();
        self.bandwidth = self.bandwidth.reset_to(self.config.recovery_rate);
        self.observe_into(events);
    }

    // ── Sigil entry/exit ────────────────────────────────────────────────

    /// Push the current scope and zoom into a sigil's interior. Refusals
    /// are reported as blocked events and mutate nothing.
    pub fn enter_sigil(&mut self, label: &str) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        let Some(sigil) = self.topology.get(label).cloned() else {
            events.push(AgentEvent::Error {
                message: format!("unknown sigil: {label}"),
            });
            return events;
        };
        if !sigil.is_enterable() {
            events.push(AgentEvent::Blocked {
                reason: BlockReason::NoInterior {
                    label: label.to_string(),
                },
            });
            return events;
        }
        let cost = sigil.scaled_entry_cost(self.depth());
        if !self.bandwidth.can_afford(cost) {
            events.push(AgentEvent::Blocked {
                reason: BlockReason::InsufficientBandwidth {
                    needed: cost,
                    available: self.bandwidth.current,
                },
            });
            return events;
        }
        self.push_into(&sigil, cost, &mut events);
        events
    }

    /// Pop the context stack, returning to the previous scale.
    pub fn exit_sigil(&mut self) -> Vec<AgentEvent> {
        let mut events = Vec::new();
        self.exit_into(&mut events);
        events
    }

    fn push_into(&mut self, sigil: &Sigil, cost: f64, events: &mut Vec<AgentEvent>) {
        self.bandwidth = self.bandwidth.deplete(cost);
        let interior = Topology::from_sigils(sigil.interior.clone().unwrap_or_default());
        let outer_topology = std::mem::replace(&mut self.topology, interior);
        let outer_trajectory = std::mem::take(&mut self.trajectory);
        self.stack.push(ContextFrame {
            topology: outer_topology,
            position: sigil.label.clone(),
            trajectory: outer_trajectory,
        });
        self.metrics = self.metrics.entered_sigil();
        events.push(AgentEvent::Entered {
            label: sigil.label.clone(),
            depth: self.depth(),
            cost,
            bandwidth: self.bandwidth.current,
        });
    }

    fn exit_into(&mut self, events: &mut Vec<AgentEvent>) -> bool {
        let Some(frame) = self.stack.pop() else {
            events.push(AgentEvent::Blocked {
                reason: BlockReason::EmptyStack,
            });
            return false;
        };
        self.topology = frame.topology;
        self.trajectory = frame.trajectory;
        self.metrics = self.metrics.exited_sigil();
        events.push(AgentEvent::Exited {
            label: frame.position,
            depth: self.depth(),
        });
        true
    }

    // ── Wandering ───────────────────────────────────────────────────────

    /// Undirected attention: follow gravity gradients, record dwell, let
    /// the precipitator watch for a goal after every step.
    pub fn wander(&mut self, steps: u32) -> Vec<AgentEvent> {
        let mut events = vec![AgentEvent::WanderStart { steps }];
        let Some(mut current) = self.topology.random_position(&mut self.rng) else {
            events.push(AgentEvent::Error {
                message: "no topology loaded".to_string(),
            });
            return events;
        };

        for _ in 0..steps {
            let Some(sigil) = self.topology.get(&current).cloned() else {
                break;
            };
            self.history.record(&current, sigil.dwell_weight());
            events.push(AgentEvent::Wander {
                label: current.clone(),
                gravity: sigil.gravity,
            });

            current = match self.wander_step(&sigil) {
                Some(next) => next,
                None => break,
            };
            self.poll_precipitation(&mut events);
        }

        self.observe_into(&mut events);
        events
    }

    fn wander_step(&mut self, sigil: &Sigil) -> Option<String> {
        let candidates = self.topology.traversable_edges(sigil);
        if candidates.is_empty() {
            // terminal or dead end: jump to a random region
            self.topology.random_position(&mut self.rng)
        } else {
            self.topology.choose_by_gravity(&candidates, &mut self.rng)
        }
    }
}
