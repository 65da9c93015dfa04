//! Human-readable trace lines for engine events. The core emits structured
//! events only; everything about their presentation lives here.

use aa_core::{AgentEvent, BlockReason};

fn depth_indicator(depth: usize) -> String {
    if depth > 0 {
        format!(" [depth: {depth}]")
    } else {
        String::new()
    }
}

pub fn render(event: &AgentEvent) -> String {
    match event {
        AgentEvent::Observer {
            depth,
            bandwidth,
            maximum,
        } => format!(
            "[OBSERVER]{} Bandwidth: {bandwidth:.1}/{maximum:.1}",
            depth_indicator(*depth)
        ),
        AgentEvent::Step {
            label,
            gravity,
            depth,
            bandwidth,
        } => format!(
            "[AGENT]{} -> {label} (gravity: {gravity:.2}) | Bandwidth: {bandwidth:.1}",
            depth_indicator(*depth)
        ),
        AgentEvent::Meta { signals, .. } => {
            format!("[META] Capture signals: [{}]", signals.join(", "))
        }
        AgentEvent::Interrupted => "[REGULATOR] Hard interrupt.".to_string(),
        AgentEvent::Converged { label } => format!("[CONVERGED] Terminal: {label}"),
        AgentEvent::GoalReached { label } => format!("[GOAL] Reached: {label}"),
        AgentEvent::DeadEnd { label } => {
            format!("[DEAD END] No traversable edges at {label}")
        }
        AgentEvent::Exhausted { .. } => "[EXHAUSTED] Bandwidth depleted.".to_string(),
        AgentEvent::Entered {
            label,
            depth,
            cost,
            bandwidth,
        } => format!(
            "[ENTER] '{label}'{} (cost: {cost:.1}) | Bandwidth: {bandwidth:.1}",
            depth_indicator(*depth)
        ),
        AgentEvent::Exited { label, depth } => {
            format!("[EXIT] Returned to '{label}'{}", depth_indicator(*depth))
        }
        AgentEvent::Blocked { reason } => format!("[BLOCKED] {}", render_block(reason)),
        AgentEvent::WanderStart { steps } => {
            format!("[WANDER] Undirected observation for {steps} steps")
        }
        AgentEvent::Wander { label, gravity } => {
            format!("[WANDER] ... {label} (gravity: {gravity:.2})")
        }
        AgentEvent::Precipitated { label } => {
            format!("[PRECIPITATED] Goal precipitated: '{label}'")
        }
        AgentEvent::Error { message } => format!("[ERROR] {message}"),
    }
}

fn render_block(reason: &BlockReason) -> String {
    match reason {
        BlockReason::NoInterior { label } => format!("Sigil '{label}' has no interior"),
        BlockReason::InsufficientBandwidth { needed, available } => {
            format!("Insufficient bandwidth (need {needed:.1}, have {available:.1})")
        }
        BlockReason::EmptyStack => "No context to pop".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_line_shows_depth_only_when_nested() {
        let flat = render(&AgentEvent::Step {
            label: "room".to_string(),
            gravity: 0.1,
            depth: 0,
            bandwidth: 95.0,
        });
        assert_eq!(flat, "[AGENT] -> room (gravity: 0.10) | Bandwidth: 95.0");

        let nested = render(&AgentEvent::Step {
            label: "inner".to_string(),
            gravity: 0.4,
            depth: 2,
            bandwidth: 30.0,
        });
        assert!(nested.starts_with("[AGENT] [depth: 2]"));
    }

    #[test]
    fn blocked_lines_explain_the_refusal() {
        let line = render(&AgentEvent::Blocked {
            reason: BlockReason::InsufficientBandwidth {
                needed: 30.0,
                available: 12.5,
            },
        });
        assert_eq!(line, "[BLOCKED] Insufficient bandwidth (need 30.0, have 12.5)");

        let empty = render(&AgentEvent::Blocked {
            reason: BlockReason::EmptyStack,
        });
        assert_eq!(empty, "[BLOCKED] No context to pop");
    }

    #[test]
    fn every_tag_is_bracketed() {
        let events = [
            AgentEvent::Interrupted,
            AgentEvent::Exhausted { bandwidth: -2.0 },
            AgentEvent::Converged {
                label: "end".to_string(),
            },
            AgentEvent::Precipitated {
                label: "light".to_string(),
            },
        ];
        for event in &events {
            assert!(render(event).starts_with('['));
        }
    }
}
