//! End-to-end tests for the `aa` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn aa() -> Command {
    Command::cargo_bin("aa").expect("binary builds")
}

fn topology_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write topology");
    file
}

const TERMINAL: &str = r#"[{ "label": "end", "gravity": 0.5 }]"#;

const SMALL_GRAPH: &str = r#"[
  { "label": "room", "gravity": 0.1, "edges": ["bookcase", "window"] },
  { "label": "bookcase", "gravity": 0.3, "edges": ["books"] },
  { "label": "books", "gravity": 0.2 },
  { "label": "window", "gravity": 0.2 }
]"#;

const DEEP_DOOR: &str = r#"[
  {
    "label": "door",
    "gravity": 0.9,
    "entry_cost": 1000.0,
    "interior": [{ "label": "inner", "gravity": 0.3 }]
  }
]"#;

#[test]
fn generate_traces_a_terminal_episode() {
    let topology = topology_file(TERMINAL);
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "generate", "end"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[AGENT] -> end (gravity: 0.50) | Bandwidth: 95.0",
        ))
        .stdout(predicate::str::contains("[CONVERGED] Terminal: end"))
        .stdout(predicate::str::contains("[OBSERVER]"))
        .stdout(predicate::str::contains("Completions: 1"));
}

#[test]
fn generate_from_unknown_start_reports_error() {
    let topology = topology_file(TERMINAL);
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "generate", "nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERROR]"));
}

#[test]
fn json_mode_emits_one_event_per_line() {
    let topology = topology_file(SMALL_GRAPH);
    let output = aa()
        .args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "--json", "wander", "--steps", "5"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(!lines.is_empty());
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert!(value.get("event").is_some(), "line tagged: {line}");
    }
    assert_eq!(lines[0], r#"{"event":"wander_start","steps":5}"#);
}

#[test]
fn unaffordable_entry_is_blocked() {
    let topology = topology_file(DEEP_DOOR);
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "enter", "door"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[BLOCKED] Insufficient bandwidth (need 1000.0, have 100.0)",
        ));
}

#[test]
fn exit_with_no_context_is_blocked() {
    let topology = topology_file(TERMINAL);
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "exit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[BLOCKED] No context to pop"));
}

#[test]
fn stats_starts_at_zero() {
    aa().args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entered: 0 | Exited: 0 | Goals: 0 | Captures: 0 | \
             Forced returns: 0 | Completions: 0 | Top attractor: none",
        ));
}

#[test]
fn config_file_overrides_defaults() {
    let topology = topology_file(TERMINAL);
    let mut config = NamedTempFile::new().expect("temp file");
    config
        .write_all(b"max_bandwidth = 150.0\n")
        .expect("write config");

    // 150 - generation_cost(5) = 145 on the first step
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--config"])
        .arg(config.path())
        .args(["--seed", "42", "generate", "end"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bandwidth: 145.0"));
}

#[test]
fn bandwidth_override_forces_exhaustion() {
    let topology = topology_file(SMALL_GRAPH);
    aa().args(["--topology"])
        .arg(topology.path())
        .args(["--seed", "42", "--bandwidth", "5", "generate", "room"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[EXHAUSTED] Bandwidth depleted."))
        .stdout(predicate::str::contains("Forced returns: 1"));
}

#[test]
fn missing_topology_file_fails() {
    aa().args(["--topology", "/no/such/file.json", "--seed", "1", "observe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read topology"));
}

#[test]
fn generate_requires_a_start_label() {
    aa().args(["generate"]).assert().failure();
}

#[test]
fn same_seed_reproduces_the_trace() {
    let topology = topology_file(SMALL_GRAPH);
    let run = || {
        aa().args(["--topology"])
            .arg(topology.path())
            .args(["--seed", "7", "generate", "room"])
            .output()
            .expect("run")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
