mod render;

use std::path::{Path, PathBuf};

use aa_core::{Agent, AgentConfig, AgentEvent, Sigil};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser)]
#[command(name = "aa", about = "Attention-constrained traversal agent CLI")]
struct Cli {
    /// Topology file: a JSON list of sigil records
    #[arg(long, global = true)]
    topology: Option<PathBuf>,

    /// Engine configuration overrides (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the traversal RNG (defaults to OS entropy)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Start with this bandwidth instead of the full maximum
    #[arg(long, global = true)]
    bandwidth: Option<f64>,

    /// Emit events as JSON lines instead of trace text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter observer mode once: recover bandwidth, poll for precipitation
    Observe,

    /// Traverse the topology from a start sigil, optionally toward a goal
    Generate {
        /// Label to start from
        start: String,

        /// Goal label (one-hop preference only, no path planning)
        #[arg(long)]
        goal: Option<String>,

        /// Never zoom into sigil interiors
        #[arg(long)]
        no_entry: bool,
    },

    /// Undirected wandering that feeds the attention history
    Wander {
        #[arg(long, default_value_t = 10)]
        steps: u32,
    },

    /// Zoom into a sigil's interior
    Enter {
        /// Label of the enterable sigil
        label: String,
    },

    /// Pop one zoom frame
    Exit,

    /// Wander until a goal precipitates, then traverse toward it
    Pursue {
        #[arg(long, default_value_t = 25)]
        wander_steps: u32,
    },

    /// Print the metrics snapshot
    Stats,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    let Some(path) = path else {
        return Ok(AgentConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

fn load_topology(path: &Path) -> Result<Vec<Sigil>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read topology {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid topology {}", path.display()))
}

fn emit(cli: &Cli, events: &[AgentEvent]) -> Result<()> {
    for event in events {
        if cli.json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", render::render(event));
        }
    }
    Ok(())
}

fn stats_line(agent: &Agent<SmallRng>) -> String {
    let m = agent.metrics();
    let attractor = agent
        .history()
        .most_salient()
        .map(|(label, salience)| format!("{label}:{salience:.2}"))
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Entered: {} | Exited: {} | Goals: {} | Captures: {} | \
         Forced returns: {} | Completions: {} | Top attractor: {}",
        m.sigils_entered,
        m.sigils_exited,
        m.goals_precipitated,
        m.captures_detected,
        m.forced_returns,
        m.completions,
        attractor
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut agent = Agent::new(config, rng);

    if let Some(path) = &cli.topology {
        let sigils = load_topology(path)?;
        tracing::debug!("loaded {} sigils from {}", sigils.len(), path.display());
        agent.load_topology(sigils);
    }
    if let Some(bandwidth) = cli.bandwidth {
        tracing::debug!("starting bandwidth overridden to {bandwidth}");
        agent.set_bandwidth(bandwidth);
    }

    match &cli.command {
        Commands::Observe => {
            let events = agent.observe();
            emit(&cli, &events)?;
        }
        Commands::Generate {
            start,
            goal,
            no_entry,
        } => {
            let events = agent.generate(start, goal.as_deref(), !no_entry);
            emit(&cli, &events)?;
            if !cli.json {
                println!("{}", stats_line(&agent));
            }
        }
        Commands::Wander { steps } => {
            let events = agent.wander(*steps);
            emit(&cli, &events)?;
            if !cli.json {
                println!("{}", stats_line(&agent));
            }
        }
        Commands::Enter { label } => {
            let events = agent.enter_sigil(label);
            emit(&cli, &events)?;
        }
        Commands::Exit => {
            let events = agent.exit_sigil();
            emit(&cli, &events)?;
        }
        Commands::Pursue { wander_steps } => {
            let mut events = agent.wander(*wander_steps);
            events.extend(agent.pursue(true));
            emit(&cli, &events)?;
            if !cli.json {
                println!("{}", stats_line(&agent));
            }
        }
        Commands::Stats => {
            println!("{}", stats_line(&agent));
        }
    }

    Ok(())
}
