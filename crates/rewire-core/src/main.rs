//! Rewiring Simulation
//!
//! Runs the networked iterated prisoner's dilemma, printing standings after
//! every round and writing the round log and final graph to the output
//! directory.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rewire_core::config::{default_config_toml, SimConfig, DEFAULT_CONFIG_FILE};
use rewire_core::output::{
    format_standings, DotGraphWriter, GraphSink, JsonGraphWriter, OutputError, ReportLogger,
    FINAL_SUMMARY_FILE, GRAPH_DOT_FILE, GRAPH_JSON_FILE, ROUND_LOG_FILE,
};
use rewire_core::{SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "rewire_sim")]
#[command(about = "Iterated prisoner's dilemma on a rewiring relationship graph")]
struct Args {
    /// Configuration file (defaults apply if it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to simulate
    #[arg(long)]
    rounds: Option<u32>,

    /// Turns per match
    #[arg(long)]
    turns: Option<u32>,

    /// Number of randomly assigned players
    #[arg(long)]
    players: Option<usize>,

    /// Disable Moran selection
    #[arg(long)]
    no_moran: bool,

    /// Use the configured roster instead of random assignment
    #[arg(long)]
    fixed_roster: bool,

    /// Directory for the round log and graph exports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Write the default configuration to --config and exit
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(rounds) = self.rounds {
            config.simulation.num_rounds = rounds;
        }
        if let Some(turns) = self.turns {
            config.simulation.num_turns = turns;
        }
        if let Some(players) = self.players {
            config.population.player_count = players;
        }
        if self.no_moran {
            config.population.use_moran_process = false;
        }
        if self.fixed_roster {
            config.population.random_players = false;
        }
        if let Some(ref dir) = self.output_dir {
            config.output.dir = dir.clone();
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    if args.write_default_config {
        let text = default_config_toml()?;
        fs::write(&args.config, text).map_err(OutputError::from)?;
        println!("Wrote default configuration to {}", args.config.display());
        return Ok(());
    }

    let mut config = SimConfig::load_or_default(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    println!("Rewiring Simulation");
    println!("===================");
    println!("Seed: {}", config.simulation.seed);
    println!("Rounds: {}", config.simulation.num_rounds);
    println!("Turns per match: {}", config.simulation.num_turns);
    println!("Players: {}", config.population.size());
    println!("Moran process: {}", config.population.use_moran_process);
    println!();

    let mut sim = Simulation::new(&config)?;

    let output_dir = config.output.dir.clone();
    let mut logger = if config.output.write_reports {
        ReportLogger::new(output_dir.join(ROUND_LOG_FILE)).unwrap_or_else(|e| {
            warn!("could not open round log: {}", e);
            ReportLogger::null()
        })
    } else {
        ReportLogger::null()
    };

    sim.run(|report| {
        println!("Round {}", report.round);
        print!(
            "{}",
            format_standings(
                &format!("Total Payoffs and Strategies after Round {}:", report.round),
                &report.standings,
            )
        );
        if let Err(e) = logger.log(report) {
            warn!("could not write round {} report: {}", report.round, e);
        }
    })?;

    if let Err(e) = logger.flush() {
        warn!("could not flush round log: {}", e);
    }

    let summary = sim.final_summary();
    println!();
    print!(
        "{}",
        format_standings(
            "Final Total Payoffs and Strategies after simulation:",
            &summary.standings,
        )
    );
    if let Some(leader) = summary.leader() {
        println!("Leader: {}", leader);
    }

    let snapshot = sim.graph_snapshot();
    info!(
        "final graph: {} edges, {} isolated players",
        snapshot.edge_count(),
        snapshot.isolated_nodes().len()
    );

    if config.output.export_graph {
        let mut sinks: Vec<Box<dyn GraphSink>> = vec![
            Box::new(JsonGraphWriter::new(output_dir.join(GRAPH_JSON_FILE))),
            Box::new(DotGraphWriter::new(output_dir.join(GRAPH_DOT_FILE))),
        ];
        for sink in sinks.iter_mut() {
            if let Err(e) = sim.export_graph(sink.as_mut()) {
                warn!("could not export graph: {}", e);
            }
        }
        if let Err(e) = summary.write(&output_dir.join(FINAL_SUMMARY_FILE)) {
            warn!("could not write final summary: {}", e);
        } else {
            info!("wrote final graph and summary to {}", output_dir.display());
        }
    }

    Ok(())
}
