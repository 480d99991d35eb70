//! headless — run one bionet scenario without a renderer.
//!
//! Drives the scenario controller for a fixed number of ticks and writes
//! `tick_stats.csv` / `node_snapshots.csv` to the output directory.
//!
//! ```text
//! RUST_LOG=debug cargo run -p headless -- quarantine --ticks 900 --population 80
//! cargo run -p headless -- propagation --config run.json --output output/prop
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bn_core::{Controls, SimConfig, Vec2};
use bn_output::{CsvWriter, SimOutputObserver};
use bn_sim::{ScenarioController, ScenarioKind, ScenarioStats};

#[derive(Parser, Debug)]
#[command(name = "headless", about = "Run a bionet scenario headless and write CSV stats")]
struct Args {
    /// Scenario: hunter-killer, quarantine or propagation.
    #[arg(default_value = "hunter-killer")]
    scenario: ScenarioKind,

    /// Ticks to run.
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// JSON file holding a `SimConfig`; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Snapshot every N ticks (0 disables node snapshots).
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Target agent population.
    #[arg(short, long)]
    population: Option<u32>,

    /// Spread-rate control, clamped to 0–100.
    #[arg(short, long)]
    rate: Option<f32>,

    /// Agent speed multiplier, clamped to 0.5–5.
    #[arg(long)]
    speed: Option<f32>,

    /// Pointer clicks sever edges / clear firewalls instead of breaching.
    #[arg(long)]
    severing: bool,

    /// Click at `X,Y` before the first tick.  Repeatable.
    #[arg(long = "click", value_parser = parse_point)]
    clicks: Vec<Vec2>,

    /// Output directory (default: `output/<scenario>`).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else { return Ok(SimConfig::default()) };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing SimConfig from {}", path.display()))
}

fn print_stats(stats: &ScenarioStats) {
    println!("{:<12} {:>8}", "Metric", "Count");
    println!("{}", "-".repeat(21));
    let rows: Vec<(&str, usize)> = match stats.kind {
        ScenarioKind::HunterKiller => vec![
            ("safe", stats.safe),
            ("infected", stats.infected),
            ("recovering", stats.recovering),
            ("edges", stats.edges),
            ("agents", stats.agents),
        ],
        ScenarioKind::Quarantine => vec![
            ("safe", stats.safe),
            ("infected", stats.infected),
            ("firewall", stats.firewall),
            ("agents", stats.agents),
        ],
        ScenarioKind::Propagation => vec![
            ("vulnerable", stats.vulnerable),
            ("infected", stats.infected),
            ("patched", stats.patched),
            ("edges", stats.edges),
            ("packets", stats.agents),
        ],
    };
    for (name, count) in rows {
        println!("{name:<12} {count:>8}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(every) = args.snapshot_every {
        config.snapshot_interval_ticks = every;
    }

    let defaults = Controls::default();
    let controls = Controls {
        target_population: args.population.unwrap_or(defaults.target_population),
        spread_rate:       args.rate.unwrap_or(defaults.spread_rate),
        speed_multiplier:  args.speed.unwrap_or(defaults.speed_multiplier),
        severing_mode:     args.severing,
        paused:            false,
    };

    let mut ctl = ScenarioController::new(config.clone())?;
    ctl.apply_controls(controls);
    ctl.start(args.scenario)?;

    for &p in &args.clicks {
        let outcome = ctl.interact(p);
        if outcome.is_ignored() {
            warn!(point = %p, "click hit nothing");
        }
    }

    let out_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from("output").join(args.scenario.as_str()));
    let writer = CsvWriter::new(&out_dir)
        .with_context(|| format!("creating CSV output in {}", out_dir.display()))?;
    let mut obs = SimOutputObserver::new(writer);

    info!(
        scenario = %args.scenario,
        ticks = args.ticks,
        seed = config.seed,
        output = %out_dir.display(),
        "running"
    );

    let t0 = Instant::now();
    ctl.run_ticks(args.ticks, &mut obs);
    let elapsed = t0.elapsed();

    let final_stats = ctl.stats();
    ctl.teardown_with(&mut obs);
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing simulation output");
    }

    let (stats_rows, node_rows) = obs.rows_written();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  tick_stats.csv     : {stats_rows} rows");
    println!("  node_snapshots.csv : {node_rows} rows");
    println!();
    if let Some(stats) = final_stats {
        print_stats(&stats);
    }

    Ok(())
}
