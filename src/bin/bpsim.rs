//! Evaluate a branch predictor against a text trace.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bpred::*;
use bpred::sim::evaluate_trace;
use bpred::trace::TraceReader;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindCli {
    Static,
    Gshare,
    Tournament,
    Custom,
}
impl From<KindCli> for PredictorKind {
    fn from(k: KindCli) -> Self {
        match k {
            KindCli::Static => PredictorKind::Static,
            KindCli::Gshare => PredictorKind::Gshare,
            KindCli::Tournament => PredictorKind::Tournament,
            KindCli::Custom => PredictorKind::Custom,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a text trace (reads stdin when omitted)
    trace: Option<PathBuf>,

    /// JSON predictor configuration
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Predictor to evaluate (overrides the configuration file)
    #[arg(long, value_enum)]
    predictor: Option<KindCli>,

    /// Gshare history bits (overrides the configuration file)
    #[arg(long, value_name = "BITS")]
    gshare_bits: Option<usize>,

    /// Print debug logging and the worst-predicted branches
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(kind) = cli.predictor {
        cfg.predictor = kind.into();
    }
    if let Some(bits) = cli.gshare_bits {
        cfg.gshare.history_bits = bits;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn open_trace(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) => {
            let f = File::open(path).map_err(bpred::error::TraceError::from)?;
            Box::new(BufReader::new(f))
        },
        None => Box::new(BufReader::new(io::stdin())),
    };
    Ok(reader)
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = build_config(cli)?;
    let mut bp = Dispatcher::with_active(cfg)?;
    info!(predictor = bp.name(), "evaluating");

    let reader = TraceReader::new(open_trace(cli.trace.as_ref())?);
    let stat = evaluate_trace(&mut bp, reader)?;
    bp.teardown();

    println!("{}", bp.name());
    println!("Branches:        {:10}", stat.global_brns());
    println!("Incorrect:       {:10}", stat.global_miss());
    println!("Misprediction Rate: {:10.4}", stat.miss_rate_percent());

    if cli.verbose {
        println!("Storage bits:    {:10}", bp.cfg().storage_bits());
        println!("Unique branches: {}", stat.num_unique_branches());
        println!("Low hit-rate branches:");
        for (pc, data) in stat.get_low_rate_branches(8, 0.9) {
            println!("  {:08x} {:8}/{:8} {:.4}",
                pc, data.hits, data.occ, data.hit_rate()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        },
    }
}
