//! seed-remap CLI entry point
//!
//! Reads an almanac and prints the smallest final value reachable from
//! any seed.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, trace, LevelFilter};
use seed_remap::core::{
    parse_almanac_file, RangeRemapper, SearchConfig, SeedMode, StageKind, DEFAULT_FAN_OUT,
    NO_CANDIDATE,
};
use std::path::PathBuf;
use std::time::Instant;

/// How to read the seeds line (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PartArg {
    /// Every number is a single seed
    #[value(name = "1")]
    Points,
    /// Numbers are `begin length` ranges
    #[value(name = "2")]
    Ranges,
}

impl From<PartArg> for SeedMode {
    fn from(arg: PartArg) -> Self {
        match arg {
            PartArg::Points => SeedMode::Points,
            PartArg::Ranges => SeedMode::Ranges,
        }
    }
}

/// Which input file to read from the input directory
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceArg {
    /// The small published example
    Example,
    /// The full puzzle input
    Full,
}

impl SourceArg {
    fn file_name(&self) -> &'static str {
        match self {
            SourceArg::Example => "example",
            SourceArg::Full => "full",
        }
    }
}

#[derive(Parser)]
#[command(name = "seed-remap")]
#[command(about = "Find the lowest location reachable from any seed")]
#[command(version)]
struct Cli {
    /// Seed interpretation: 1 (single seeds) or 2 (seed ranges)
    part: PartArg,

    /// Input to read: example or full
    source: SourceArg,

    /// Directory holding the `example` and `full` input files
    #[arg(long = "input-dir", default_value = "input")]
    input_dir: PathBuf,

    /// Read this file instead of <input-dir>/<source>
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 't', long, default_value = "0")]
    threads: usize,

    /// Sub-ranges searched in parallel per seed interval
    #[arg(long = "fan-out", default_value_t = DEFAULT_FAN_OUT)]
    fan_out: usize,

    /// Print the value after every stage for each seed (part 1 only)
    #[arg(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --trace enables trace output for this crate on top of RUST_LOG
    let mut logger = env_logger::Builder::from_default_env();
    if cli.trace {
        logger.filter_module("seed_remap", LevelFilter::Trace);
    }
    logger.init();

    let start = Instant::now();

    let path = cli
        .input
        .clone()
        .unwrap_or_else(|| cli.input_dir.join(cli.source.file_name()));

    let almanac = parse_almanac_file(&path)
        .with_context(|| format!("Failed to load almanac {:?}", path))?;

    let mode = SeedMode::from(cli.part);
    let seeds = almanac.seed_intervals(mode)?;

    if cli.trace && mode == SeedMode::Points {
        for seed in &seeds {
            let trace = almanac.chain.trace(seed.begin);
            let steps: Vec<String> = StageKind::ALL
                .iter()
                .zip(trace.iter())
                .map(|(kind, value)| format!("{} {}", kind, value))
                .collect();
            trace!("seed {}: {}", seed.begin, steps.join(", "));
        }
    }

    let config = SearchConfig {
        fan_out: cli.fan_out,
        threads: cli.threads,
    };
    let remapper = RangeRemapper::new(&almanac.chain, config)?;
    let outcome = remapper.search(&seeds);
    // Nothing evaluated: report the reduction's identity
    let minimum = outcome.minimum.unwrap_or(NO_CANDIDATE);

    info!(
        "Evaluated {} values from {} seed intervals in {:.2}s",
        outcome.evaluated,
        outcome.seeds,
        start.elapsed().as_secs_f64()
    );

    println!("{}", minimum);

    Ok(())
}
