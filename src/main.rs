//! The `memsim` command line driver.
//!
//! ```text
//! memsim <TRACE> <FRAMES> <POLICY> <MODE> [--seed <SEED>]
//! ```

use clap::{Parser, ValueEnum};
use memsim::{trace::TraceReader, Policy, SimConfig, Simulator};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Simulates demand paging over a memory access trace.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The trace file, one `<hex address> <R|W>` entry per line.
    trace: PathBuf,

    /// The number of physical frames.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// The replacement policy: rand, lru, clock, or fifo.
    policy: Policy,

    /// Whether to log every event.
    mode: Mode,

    /// Seed for the random replacement policy.
    #[arg(long)]
    seed: Option<u64>,
}

/// How much the simulator logs while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Only print the final statistics.
    Quiet,
    /// Also log each page fault, write back, discard, and access.
    Debug,
}

impl Mode {
    /// The most verbose level logged in this mode.
    fn level(self) -> Level {
        match self {
            Self::Quiet => Level::WARN,
            Self::Debug => Level::DEBUG,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.mode.level().to_string()));
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .without_time()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("memsim: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the whole trace and prints the report.
fn run(args: &Args) -> memsim::Result<()> {
    let file = File::open(&args.trace)?;

    let mut config = SimConfig::new(args.frames as usize, args.policy);
    config.seed = args.seed;

    let mut simulator = Simulator::new(config)?;
    let stats = simulator.run(TraceReader::new(BufReader::new(file)))?;

    println!("{stats}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_trace_is_an_error() {
        let args = Args::parse_from(["memsim", "no/such/trace.txt", "4", "lru", "quiet"]);

        assert_eq!(args.policy, Policy::Lru);
        assert_eq!(args.mode, Mode::Quiet);
        assert!(matches!(run(&args), Err(memsim::Error::Io(_))));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Args::try_parse_from(["memsim", "t.txt", "0", "lru", "quiet"]).is_err());
        assert!(Args::try_parse_from(["memsim", "t.txt", "4", "random", "quiet"]).is_err());
        assert!(Args::try_parse_from(["memsim", "t.txt", "4", "fifo", "loud"]).is_err());
    }
}
