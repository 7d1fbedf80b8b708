//! Command-line harness: spawns workers against a counter and prints the total.
//!
//! Run with:
//! ```bash
//! cargo run --features cli -- --workers 50 --increments 1000
//! RUST_LOG=debug cargo run --features cli -- --counter racy --repeat 5
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::{error, warn};
use thiserror::Error;

use conteggio::config::{HarnessConfig, DEFAULT_INCREMENTS_PER_WORKER, DEFAULT_WORKERS};
use conteggio::counters::atomic::AtomicCounter;
use conteggio::counters::racy::RacyCounter;
use conteggio::counters::sharded::ShardedCounter;
use conteggio::counters::Counter;
use conteggio::harness::{Harness, Tally};
use conteggio::report::RunReport;
use conteggio::HarnessError;

/// Counter implementation to drive.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum CounterKind {
    /// Single atomic cell (fetch_add)
    #[default]
    Atomic,
    /// 64 cache-padded slots summed on read
    Sharded,
    /// Load-then-store increment; loses updates
    Racy,
}

impl CounterKind {
    fn build(self) -> Arc<dyn Counter> {
        match self {
            CounterKind::Atomic => Arc::new(AtomicCounter::new().with_name("ops")),
            CounterKind::Sharded => Arc::new(ShardedCounter::new().with_name("ops")),
            CounterKind::Racy => Arc::new(RacyCounter::new().with_name("ops")),
        }
    }
}

/// How workers are scheduled.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum RuntimeKind {
    /// One OS thread per worker
    #[default]
    Threads,
    /// One task per worker on a multi-threaded tokio runtime
    Tokio,
}

/// Output format for the run report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// A single `ops: N` line
    #[default]
    Text,
    /// JSON report
    Json,
}

/// Spawns concurrent workers that increment a shared counter, waits for all
/// of them and prints the final value.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of concurrent workers
    #[arg(short, long, env = "CONTEGGIO_WORKERS", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Increments performed by each worker
    #[arg(short = 'n', long, env = "CONTEGGIO_INCREMENTS", default_value_t = DEFAULT_INCREMENTS_PER_WORKER)]
    increments: u64,

    /// Counter implementation
    #[arg(short, long, value_enum, default_value = "atomic")]
    counter: CounterKind,

    /// Worker scheduling
    #[arg(short, long, value_enum, default_value = "threads")]
    runtime: RuntimeKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include timestamp in JSON output
    #[arg(long)]
    timestamp: bool,

    /// Number of consecutive runs, each with a fresh counter
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn count(args: &Args, harness: &Harness, counter: Arc<dyn Counter>) -> Result<Tally, CliError> {
    let tally = match args.runtime {
        RuntimeKind::Threads => harness.count(counter.as_ref())?,
        RuntimeKind::Tokio => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .build()
                .map_err(HarnessError::Runtime)?;
            runtime.block_on(harness.count_async(counter))?
        }
    };
    Ok(tally)
}

fn render(args: &Args, report: RunReport) -> Result<String, CliError> {
    let output = match args.format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => {
            let report = if args.timestamp {
                report.stamped_now()
            } else {
                report
            };
            report.to_json(args.pretty)?
        }
    };
    Ok(output)
}

fn execute(args: &Args) -> Result<(), CliError> {
    let config = HarnessConfig::new(args.workers, args.increments);
    let harness = Harness::new(config);
    let mut violation = None;

    for _ in 0..args.repeat.max(1) {
        let counter = args.counter.build();
        let tally = count(args, &harness, Arc::clone(&counter))?;
        println!("{}", render(args, RunReport::new(counter.as_ref(), &config, &tally))?);

        if let Err(err) = tally.verify() {
            violation.get_or_insert(err);
        }
    }

    match violation {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    if args.repeat == 0 {
        warn!("--repeat 0 treated as 1");
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
