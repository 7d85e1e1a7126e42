use crate::batch::{SortBatch, TimingReport};
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer};
use crate::timing::{SortHarness, TimingMode};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default listen address; the service's documented port is 9000.
pub const DEFAULT_ADDR: &str = "0.0.0.0:9000";

/// Command-line interface for sortbench
#[derive(Parser, Debug)]
#[command(name = "sortbench")]
#[command(version, about = "Time sequential vs concurrent sorting over HTTP", long_about = None)]
pub struct Cli {
    /// The subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: String,
    },
    /// Time a request body from a file and print the report
    Compare {
        /// JSON file shaped like a request body: {"to_sort": [[...], ...]}
        #[arg(short, long)]
        input: PathBuf,

        /// Which timer(s) to run
        #[arg(long, value_enum, default_value_t = CompareMode::Both)]
        mode: CompareMode,
    },
}

/// Timer selection for `compare`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareMode {
    Sequential,
    Concurrent,
    Both,
}

impl CompareMode {
    fn modes(self) -> &'static [TimingMode] {
        match self {
            CompareMode::Sequential => &[TimingMode::Sequential],
            CompareMode::Concurrent => &[TimingMode::Concurrent],
            CompareMode::Both => &[TimingMode::Sequential, TimingMode::Concurrent],
        }
    }
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Propagates bind failures from `serve` and read/decode/harness failures from `compare`.
pub fn run_cli(cli: Cli, config: &RuntimeConfig) -> Result<()> {
    let harness = SortHarness::from_config(config);
    match cli.command {
        None => serve(DEFAULT_ADDR, harness),
        Some(Commands::Serve { addr }) => serve(&addr, harness),
        Some(Commands::Compare { input, mode }) => {
            let report = compare(&input, mode, harness)?;
            println!("{}", String::from_utf8_lossy(&report.encode()));
            Ok(())
        }
    }
}

/// Bind the service on `addr` and block until the server stops.
///
/// # Errors
///
/// Fails if the address cannot be bound or the server coroutine panics.
pub fn serve(addr: &str, harness: SortHarness) -> Result<()> {
    let handle = HttpServer(AppService::new(harness))
        .start(addr)
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %handle.addr(), stack_size = harness.stack_size(), "sortbench serving");
    handle
        .join()
        .map_err(|e| anyhow!("server coroutine panicked: {e:?}"))
}

/// Decode `input` as a request body and time it under each selected mode.
///
/// # Errors
///
/// Fails if the file cannot be read, does not decode, or the concurrent harness fails.
pub fn compare(input: &Path, mode: CompareMode, harness: SortHarness) -> Result<TimingReport> {
    let body = std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let batch = SortBatch::decode(&body)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    let mut report = TimingReport::default();
    for timing_mode in mode.modes() {
        let mut copy = batch.clone();
        let run = harness
            .run(*timing_mode, &mut copy)
            .with_context(|| format!("{timing_mode} run failed"))?;
        report = report.merge(run);
    }
    Ok(report)
}
