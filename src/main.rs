use anyhow::Result;
use clap::Parser;
use sortbench::cli::{run_cli, Cli};
use sortbench::logging::{init_logging_with_config, LogConfig};
use sortbench::runtime_config::RuntimeConfig;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging_with_config(&LogConfig::from_env())?;

    let config = RuntimeConfig::from_env();
    config.apply();
    info!(
        stack_size = config.stack_size,
        workers = config.workers,
        "Coroutine runtime configured"
    );

    run_cli(cli, &config)
}
