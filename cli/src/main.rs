use std::process::ExitCode;

use clap::Parser;
use items_cli::Cli;
use items_core::{ClientConfig, ItemsController, TracingHook, UreqTransport};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = cli
        .base_url
        .clone()
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env);
    info!(base_url = %config.base_url, "using backend");

    let controller =
        ItemsController::from_config(&config, UreqTransport::new()).with_hook(TracingHook);
    let state = items_cli::run(&controller, &cli.command).await;

    print!("{}", items_cli::render(&state));

    if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
