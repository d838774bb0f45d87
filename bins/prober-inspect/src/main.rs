mod cmd;
mod config;
mod error;

use clap::Parser;
use config::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cmd::inspect::run(&cli) {
        tracing::error!(error = %e, "inspect failed");
        std::process::exit(1);
    }
}
