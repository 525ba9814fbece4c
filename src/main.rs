//! infraudit - IT infrastructure audit CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = infraudit::cli::Cli::parse();

    // RUST_LOG wins over --log-level; stdout stays reserved for reports
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    infraudit::cli::run(cli)
}
