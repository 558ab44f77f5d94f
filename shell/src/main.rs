use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracker_shell::{Cli, Shell};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(base_url = %cli.base_url, "starting");
    Shell::new(&cli.base_url, io::stdout().lock()).run(cli.command)
}
