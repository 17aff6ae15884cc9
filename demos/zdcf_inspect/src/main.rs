//! `zdcf-inspect` entry-point: resolve an application and print it as JSON.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use zdcf_inspect::cli::{InspectCli, load_settings};
use zdcf_inspect::error::Result;
use zdcf_inspect::report::{build_report, print_report};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "zdcf=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let cli = InspectCli::parse();
    let settings = load_settings(&cli)?;
    tracing::info!(app = %settings.app, sources = settings.sources.len(), "resolving");
    let app = zdcf::resolve(&settings.app, settings.sources.iter().cloned())?;
    let report = build_report(&app, settings.device.as_deref())?;
    print_report(&report, settings.compact)
}
