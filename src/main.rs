//! `show` - switch state shell with the Cisco 8000 platform extensions.

use std::io::{self, Write};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cisco8000_show::commands;
use cisco8000_show::config::Config;
use cisco8000_show::host::Host;
use cisco8000_show::registry::Context;

fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load();

    let host = Host::load(commands::extension())?;
    let matches = host.cli().clone().get_matches();

    init_tracing(matches.get_count("verbose"));
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context {
        config: &config,
        out: &mut out,
    };
    host.run(&matches, &mut ctx)?;
    out.flush()?;
    Ok(())
}

/// Initialize tracing on stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
