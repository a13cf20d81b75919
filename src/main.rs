// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use salesboard::{cli, commands};

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("info");
    setup_logging(level);

    if let Some(("config", sub)) = matches.subcommand() {
        return commands::configure::handle(&matches, sub);
    }

    let cfg = commands::effective_config(&matches)?;
    tracing::debug!(source = %cfg.source, "effective configuration loaded");

    match matches.subcommand() {
        Some(("report", sub)) => commands::report::handle(&cfg, sub)?,
        Some(("aggregates", sub)) => commands::aggregates::handle(&cfg, sub)?,
        Some(("chart", sub)) => commands::chart::handle(&cfg, sub)?,
        Some(("serve", sub)) => commands::serve::handle(&cfg, sub)?,
        Some(("branches", _)) => commands::branches::handle(&cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
