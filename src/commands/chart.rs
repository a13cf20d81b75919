// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::present::render_static;
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    let view = super::report::build(cfg, sub)?;
    std::fs::write(out, render_static(&view, &cfg.currency_suffix))
        .with_context(|| format!("Write chart {}", out))?;
    println!("Wrote chart for '{}' to {}", view.branch, out);
    Ok(())
}
