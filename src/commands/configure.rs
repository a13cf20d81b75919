// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::effective_config;
use crate::config::{Config, config_path};
use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// `root` carries the global `--config` / `--file` flags.
pub fn handle(root: &clap::ArgMatches, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let cfg = effective_config(root)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        Some(("path", _)) => println!("{}", config_path()?.display()),
        Some(("init", sub)) => {
            let path = match root.get_one::<String>("config") {
                Some(p) => PathBuf::from(p.trim()),
                None => config_path()?,
            };
            if path.exists() && !sub.get_flag("force") {
                return Err(anyhow!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            Config::default().save(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}
