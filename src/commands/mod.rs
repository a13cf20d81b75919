// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregates;
pub mod branches;
pub mod chart;
pub mod configure;
pub mod report;
pub mod serve;

use crate::config::{Config, Source};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Config file (or defaults) with the global `--file` override applied.
pub fn effective_config(m: &clap::ArgMatches) -> Result<Config> {
    let explicit = m.get_one::<String>("config").map(|s| Path::new(s.trim()));
    let mut cfg = Config::load(explicit)?;
    if let Some(file) = m.get_one::<String>("file") {
        cfg.source = Source::File {
            path: PathBuf::from(file.trim()),
        };
    }
    Ok(cfg)
}

/// `--branch`, or the all-branches option when absent.
pub fn selected_branch(cfg: &Config, sub: &clap::ArgMatches) -> String {
    let selected = sub
        .get_one::<String>("branch")
        .cloned()
        .unwrap_or_else(|| cfg.all_branches_label.clone());
    if !cfg.branch_options().contains(&selected) {
        tracing::warn!(branch = %selected, "branch is not one of the configured options");
    }
    selected
}
