// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::server;
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let bind = sub
        .get_one::<String>("bind")
        .cloned()
        .unwrap_or_else(|| cfg.bind.clone());
    let rt = tokio::runtime::Runtime::new().context("Start async runtime")?;
    rt.block_on(server::serve(cfg.clone(), &bind))
        .with_context(|| format!("Serve dashboard on {}", bind))
}
