// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(cfg: &Config) -> Result<()> {
    let rows = cfg
        .branch_options()
        .into_iter()
        .map(|b| {
            let mark = if b == cfg.all_branches_label { "default" } else { "" };
            vec![b, mark.to_string()]
        })
        .collect();
    println!("{}", pretty_table(&["Branch", ""], rows));
    Ok(())
}
