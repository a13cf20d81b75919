// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::loader;
use crate::present::format_thousands;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = loader::load(cfg).with_context(|| format!("Load {}", cfg.source))?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|a| {
                vec![
                    a.year_month.clone(),
                    a.branch.clone(),
                    format_thousands(a.sales),
                    format_thousands(a.cost),
                    format_thousands(a.profit),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Branch", "Sales", "Cost", "Profit"], rows)
        );
    }
    Ok(())
}
