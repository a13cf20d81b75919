// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::selected_branch;
use crate::config::Config;
use crate::models::ViewModel;
use crate::pipeline;
use crate::present::{format_percent, format_thousands, summary_items};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = build(cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &view)? {
        print_view(&view, &cfg.currency_suffix);
    }
    Ok(())
}

pub fn build(cfg: &Config, sub: &clap::ArgMatches) -> Result<ViewModel> {
    let branch = selected_branch(cfg, sub);
    pipeline::run(cfg, &branch, None)
        .with_context(|| format!("Could not build the report for '{}'", branch))
}

fn print_view(view: &ViewModel, currency: &str) {
    println!("{}", view.branch);
    let summary: Vec<Vec<String>> = summary_items(view, currency)
        .into_iter()
        .map(|i| vec![i.label, i.value])
        .collect();
    println!("{}", pretty_table(&["", ""], summary));

    let mut rows: Vec<Vec<String>> = view
        .months
        .iter()
        .map(|m| {
            vec![
                m.year_month.clone(),
                format_thousands(m.sales),
                format_thousands(m.cost),
                format_thousands(m.profit),
            ]
        })
        .collect();
    rows.push(vec![
        "Avg profit/month".into(),
        String::new(),
        String::new(),
        format_thousands(view.average_monthly_profit),
    ]);
    println!("{}", pretty_table(&["Month", "Sales", "Cost", "Profit"], rows));
    println!("Profit margin: {}", format_percent(view.profit_percent));
}
