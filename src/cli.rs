// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn branch_arg() -> Arg {
    Arg::new("branch")
        .long("branch")
        .short('b')
        .help("Branch to show (defaults to the all-branches option)")
}

pub fn build_cli() -> Command {
    command!()
        .name("salesboard")
        .about("Monthly sales, cost and profit per branch from a spreadsheet transaction log")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to config.json (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .global(true)
                .help("Read the transaction log from a local CSV instead of the configured source"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .value_parser(["trace", "debug", "info", "warn", "error"]),
        )
        .subcommand(json_args(
            Command::new("report")
                .about("Print the monthly summary for one branch")
                .arg(branch_arg()),
        ))
        .subcommand(json_args(
            Command::new("aggregates").about("Print per-month, per-branch aggregates"),
        ))
        .subcommand(
            Command::new("chart")
                .about("Write a static HTML chart for one branch")
                .arg(branch_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .required(true)
                        .help("Output HTML file"),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the interactive dashboard")
                .arg(Arg::new("bind").long("bind").help("Listen address, e.g. 0.0.0.0:8050")),
        )
        .subcommand(Command::new("branches").about("List branch options"))
        .subcommand(
            Command::new("config")
                .about("Inspect or create the configuration file")
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the default config path"))
                .subcommand(
                    Command::new("init")
                        .about("Write the default configuration")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .action(ArgAction::SetTrue)
                                .help("Overwrite an existing file"),
                        ),
                ),
        )
}
