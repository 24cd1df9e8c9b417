// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
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

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .required(true)
        .help("Output file path")
}

pub fn build_cli() -> Command {
    Command::new("atlas-ledger")
        .version(clap::crate_version!())
        .about("Atlas ledger: CSV import/export, cashflow and runway reports")
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Amount in currency units; the sign is taken from --type"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("project").long("project")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import data")
                .subcommand(
                    Command::new("transactions")
                        .about("Import transactions from CSV")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("dialect")
                                .long("dialect")
                                .value_parser(["ledger", "finance"])
                                .help("Cell quoting rules; defaults to the import_dialect setting"),
                        )
                        .arg(
                            Arg::new("strict")
                                .long("strict")
                                .action(ArgAction::SetTrue)
                                .help("Reject the file if any field had to be defaulted"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export all transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(out_arg()),
                )
                .subcommand(
                    Command::new("template")
                        .about("Write a starter CSV with example rows")
                        .arg(out_arg()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Income, expenses, running balance and runway per month")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .help("Only show the most recent N months"),
                        ),
                ))
                .subcommand(
                    Command::new("summary")
                        .about("Lifetime totals and runway")
                        .arg(
                            Arg::new("basis")
                                .long("basis")
                                .value_parser(["total", "average"])
                                .help("Runway denominator; defaults to the runway_basis setting"),
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("profitability").about("Income and expenses per project/client"),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expenses per category")
                        .arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show").about("Show current settings"))
                .subcommand(
                    Command::new("set")
                        .about("Change a setting")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
