// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Track income and expenses; serve monthly reports as JSON, CSV or xlsx")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINTRACK_DB")
                .help("SQLite database path (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP API")
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .env("FINTRACK_BIND")
                        .help("Listen address, e.g. 127.0.0.1:8000"),
                )
                .arg(
                    Arg::new("origin")
                        .long("origin")
                        .env("FINTRACK_ORIGINS")
                        .action(ArgAction::Append)
                        .help("Allowed CORS origin; repeat or comma-separate"),
                )
                .arg(
                    Arg::new("strict-types")
                        .long("strict-types")
                        .env("FINTRACK_STRICT_TYPES")
                        .action(ArgAction::SetTrue)
                        .help("Reject types other than income/expense"),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("skip")
                                .long("skip")
                                .value_parser(value_parser!(i64))
                                .default_value("0"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(i64))
                                .default_value("100"),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand(
                    Command::new("monthly")
                        .arg(
                            Arg::new("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .required(true)
                                .allow_negative_numbers(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("export")
                        .arg(
                            Arg::new("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .required(true)
                                .allow_negative_numbers(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("xlsx")
                                .help("csv or xlsx"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .help("Output path (defaults to report_<year>_<month>.<ext>)"),
                        ),
                ),
        )
}
