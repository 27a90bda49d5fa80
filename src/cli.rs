// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hitfinance")
        .version(crate_version!())
        .about("HitFinance: business ledger, expense tracking, bank import, and financial analysis")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(ledger_cmd())
        .subcommand(expense_cmd())
        .subcommand(bank_cmd())
        .subcommand(report_cmd())
        .subcommand(analysis_cmd())
        .subcommand(advisor_cmd())
        .subcommand(export_cmd())
        .subcommand(settings_cmd())
}

fn ledger_cmd() -> Command {
    Command::new("ledger")
        .about("Record and list revenue/cost ledger entries")
        .subcommand(
            Command::new("add")
                .about("Add a ledger entry")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .help("revenue|cost"),
                )
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List ledger entries")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("kind").long("kind").help("revenue|cost"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm").about("Remove a ledger entry").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and list categorized expenses")
        .subcommand(
            Command::new("add")
                .about("Add an expense")
                .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true),
                )
                .arg(Arg::new("vendor").long("vendor").required(true))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("subscriptions|travel|meals|office"),
                )
                .arg(Arg::new("subcategory").long("subcategory"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("period")
                        .long("period")
                        .help("weekly|monthly|quarterly|yearly (required with --recurring)"),
                )
                .arg(Arg::new("receipt").long("receipt").help("Receipt URL"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List expenses")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("rm").about("Remove an expense").arg(
                Arg::new("id")
                    .long("id")
                    .required(true)
                    .value_parser(value_parser!(i64)),
            ),
        )
}

fn bank_cmd() -> Command {
    Command::new("bank")
        .about("Connect banks and import transactions")
        .subcommand(with_json_flags(
            Command::new("list").about("List supported banks"),
        ))
        .subcommand(with_json_flags(
            Command::new("connect")
                .about("Connect a bank and import 90 days of transactions")
                .arg(Arg::new("bank").long("bank").required(true).help("Bank id"))
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed the generator for a reproducible import"),
                )
                .arg(Arg::new("as-of").long("as-of").help("Reference date YYYY-MM-DD")),
        ))
        .subcommand(with_json_flags(
            Command::new("connections").about("List bank connections"),
        ))
        .subcommand(
            Command::new("sync")
                .about("Sync a bank connection")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("disconnect")
                .about("Disconnect a bank connection")
                .arg(
                    Arg::new("id")
                        .long("id")
                        .required(true)
                        .value_parser(value_parser!(i64)),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregate financial reports")
        .subcommand(with_json_flags(
            Command::new("summary")
                .about("Totals, net profit, margin, burn rate, runway")
                .arg(Arg::new("as-of").long("as-of").help("Reference date YYYY-MM-DD")),
        ))
        .subcommand(with_json_flags(
            Command::new("breakdown").about("Expense totals per category"),
        ))
        .subcommand(with_json_flags(
            Command::new("recurring")
                .about("Recurring vendor groups and amount anomalies over stored records"),
        ))
}

fn analysis_cmd() -> Command {
    Command::new("analysis")
        .about("Financial statements, insights, and optimization tips")
        .subcommand(with_json_flags(
            Command::new("income-statement")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .default_value("current")
                        .help("Label for the reporting period"),
                ),
        ))
        .subcommand(with_json_flags(Command::new("balance-sheet")))
        .subcommand(with_json_flags(
            Command::new("insights")
                .arg(Arg::new("as-of").long("as-of").help("Reference date YYYY-MM-DD")),
        ))
        .subcommand(with_json_flags(Command::new("tips")))
}

fn advisor_cmd() -> Command {
    Command::new("advisor")
        .about("Chat with the MoneyIQ advisor")
        .subcommand(
            Command::new("ask")
                .about("Ask a single question")
                .arg(
                    Arg::new("message")
                        .long("message")
                        .required(true),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("chat").about("Interactive session").arg(
                Arg::new("seed")
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export records to CSV or JSON")
        .subcommand(
            Command::new("ledger")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("expenses")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Advisor context settings")
        .subcommand(
            Command::new("set")
                .arg(Arg::new("key").long("key").required(true).help("company_name|user_name"))
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(Command::new("show"))
}
