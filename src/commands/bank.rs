// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::bank::{self, SUPPORTED_BANKS};
use crate::db;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        Some(("connect", sub)) => connect(conn, sub)?,
        Some(("connections", sub)) => connections(conn, sub)?,
        Some(("sync", sub)) => sync(conn, sub)?,
        Some(("disconnect", sub)) => disconnect(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn rng_from(sub: &clap::ArgMatches) -> StdRng {
    match sub.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    }
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if !maybe_print_json(json_flag, jsonl_flag, &SUPPORTED_BANKS)? {
        let rows = SUPPORTED_BANKS
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.name.to_string(),
                    b.tier.to_string(),
                    b.features.join(", "),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Name", "Tier", "Features"], rows));
    }
    Ok(())
}

fn connect(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let bank_id = sub.get_one::<String>("bank").unwrap().trim();
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let mut rng = rng_from(sub);

    let report = bank::connect_bank(conn, bank_id, &mut rng, as_of)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!(
        "Connected {} (connection: {}). Imported {} ledger entries and {} expenses.",
        report.bank_name, report.connection_id, report.ledger_written, report.expenses_written
    );
    if report.failed_writes > 0 {
        eprintln!(
            "{} records failed to write and were skipped",
            report.failed_writes
        );
    }

    let totals = &report.analysis.totals;
    println!(
        "{}",
        pretty_table(
            &["Revenue", "Costs", "Expenses"],
            vec![vec![
                fmt_money(&totals.total_revenue),
                fmt_money(&totals.total_costs),
                fmt_money(&totals.total_expenses),
            ]]
        )
    );

    if !report.analysis.recurring.is_empty() {
        let rows = report
            .analysis
            .recurring
            .iter()
            .map(|g| {
                vec![
                    g.merchant.clone(),
                    fmt_money(&g.amount),
                    g.frequency.as_str().to_string(),
                    g.category.clone(),
                    format!("{:.0}%", g.confidence * 100.0),
                ]
            })
            .collect();
        println!("Recurring charges:");
        println!(
            "{}",
            pretty_table(
                &["Merchant", "Amount", "Frequency", "Category", "Confidence"],
                rows
            )
        );
    }

    if !report.analysis.anomalies.is_empty() {
        let rows = report
            .analysis
            .anomalies
            .iter()
            .map(|a| {
                vec![
                    a.transaction.date.to_string(),
                    a.transaction.description.clone(),
                    a.description.clone(),
                    a.severity.as_str().to_string(),
                ]
            })
            .collect();
        println!("Anomalies:");
        println!(
            "{}",
            pretty_table(&["Date", "Transaction", "Detail", "Severity"], rows)
        );
    }
    Ok(())
}

fn connections(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let connections = db::load_connections(conn)?;

    if json_flag || jsonl_flag {
        let mut views = Vec::new();
        for c in &connections {
            let accounts = db::load_accounts(conn, c.id)?;
            views.push(serde_json::json!({ "connection": c, "accounts": accounts }));
        }
        maybe_print_json(json_flag, jsonl_flag, &views)?;
        return Ok(());
    }

    let mut rows = Vec::new();
    for c in &connections {
        let accounts = db::load_accounts(conn, c.id)?;
        let accounts_col = accounts
            .iter()
            .map(|a| format!("{} ****{} {}", a.name, a.mask, fmt_money(&a.balance)))
            .collect::<Vec<_>>()
            .join("; ");
        rows.push(vec![
            c.id.to_string(),
            c.bank_name.clone(),
            c.account_id.clone(),
            c.status.as_str().to_string(),
            c.last_sync.clone(),
            accounts_col,
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["Id", "Bank", "Account", "Status", "Last sync", "Accounts"],
            rows
        )
    );
    Ok(())
}

fn sync(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut rng = rng_from(sub);
    let report = bank::sync_connection(conn, id, &mut rng)?;
    println!(
        "Synced connection {}: {} new transactions",
        report.connection_id, report.new_transactions
    );
    Ok(())
}

fn disconnect(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    bank::disconnect(conn, id)?;
    println!("Disconnected bank connection {}", id);
    Ok(())
}
