// Copyright (c) HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryKind, ExpenseEntry, LedgerEntry, Transaction, TxnKind};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use crate::{bank, db, detect, summary};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary_report(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("recurring", sub)) => recurring(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };

    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    let snapshot = summary::summarize(&ledger, &expenses, as_of);

    if !maybe_print_json(json_flag, jsonl_flag, &snapshot)? {
        let runway = if snapshot.runway_months.is_infinite() {
            "unlimited".to_string()
        } else {
            format!("{:.0} months", snapshot.runway_months)
        };
        let rows = vec![
            vec!["Total revenue".to_string(), fmt_money(&snapshot.total_revenue)],
            vec!["Total costs".to_string(), fmt_money(&snapshot.total_costs)],
            vec!["Total expenses".to_string(), fmt_money(&snapshot.total_expenses)],
            vec!["Net profit".to_string(), fmt_money(&snapshot.net_profit)],
            vec!["Profit margin".to_string(), format!("{:.1}%", snapshot.profit_margin)],
            vec!["Burn rate".to_string(), fmt_money(&snapshot.burn_rate)],
            vec!["Runway".to_string(), runway],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    let snapshot = summary::summarize(&ledger, &expenses, chrono::Local::now().date_naive());

    if !maybe_print_json(json_flag, jsonl_flag, &snapshot.expense_breakdown)? {
        let mut items: Vec<_> = snapshot.expense_breakdown.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1));
        let rows = items
            .into_iter()
            .map(|(cat, amt)| vec![cat.clone(), fmt_money(amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn recurring(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;

    let expense_txns: Vec<Transaction> = expenses.iter().map(expense_as_txn).collect();
    let groups = detect::recurring_groups(&expense_txns);

    let mut all_txns = expense_txns;
    all_txns.extend(ledger.iter().map(ledger_as_txn));
    let anomalies = detect::anomalies(&all_txns);

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &serde_json::json!({ "recurring": groups, "anomalies": anomalies }),
    )? {
        return Ok(());
    }

    if groups.is_empty() {
        println!("No recurring vendor groups found");
    } else {
        let rows = groups
            .iter()
            .map(|g| {
                vec![
                    g.merchant.clone(),
                    fmt_money(&g.amount),
                    g.frequency.as_str().to_string(),
                    g.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Vendor", "Amount", "Frequency", "Category"], rows)
        );
    }

    if anomalies.is_empty() {
        println!("No amount anomalies found");
    } else {
        let rows = anomalies
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
        println!(
            "{}",
            pretty_table(&["Date", "Record", "Detail", "Severity"], rows)
        );
    }
    Ok(())
}

/// View a stored expense as an analysis transaction; the vendor plays
/// the merchant role and the amount is money out.
fn expense_as_txn(e: &ExpenseEntry) -> Transaction {
    Transaction {
        id: format!("exp_{}", e.id),
        date: e.date,
        description: e.description.clone(),
        amount: -e.amount,
        kind: TxnKind::Expense,
        category: e
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "other".to_string()),
        subcategory: e.subcategory.clone(),
        merchant: e.vendor.clone(),
        confidence: e.confidence.unwrap_or(1.0),
    }
}

fn ledger_as_txn(e: &LedgerEntry) -> Transaction {
    let (kind, amount) = match e.kind {
        EntryKind::Revenue => (TxnKind::Revenue, e.amount),
        EntryKind::Cost => (TxnKind::Cost, -e.amount),
    };
    Transaction {
        id: format!("led_{}", e.id),
        date: e.date,
        description: e.description.clone(),
        amount,
        kind,
        category: e.category.clone(),
        subcategory: None,
        merchant: bank::extract_merchant(&e.description),
        confidence: e.confidence.unwrap_or(1.0),
    }
}
