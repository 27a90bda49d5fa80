// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{EntryKind, EntrySource, NewLedgerEntry};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let kind_raw = sub.get_one::<String>("kind").unwrap();
    let kind = EntryKind::parse(kind_raw)
        .ok_or_else(|| anyhow!("Unknown kind '{}', expected revenue|cost", kind_raw))?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let id = db::insert_ledger_entry(
        conn,
        &NewLedgerEntry {
            date,
            description: description.clone(),
            category,
            kind,
            amount,
            source: EntrySource::Manual,
            confidence: None,
        },
    )?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        kind.as_str(),
        fmt_money(&amount),
        date,
        description,
        id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s.trim())?),
        None => None,
    };
    let kind = match sub.get_one::<String>("kind") {
        Some(s) => Some(
            EntryKind::parse(s).ok_or_else(|| anyhow!("Unknown kind '{}', expected revenue|cost", s))?,
        ),
        None => None,
    };

    let mut entries = db::load_ledger(conn)?;
    if let Some(ref month) = month {
        entries.retain(|e| e.date.format("%Y-%m").to_string() == *month);
    }
    if let Some(kind) = kind {
        entries.retain(|e| e.kind == kind);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        entries.truncate(*limit);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    e.category.clone(),
                    e.kind.as_str().to_string(),
                    fmt_money(&e.amount),
                    e.source.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Kind", "Amount", "Source"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let deleted = conn.execute("DELETE FROM ledger WHERE id=?1", params![id])?;
    if deleted == 0 {
        return Err(anyhow!("Ledger entry {} not found", id));
    }
    println!("Removed ledger entry {}", id);
    Ok(())
}
