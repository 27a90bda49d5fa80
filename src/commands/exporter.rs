// Copyright (c) HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => export_ledger(conn, sub),
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_ledger(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let entries = db::load_ledger(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "description", "category", "kind", "amount", "source", "confidence",
            ])?;
            for e in &entries {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    e.category.clone(),
                    e.kind.as_str().to_string(),
                    e.amount.to_string(),
                    e.source.as_str().to_string(),
                    e.confidence.map(|c| c.to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&entries)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported ledger to {}", out);
    Ok(())
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let entries = db::load_expenses(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "vendor",
                "category",
                "subcategory",
                "amount",
                "is_recurring",
                "recurring_period",
                "notes",
            ])?;
            for e in &entries {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    e.description.clone(),
                    e.vendor.clone(),
                    e.category.map(|c| c.as_str()).unwrap_or_default().to_string(),
                    e.subcategory.clone().unwrap_or_default(),
                    e.amount.to_string(),
                    e.is_recurring.to_string(),
                    e.recurring_period
                        .map(|p| p.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    e.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&entries)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported expenses to {}", out);
    Ok(())
}
