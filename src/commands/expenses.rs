// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{EntrySource, ExpenseCategory, NewExpenseEntry, RecurringPeriod};
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
    let vendor = sub.get_one::<String>("vendor").unwrap().trim().to_string();
    let category_raw = sub.get_one::<String>("category").unwrap();
    let category = ExpenseCategory::parse(category_raw.trim()).ok_or_else(|| {
        anyhow!(
            "Unknown category '{}', expected subscriptions|travel|meals|office",
            category_raw
        )
    })?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let is_recurring = sub.get_flag("recurring");

    // A recurring expense always names its cadence.
    let recurring_period = match sub.get_one::<String>("period") {
        Some(p) => Some(
            RecurringPeriod::parse(p.trim()).ok_or_else(|| {
                anyhow!("Unknown period '{}', expected weekly|monthly|quarterly|yearly", p)
            })?,
        ),
        None if is_recurring => {
            return Err(anyhow!("--period is required when --recurring is set"));
        }
        None => None,
    };

    let entry = NewExpenseEntry {
        date,
        description: description.clone(),
        vendor,
        category: Some(category),
        subcategory: sub.get_one::<String>("subcategory").map(|s| s.trim().to_string()),
        amount,
        is_recurring,
        recurring_period,
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
        source: EntrySource::Manual,
        confidence: None,
    };
    let id = db::insert_expense_entry(conn, &entry)?;
    if let Some(url) = sub.get_one::<String>("receipt") {
        conn.execute(
            "UPDATE expenses SET receipt_url=?1 WHERE id=?2",
            params![url, id],
        )?;
    }
    println!(
        "Recorded {} expense {} on {} '{}' (id: {})",
        category.as_str(),
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
    let category = match sub.get_one::<String>("category") {
        Some(s) => Some(ExpenseCategory::parse(s.trim()).ok_or_else(|| {
            anyhow!("Unknown category '{}', expected subscriptions|travel|meals|office", s)
        })?),
        None => None,
    };

    let mut entries = db::load_expenses(conn)?;
    if let Some(ref month) = month {
        entries.retain(|e| e.date.format("%Y-%m").to_string() == *month);
    }
    if let Some(category) = category {
        entries.retain(|e| e.category == Some(category));
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
                    e.vendor.clone(),
                    e.description.clone(),
                    e.category.map(|c| c.as_str()).unwrap_or("other").to_string(),
                    e.subcategory.clone().unwrap_or_default(),
                    fmt_money(&e.amount),
                    if e.is_recurring {
                        e.recurring_period
                            .map(|p| p.as_str())
                            .unwrap_or("recurring")
                            .to_string()
                    } else {
                        String::new()
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Vendor", "Description", "Category", "Subcategory", "Amount", "Recurs"],
                rows
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let deleted = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
    if deleted == 0 {
        return Err(anyhow!("Expense {} not found", id));
    }
    println!("Removed expense {}", id);
    Ok(())
}
