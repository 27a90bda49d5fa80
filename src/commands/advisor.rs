// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{self, AdvisorContext, AdvisorSession};
use crate::db;
use crate::models::AggregateSummary;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::io::{BufRead, Write};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ask", sub)) => ask(conn, sub)?,
        Some(("chat", sub)) => chat(conn, sub)?,
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

fn context(conn: &Connection) -> Result<AdvisorContext> {
    Ok(AdvisorContext {
        user_name: db::get_setting(conn, "user_name")?.unwrap_or_else(|| "there".to_string()),
        company_name: db::get_setting(conn, "company_name")?
            .unwrap_or_else(|| "HitFluence Media & Technology Group".to_string()),
    })
}

fn snapshot(conn: &Connection) -> Result<AggregateSummary> {
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    Ok(crate::summary::summarize(
        &ledger,
        &expenses,
        chrono::Local::now().date_naive(),
    ))
}

fn ask(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let message = sub.get_one::<String>("message").unwrap();
    let mut rng = rng_from(sub);
    let ctx = context(conn)?;
    let summary = snapshot(conn)?;
    let mut session = AdvisorSession::new();
    println!("{}", session.respond(&mut rng, message, &ctx, &summary));
    Ok(())
}

fn chat(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut rng = rng_from(sub);
    let ctx = context(conn)?;
    let mut session = AdvisorSession::new();

    println!("MoneyIQ advisor for {}", ctx.company_name);
    println!("{}", advisor::initial_greeting(&mut rng, &ctx.user_name));
    println!("(type 'exit' to leave)");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }
        // Fresh snapshot each turn so the advisor sees new records.
        let summary = snapshot(conn)?;
        println!("{}", session.respond(&mut rng, message, &ctx, &summary));
    }
    Ok(())
}
