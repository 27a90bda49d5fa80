// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Mock bank integration: supported-bank catalog, synthetic transaction
//! window, and the connect/sync/disconnect lifecycle.
//!
//! There is no real banking protocol here by design; the synthesizer
//! stands in for an aggregator feed. All randomness flows through an
//! injected generator so runs are reproducible under a seed.

use crate::classify::{self, ImportAnalysis};
use crate::db;
use crate::models::{Transaction, TxnKind};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rand::Rng;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Bank not supported")]
    Unsupported,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Bank {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: &'static str,
    pub features: &'static [&'static str],
}

pub const SUPPORTED_BANKS: [Bank; 7] = [
    Bank {
        id: "chase",
        name: "Chase Bank",
        tier: "major",
        features: &["checking", "savings", "credit"],
    },
    Bank {
        id: "bofa",
        name: "Bank of America",
        tier: "major",
        features: &["checking", "savings", "credit", "investment"],
    },
    Bank {
        id: "wells_fargo",
        name: "Wells Fargo",
        tier: "major",
        features: &["checking", "savings", "credit"],
    },
    Bank {
        id: "citi",
        name: "Citibank",
        tier: "major",
        features: &["checking", "savings", "credit", "investment"],
    },
    Bank {
        id: "capital_one",
        name: "Capital One",
        tier: "major",
        features: &["checking", "savings", "credit"],
    },
    Bank {
        id: "truist",
        name: "Truist Bank",
        tier: "major",
        features: &["checking", "savings", "credit", "investment", "zelle"],
    },
    Bank {
        id: "usbank",
        name: "U.S. Bank",
        tier: "major",
        features: &["checking", "savings", "credit"],
    },
];

pub fn find_bank(id: &str) -> Result<&'static Bank, BankError> {
    SUPPORTED_BANKS
        .iter()
        .find(|b| b.id == id)
        .ok_or(BankError::Unsupported)
}

struct Archetype {
    description: &'static str,
    cents: i64,
    kind: TxnKind,
    category: &'static str,
    subcategory: Option<&'static str>,
}

/// Fixed catalog the synthesizer draws from: four revenue archetypes,
/// eight categorized expenses, three costs.
const CATALOG: [Archetype; 15] = [
    Archetype {
        description: "Client Payment - ABC Corp",
        cents: 500_000,
        kind: TxnKind::Revenue,
        category: "Client Services",
        subcategory: None,
    },
    Archetype {
        description: "Consulting Fee - XYZ Ltd",
        cents: 350_000,
        kind: TxnKind::Revenue,
        category: "Consulting",
        subcategory: None,
    },
    Archetype {
        description: "Project Payment - Tech Solutions",
        cents: 750_000,
        kind: TxnKind::Revenue,
        category: "Project Work",
        subcategory: None,
    },
    Archetype {
        description: "Monthly Retainer - StartupCo",
        cents: 400_000,
        kind: TxnKind::Revenue,
        category: "Retainer",
        subcategory: None,
    },
    Archetype {
        description: "Office Rent",
        cents: -250_000,
        kind: TxnKind::Expense,
        category: "office",
        subcategory: Some("Utilities"),
    },
    Archetype {
        description: "Adobe Creative Suite",
        cents: -5_299,
        kind: TxnKind::Expense,
        category: "subscriptions",
        subcategory: Some("Software"),
    },
    Archetype {
        description: "AWS Services",
        cents: -23_456,
        kind: TxnKind::Expense,
        category: "subscriptions",
        subcategory: Some("Cloud Storage"),
    },
    Archetype {
        description: "Uber Business",
        cents: -4_530,
        kind: TxnKind::Expense,
        category: "travel",
        subcategory: Some("Public Transport"),
    },
    Archetype {
        description: "Business Lunch - Client Meeting",
        cents: -8_945,
        kind: TxnKind::Expense,
        category: "meals",
        subcategory: Some("Business Meals"),
    },
    Archetype {
        description: "Office Supplies - Staples",
        cents: -15_678,
        kind: TxnKind::Expense,
        category: "office",
        subcategory: Some("Supplies"),
    },
    Archetype {
        description: "Internet Bill - Comcast",
        cents: -8_999,
        kind: TxnKind::Expense,
        category: "office",
        subcategory: Some("Internet"),
    },
    Archetype {
        description: "Phone Bill - Verizon",
        cents: -12_550,
        kind: TxnKind::Expense,
        category: "office",
        subcategory: Some("Phone"),
    },
    Archetype {
        description: "Contractor Payment - John Doe",
        cents: -200_000,
        kind: TxnKind::Cost,
        category: "Labor",
        subcategory: None,
    },
    Archetype {
        description: "Software License - Microsoft",
        cents: -29_999,
        kind: TxnKind::Cost,
        category: "Software",
        subcategory: None,
    },
    Archetype {
        description: "Equipment Purchase - Dell",
        cents: -129_999,
        kind: TxnKind::Cost,
        category: "Equipment",
        subcategory: None,
    },
];

/// Days of history the synthesizer produces, ending at the reference date.
pub const WINDOW_DAYS: i64 = 90;

/// Synthesize a transaction window: for each day in the window, one to
/// five transactions drawn uniformly from the catalog, confidence uniform
/// in [0.85, 1.0], sorted newest first.
pub fn synthesize_window<R: Rng>(rng: &mut R, reference: NaiveDate) -> Vec<Transaction> {
    let mut txns = Vec::new();
    for i in 0..WINDOW_DAYS {
        let date = reference - chrono::Duration::days(i);
        let daily = rng.gen_range(1..=5);
        for _ in 0..daily {
            txns.push(synthesize_one(rng, date));
        }
    }
    txns.sort_by(|a, b| b.date.cmp(&a.date));
    txns
}

fn synthesize_one<R: Rng>(rng: &mut R, date: NaiveDate) -> Transaction {
    let archetype = &CATALOG[rng.gen_range(0..CATALOG.len())];
    Transaction {
        id: format!("txn_{}", random_token(rng, 12)),
        date,
        description: archetype.description.to_string(),
        amount: Decimal::new(archetype.cents, 2),
        kind: archetype.kind,
        category: archetype.category.to_string(),
        subcategory: archetype.subcategory.map(|s| s.to_string()),
        merchant: extract_merchant(archetype.description),
        confidence: 0.85 + rng.r#gen::<f64>() * 0.15,
    }
}

/// Merchant from a description: the segment after " - " when present,
/// otherwise the first word.
pub fn extract_merchant(description: &str) -> String {
    let mut parts = description.split(" - ");
    let head = parts.next().unwrap_or_default();
    match parts.next() {
        Some(tail) => tail.to_string(),
        None => head.split(' ').next().unwrap_or_default().to_string(),
    }
}

fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

struct SynthesizedAccount {
    account_ref: String,
    name: &'static str,
    kind: &'static str,
    balance: Decimal,
    mask: &'static str,
}

fn synthesize_accounts<R: Rng>(rng: &mut R) -> Vec<SynthesizedAccount> {
    let checking = 25_000.0 + rng.r#gen::<f64>() * 50_000.0;
    let savings = 75_000.0 + rng.r#gen::<f64>() * 100_000.0;
    vec![
        SynthesizedAccount {
            account_ref: format!("checking_{}", random_token(rng, 6)),
            name: "Business Checking",
            kind: "checking",
            balance: Decimal::from_f64(checking).unwrap_or_default().round_dp(2),
            mask: "1234",
        },
        SynthesizedAccount {
            account_ref: format!("savings_{}", random_token(rng, 6)),
            name: "Business Savings",
            kind: "savings",
            balance: Decimal::from_f64(savings).unwrap_or_default().round_dp(2),
            mask: "5678",
        },
    ]
}

#[derive(Debug, serde::Serialize)]
pub struct ConnectReport {
    pub connection_id: i64,
    pub bank_name: String,
    pub ledger_written: usize,
    pub expenses_written: usize,
    pub failed_writes: usize,
    pub analysis: ImportAnalysis,
}

/// Connect a bank: create the connection and its synthetic accounts, run
/// the synthesize/classify pipeline over a 90-day window ending at
/// `as_of`, and write the resulting records back one by one. Each write
/// is submitted independently; failed rows are counted, not fatal.
pub fn connect_bank<R: Rng>(
    conn: &Connection,
    bank_id: &str,
    rng: &mut R,
    as_of: NaiveDate,
) -> Result<ConnectReport> {
    let bank = find_bank(bank_id)?;

    conn.execute(
        "INSERT INTO bank_connections(bank_id, bank_name, account_id, status)
         VALUES (?1, ?2, ?3, 'connected')",
        params![bank.id, bank.name, format!("acc_{}", random_token(rng, 9))],
    )?;
    let connection_id = conn.last_insert_rowid();

    for account in synthesize_accounts(rng) {
        conn.execute(
            "INSERT INTO bank_accounts(connection_id, account_ref, name, type, balance, mask)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                connection_id,
                account.account_ref,
                account.name,
                account.kind,
                account.balance.to_string(),
                account.mask
            ],
        )?;
    }

    let batch = synthesize_window(rng, as_of);
    let analysis = classify::analyze(&batch);

    let mut ledger_written = 0;
    let mut expenses_written = 0;
    let mut failed_writes = 0;
    for entry in &analysis.ledger_entries {
        match db::insert_ledger_entry(conn, entry) {
            Ok(_) => ledger_written += 1,
            Err(_) => failed_writes += 1,
        }
    }
    for entry in &analysis.expense_entries {
        match db::insert_expense_entry(conn, entry) {
            Ok(_) => expenses_written += 1,
            Err(_) => failed_writes += 1,
        }
    }

    Ok(ConnectReport {
        connection_id,
        bank_name: bank.name.to_string(),
        ledger_written,
        expenses_written,
        failed_writes,
        analysis,
    })
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SyncReport {
    pub connection_id: i64,
    pub new_transactions: u32,
}

/// Refresh a connection's sync stamp and report a synthetic count of new
/// transactions, mirroring the aggregator's incremental feed.
pub fn sync_connection<R: Rng>(
    conn: &Connection,
    connection_id: i64,
    rng: &mut R,
) -> Result<SyncReport> {
    let updated = conn.execute(
        "UPDATE bank_connections SET last_sync=datetime('now') WHERE id=?1",
        params![connection_id],
    )?;
    if updated == 0 {
        return Err(anyhow!("Bank connection {} not found", connection_id));
    }
    Ok(SyncReport {
        connection_id,
        new_transactions: rng.gen_range(1..=10),
    })
}

pub fn disconnect(conn: &Connection, connection_id: i64) -> Result<()> {
    let deleted = conn
        .execute(
            "DELETE FROM bank_connections WHERE id=?1",
            params![connection_id],
        )
        .with_context(|| format!("Delete bank connection {}", connection_id))?;
    if deleted == 0 {
        return Err(anyhow!("Bank connection {} not found", connection_id));
    }
    Ok(())
}
