// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    BankAccount, BankConnection, ConnectionStatus, EntryKind, EntrySource, ExpenseCategory,
    ExpenseEntry, LedgerEntry, NewExpenseEntry, NewLedgerEntry, RecurringPeriod,
};
use crate::utils::lenient_amount;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.hitfluence", "HitFinance", "hitfinance"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("hitfinance.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ledger(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('revenue','cost')),
        amount TEXT NOT NULL,
        source TEXT NOT NULL DEFAULT 'manual',
        confidence REAL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_ledger_date ON ledger(date);

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        vendor TEXT NOT NULL,
        category TEXT,
        subcategory TEXT,
        amount TEXT NOT NULL,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        recurring_period TEXT,
        receipt_url TEXT,
        notes TEXT,
        source TEXT NOT NULL DEFAULT 'manual',
        confidence REAL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS bank_connections(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        bank_id TEXT NOT NULL,
        bank_name TEXT NOT NULL,
        account_id TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('connected','disconnected')),
        connected_at TEXT NOT NULL DEFAULT (datetime('now')),
        last_sync TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS bank_accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        connection_id INTEGER NOT NULL,
        account_ref TEXT NOT NULL,
        name TEXT NOT NULL,
        type TEXT NOT NULL,
        balance TEXT NOT NULL,
        mask TEXT NOT NULL,
        FOREIGN KEY(connection_id) REFERENCES bank_connections(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Load the full ledger, newest first. Amounts are coerced leniently so a
/// malformed row degrades to zero instead of failing the whole snapshot.
pub fn load_ledger(conn: &Connection) -> Result<Vec<LedgerEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, category, kind, amount, source, confidence
         FROM ledger ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let kind_s: String = r.get(4)?;
        let amount_s: String = r.get(5)?;
        let source_s: String = r.get(6)?;
        out.push(LedgerEntry {
            id,
            date: chrono::NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' in ledger row {}", date_s, id))?,
            description: r.get(2)?,
            category: r.get(3)?,
            kind: EntryKind::parse(&kind_s)
                .ok_or_else(|| anyhow!("Unknown ledger kind '{}' in row {}", kind_s, id))?,
            amount: lenient_amount(&amount_s),
            source: EntrySource::parse(&source_s).unwrap_or(EntrySource::Manual),
            confidence: r.get(7)?,
        });
    }
    Ok(out)
}

pub fn load_expenses(conn: &Connection) -> Result<Vec<ExpenseEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, vendor, category, subcategory, amount,
                is_recurring, recurring_period, receipt_url, notes, source, confidence
         FROM expenses ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let category_s: Option<String> = r.get(4)?;
        let amount_s: String = r.get(6)?;
        let period_s: Option<String> = r.get(8)?;
        let source_s: String = r.get(11)?;
        out.push(ExpenseEntry {
            id,
            date: chrono::NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' in expense row {}", date_s, id))?,
            description: r.get(2)?,
            vendor: r.get(3)?,
            category: category_s.as_deref().and_then(ExpenseCategory::parse),
            subcategory: r.get(5)?,
            amount: lenient_amount(&amount_s),
            is_recurring: r.get::<_, i64>(7)? != 0,
            recurring_period: period_s.as_deref().and_then(RecurringPeriod::parse),
            receipt_url: r.get(9)?,
            notes: r.get(10)?,
            source: EntrySource::parse(&source_s).unwrap_or(EntrySource::Manual),
            confidence: r.get(12)?,
        });
    }
    Ok(out)
}

pub fn insert_ledger_entry(conn: &Connection, e: &NewLedgerEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO ledger(date, description, category, kind, amount, source, confidence)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            e.date.to_string(),
            e.description,
            e.category,
            e.kind.as_str(),
            e.amount.to_string(),
            e.source.as_str(),
            e.confidence
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_expense_entry(conn: &Connection, e: &NewExpenseEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses(date, description, vendor, category, subcategory, amount,
                              is_recurring, recurring_period, notes, source, confidence)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            e.date.to_string(),
            e.description,
            e.vendor,
            e.category.map(|c| c.as_str()),
            e.subcategory,
            e.amount.to_string(),
            e.is_recurring as i64,
            e.recurring_period.map(|p| p.as_str()),
            e.notes,
            e.source.as_str(),
            e.confidence
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_connections(conn: &Connection) -> Result<Vec<BankConnection>> {
    let mut stmt = conn.prepare(
        "SELECT id, bank_id, bank_name, account_id, status, connected_at, last_sync
         FROM bank_connections ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let status_s: String = r.get(4)?;
        out.push(BankConnection {
            id,
            bank_id: r.get(1)?,
            bank_name: r.get(2)?,
            account_id: r.get(3)?,
            status: ConnectionStatus::parse(&status_s)
                .ok_or_else(|| anyhow!("Unknown connection status '{}' in row {}", status_s, id))?,
            connected_at: r.get(5)?,
            last_sync: r.get(6)?,
        });
    }
    Ok(out)
}

pub fn load_accounts(conn: &Connection, connection_id: i64) -> Result<Vec<BankAccount>> {
    let mut stmt = conn.prepare(
        "SELECT id, connection_id, account_ref, name, type, balance, mask
         FROM bank_accounts WHERE connection_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![connection_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let balance_s: String = r.get(5)?;
        out.push(BankAccount {
            id: r.get(0)?,
            connection_id: r.get(1)?,
            account_ref: r.get(2)?,
            name: r.get(3)?,
            kind: r.get(4)?,
            balance: lenient_amount(&balance_s),
            mask: r.get(6)?,
        });
    }
    Ok(out)
}
