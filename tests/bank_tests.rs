// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hitfinance::bank::{
    self, WINDOW_DAYS, connect_bank, extract_merchant, find_bank, synthesize_window,
};
use hitfinance::db;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;
use std::collections::BTreeMap;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn test_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn window_covers_ninety_days_with_bounded_daily_counts() {
    let mut rng = StdRng::seed_from_u64(7);
    let reference = date("2025-07-15");
    let txns = synthesize_window(&mut rng, reference);

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for t in &txns {
        *per_day.entry(t.date).or_insert(0) += 1;
    }
    assert_eq!(per_day.len() as i64, WINDOW_DAYS);
    assert_eq!(*per_day.keys().next_back().unwrap(), reference);
    assert_eq!(
        *per_day.keys().next().unwrap(),
        reference - chrono::Duration::days(WINDOW_DAYS - 1)
    );
    for count in per_day.values() {
        assert!((1..=5).contains(count));
    }
    // Newest first.
    assert!(txns.windows(2).all(|w| w[0].date >= w[1].date));
    for t in &txns {
        assert!((0.85..=1.0).contains(&t.confidence));
    }
}

#[test]
fn same_seed_reproduces_the_same_window() {
    let reference = date("2025-07-15");
    let a = synthesize_window(&mut StdRng::seed_from_u64(42), reference);
    let b = synthesize_window(&mut StdRng::seed_from_u64(42), reference);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.date, y.date);
        assert_eq!(x.description, y.description);
        assert_eq!(x.amount, y.amount);
        assert_eq!(x.confidence, y.confidence);
    }
}

#[test]
fn merchant_extraction_prefers_the_dash_segment() {
    assert_eq!(extract_merchant("Client Payment - ABC Corp"), "ABC Corp");
    assert_eq!(extract_merchant("Office Rent"), "Office");
    assert_eq!(extract_merchant("AWS Services"), "AWS");
}

#[test]
fn unknown_bank_is_rejected() {
    let err = find_bank("monopoly_bank").unwrap_err();
    assert_eq!(err.to_string(), "Bank not supported");

    let conn = test_conn();
    let mut rng = StdRng::seed_from_u64(1);
    let err = connect_bank(&conn, "monopoly_bank", &mut rng, date("2025-07-15")).unwrap_err();
    assert_eq!(err.to_string(), "Bank not supported");
}

#[test]
fn connect_populates_connection_accounts_and_records() {
    let conn = test_conn();
    let mut rng = StdRng::seed_from_u64(9);
    let report = connect_bank(&conn, "chase", &mut rng, date("2025-07-15")).unwrap();

    assert_eq!(report.bank_name, "Chase Bank");
    assert_eq!(report.failed_writes, 0);
    assert!(report.ledger_written > 0);
    assert!(report.expenses_written > 0);

    let status: String = conn
        .query_row(
            "SELECT status FROM bank_connections WHERE id=?1",
            [report.connection_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(status, "connected");

    let accounts: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM bank_accounts WHERE connection_id=?1",
            [report.connection_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(accounts, 2);

    let ledger_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger WHERE source='bank_import'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(ledger_rows as usize, report.ledger_written);
    let expense_rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM expenses WHERE source='bank_import'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(expense_rows as usize, report.expenses_written);

    // Recurring imports always carry a period.
    let dangling: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM expenses WHERE is_recurring=1 AND recurring_period IS NULL",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(dangling, 0);
}

#[test]
fn sync_touches_the_connection_and_reports_a_bounded_count() {
    let conn = test_conn();
    let mut rng = StdRng::seed_from_u64(3);
    let report = connect_bank(&conn, "bofa", &mut rng, date("2025-07-15")).unwrap();

    let synced = bank::sync_connection(&conn, report.connection_id, &mut rng).unwrap();
    assert_eq!(synced.connection_id, report.connection_id);
    assert!((1..=10u32).contains(&synced.new_transactions));

    assert!(bank::sync_connection(&conn, 9999, &mut rng).is_err());
}

#[test]
fn disconnect_removes_the_connection_and_its_accounts() {
    let conn = test_conn();
    let mut rng = StdRng::seed_from_u64(5);
    let report = connect_bank(&conn, "citi", &mut rng, date("2025-07-15")).unwrap();

    bank::disconnect(&conn, report.connection_id).unwrap();
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM bank_connections", [], |r| r.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM bank_accounts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(accounts, 0);

    assert!(bank::disconnect(&conn, report.connection_id).is_err());
}
