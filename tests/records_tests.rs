// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hitfinance::{cli, commands, db};
use rusqlite::Connection;

fn test_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("ledger", sub)) => commands::ledger::handle(conn, sub),
        Some(("expense", sub)) => commands::expenses::handle(conn, sub),
        Some(("settings", sub)) => commands::settings::handle(conn, sub),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn ledger_add_persists_a_manual_entry() {
    let conn = test_conn();
    run(
        &conn,
        &[
            "hitfinance",
            "ledger",
            "add",
            "--date",
            "2025-07-01",
            "--description",
            "Client Payment - ABC Corp",
            "--category",
            "Client Services",
            "--kind",
            "revenue",
            "--amount",
            "5000",
        ],
    )
    .unwrap();

    let entries = db::load_ledger(&conn).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, "Client Services");
    assert_eq!(entries[0].source.as_str(), "manual");
}

#[test]
fn ledger_add_rejects_negative_amounts() {
    let conn = test_conn();
    let err = run(
        &conn,
        &[
            "hitfinance",
            "ledger",
            "add",
            "--date",
            "2025-07-01",
            "--description",
            "Refund",
            "--category",
            "Client Services",
            "--kind",
            "revenue",
            "--amount",
            "-50",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not be negative"));
}

#[test]
fn ledger_rm_fails_for_missing_ids() {
    let conn = test_conn();
    let err = run(&conn, &["hitfinance", "ledger", "rm", "--id", "42"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn expense_add_requires_a_period_when_recurring() {
    let conn = test_conn();
    let err = run(
        &conn,
        &[
            "hitfinance",
            "expense",
            "add",
            "--date",
            "2025-07-01",
            "--description",
            "Netflix",
            "--vendor",
            "Netflix",
            "--category",
            "subscriptions",
            "--amount",
            "15.99",
            "--recurring",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("--period is required"));
}

#[test]
fn expense_add_rejects_unknown_categories() {
    let conn = test_conn();
    let err = run(
        &conn,
        &[
            "hitfinance",
            "expense",
            "add",
            "--date",
            "2025-07-01",
            "--description",
            "Mystery",
            "--vendor",
            "Mystery",
            "--category",
            "snacks",
            "--amount",
            "5",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown category"));
}

#[test]
fn recurring_expense_round_trips_with_its_period() {
    let conn = test_conn();
    run(
        &conn,
        &[
            "hitfinance",
            "expense",
            "add",
            "--date",
            "2025-07-01",
            "--description",
            "Netflix",
            "--vendor",
            "Netflix",
            "--category",
            "subscriptions",
            "--amount",
            "15.99",
            "--recurring",
            "--period",
            "monthly",
        ],
    )
    .unwrap();

    let entries = db::load_expenses(&conn).unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_recurring);
    assert_eq!(
        entries[0].recurring_period.map(|p| p.as_str()),
        Some("monthly")
    );
}

#[test]
fn settings_round_trip_and_reject_unknown_keys() {
    let conn = test_conn();
    run(
        &conn,
        &[
            "hitfinance", "settings", "set", "--key", "user_name", "--value", "Alex",
        ],
    )
    .unwrap();
    assert_eq!(
        db::get_setting(&conn, "user_name").unwrap().as_deref(),
        Some("Alex")
    );

    let err = run(
        &conn,
        &[
            "hitfinance", "settings", "set", "--key", "favorite_color", "--value", "teal",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown setting"));
}
