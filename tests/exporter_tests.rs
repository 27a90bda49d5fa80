// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use hitfinance::{cli, commands::exporter, db};
use rusqlite::Connection;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO ledger(date, description, category, kind, amount, source) VALUES \
        ('2025-07-01','Client Payment - ABC Corp','Client Services','revenue','5000','manual')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO expenses(date, description, vendor, category, subcategory, amount, is_recurring, recurring_period) VALUES \
        ('2025-07-02','Adobe Creative Suite','Adobe','subscriptions','Software','52.99',1,'monthly')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn export_ledger_writes_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hitfinance",
        "export",
        "ledger",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed[0]["date"], "2025-07-01");
    assert_eq!(parsed[0]["kind"], "revenue");
    assert_eq!(parsed[0]["amount"], "5000");
    assert_eq!(parsed[0]["source"], "manual");
}

#[test]
fn export_expenses_writes_csv_with_headers() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hitfinance",
        "export",
        "expenses",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,date,description,vendor,category,subcategory,amount,is_recurring,recurring_period,notes"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("Adobe"));
    assert!(row.contains("52.99"));
    assert!(row.contains("monthly"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("ledger.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hitfinance",
        "export",
        "ledger",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
