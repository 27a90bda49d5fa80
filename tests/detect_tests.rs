// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hitfinance::detect::{anomalies, frequency_for_dates, is_recurring, recurring_groups};
use hitfinance::models::{AnomalyKind, RecurringPeriod, Severity, Transaction, TxnKind};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(id: &str, d: &str, description: &str, amount: &str, merchant: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date(d),
        description: description.to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        kind: TxnKind::Expense,
        category: "subscriptions".to_string(),
        subcategory: None,
        merchant: merchant.to_string(),
        confidence: 0.9,
    }
}

#[test]
fn three_similar_charges_form_a_monthly_group() {
    let batch = vec![
        txn("1", "2025-01-01", "Acme Subscription", "-100", "Acme"),
        txn("2", "2025-01-31", "Acme Subscription", "-102", "Acme"),
        txn("3", "2025-03-02", "Acme Subscription", "-99", "Acme"),
    ];
    let groups = recurring_groups(&batch);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].merchant, "Acme");
    assert_eq!(groups[0].frequency, RecurringPeriod::Monthly);
    assert_eq!(groups[0].category, "subscriptions");
}

#[test]
fn two_charges_never_form_a_group() {
    let batch = vec![
        txn("1", "2025-01-01", "Acme Subscription", "-100", "Acme"),
        txn("2", "2025-01-31", "Acme Subscription", "-100", "Acme"),
    ];
    assert!(recurring_groups(&batch).is_empty());
}

#[test]
fn frequency_buckets_follow_mean_gap() {
    let weekly: Vec<NaiveDate> = ["2025-01-01", "2025-01-08", "2025-01-15"]
        .iter()
        .map(|s| date(s))
        .collect();
    assert_eq!(frequency_for_dates(&weekly), Some(RecurringPeriod::Weekly));

    let quarterly: Vec<NaiveDate> = ["2025-01-01", "2025-04-01", "2025-07-01"]
        .iter()
        .map(|s| date(s))
        .collect();
    assert_eq!(frequency_for_dates(&quarterly), Some(RecurringPeriod::Quarterly));

    let yearly: Vec<NaiveDate> = ["2023-01-01", "2024-01-01", "2025-01-01"]
        .iter()
        .map(|s| date(s))
        .collect();
    assert_eq!(frequency_for_dates(&yearly), Some(RecurringPeriod::Yearly));

    assert_eq!(frequency_for_dates(&[date("2025-01-01")]), None);
}

#[test]
fn pairwise_check_needs_two_similar_neighbors() {
    let batch = vec![
        txn("1", "2025-01-01", "Acme Subscription", "-100", "Acme"),
        txn("2", "2025-02-01", "Acme Subscription", "-102", "Acme"),
        txn("3", "2025-03-01", "Acme Subscription", "-99", "Acme"),
    ];
    assert!(is_recurring(&batch[0], &batch));

    let sparse = vec![
        txn("1", "2025-01-01", "Acme Subscription", "-100", "Acme"),
        txn("2", "2025-02-01", "Acme Subscription", "-102", "Acme"),
    ];
    assert!(!is_recurring(&sparse[0], &sparse));
}

#[test]
fn pairwise_tolerance_is_strictly_under_five() {
    let batch = vec![
        txn("1", "2025-01-01", "Acme Subscription", "-100", "Acme"),
        txn("2", "2025-02-01", "Acme Subscription", "-105", "Acme"),
        txn("3", "2025-03-01", "Acme Subscription", "-110", "Acme"),
    ];
    assert!(!is_recurring(&batch[0], &batch));
}

#[test]
fn merchant_match_is_case_insensitive_substring() {
    let batch = vec![
        txn("1", "2025-01-01", "ACME SUBSCRIPTION", "-100", "Acme"),
        txn("2", "2025-02-01", "acme subscription", "-100", "Acme"),
        txn("3", "2025-03-01", "Payment to Acme Inc", "-100", "Acme"),
    ];
    assert!(is_recurring(&batch[0], &batch));
}

#[test]
fn large_amounts_are_flagged_over_three_times_mean() {
    let batch = vec![
        txn("1", "2025-01-01", "Coffee", "-10", "Coffee"),
        txn("2", "2025-01-02", "Coffee", "-10", "Coffee"),
        txn("3", "2025-01-03", "Coffee", "-10", "Coffee"),
        txn("4", "2025-01-04", "Coffee", "-10", "Coffee"),
        txn("5", "2025-01-05", "Server Hardware", "-100", "Server"),
    ];
    // mean = 28, threshold = 84: only the 100 crosses it
    let flagged = anomalies(&batch);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].transaction.id, "5");
    assert_eq!(flagged[0].kind, AnomalyKind::LargeAmount);
    assert_eq!(flagged[0].severity, Severity::Medium);
    assert!(flagged[0].description.contains("4x larger than average"));
}

#[test]
fn empty_batch_yields_no_anomalies() {
    assert!(anomalies(&[]).is_empty());
}
