// Copyright (c) HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurrence and anomaly heuristics over a transaction batch.
//!
//! Both passes are independent, synchronous, and take an immutable
//! snapshot of the batch; nothing here touches the store.

use crate::models::{Anomaly, AnomalyKind, RecurringGroup, RecurringPeriod, Severity, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// Minimum number of group members before a (merchant, amount) cluster is
/// reported as recurring. Groups of one or two are silently excluded.
const MIN_GROUP_SIZE: usize = 3;

/// Reported confidence for every recurring group.
const GROUP_CONFIDENCE: f64 = 0.9;

/// Per-transaction recurrence check: a transaction is recurring when at
/// least two others in the batch charge within 5 currency units of it and
/// mention its merchant in their description (case-insensitive substring;
/// short merchant names may over-match, which is accepted behavior).
pub fn is_recurring(txn: &Transaction, batch: &[Transaction]) -> bool {
    let tolerance = Decimal::from(5);
    let merchant = txn.merchant.to_lowercase();
    let similar = batch
        .iter()
        .filter(|t| {
            t.id != txn.id
                && (t.amount - txn.amount).abs() < tolerance
                && t.description.to_lowercase().contains(&merchant)
        })
        .count();
    similar >= 2
}

/// Batch-level grouping: cluster by merchant and absolute amount rounded
/// to the tolerance grid, so charges that vary by less than the pairwise
/// tolerance land in one bucket. Every cluster with at least
/// [`MIN_GROUP_SIZE`] members is reported.
pub fn recurring_groups(batch: &[Transaction]) -> Vec<RecurringGroup> {
    let tolerance = Decimal::from(5);
    let mut grouped: BTreeMap<(String, i64), Vec<&Transaction>> = BTreeMap::new();
    for t in batch {
        let bucket = (t.amount.abs() / tolerance).round().to_i64().unwrap_or(0);
        grouped
            .entry((t.merchant.clone(), bucket))
            .or_default()
            .push(t);
    }

    let mut out = Vec::new();
    for group in grouped.into_values() {
        if group.len() < MIN_GROUP_SIZE {
            continue;
        }
        let mut dates: Vec<NaiveDate> = group.iter().map(|t| t.date).collect();
        dates.sort();
        let Some(frequency) = frequency_for_dates(&dates) else {
            continue;
        };
        out.push(RecurringGroup {
            merchant: group[0].merchant.clone(),
            amount: group[0].amount,
            frequency,
            confidence: GROUP_CONFIDENCE,
            category: group[0].category.clone(),
        });
    }
    out
}

/// Cadence label from the mean gap between consecutive dates, which must
/// be sorted ascending. Returns None for fewer than two dates.
pub fn frequency_for_dates(dates: &[NaiveDate]) -> Option<RecurringPeriod> {
    if dates.len() < 2 {
        return None;
    }
    let total_days: i64 = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).sum();
    let mean_gap = total_days as f64 / (dates.len() - 1) as f64;
    Some(if mean_gap <= 10.0 {
        RecurringPeriod::Weekly
    } else if mean_gap <= 35.0 {
        RecurringPeriod::Monthly
    } else if mean_gap <= 100.0 {
        RecurringPeriod::Quarterly
    } else {
        RecurringPeriod::Yearly
    })
}

/// Flag transactions whose absolute amount exceeds three times the mean
/// absolute amount of the batch. An empty batch short-circuits to an
/// empty list; the mean is never computed over zero transactions.
pub fn anomalies(batch: &[Transaction]) -> Vec<Anomaly> {
    if batch.is_empty() {
        return Vec::new();
    }
    let total: Decimal = batch.iter().map(|t| t.amount.abs()).sum();
    let avg = total / Decimal::from(batch.len() as u64);
    let threshold = avg * Decimal::from(3);

    let mut out = Vec::new();
    for t in batch {
        let magnitude = t.amount.abs();
        if magnitude > threshold {
            let multiple = (magnitude / avg).round().to_i64().unwrap_or(0);
            out.push(Anomaly {
                transaction: t.clone(),
                kind: AnomalyKind::LargeAmount,
                description: format!(
                    "Transaction amount ({}) is {}x larger than average",
                    magnitude, multiple
                ),
                severity: Severity::Medium,
            });
        }
    }
    out
}
