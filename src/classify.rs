// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Partition a transaction batch into ledger and expense drafts.

use crate::detect;
use crate::models::{
    Anomaly, EntryKind, EntrySource, ExpenseCategory, NewExpenseEntry, NewLedgerEntry,
    RecurringGroup, RecurringPeriod, Transaction, TxnKind,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Category-total key for transactions without a category.
const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ImportTotals {
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub total_expenses: Decimal,
}

/// Everything derived from one classification pass: the records to write
/// back, the running totals, and the batch-level insight lists.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImportAnalysis {
    pub ledger_entries: Vec<NewLedgerEntry>,
    pub expense_entries: Vec<NewExpenseEntry>,
    pub totals: ImportTotals,
    pub category_totals: BTreeMap<String, Decimal>,
    pub recurring: Vec<RecurringGroup>,
    pub anomalies: Vec<Anomaly>,
}

/// Classify a batch. Revenue and cost transactions become ledger drafts,
/// expense transactions become expense drafts; all amounts are absolute
/// with the sign carried by the kind. Totals accumulate by addition of
/// absolute amounts only.
pub fn analyze(batch: &[Transaction]) -> ImportAnalysis {
    let recurring = detect::recurring_groups(batch);
    let anomalies = detect::anomalies(batch);

    let mut ledger_entries = Vec::new();
    let mut expense_entries = Vec::new();
    let mut totals = ImportTotals::default();
    let mut category_totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for txn in batch {
        let magnitude = txn.amount.abs();
        match txn.kind {
            TxnKind::Revenue | TxnKind::Cost => {
                let kind = if txn.kind == TxnKind::Revenue {
                    totals.total_revenue += magnitude;
                    EntryKind::Revenue
                } else {
                    totals.total_costs += magnitude;
                    EntryKind::Cost
                };
                ledger_entries.push(NewLedgerEntry {
                    date: txn.date,
                    description: txn.description.clone(),
                    category: txn.category.clone(),
                    kind,
                    amount: magnitude,
                    source: EntrySource::BankImport,
                    confidence: Some(txn.confidence),
                });
            }
            TxnKind::Expense => {
                totals.total_expenses += magnitude;
                let is_recurring = detect::is_recurring(txn, batch);
                expense_entries.push(NewExpenseEntry {
                    date: txn.date,
                    description: txn.description.clone(),
                    vendor: txn.merchant.clone(),
                    category: ExpenseCategory::parse(&txn.category),
                    subcategory: txn.subcategory.clone(),
                    amount: magnitude,
                    is_recurring,
                    recurring_period: is_recurring.then(|| period_for(txn, &recurring)),
                    notes: Some(format!(
                        "Auto-imported from bank ({:.1}% confidence)",
                        txn.confidence * 100.0
                    )),
                    source: EntrySource::BankImport,
                    confidence: Some(txn.confidence),
                });
            }
        }

        let key = if txn.category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            txn.category.clone()
        };
        *category_totals.entry(key).or_insert(Decimal::ZERO) += magnitude;
    }

    ImportAnalysis {
        ledger_entries,
        expense_entries,
        totals,
        category_totals,
        recurring,
        anomalies,
    }
}

/// Cadence for a flagged expense: the merchant's batch-level group when
/// one exists, else monthly (the pairwise check can fire without any
/// group clearing the size threshold).
fn period_for(txn: &Transaction, groups: &[RecurringGroup]) -> RecurringPeriod {
    groups
        .iter()
        .find(|g| g.merchant == txn.merchant)
        .map(|g| g.frequency)
        .unwrap_or(RecurringPeriod::Monthly)
}
