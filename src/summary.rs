// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregate dashboard figures from ledger and expense snapshots.

use crate::models::{AggregateSummary, EntryKind, ExpenseEntry, LedgerEntry};
use crate::utils::percent_of;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// Breakdown key for expense rows that carry no category.
const UNCATEGORIZED: &str = "other";

/// Pure reduction over the current snapshots. `as_of` anchors the burn
/// window (the calendar month it falls in); callers pass today.
pub fn summarize(
    ledger: &[LedgerEntry],
    expenses: &[ExpenseEntry],
    as_of: NaiveDate,
) -> AggregateSummary {
    let total_revenue: Decimal = ledger
        .iter()
        .filter(|e| e.kind == EntryKind::Revenue)
        .map(|e| e.amount)
        .sum();
    let total_costs: Decimal = ledger
        .iter()
        .filter(|e| e.kind == EntryKind::Cost)
        .map(|e| e.amount)
        .sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    let net_profit = total_revenue - total_costs - total_expenses;
    let profit_margin = percent_of(net_profit, total_revenue);

    let mut expense_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses {
        let key = e
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *expense_breakdown.entry(key).or_insert(Decimal::ZERO) += e.amount;
    }

    let burn_rate = burn_rate(expenses, as_of);
    let runway_months = runway(total_revenue, total_expenses, burn_rate);

    AggregateSummary {
        total_revenue,
        total_costs,
        total_expenses,
        net_profit,
        profit_margin,
        expense_breakdown,
        burn_rate,
        runway_months,
    }
}

/// Total expense amount within the calendar month `as_of` falls in.
pub fn burn_rate(expenses: &[ExpenseEntry], as_of: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date.month() == as_of.month() && e.date.year() == as_of.year())
        .map(|e| e.amount)
        .sum()
}

/// Whole months of cash left at the current burn. Cash never goes below
/// zero; a zero burn yields infinite runway rather than an error.
fn runway(total_revenue: Decimal, total_expenses: Decimal, monthly_burn: Decimal) -> f64 {
    if monthly_burn <= Decimal::ZERO {
        return f64::INFINITY;
    }
    let current_cash = (total_revenue - total_expenses).max(Decimal::ZERO);
    (current_cash / monthly_burn).floor().to_f64().unwrap_or(0.0)
}
