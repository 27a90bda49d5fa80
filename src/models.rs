// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a ledger entry adds to revenue or to cost of doing business.
/// Amounts are always non-negative; the sign lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Revenue,
    Cost,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Revenue => "revenue",
            EntryKind::Cost => "cost",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "revenue" => Some(EntryKind::Revenue),
            "cost" => Some(EntryKind::Cost),
            _ => None,
        }
    }
}

/// Closed expense category catalog. Ledger categories stay free-form
/// strings; expenses are always one of these four buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Subscriptions,
    Travel,
    Meals,
    Office,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Subscriptions => "subscriptions",
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Office => "office",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "subscriptions" => Some(ExpenseCategory::Subscriptions),
            "travel" => Some(ExpenseCategory::Travel),
            "meals" => Some(ExpenseCategory::Meals),
            "office" => Some(ExpenseCategory::Office),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RecurringPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringPeriod::Weekly => "weekly",
            RecurringPeriod::Monthly => "monthly",
            RecurringPeriod::Quarterly => "quarterly",
            RecurringPeriod::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(RecurringPeriod::Weekly),
            "monthly" => Some(RecurringPeriod::Monthly),
            "quarterly" => Some(RecurringPeriod::Quarterly),
            "yearly" => Some(RecurringPeriod::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Manual,
    BankImport,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Manual => "manual",
            EntrySource::BankImport => "bank_import",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(EntrySource::Manual),
            "bank_import" => Some(EntrySource::BankImport),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub source: EntrySource,
    pub confidence: Option<f64>,
}

/// Ledger entry not yet written to the store; the store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewLedgerEntry {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub source: EntrySource,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub vendor: String,
    pub category: Option<ExpenseCategory>,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
    pub source: EntrySource,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExpenseEntry {
    pub date: NaiveDate,
    pub description: String,
    pub vendor: String,
    pub category: Option<ExpenseCategory>,
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub notes: Option<String>,
    pub source: EntrySource,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Revenue,
    Cost,
    Expense,
}

/// Ephemeral bank transaction. Produced by the synthesizer, consumed by
/// the classifier, never persisted as-is. Amount is signed: negative for
/// money leaving the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub category: String,
    pub subcategory: Option<String>,
    pub merchant: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "connected" => Some(ConnectionStatus::Connected),
            "disconnected" => Some(ConnectionStatus::Disconnected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConnection {
    pub id: i64,
    pub bank_id: String,
    pub bank_name: String,
    pub account_id: String,
    pub status: ConnectionStatus,
    pub connected_at: String,
    pub last_sync: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: i64,
    pub connection_id: i64,
    pub account_ref: String,
    pub name: String,
    pub kind: String,
    pub balance: Decimal,
    pub mask: String,
}

/// Cluster of three or more transactions sharing merchant and rounded
/// amount, used to infer subscription-like cadence. Recomputed on every
/// analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct RecurringGroup {
    pub merchant: String,
    pub amount: Decimal,
    pub frequency: RecurringPeriod,
    pub confidence: f64,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    LargeAmount,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::LargeAmount => "large_amount",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub transaction: Transaction,
    pub kind: AnomalyKind,
    pub description: String,
    pub severity: Severity,
}

/// Derived dashboard figures. Recomputed from the current ledger and
/// expense arrays on every call; never cached or persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateSummary {
    pub total_revenue: Decimal,
    pub total_costs: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: f64,
    pub expense_breakdown: BTreeMap<String, Decimal>,
    pub burn_rate: Decimal,
    pub runway_months: f64,
}
