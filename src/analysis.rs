// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canned financial analyses: income statement, balance sheet, insight
//! cards, and optimization tips. All figures are deterministic template
//! arithmetic over the current snapshots; none of this is a model.

use crate::models::{EntryKind, ExpenseCategory, ExpenseEntry, LedgerEntry, Severity};
use crate::summary;
use crate::utils::percent_of;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// Breakdown key for ledger rows with an empty category.
const UNCATEGORIZED: &str = "Other";

#[derive(Debug, Clone, Serialize)]
pub struct SectionBreakdown {
    pub total: Decimal,
    pub breakdown: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profitability {
    pub gross_profit: Decimal,
    pub gross_margin: f64,
    pub operating_income: Decimal,
    pub operating_margin: f64,
    pub net_income: Decimal,
    pub net_margin: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeStatement {
    pub period: String,
    pub revenue: SectionBreakdown,
    pub costs: SectionBreakdown,
    pub expenses: SectionBreakdown,
    pub profitability: Profitability,
}

pub fn income_statement(
    ledger: &[LedgerEntry],
    expenses: &[ExpenseEntry],
    period: &str,
) -> IncomeStatement {
    let revenue = ledger_section(ledger, EntryKind::Revenue);
    let costs = ledger_section(ledger, EntryKind::Cost);
    let expense_section = expense_section(expenses);

    let gross_profit = revenue.total - costs.total;
    let operating_income = gross_profit - expense_section.total;
    // Net income stays equal to operating income: no interest or tax
    // lines in this statement.
    let net_income = operating_income;

    IncomeStatement {
        period: period.to_string(),
        profitability: Profitability {
            gross_profit,
            gross_margin: percent_of(gross_profit, revenue.total),
            operating_income,
            operating_margin: percent_of(operating_income, revenue.total),
            net_income,
            net_margin: percent_of(net_income, revenue.total),
        },
        revenue,
        costs,
        expenses: expense_section,
    }
}

fn ledger_section(ledger: &[LedgerEntry], kind: EntryKind) -> SectionBreakdown {
    let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for e in ledger.iter().filter(|e| e.kind == kind) {
        let key = if e.category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            e.category.clone()
        };
        *breakdown.entry(key).or_insert(Decimal::ZERO) += e.amount;
        total += e.amount;
    }
    SectionBreakdown { total, breakdown }
}

fn expense_section(expenses: &[ExpenseEntry]) -> SectionBreakdown {
    let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for e in expenses {
        let key = e
            .category
            .map(|c| c.as_str().to_string())
            .unwrap_or_else(|| "other".to_string());
        *breakdown.entry(key).or_insert(Decimal::ZERO) += e.amount;
        total += e.amount;
    }
    SectionBreakdown { total, breakdown }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentAssets {
    pub cash: Decimal,
    pub accounts_receivable: Decimal,
    pub inventory: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedAssets {
    pub equipment: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Assets {
    pub current: CurrentAssets,
    pub fixed: FixedAssets,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Liabilities {
    pub accounts_payable: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Equity {
    pub retained_earnings: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ratios {
    pub current_ratio: f64,
    pub debt_to_equity: f64,
    pub return_on_assets: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
    pub ratios: Ratios,
}

/// Estimated balance sheet. Receivables, inventory, and payables are
/// modeled as fixed shares of revenue/expenses (15%, 10%, 10%); equipment
/// is the office/Equipment expense line.
pub fn balance_sheet(ledger: &[LedgerEntry], expenses: &[ExpenseEntry]) -> BalanceSheet {
    let total_revenue: Decimal = ledger
        .iter()
        .filter(|e| e.kind == EntryKind::Revenue)
        .map(|e| e.amount)
        .sum();
    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();

    let cash = (total_revenue - total_expenses).max(Decimal::ZERO);
    let accounts_receivable = total_revenue * Decimal::new(15, 2);
    let inventory = total_expenses * Decimal::new(10, 2);
    let equipment: Decimal = expenses
        .iter()
        .filter(|e| {
            e.category == Some(ExpenseCategory::Office)
                && e.subcategory.as_deref() == Some("Equipment")
        })
        .map(|e| e.amount)
        .sum();

    let current_total = cash + accounts_receivable + inventory;
    let total_assets = current_total + equipment;
    let accounts_payable = total_expenses * Decimal::new(10, 2);
    let total_liabilities = accounts_payable;
    let equity = total_assets - total_liabilities;

    let current_ratio = if accounts_payable > Decimal::ZERO {
        (current_total / accounts_payable).to_f64().unwrap_or(0.0)
    } else {
        0.0
    };
    let debt_to_equity = if equity > Decimal::ZERO {
        (total_liabilities / equity).to_f64().unwrap_or(0.0)
    } else {
        0.0
    };
    let return_on_assets = percent_of(total_revenue - total_expenses, total_assets);

    BalanceSheet {
        assets: Assets {
            current: CurrentAssets {
                cash,
                accounts_receivable,
                inventory,
                total: current_total,
            },
            fixed: FixedAssets {
                equipment,
                total: equipment,
            },
            total: total_assets,
        },
        liabilities: Liabilities {
            accounts_payable,
            total: total_liabilities,
        },
        equity: Equity {
            retained_earnings: equity,
            total: equity,
        },
        ratios: Ratios {
            current_ratio,
            debt_to_equity,
            return_on_assets,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Warning,
    Opportunity,
    Positive,
}

impl InsightTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightTone::Warning => "warning",
            InsightTone::Opportunity => "opportunity",
            InsightTone::Positive => "positive",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightCard {
    pub tone: InsightTone,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Severity,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricComparison {
    pub yours: f64,
    pub industry: f64,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndustryComparison {
    pub profit_margin: MetricComparison,
    pub operating_efficiency: MetricComparison,
    pub growth_rate: MetricComparison,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyMetrics {
    pub burn_rate: Decimal,
    pub runway_months: f64,
    pub customer_acquisition_cost: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialInsights {
    pub overall_score: u8,
    pub industry_comparison: IndustryComparison,
    pub insights: Vec<InsightCard>,
    pub key_metrics: KeyMetrics,
}

/// Placeholder customer count for the acquisition-cost estimate until a
/// CRM integration provides a real one.
const ESTIMATED_CUSTOMERS: i64 = 50;

pub fn financial_insights(
    ledger: &[LedgerEntry],
    expenses: &[ExpenseEntry],
    as_of: NaiveDate,
) -> FinancialInsights {
    let snapshot = summary::summarize(ledger, expenses, as_of);
    let marketing_spend: Decimal = expenses
        .iter()
        .filter(|e| {
            e.category == Some(ExpenseCategory::Office)
                && e.subcategory.as_deref() == Some("Marketing Tools")
        })
        .map(|e| e.amount)
        .sum();

    FinancialInsights {
        overall_score: 78,
        industry_comparison: IndustryComparison {
            profit_margin: MetricComparison {
                yours: 23.0,
                industry: 28.0,
                status: "below",
            },
            operating_efficiency: MetricComparison {
                yours: 82.0,
                industry: 75.0,
                status: "above",
            },
            growth_rate: MetricComparison {
                yours: 15.0,
                industry: 12.0,
                status: "above",
            },
        },
        insights: insight_cards(),
        key_metrics: KeyMetrics {
            burn_rate: snapshot.burn_rate,
            runway_months: snapshot.runway_months,
            customer_acquisition_cost: marketing_spend / Decimal::from(ESTIMATED_CUSTOMERS),
        },
    }
}

fn insight_cards() -> Vec<InsightCard> {
    vec![
        InsightCard {
            tone: InsightTone::Warning,
            title: "High Operating Expenses",
            description: "Your operating expenses represent 65% of revenue, which is above the industry average of 45-55%.",
            impact: Severity::High,
            recommendation: "Review subscription costs and negotiate better rates with vendors.",
        },
        InsightCard {
            tone: InsightTone::Opportunity,
            title: "Revenue Growth Potential",
            description: "Your revenue growth rate is strong, but there's opportunity to optimize pricing strategy.",
            impact: Severity::Medium,
            recommendation: "Consider implementing tiered pricing or premium service offerings.",
        },
        InsightCard {
            tone: InsightTone::Positive,
            title: "Healthy Cash Flow",
            description: "Your cash flow management is excellent with consistent positive trends.",
            impact: Severity::Low,
            recommendation: "Continue current cash management practices and consider investment opportunities.",
        },
        InsightCard {
            tone: InsightTone::Warning,
            title: "Travel Expenses Above Benchmark",
            description: "Travel expenses are 15% higher than industry standards for similar-sized companies.",
            impact: Severity::Medium,
            recommendation: "Implement travel policy guidelines and consider virtual meeting alternatives.",
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationTip {
    pub category: &'static str,
    pub priority: Severity,
    pub title: &'static str,
    pub description: &'static str,
    pub potential_savings: Option<&'static str>,
    pub potential_gain: Option<&'static str>,
    pub implementation: &'static str,
    pub effort: &'static str,
}

pub fn optimization_tips() -> Vec<OptimizationTip> {
    vec![
        OptimizationTip {
            category: "Cost Reduction",
            priority: Severity::High,
            title: "Optimize Software Subscriptions",
            description: "Audit all software subscriptions and eliminate redundant tools. Consider annual plans for 15-20% savings.",
            potential_savings: Some("$2,400/year"),
            potential_gain: None,
            implementation: "immediate",
            effort: "low",
        },
        OptimizationTip {
            category: "Revenue Enhancement",
            priority: Severity::High,
            title: "Implement Value-Based Pricing",
            description: "Top-performing companies in your industry use value-based pricing to increase margins by 25-30%.",
            potential_savings: None,
            potential_gain: Some("$8,500/month"),
            implementation: "2-3 months",
            effort: "medium",
        },
        OptimizationTip {
            category: "Operational Efficiency",
            priority: Severity::Medium,
            title: "Automate Financial Processes",
            description: "Implement automated invoicing and expense tracking to reduce administrative costs by 40%.",
            potential_savings: Some("$1,800/month"),
            potential_gain: None,
            implementation: "1-2 months",
            effort: "medium",
        },
        OptimizationTip {
            category: "Tax Optimization",
            priority: Severity::Medium,
            title: "Maximize Business Deductions",
            description: "Ensure all eligible business expenses are properly categorized for tax deductions.",
            potential_savings: Some("$3,200/year"),
            potential_gain: None,
            implementation: "immediate",
            effort: "low",
        },
        OptimizationTip {
            category: "Cash Flow",
            priority: Severity::High,
            title: "Optimize Payment Terms",
            description: "Negotiate 30-day payment terms with clients and 45-day terms with suppliers to improve cash flow.",
            potential_savings: None,
            potential_gain: Some("15% cash flow improvement"),
            implementation: "1 month",
            effort: "low",
        },
        OptimizationTip {
            category: "Investment",
            priority: Severity::Low,
            title: "Strategic Technology Investment",
            description: "Invest in productivity tools that can increase team efficiency by 20-25%.",
            potential_savings: None,
            potential_gain: Some("$5,000/month"),
            implementation: "3-6 months",
            effort: "high",
        },
    ]
}
