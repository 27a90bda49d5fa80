// Copyright (c) HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! MoneyIQ, the scripted financial advisor.
//!
//! Replies are keyword-matched templates filled from the current
//! aggregate summary. Conversation history is session-scoped state owned
//! by the caller, trimmed to a fixed cap, never a process-wide singleton.

use crate::models::AggregateSummary;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum retained turns (user and assistant counted separately).
pub const HISTORY_CAP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct AdvisorContext {
    pub user_name: String,
    pub company_name: String,
}

#[derive(Debug, Default)]
pub struct AdvisorSession {
    history: Vec<ChatTurn>,
}

impl AdvisorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Produce a reply and record both turns, trimming to the cap.
    pub fn respond<R: Rng>(
        &mut self,
        rng: &mut R,
        message: &str,
        ctx: &AdvisorContext,
        summary: &AggregateSummary,
    ) -> String {
        let reply = respond_to(rng, message, ctx, summary);
        self.history.push(ChatTurn {
            role: ChatRole::User,
            content: message.to_string(),
        });
        self.history.push(ChatTurn {
            role: ChatRole::Assistant,
            content: reply.clone(),
        });
        let trimmed = trim_history(std::mem::take(&mut self.history), HISTORY_CAP);
        self.history = trimmed;
        reply
    }
}

/// Keep only the newest `cap` turns.
pub fn trim_history(mut history: Vec<ChatTurn>, cap: usize) -> Vec<ChatTurn> {
    if history.len() > cap {
        history.split_off(history.len() - cap)
    } else {
        history
    }
}

pub fn initial_greeting<R: Rng>(rng: &mut R, user_name: &str) -> String {
    let greetings = [
        format!("Hello {}! How can I make you profitable today?", user_name),
        format!(
            "Hi {}! Ready to optimize your finances? How can I make you profitable today?",
            user_name
        ),
        format!(
            "Welcome back {}! I've analyzed your latest data. How can I make you profitable today?",
            user_name
        ),
    ];
    greetings[rng.gen_range(0..greetings.len())].clone()
}

fn money(d: Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Match order follows the original routing; earlier branches win when a
/// message hits several keywords.
pub fn respond_to<R: Rng>(
    rng: &mut R,
    message: &str,
    ctx: &AdvisorContext,
    summary: &AggregateSummary,
) -> String {
    let lower = message.to_lowercase();
    let user = ctx.user_name.as_str();
    let top = top_expense_category(&summary.expense_breakdown);

    if lower.contains("profit") || lower.contains("profitable") {
        return if summary.net_profit > Decimal::ZERO {
            format!(
                "Great news {}! Your current net profit of ${} shows healthy performance. \
                 To boost it further, consider reviewing your top expense categories - I see \
                 opportunities in optimizing your {} spending.",
                user,
                money(summary.net_profit),
                top
            )
        } else {
            format!(
                "{}, I notice your current profit margin needs attention. Let's focus on \
                 reducing your highest expenses first - your {} category shows the most \
                 potential for cost savings. Would you like specific recommendations?",
                user, top
            )
        };
    }

    if lower.contains("revenue") || lower.contains("income") || lower.contains("sales") {
        return format!(
            "Your current revenue of ${} is {}. Based on your transaction patterns, I \
             recommend focusing on {} to increase your monthly recurring revenue.",
            money(summary.total_revenue),
            revenue_insight(summary.profit_margin),
            revenue_strategy(rng)
        );
    }

    if lower.contains("expense") || lower.contains("cost") || lower.contains("spending") {
        return format!(
            "{}, your expenses total ${}. Your largest expense category is {}. I suggest \
             conducting a {} audit - you could potentially save 15-20% by eliminating \
             redundant services and negotiating better rates.",
            user,
            money(summary.total_expenses),
            top,
            top.to_lowercase()
        );
    }

    if lower.contains("cash flow") || lower.contains("cashflow") {
        let trend = if summary.net_profit >= Decimal::ZERO {
            "positive"
        } else {
            "negative"
        };
        return format!(
            "Your cash flow shows {} trends. To improve it, consider implementing 30-day \
             payment terms with clients and 45-day terms with suppliers. This could improve \
             your working capital by 15-25%.",
            trend
        );
    }

    if lower.contains("forecast") || lower.contains("prediction") || lower.contains("future") {
        return format!(
            "Based on your current trajectory, I project {}. The key growth levers I see \
             are: optimizing your expense ratios and implementing value-based pricing \
             strategies.",
            forecast_insight(summary.net_profit)
        );
    }

    if lower.contains("tax") || lower.contains("deduction") {
        let savings = summary.total_expenses * Decimal::new(25, 2);
        return format!(
            "{}, ensure you're maximizing business deductions! Your current expense \
             categories suggest potential tax savings of ${:.0}+ annually. Focus on properly \
             categorizing all business meals, travel, and office expenses.",
            user,
            savings.round_dp(0)
        );
    }

    if lower.contains("subscription") || lower.contains("recurring") {
        let spend = summary
            .expense_breakdown
            .get("subscriptions")
            .copied()
            .unwrap_or(Decimal::ZERO);
        return format!(
            "Your subscription expenses are ${}. I recommend a quarterly subscription audit \
             - most companies can reduce this by 20-30% by eliminating unused services and \
             switching to annual plans for active tools.",
            money(spend)
        );
    }

    if lower.contains("growth") || lower.contains("scale") || lower.contains("expand") {
        return format!(
            "For sustainable growth, focus on improving your profit margins first. With your \
             current {:.1}% margin, I recommend targeting 25-30% before scaling. This creates \
             a stronger foundation for expansion investments.",
            summary.profit_margin
        );
    }

    if lower.contains("benchmark") || lower.contains("industry") || lower.contains("compare") {
        return format!(
            "Compared to industry standards, your {}. The top-performing companies in your \
             sector typically maintain 25-35% profit margins through strategic expense \
             management and premium pricing.",
            benchmark_insight(summary.profit_margin)
        );
    }

    if lower.contains("hello") || lower.contains("hi") || lower.contains("hey") {
        return format!(
            "Hello {}! I'm MoneyIQ, your AI financial advisor. I've analyzed your current \
             financials and I'm ready to help optimize your profitability. What specific \
             area would you like to focus on today?",
            user
        );
    }

    if lower.contains("help") || lower.contains("what can you do") {
        return format!(
            "I can help you with profit optimization, expense analysis, revenue strategies, \
             cash flow management, tax planning, and financial forecasting. Just ask me \
             about any aspect of your finances, {}!",
            user
        );
    }

    format!(
        "That's a great question, {}! Based on your current financial position with ${} net \
         profit, I'd recommend focusing on your expense optimization first. Your {} category \
         shows the most potential for immediate savings. Would you like specific strategies \
         for this area?",
        user,
        money(summary.net_profit),
        top
    )
}

/// Display phrase for the largest expense bucket.
fn top_expense_category(breakdown: &BTreeMap<String, Decimal>) -> String {
    let Some((key, _)) = breakdown.iter().max_by_key(|(_, v)| **v) else {
        return "operational expenses".to_string();
    };
    match key.as_str() {
        "subscriptions" => "subscription services".to_string(),
        "travel" => "travel and transportation".to_string(),
        "meals" => "meals and entertainment".to_string(),
        "office" => "office and administrative".to_string(),
        other => other.to_string(),
    }
}

fn revenue_insight(profit_margin: f64) -> &'static str {
    if profit_margin > 25.0 {
        "performing well with strong margins"
    } else if profit_margin > 15.0 {
        "showing good potential with room for optimization"
    } else {
        "indicating opportunities for pricing strategy improvements"
    }
}

fn revenue_strategy<R: Rng>(rng: &mut R) -> &'static str {
    const STRATEGIES: [&str; 4] = [
        "client retention programs and upselling existing accounts",
        "value-based pricing for premium services",
        "recurring revenue models and subscription offerings",
        "strategic partnerships and referral programs",
    ];
    STRATEGIES[rng.gen_range(0..STRATEGIES.len())]
}

fn forecast_insight(net_profit: Decimal) -> &'static str {
    if net_profit > Decimal::ZERO {
        "continued growth with potential for 15-25% profit increase through strategic optimizations"
    } else {
        "break-even within 2-3 months by implementing the cost reduction strategies I can recommend"
    }
}

fn benchmark_insight(profit_margin: f64) -> &'static str {
    if profit_margin > 20.0 {
        "profit margins are above industry average - excellent work!"
    } else if profit_margin > 10.0 {
        "profit margins are approaching industry standards with room for improvement"
    } else {
        "profit margins are below industry benchmarks, but I can help you optimize them quickly"
    }
}
