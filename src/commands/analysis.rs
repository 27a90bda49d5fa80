// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis;
use crate::db;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income-statement", sub)) => income_statement(conn, sub)?,
        Some(("balance-sheet", sub)) => balance_sheet(conn, sub)?,
        Some(("insights", sub)) => insights(conn, sub)?,
        Some(("tips", sub)) => tips(sub)?,
        _ => {}
    }
    Ok(())
}

fn income_statement(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = sub.get_one::<String>("period").unwrap();
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    let statement = analysis::income_statement(&ledger, &expenses, period);

    if maybe_print_json(json_flag, jsonl_flag, &statement)? {
        return Ok(());
    }

    let mut rows = vec![vec![
        "Revenue".to_string(),
        fmt_money(&statement.revenue.total),
    ]];
    for (cat, amt) in &statement.revenue.breakdown {
        rows.push(vec![format!("  {}", cat), fmt_money(amt)]);
    }
    rows.push(vec!["Costs".to_string(), fmt_money(&statement.costs.total)]);
    for (cat, amt) in &statement.costs.breakdown {
        rows.push(vec![format!("  {}", cat), fmt_money(amt)]);
    }
    rows.push(vec![
        "Expenses".to_string(),
        fmt_money(&statement.expenses.total),
    ]);
    for (cat, amt) in &statement.expenses.breakdown {
        rows.push(vec![format!("  {}", cat), fmt_money(amt)]);
    }
    let p = &statement.profitability;
    rows.push(vec!["Gross profit".to_string(), fmt_money(&p.gross_profit)]);
    rows.push(vec!["Gross margin".to_string(), format!("{:.1}%", p.gross_margin)]);
    rows.push(vec![
        "Operating income".to_string(),
        fmt_money(&p.operating_income),
    ]);
    rows.push(vec![
        "Operating margin".to_string(),
        format!("{:.1}%", p.operating_margin),
    ]);
    rows.push(vec!["Net income".to_string(), fmt_money(&p.net_income)]);
    rows.push(vec!["Net margin".to_string(), format!("{:.1}%", p.net_margin)]);

    println!("Income statement ({})", statement.period);
    println!("{}", pretty_table(&["Line", "Amount"], rows));
    Ok(())
}

fn balance_sheet(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    let sheet = analysis::balance_sheet(&ledger, &expenses);

    if maybe_print_json(json_flag, jsonl_flag, &sheet)? {
        return Ok(());
    }

    let rows = vec![
        vec!["Cash".to_string(), fmt_money(&sheet.assets.current.cash)],
        vec![
            "Accounts receivable".to_string(),
            fmt_money(&sheet.assets.current.accounts_receivable),
        ],
        vec![
            "Inventory".to_string(),
            fmt_money(&sheet.assets.current.inventory),
        ],
        vec![
            "Equipment".to_string(),
            fmt_money(&sheet.assets.fixed.equipment),
        ],
        vec!["Total assets".to_string(), fmt_money(&sheet.assets.total)],
        vec![
            "Accounts payable".to_string(),
            fmt_money(&sheet.liabilities.accounts_payable),
        ],
        vec![
            "Total liabilities".to_string(),
            fmt_money(&sheet.liabilities.total),
        ],
        vec![
            "Retained earnings".to_string(),
            fmt_money(&sheet.equity.retained_earnings),
        ],
        vec!["Total equity".to_string(), fmt_money(&sheet.equity.total)],
        vec![
            "Current ratio".to_string(),
            format!("{:.2}", sheet.ratios.current_ratio),
        ],
        vec![
            "Debt to equity".to_string(),
            format!("{:.2}", sheet.ratios.debt_to_equity),
        ],
        vec![
            "Return on assets".to_string(),
            format!("{:.1}%", sheet.ratios.return_on_assets),
        ],
    ];
    println!("{}", pretty_table(&["Line", "Amount"], rows));
    Ok(())
}

fn insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let ledger = db::load_ledger(conn)?;
    let expenses = db::load_expenses(conn)?;
    let report = analysis::financial_insights(&ledger, &expenses, as_of);

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!("Overall financial health score: {}/100", report.overall_score);
    let c = &report.industry_comparison;
    let rows = vec![
        vec![
            "Profit margin".to_string(),
            format!("{:.0}%", c.profit_margin.yours),
            format!("{:.0}%", c.profit_margin.industry),
            c.profit_margin.status.to_string(),
        ],
        vec![
            "Operating efficiency".to_string(),
            format!("{:.0}", c.operating_efficiency.yours),
            format!("{:.0}", c.operating_efficiency.industry),
            c.operating_efficiency.status.to_string(),
        ],
        vec![
            "Growth rate".to_string(),
            format!("{:.0}%", c.growth_rate.yours),
            format!("{:.0}%", c.growth_rate.industry),
            c.growth_rate.status.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Yours", "Industry", "Status"], rows));

    for card in &report.insights {
        println!(
            "[{}] {} ({} impact)",
            card.tone.as_str(),
            card.title,
            card.impact.as_str()
        );
        println!("  {}", card.description);
        println!("  Recommendation: {}", card.recommendation);
    }

    let m = &report.key_metrics;
    let runway = if m.runway_months.is_infinite() {
        "unlimited".to_string()
    } else {
        format!("{:.0} months", m.runway_months)
    };
    println!(
        "Burn rate: {}  Runway: {}  Est. CAC: {}",
        fmt_money(&m.burn_rate),
        runway,
        fmt_money(&m.customer_acquisition_cost)
    );
    Ok(())
}

fn tips(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let tips = analysis::optimization_tips();

    if maybe_print_json(json_flag, jsonl_flag, &tips)? {
        return Ok(());
    }

    let rows = tips
        .iter()
        .map(|t| {
            vec![
                t.priority.as_str().to_string(),
                t.category.to_string(),
                t.title.to_string(),
                t.potential_savings
                    .or(t.potential_gain)
                    .unwrap_or_default()
                    .to_string(),
                t.implementation.to_string(),
                t.effort.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Priority", "Category", "Tip", "Potential", "Timeline", "Effort"],
            rows
        )
    );
    for t in &tips {
        println!("{}: {}", t.title, t.description);
    }
    Ok(())
}
