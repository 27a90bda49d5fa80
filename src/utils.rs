// Copyright (c) 2025 HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a decimal that must not be negative (entry amounts carry their
/// sign in the kind field, never in the amount).
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        return Err(anyhow!("Amount '{}' must not be negative", s));
    }
    Ok(d)
}

/// Lenient coercion for amounts read back from the store on aggregation
/// paths: summaries must always render a number, so malformed text
/// becomes zero instead of an error.
pub fn lenient_amount(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// `part / whole * 100` with the zero-denominator guard collapsed to 0.
pub fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole * Decimal::from(100)).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_amount_coerces_garbage_to_zero() {
        assert_eq!(lenient_amount("12.50"), Decimal::new(1250, 2));
        assert_eq!(lenient_amount(" 12.50 "), Decimal::new(1250, 2));
        assert_eq!(lenient_amount("twelve"), Decimal::ZERO);
        assert_eq!(lenient_amount(""), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_negative() {
        assert!(parse_amount("-3").is_err());
        assert_eq!(parse_amount("3.50").unwrap(), Decimal::new(350, 2));
    }

    #[test]
    fn percent_of_guards_zero_denominator() {
        assert_eq!(percent_of(Decimal::from(10), Decimal::ZERO), 0.0);
        assert_eq!(percent_of(Decimal::from(1), Decimal::from(4)), 25.0);
    }
}
