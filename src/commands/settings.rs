// Copyright (c) HitFluence.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

const KNOWN_KEYS: [&str; 2] = ["company_name", "user_name"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim().to_string();
            let value = sub.get_one::<String>("value").unwrap();
            if !KNOWN_KEYS.contains(&key.as_str()) {
                return Err(anyhow!(
                    "Unknown setting '{}', expected one of: {}",
                    key,
                    KNOWN_KEYS.join(", ")
                ));
            }
            db::set_setting(conn, &key, value)?;
            println!("Set {} = {}", key, value);
        }
        Some(("show", _)) => {
            let mut rows = Vec::new();
            for key in KNOWN_KEYS {
                let value = db::get_setting(conn, key)?.unwrap_or_default();
                rows.push(vec![key.to_string(), value]);
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
