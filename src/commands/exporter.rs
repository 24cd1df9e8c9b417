// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::{TEMPLATE_CSV, export_csv};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("template", sub)) => export_template(sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();

    let txs = db::all_transactions(conn)?;
    let body = match fmt.as_str() {
        "csv" => export_csv(&txs)?,
        "json" => serde_json::to_string_pretty(&txs)?,
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    };
    std::fs::write(out, body).with_context(|| format!("Write {}", out))?;
    tracing::info!(rows = txs.len(), format = %fmt, "export written");
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}

fn export_template(sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    std::fs::write(out, TEMPLATE_CSV).with_context(|| format!("Write {}", out))?;
    println!("Wrote CSV template to {}", out);
    Ok(())
}
