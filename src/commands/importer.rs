// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::ledger::{CsvImporter, Dialect, ImportMode};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn import_transactions(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let dialect = match sub.get_one::<String>("dialect") {
        Some(d) => d.parse::<Dialect>()?,
        None => Settings::load(conn)?.import_dialect,
    };
    let mode = if sub.get_flag("strict") {
        ImportMode::Strict
    } else {
        ImportMode::Lenient
    };

    let text = std::fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;
    let outcome = CsvImporter::new(dialect)
        .with_mode(mode)
        .import(&text)
        .with_context(|| format!("Import rejected for {}", path))?;

    // One SQLite transaction: either every row lands or none do.
    let ids = db::insert_transactions(conn, &outcome.records)?;
    tracing::info!(
        rows = ids.len(),
        warnings = outcome.warnings.len(),
        dialect = dialect.as_str(),
        "csv import committed"
    );

    println!("Imported {} transactions from {}", ids.len(), path);
    if !outcome.warnings.is_empty() {
        println!("{} field(s) were defaulted:", outcome.warnings.len());
        for w in &outcome.warnings {
            println!("  {}", w);
        }
    }
    Ok(())
}
