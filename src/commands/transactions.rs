// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{NewTransaction, TxType};
use crate::money::Money;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_trimmed(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    if description.is_empty() {
        return Err(anyhow!("Description cannot be empty"));
    }
    let amount_raw = sub.get_one::<String>("amount").unwrap().trim();
    let units = parse_decimal(amount_raw)?;
    let magnitude = Money::from_units(units)
        .with_context(|| format!("Amount '{}' is out of range", amount_raw))?;
    let r#type: TxType = sub.get_one::<String>("type").unwrap().parse()?;

    let rec = NewTransaction {
        date: date.to_string(),
        description,
        amount_cents: r#type.signed(magnitude),
        r#type,
        category: opt_trimmed(sub, "category"),
        project_client: opt_trimmed(sub, "project"),
    };
    let ids = db::insert_transactions(conn, std::slice::from_ref(&rec))?;
    tracing::info!(id = ids[0], "transaction recorded");
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        rec.r#type,
        rec.amount_cents.abs().fmt2(),
        rec.date,
        rec.description,
        ids[0]
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.project_client.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Amount", "Type", "Category", "Project"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !db::delete_transaction(conn, id)? {
        return Err(anyhow!("Transaction {} not found", id));
    }
    tracing::info!(id, "transaction deleted");
    println!("Deleted transaction {}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
    pub project_client: String,
}

/// Rows for `tx list`: newest first, filtered by `--month`, capped by `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m.trim())?),
        None => None,
    };
    let mut txs = db::all_transactions(conn)?;
    if let Some(m) = &month {
        txs.retain(|t| &t.month_key() == m);
    }
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            amount: t.amount_cents.fmt2(),
            r#type: t.r#type.to_string(),
            date: t.date,
            description: t.description,
            category: t.category.unwrap_or_default(),
            project_client: t.project_client.unwrap_or_default(),
        })
        .collect())
}
