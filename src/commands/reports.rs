// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::db;
use crate::ledger::{
    RunwayBasis, monthly_buckets, profit_by_project, spend_by_category, summarize,
};
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("profitability", sub)) => profitability(conn, sub)?,
        Some(("spend-by-category", sub)) => category_spend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fmt_runway(months: Decimal) -> String {
    format!(
        "{:.1}",
        months.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[derive(Debug, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub running_balance: String,
    pub runway_months: Option<String>,
}

/// Newest `--months` buckets, oldest first. Running balances still cover
/// the whole history.
pub fn monthly_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<MonthlyRow>> {
    let txs = db::all_transactions(conn)?;
    let buckets = monthly_buckets(&txs);
    let skip = match sub.get_one::<usize>("months") {
        Some(n) => buckets.len().saturating_sub(*n),
        None => 0,
    };
    Ok(buckets
        .into_iter()
        .skip(skip)
        .map(|b| MonthlyRow {
            income: b.income.fmt2(),
            expenses: b.expenses.fmt2(),
            balance: b.balance.fmt2(),
            running_balance: b.running_balance.fmt2(),
            runway_months: b.runway_months.map(fmt_runway),
            month: b.month,
        })
        .collect())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = monthly_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let ccy = Settings::load(conn)?.currency;
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.month,
                    r.income,
                    r.expenses,
                    r.balance,
                    r.running_balance,
                    r.runway_months.unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        let hdr = |h: &str| format!("{} ({})", h, ccy);
        println!(
            "{}",
            pretty_table(
                &[
                    "Month",
                    &hdr("Income"),
                    &hdr("Expenses"),
                    &hdr("Net"),
                    &hdr("Running"),
                    "Runway (months)",
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub currency: String,
    pub basis: String,
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub runway_months: String,
}

pub fn summary_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<SummaryReport> {
    let settings = Settings::load(conn)?;
    let basis = match sub.get_one::<String>("basis") {
        Some(b) => b.parse::<RunwayBasis>()?,
        None => settings.runway_basis,
    };
    let txs = db::all_transactions(conn)?;
    let s = summarize(&txs, basis);
    Ok(SummaryReport {
        currency: settings.currency,
        basis: basis.as_str().to_string(),
        income: s.income.fmt2(),
        expenses: s.expenses.fmt2(),
        balance: s.balance.fmt2(),
        runway_months: fmt_runway(s.runway_months),
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let report = summary_report(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), false, &report)? {
        let rows = vec![
            vec!["Income".into(), report.income],
            vec!["Expenses".into(), report.expenses],
            vec!["Balance".into(), report.balance],
            vec![
                format!("Runway (months, {} basis)", report.basis),
                report.runway_months,
            ],
        ];
        let hdr = format!("Amount ({})", report.currency);
        println!("{}", pretty_table(&["Metric", &hdr], rows));
    }
    Ok(())
}

fn profitability(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let txs = db::all_transactions(conn)?;
    let data: Vec<Vec<String>> = profit_by_project(&txs)
        .iter()
        .map(|p| {
            vec![
                p.label().to_string(),
                p.income.fmt2(),
                p.expenses.fmt2(),
                p.net.fmt2(),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Project/Client", "Income", "Expenses", "Net"], data)
        );
    }
    Ok(())
}

fn category_spend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m.trim())?),
        None => None,
    };
    let txs = db::all_transactions(conn)?;
    let data: Vec<Vec<String>> = spend_by_category(&txs, month.as_deref())
        .iter()
        .map(|c| vec![c.label().to_string(), c.spent.fmt2()])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
