// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::TxType;
use crate::utils::{parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// `(issue, detail)` pairs for every stored row that breaks a ledger rule.
pub fn findings(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for t in db::all_transactions(conn)? {
        // 1) Stored type disagrees with the amount's sign
        let implied = TxType::from_sign(t.amount_cents);
        if implied != t.r#type {
            rows.push(vec![
                "type_sign_mismatch".into(),
                format!(
                    "#{} stored {} but amount {} reads as {}",
                    t.id,
                    t.r#type,
                    t.amount_cents.fmt2(),
                    implied
                ),
            ]);
        }
        // 2) Dates that will not bucket into a real month
        if parse_date(&t.date).is_err() {
            rows.push(vec!["invalid_date".into(), format!("#{} '{}'", t.id, t.date)]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
