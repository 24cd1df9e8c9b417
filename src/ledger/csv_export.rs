// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TxType};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

pub const EXPORT_HEADER: [&str; 6] = [
    "date",
    "description",
    "amount",
    "type",
    "category",
    "project_client",
];

/// Starter file offered to users: one income row and one expense row.
pub const TEMPLATE_CSV: &str = "date,description,amount,type,category,project_client\n\
2025-01-15,\"Client payment\",1500.00,income,Consulting,Acme Corp\n\
2025-01-20,\"Software subscription\",49.99,expense,Software,\n";

/// Writes `txs` in list order. Only `description` is quoted; `type` always
/// follows the sign of the amount, whatever the stored type says.
pub fn write_csv<W: Write>(txs: &[Transaction], writer: W) -> LedgerResult<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(EXPORT_HEADER)?;
    for t in txs {
        wtr.write_record([
            t.date.clone(),
            quote(&t.description),
            t.amount_cents.abs().to_units().to_string(),
            TxType::from_sign(t.amount_cents).as_str().to_string(),
            t.category.clone().unwrap_or_default(),
            t.project_client.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(txs: &[Transaction]) -> LedgerResult<String> {
    let mut buf = Vec::new();
    write_csv(txs, &mut buf)?;
    String::from_utf8(buf).map_err(|e| {
        LedgerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
