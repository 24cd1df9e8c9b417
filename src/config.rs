// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{Dialect, RunwayBasis};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

pub const KEY_CURRENCY: &str = "currency";
pub const KEY_RUNWAY_BASIS: &str = "runway_basis";
pub const KEY_IMPORT_DIALECT: &str = "import_dialect";

pub const KEYS: [&str; 3] = [KEY_CURRENCY, KEY_RUNWAY_BASIS, KEY_IMPORT_DIALECT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub currency: String,
    pub runway_basis: RunwayBasis,
    pub import_dialect: Dialect,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            runway_basis: RunwayBasis::default(),
            import_dialect: Dialect::default(),
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut s = Settings::default();
        if let Some(v) = get(conn, KEY_CURRENCY)? {
            s.currency = v;
        }
        if let Some(v) = get(conn, KEY_RUNWAY_BASIS)? {
            s.runway_basis = v.parse()?;
        }
        if let Some(v) = get(conn, KEY_IMPORT_DIALECT)? {
            s.import_dialect = v.parse()?;
        }
        Ok(s)
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        vec![
            vec![KEY_CURRENCY.into(), self.currency.clone()],
            vec![KEY_RUNWAY_BASIS.into(), self.runway_basis.as_str().into()],
            vec![KEY_IMPORT_DIALECT.into(), self.import_dialect.as_str().into()],
        ]
    }
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// Validates `value` for `key` and stores its canonical form.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    let canonical = match key {
        KEY_CURRENCY => {
            if value.is_empty() {
                return Err(anyhow!("Currency cannot be empty"));
            }
            value.to_uppercase()
        }
        KEY_RUNWAY_BASIS => value.parse::<RunwayBasis>()?.as_str().to_string(),
        KEY_IMPORT_DIALECT => value.parse::<Dialect>()?.as_str().to_string(),
        _ => {
            return Err(anyhow!(
                "Unknown setting '{}' (expected one of: {})",
                key,
                KEYS.join(", ")
            ));
        }
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, canonical],
    )?;
    Ok(canonical)
}
