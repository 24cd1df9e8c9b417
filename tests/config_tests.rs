// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use atlas_ledger::config::{self, Settings};
use atlas_ledger::db;
use atlas_ledger::ledger::{Dialect, RunwayBasis};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn defaults_when_nothing_stored() {
    let conn = setup();
    assert_eq!(Settings::load(&conn).unwrap(), Settings::default());
    let s = Settings::default();
    assert_eq!(s.currency, "USD");
    assert_eq!(s.runway_basis, RunwayBasis::TotalExpenses);
    assert_eq!(s.import_dialect, Dialect::Ledger);
}

#[test]
fn set_stores_canonical_values() {
    let conn = setup();
    assert_eq!(config::set(&conn, "currency", " eur ").unwrap(), "EUR");
    assert_eq!(config::set(&conn, "runway_basis", "AVERAGE").unwrap(), "average");
    assert_eq!(config::set(&conn, "import_dialect", "Finance").unwrap(), "finance");

    let s = Settings::load(&conn).unwrap();
    assert_eq!(s.currency, "EUR");
    assert_eq!(s.runway_basis, RunwayBasis::AverageMonthly);
    assert_eq!(s.import_dialect, Dialect::Finance);

    // upsert replaces
    config::set(&conn, "currency", "gbp").unwrap();
    assert_eq!(config::get(&conn, "currency").unwrap().as_deref(), Some("GBP"));
}

#[test]
fn set_rejects_bad_keys_and_values() {
    let conn = setup();
    let err = config::set(&conn, "theme", "dark").unwrap_err();
    assert!(err.to_string().contains("Unknown setting 'theme'"));

    let err = config::set(&conn, "runway_basis", "median").unwrap_err();
    assert!(err.to_string().contains("Unknown runway basis 'median'"));

    assert!(config::set(&conn, "currency", "  ").is_err());
    assert_eq!(Settings::load(&conn).unwrap(), Settings::default());
}
