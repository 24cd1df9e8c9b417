// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use atlas_ledger::error::LedgerError;
use atlas_ledger::ledger::csv_import::{parse_amount, ColumnMap};
use atlas_ledger::ledger::{CsvImporter, Dialect, ImportMode, ImportWarning};
use atlas_ledger::models::TxType;
use atlas_ledger::money::Money;
use atlas_ledger::{cli, commands::importer, config, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
}

fn importer(dialect: Dialect) -> CsvImporter {
    CsvImporter::new(dialect).with_today(today())
}

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(conn: &mut Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["atlas-ledger", "import", "transactions"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn detects_columns_by_header_substring() {
    let csv = "Date,Description,Amount,Type,Category,Project/Client\n\
               2025-02-01,Retainer,1500.00,Income,Consulting,Acme\n\
               2025-02-05,Figma,-99,expense,Software,\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    assert!(out.warnings.is_empty());
    assert_eq!(out.records.len(), 2);

    let r0 = &out.records[0];
    assert_eq!(r0.date, "2025-02-01");
    assert_eq!(r0.description, "Retainer");
    assert_eq!(r0.amount_cents, Money::from_cents(150000));
    assert_eq!(r0.r#type, TxType::Income);
    assert_eq!(r0.category.as_deref(), Some("Consulting"));
    assert_eq!(r0.project_client.as_deref(), Some("Acme"));

    let r1 = &out.records[1];
    assert_eq!(r1.amount_cents, Money::from_cents(-9900));
    assert_eq!(r1.r#type, TxType::Expense);
    assert_eq!(r1.category.as_deref(), Some("Software"));
    assert_eq!(r1.project_client, None);
}

#[test]
fn column_order_is_free() {
    let csv = "client,amount,category,type,description,date\n\
               Beta,250,Design,income,Logo work,2025-04-02\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let r = &out.records[0];
    assert_eq!(r.date, "2025-04-02");
    assert_eq!(r.description, "Logo work");
    assert_eq!(r.amount_cents, Money::from_cents(25000));
    assert_eq!(r.category.as_deref(), Some("Design"));
    assert_eq!(r.project_client.as_deref(), Some("Beta"));
}

#[test]
fn sign_follows_type_not_source_value() {
    let csv = "date,description,amount,type\n\
               2025-01-01,Unsigned expense,99,expense\n\
               2025-01-02,Negative income,-50,income\n\
               2025-01-03,No type,12.5,\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let amounts: Vec<i64> = out.records.iter().map(|r| r.amount_cents.cents()).collect();
    assert_eq!(amounts, vec![-9900, 5000, -1250]);
    assert_eq!(out.records[2].r#type, TxType::Expense);
}

#[test]
fn missing_type_column_defaults_to_expense() {
    let csv = "date,description,amount\n2025-01-01,Coffee,4.50\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    assert_eq!(out.records[0].r#type, TxType::Expense);
    assert_eq!(out.records[0].amount_cents, Money::from_cents(-450));
}

#[test]
fn missing_required_columns_fall_back_to_positions() {
    let csv = "when,what,how much\n2025-01-01,Coffee,4.50\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let r = &out.records[0];
    assert_eq!(r.date, "2025-01-01");
    assert_eq!(r.description, "Coffee");
    assert_eq!(r.amount_cents, Money::from_cents(-450));
    assert_eq!(
        out.warnings,
        vec![
            ImportWarning::MissingColumn { column: "date", fallback: 0 },
            ImportWarning::MissingColumn { column: "description", fallback: 1 },
            ImportWarning::MissingColumn { column: "amount", fallback: 2 },
        ]
    );
}

#[test]
fn column_map_prefers_first_match() {
    let header: Vec<String> = ["Project", "Client", "Date", "Booked date", "Description", "Amount"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let (map, warnings) = ColumnMap::detect(&header);
    assert!(warnings.is_empty());
    assert_eq!(map.date, 2);
    assert_eq!(map.project_client, Some(0));
    assert_eq!(map.r#type, None);
}

#[test]
fn blank_fields_get_defaults_and_warnings() {
    let csv = "date,description,amount,type,category\n,,5,income,  \n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let r = &out.records[0];
    assert_eq!(r.date, "2025-03-09");
    assert_eq!(r.description, "Imported");
    assert_eq!(r.amount_cents, Money::from_cents(500));
    assert_eq!(r.category, None);
    assert_eq!(
        out.warnings,
        vec![
            ImportWarning::DefaultedDate { row: 1 },
            ImportWarning::DefaultedDescription { row: 1 },
        ]
    );
}

#[test]
fn garbage_amounts_never_drop_rows() {
    let csv = "date,description,amount\n\
               2025-01-01,A,zzz\n\
               2025-01-02,B,n/a\n\
               2025-01-03,C,\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    assert_eq!(out.records.len(), 3);
    assert!(out.records.iter().all(|r| r.amount_cents.is_zero()));
    let unparsable = out
        .warnings
        .iter()
        .filter(|w| matches!(w, ImportWarning::UnparsableAmount { .. }))
        .count();
    assert_eq!(unparsable, 3);
}

#[test]
fn header_only_or_empty_input_is_rejected() {
    for text in ["", "\n\n", "date,description,amount\n", "date,description,amount\n  \n\r\n"] {
        let err = importer(Dialect::Ledger).import(text).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyOrHeaderOnlyInput), "{:?}", text);
        assert_eq!(err.to_string(), "CSV must have a header and at least one row");
    }
}

#[test]
fn accepts_crlf_and_skips_blank_lines() {
    let csv = "date,description,amount,type\r\n\r\n2025-01-01,A,10,income\r\n   \r\n2025-01-02,B,5,expense\r\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].r#type, TxType::Income);
    assert_eq!(out.records[1].amount_cents, Money::from_cents(-500));
}

#[test]
fn keeps_input_order() {
    let csv = "date,description,amount\n2025-03-01,C,1\n2025-01-01,A,1\n2025-02-01,B,1\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let descs: Vec<&str> = out.records.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descs, vec!["C", "A", "B"]);
}

#[test]
fn ledger_dialect_keeps_quotes_as_data() {
    let csv = "date,description,amount,type\n2025-01-01,\"Quoted\",10,income\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    assert_eq!(out.records[0].description, "\"Quoted\"");
}

#[test]
fn finance_dialect_unquotes_cells() {
    let csv = "date,description,amount,type\n2025-01-01,\"Say \"\"hi\"\", please\",\"$1,200.50\",income\n";
    let out = importer(Dialect::Finance).import(csv).unwrap();
    assert_eq!(out.records[0].description, "Say \"hi\", please");
    assert_eq!(out.records[0].amount_cents, Money::from_cents(120050));
}

#[test]
fn ledger_dialect_keeps_stray_carriage_return_in_cell() {
    let csv = "date,description,amount,type\n2025-01-01,a\rb,40,income\n";
    let out = importer(Dialect::Ledger).import(csv).unwrap();
    let r = &out.records[0];
    assert_eq!(r.description, "a\rb");
    assert_eq!(r.amount_cents, Money::from_cents(4000));
    assert_eq!(r.r#type, TxType::Income);
}

#[test]
fn finance_dialect_unquotes_cells_after_spaces() {
    let csv = "date,description,amount,type\n2025-01-01, \"Lunch\", 40, expense\n";
    let out = importer(Dialect::Finance).import(csv).unwrap();
    let r = &out.records[0];
    assert_eq!(r.description, "Lunch");
    assert_eq!(r.amount_cents, Money::from_cents(-4000));
    assert_eq!(r.r#type, TxType::Expense);
}

#[test]
fn finance_dialect_unclosed_quote_keeps_later_columns() {
    let csv = "date,description,amount,type\n2025-01-01,\"Lunch,40,income\n";
    let out = importer(Dialect::Finance).import(csv).unwrap();
    assert!(out.warnings.is_empty());
    let r = &out.records[0];
    assert_eq!(r.description, "\"Lunch");
    assert_eq!(r.amount_cents, Money::from_cents(4000));
    assert_eq!(r.r#type, TxType::Income);
}

#[test]
fn amount_parsing_reads_leading_number() {
    assert_eq!(parse_amount("$1,200.50"), Some(Money::from_cents(120050)));
    assert_eq!(parse_amount("12-3"), Some(Money::from_cents(1200)));
    assert_eq!(parse_amount("-.5"), Some(Money::from_cents(-50)));
    assert_eq!(parse_amount("7."), Some(Money::from_cents(700)));
    assert_eq!(parse_amount("1.005"), Some(Money::from_cents(101)));
    assert_eq!(parse_amount("EUR 3.10"), Some(Money::from_cents(310)));
    assert_eq!(parse_amount("--5"), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);
}

#[test]
fn strict_mode_rejects_defaulted_fields() {
    let csv = "date,description,amount,type\n,,5,income\n";
    let err = importer(Dialect::Ledger)
        .with_mode(ImportMode::Strict)
        .import(csv)
        .unwrap_err();
    match err {
        LedgerError::StrictRejected { count, first } => {
            assert_eq!(count, 2);
            assert_eq!(first, "row 1: blank date, using today");
        }
        other => panic!("unexpected error {:?}", other),
    }

    let clean = "date,description,amount,type\n2025-01-01,Ok,5,income\n";
    let out = importer(Dialect::Ledger)
        .with_mode(ImportMode::Strict)
        .import(clean)
        .unwrap();
    assert_eq!(out.records.len(), 1);
}

#[test]
fn handle_imports_file_and_trims_path() {
    let mut conn = base_conn();
    let file = csv_file("date,description,amount,type\n2025-02-03,Shop,5.00,expense\n2025-02-04,Client,100,income\n");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut conn, &["--path", &padded]).unwrap();

    let txs = db::all_transactions(&conn).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount_cents, Money::from_cents(-500));
    assert_eq!(txs[1].amount_cents, Money::from_cents(10000));
    assert!(txs[1].id > txs[0].id);
}

#[test]
fn handle_rejects_header_only_file_without_inserting() {
    let mut conn = base_conn();
    let file = csv_file("date,description,amount,type\n");
    let err = run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap_err();
    assert!(format!("{:#}", err).contains("CSV must have a header and at least one row"));
    assert_eq!(count(&conn), 0);
}

#[test]
fn handle_strict_flag_discards_whole_batch() {
    let mut conn = base_conn();
    let file = csv_file("date,description,amount\n2025-01-01,Fine,5\n2025-01-02,Bad,oops\n");
    let path = file.path().to_str().unwrap().to_string();
    let err = run_import(&mut conn, &["--path", &path, "--strict"]).unwrap_err();
    assert!(format!("{:#}", err).contains("Strict import rejected 1 defaulted field(s)"));
    assert_eq!(count(&conn), 0);

    run_import(&mut conn, &["--path", &path]).unwrap();
    assert_eq!(count(&conn), 2);
}

#[test]
fn handle_uses_configured_dialect() {
    let mut conn = base_conn();
    config::set(&conn, "import_dialect", "finance").unwrap();
    let file = csv_file("date,description,amount,type\n2025-01-01,\"Lunch, team\",40,expense\n");
    run_import(&mut conn, &["--path", file.path().to_str().unwrap()]).unwrap();

    let txs = db::all_transactions(&conn).unwrap();
    assert_eq!(txs[0].description, "Lunch, team");
    assert_eq!(txs[0].amount_cents, Money::from_cents(-4000));
}
