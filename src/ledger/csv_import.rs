// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Lenient CSV importer.
//!
//! Columns are located by substring match on the header, and every malformed
//! cell is replaced by a default instead of rejecting the row. Each default
//! that was applied is reported as an [`ImportWarning`] so callers can audit
//! or (in strict mode) refuse the batch.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, TxType};
use crate::money::Money;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DESCRIPTION: &str = "Imported";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)").expect("static regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Plain comma split, quotes are kept as data.
    #[default]
    Ledger,
    /// Strips one layer of `"..."` per cell and un-escapes `""`.
    Finance,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Ledger => "ledger",
            Dialect::Finance => "finance",
        }
    }
}

impl FromStr for Dialect {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ledger" => Ok(Dialect::Ledger),
            "finance" => Ok(Dialect::Finance),
            _ => Err(LedgerError::UnknownValue {
                kind: "import dialect",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportMode {
    #[default]
    Lenient,
    Strict,
}

/// A default substituted during import. `row` is 1-based over data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportWarning {
    MissingColumn { column: &'static str, fallback: usize },
    DefaultedDate { row: usize },
    DefaultedDescription { row: usize },
    UnparsableAmount { row: usize, raw: String },
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MissingColumn { column, fallback } => write!(
                f,
                "no '{}' column in header, using column {}",
                column,
                fallback + 1
            ),
            ImportWarning::DefaultedDate { row } => {
                write!(f, "row {}: blank date, using today", row)
            }
            ImportWarning::DefaultedDescription { row } => {
                write!(f, "row {}: blank description, using '{}'", row, DEFAULT_DESCRIPTION)
            }
            ImportWarning::UnparsableAmount { row, raw } => {
                write!(f, "row {}: amount '{}' is not a number, using 0", row, raw)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub records: Vec<NewTransaction>,
    pub warnings: Vec<ImportWarning>,
}

/// Header positions of each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
    pub r#type: Option<usize>,
    pub category: Option<usize>,
    pub project_client: Option<usize>,
}

impl ColumnMap {
    pub fn detect(header: &[String]) -> (Self, Vec<ImportWarning>) {
        let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();

        let mut warnings = Vec::new();
        let mut required = |column: &'static str, fallback: usize| {
            position_of(&lowered, &[column]).unwrap_or_else(|| {
                warnings.push(ImportWarning::MissingColumn { column, fallback });
                fallback
            })
        };
        let date = required("date", 0);
        let description = required("description", 1);
        let amount = required("amount", 2);

        let map = ColumnMap {
            date,
            description,
            amount,
            r#type: position_of(&lowered, &["type"]),
            category: position_of(&lowered, &["category"]),
            project_client: position_of(&lowered, &["project", "client"]),
        };
        (map, warnings)
    }
}

fn position_of(lowered: &[String], needles: &[&str]) -> Option<usize> {
    lowered
        .iter()
        .position(|h| needles.iter().any(|n| h.contains(n)))
}

#[derive(Debug, Clone)]
pub struct CsvImporter {
    dialect: Dialect,
    mode: ImportMode,
    today: NaiveDate,
}

impl CsvImporter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            mode: ImportMode::Lenient,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Date substituted for rows with a blank date cell.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_mode(mut self, mode: ImportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn import(&self, text: &str) -> LedgerResult<ImportOutcome> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() < 2 {
            return Err(LedgerError::EmptyOrHeaderOnlyInput);
        }

        let header = self.split_cells(lines[0]);
        let (columns, mut warnings) = ColumnMap::detect(&header);
        let today = self.today.format("%Y-%m-%d").to_string();

        let mut records = Vec::with_capacity(lines.len() - 1);
        for (idx, line) in lines[1..].iter().enumerate() {
            let cells = self.split_cells(line);
            records.push(parse_row(idx + 1, &cells, &columns, &today, &mut warnings));
        }

        for w in &warnings {
            tracing::debug!(warning = %w, "csv import fallback");
        }
        if self.mode == ImportMode::Strict {
            if let Some(first) = warnings.first() {
                return Err(LedgerError::StrictRejected {
                    count: warnings.len(),
                    first: first.to_string(),
                });
            }
        }
        Ok(ImportOutcome { records, warnings })
    }

    fn split_cells(&self, line: &str) -> Vec<String> {
        let pieces: Vec<&str> = line.split(',').collect();
        match self.dialect {
            Dialect::Ledger => pieces.iter().map(|c| c.trim().to_string()).collect(),
            Dialect::Finance => rejoin_quoted(&pieces).iter().map(|c| unquote(c)).collect(),
        }
    }
}

/// Glues comma-split pieces back together when a quoted cell was cut by a
/// comma inside it. A piece whose opening quote never closes on the line is
/// left alone, so the remaining columns keep their positions.
fn rejoin_quoted(pieces: &[&str]) -> Vec<String> {
    let mut cells = Vec::with_capacity(pieces.len());
    let mut i = 0;
    while i < pieces.len() {
        let mut end = i;
        if opens_quote(pieces[i]) {
            let mut joined = pieces[i].to_string();
            for (j, next) in pieces.iter().enumerate().skip(i + 1) {
                joined.push(',');
                joined.push_str(next);
                if is_closed_quote(&joined) {
                    end = j;
                    break;
                }
            }
        }
        cells.push(pieces[i..=end].join(","));
        i = end + 1;
    }
    cells
}

fn opens_quote(piece: &str) -> bool {
    piece.trim_start().starts_with('"') && !is_closed_quote(piece)
}

// Closed when it ends on a quote and every other quote is paired.
fn is_closed_quote(cell: &str) -> bool {
    let t = cell.trim();
    t.len() >= 2 && t.starts_with('"') && t.ends_with('"') && t.matches('"').count() % 2 == 0
}

/// Trims, strips one surrounding `"..."` pair and un-escapes `""`.
fn unquote(cell: &str) -> String {
    let t = cell.trim();
    let inner = match t.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => inner,
        None => t,
    };
    inner.replace("\"\"", "\"")
}

fn parse_row(
    row: usize,
    cells: &[String],
    columns: &ColumnMap,
    today: &str,
    warnings: &mut Vec<ImportWarning>,
) -> NewTransaction {
    let cell = |idx: Option<usize>| {
        idx.and_then(|i| cells.get(i))
            .map(|c| c.as_str())
            .filter(|c| !c.is_empty())
    };

    let date = match cell(Some(columns.date)) {
        Some(d) => d.to_string(),
        None => {
            warnings.push(ImportWarning::DefaultedDate { row });
            today.to_string()
        }
    };
    let description = match cell(Some(columns.description)) {
        Some(d) => d.to_string(),
        None => {
            warnings.push(ImportWarning::DefaultedDescription { row });
            DEFAULT_DESCRIPTION.to_string()
        }
    };

    let raw_amount = cell(Some(columns.amount)).unwrap_or("");
    let magnitude = match parse_amount(raw_amount) {
        Some(m) => m,
        None => {
            warnings.push(ImportWarning::UnparsableAmount {
                row,
                raw: raw_amount.to_string(),
            });
            Money::ZERO
        }
    };

    let r#type = match cell(columns.r#type) {
        Some(t) if t.to_lowercase() == "income" => TxType::Income,
        _ => TxType::Expense,
    };

    NewTransaction {
        date,
        description,
        amount_cents: r#type.signed(magnitude),
        r#type,
        category: cell(columns.category).map(str::to_string),
        project_client: cell(columns.project_client).map(str::to_string),
    }
}

/// Parses a free-form amount cell into cents.
///
/// Everything except digits, `.` and `-` is discarded, then the longest
/// leading decimal number is taken, so `"$1,200.50"` is 120050 cents and
/// `"12-3"` is 1200. Returns `None` when no number can be read.
pub fn parse_amount(raw: &str) -> Option<Money> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let m = LEADING_NUMBER.find(&stripped)?.as_str();

    let (neg, body) = match m.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, m),
    };
    let body = body.strip_suffix('.').unwrap_or(body);
    let body = if body.starts_with('.') {
        format!("0{}", body)
    } else {
        body.to_string()
    };

    let units = body.parse::<Decimal>().ok()?;
    let cents = Money::from_units(units)?;
    Some(if neg { -cents } else { cents })
}
