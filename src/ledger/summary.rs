// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::Transaction;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Denominator used for the scalar runway figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunwayBasis {
    /// Balance over lifetime expenses.
    #[default]
    TotalExpenses,
    /// Balance over the mean expense of the months present in the ledger.
    AverageMonthly,
}

impl RunwayBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunwayBasis::TotalExpenses => "total",
            RunwayBasis::AverageMonthly => "average",
        }
    }
}

impl FromStr for RunwayBasis {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(RunwayBasis::TotalExpenses),
            "average" => Ok(RunwayBasis::AverageMonthly),
            _ => Err(LedgerError::UnknownValue {
                kind: "runway basis",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    /// Zero when there are no expenses. Not clamped: a negative balance
    /// gives a negative runway.
    pub runway_months: Decimal,
}

pub fn summarize(txs: &[Transaction], basis: RunwayBasis) -> Summary {
    let income: Money = txs
        .iter()
        .map(|t| t.amount_cents)
        .filter(|a| a.is_income())
        .sum();
    let expenses: Money = txs
        .iter()
        .map(|t| t.amount_cents)
        .filter(|a| !a.is_income())
        .map(|a| a.abs())
        .sum();
    let balance = income - expenses;

    let burn = match basis {
        RunwayBasis::TotalExpenses => Decimal::from(expenses.cents()),
        RunwayBasis::AverageMonthly => {
            let months: BTreeSet<String> = txs.iter().map(|t| t.month_key()).collect();
            match months.len() {
                0 => Decimal::ZERO,
                n => Decimal::from(expenses.cents()) / Decimal::from(n as u64),
            }
        }
    };
    let runway_months = if burn > Decimal::ZERO {
        Decimal::from(balance.cents())
            .checked_div(burn)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Summary {
        income,
        expenses,
        balance,
        runway_months,
    }
}
