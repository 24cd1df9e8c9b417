// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    /// The type implied by an amount's sign.
    pub fn from_sign(amount: Money) -> Self {
        if amount.is_income() {
            TxType::Income
        } else {
            TxType::Expense
        }
    }

    /// Applies this type's sign to the magnitude of `amount`.
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            TxType::Income => amount.abs(),
            TxType::Expense => -amount.abs(),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            _ => Err(LedgerError::UnknownValue {
                kind: "transaction type",
                value: s.to_string(),
            }),
        }
    }
}

/// A transaction before the store has given it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: String, // YYYY-MM-DD
    pub description: String,
    pub amount_cents: Money,
    pub r#type: TxType,
    pub category: Option<String>,
    pub project_client: Option<String>,
}

impl NewTransaction {
    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            date: self.date,
            description: self.description,
            amount_cents: self.amount_cents,
            r#type: self.r#type,
            category: self.category,
            project_client: self.project_client,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String, // YYYY-MM-DD
    pub description: String,
    pub amount_cents: Money,
    pub r#type: TxType,
    pub category: Option<String>,
    pub project_client: Option<String>,
}

impl Transaction {
    /// `YYYY-MM` bucket key: the first seven characters of the date.
    pub fn month_key(&self) -> String {
        self.date.chars().take(7).collect()
    }
}
