// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::money::Money;
use serde::Serialize;
use std::collections::HashMap;

pub const UNASSIGNED: &str = "(unassigned)";
pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProfit {
    pub project_client: Option<String>,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl ProjectProfit {
    pub fn label(&self) -> &str {
        self.project_client.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// Income, expenses and net per project/client, best performer first.
pub fn profit_by_project(txs: &[Transaction]) -> Vec<ProjectProfit> {
    let mut agg: HashMap<Option<String>, (Money, Money)> = HashMap::new();
    for t in txs {
        let entry = agg
            .entry(t.project_client.clone())
            .or_insert((Money::ZERO, Money::ZERO));
        if t.amount_cents.is_income() {
            entry.0 += t.amount_cents;
        } else {
            entry.1 += t.amount_cents.abs();
        }
    }

    let mut items: Vec<ProjectProfit> = agg
        .into_iter()
        .map(|(project_client, (income, expenses))| ProjectProfit {
            project_client,
            income,
            expenses,
            net: income - expenses,
        })
        .collect();
    items.sort_by(|a, b| b.net.cmp(&a.net).then_with(|| a.label().cmp(b.label())));
    items
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: Option<String>,
    pub spent: Money,
}

impl CategorySpend {
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Expense totals per category, largest first, optionally for one `YYYY-MM`.
pub fn spend_by_category(txs: &[Transaction], month: Option<&str>) -> Vec<CategorySpend> {
    let mut agg: HashMap<Option<String>, Money> = HashMap::new();
    for t in txs
        .iter()
        .filter(|t| !t.amount_cents.is_income())
        .filter(|t| month.is_none_or(|m| t.month_key() == m))
    {
        *agg.entry(t.category.clone()).or_insert(Money::ZERO) += t.amount_cents.abs();
    }

    let mut items: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(category, spent)| CategorySpend { category, spent })
        .collect();
    items.sort_by(|a, b| b.spent.cmp(&a.spent).then_with(|| a.label().cmp(b.label())));
    items
}
