// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::money::Money;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub month: String, // YYYY-MM
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    pub running_balance: Money,
    /// Months the running balance covers at this month's burn; `None` when
    /// the month had no expenses.
    pub runway_months: Option<Decimal>,
}

/// Buckets `txs` by `YYYY-MM`, ascending, with a running balance carried
/// across months.
pub fn monthly_buckets(txs: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut map: BTreeMap<String, (Money, Money)> = BTreeMap::new();
    for t in txs {
        let entry = map.entry(t.month_key()).or_insert((Money::ZERO, Money::ZERO));
        if t.amount_cents.is_income() {
            entry.0 += t.amount_cents;
        } else {
            entry.1 += t.amount_cents.abs();
        }
    }

    let mut running = Money::ZERO;
    map.into_iter()
        .map(|(month, (income, expenses))| {
            let balance = income - expenses;
            running += balance;
            MonthlyBucket {
                month,
                income,
                expenses,
                balance,
                running_balance: running,
                runway_months: runway(running, expenses),
            }
        })
        .collect()
}

fn runway(running: Money, burn: Money) -> Option<Decimal> {
    if burn.cents() <= 0 {
        return None;
    }
    let covered = Decimal::from(running.cents().max(0));
    let ratio = covered.checked_div(Decimal::from(burn.cents()))?;
    Some(ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
