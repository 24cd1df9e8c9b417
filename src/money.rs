// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Signed money amounts held as integer cents.
//!
//! Income is positive, expenses are negative. Decimal currency units only
//! appear when a value is formatted or compared against a ratio. Arithmetic
//! saturates at the `i64` bounds instead of overflowing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Income side of the sign convention; zero counts as income.
    pub const fn is_income(&self) -> bool {
        self.0 >= 0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts currency units to cents, rounding half away from zero.
    /// Returns `None` when the value does not fit in `i64` cents.
    pub fn from_units(units: Decimal) -> Option<Self> {
        units
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Currency units in their shortest form: `1500`, `10.5`, `0.99`.
    pub fn to_units(&self) -> Decimal {
        Decimal::new(self.0, 2).normalize()
    }

    /// Fixed two-decimal rendering used by tables and reports.
    pub fn fmt2(&self) -> String {
        format!("{:.2}", Decimal::new(self.0, 2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_units())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}
