// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Represents an amount of money in a specified currency denomination.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    ops::{Add, Neg, Sub},
    str::FromStr,
};

use rust_decimal::Decimal;
use sentinel_core::correctness::FAILED;
use serde::{Deserialize, Serialize};

use crate::types::currency::Currency;

/// Represents an amount of money in a specified currency denomination.
#[repr(C)]
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    /// The currency denomination.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] instance.
    ///
    /// The `amount` is quantized to the currency precision.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(u32::from(currency.precision)),
            currency,
        }
    }

    /// Returns the amount as a `Decimal`.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.amount
    }

    /// Returns whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        assert_eq!(
            self.currency, other.currency,
            "cannot compare money with different currencies"
        );
        self.amount.cmp(&other.amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.currency, rhs.currency,
            "cannot add money with different currencies"
        );
        Self::new(self.amount + rhs.amount, self.currency)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.currency, rhs.currency,
            "cannot subtract money with different currencies"
        );
        Self::new(self.amount - rhs.amount, self.currency)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.amount, self.currency)
    }
}

impl FromStr for Money {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount_part, code_part) = s.split_once(' ').ok_or_else(|| {
            anyhow::anyhow!("Error parsing `Money` from '{s}', expected '{{amount}} {{currency}}'")
        })?;
        let amount: Decimal = amount_part
            .replace('_', "")
            .parse()
            .map_err(|e| anyhow::anyhow!("Error parsing `Money` amount from '{s}': {e}"))?;
        let currency: Currency = code_part.parse()?;
        Ok(Self::new(amount, currency))
    }
}

impl From<&str> for Money {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Money))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.*} {}",
            self.currency.precision as usize, self.amount, self.currency.code,
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    fn test_from_str() {
        let money = Money::from("1_000_000 USD");
        assert_eq!(money.as_decimal(), dec!(1000000));
        assert_eq!(money.currency, Currency::USD());
    }

    #[rstest]
    fn test_display() {
        let money = Money::new(dec!(1000.5), Currency::USD());
        assert_eq!(money.to_string(), "1000.50 USD");
    }

    #[rstest]
    fn test_arithmetic_same_currency() {
        let total = Money::from("10 USD") + Money::from("2.50 USD");
        assert_eq!(total, Money::from("12.50 USD"));
        assert_eq!(-Money::from("1 USD"), Money::from("-1 USD"));
    }

    #[rstest]
    #[should_panic]
    fn test_comparison_different_currency_panics() {
        let _ = Money::from("1 USD") > Money::from("1 AUD");
    }
}
