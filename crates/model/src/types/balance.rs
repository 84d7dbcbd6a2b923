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

//! Represents an account balance denominated in a particular currency.

use sentinel_core::correctness::{FAILED, check_predicate_true};
use serde::{Deserialize, Serialize};

use crate::types::{currency::Currency, money::Money};

/// Represents an account balance denominated in a particular currency.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The total account balance.
    pub total: Money,
    /// The account balance locked (assigned to pending orders).
    pub locked: Money,
    /// The account balance free for trading.
    pub free: Money,
}

impl AccountBalance {
    /// Creates a new [`AccountBalance`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance currencies are inconsistent, or if
    /// `total` does not equal `locked` + `free`.
    pub fn new_checked(total: Money, locked: Money, free: Money) -> anyhow::Result<Self> {
        check_predicate_true(
            total.currency == locked.currency && total.currency == free.currency,
            &format!(
                "currency mismatch: total {}, locked {}, free {}",
                total.currency, locked.currency, free.currency,
            ),
        )?;
        check_predicate_true(
            total == locked + free,
            &format!("total {total} != locked {locked} + free {free}"),
        )?;
        Ok(Self {
            total,
            locked,
            free,
        })
    }

    /// Creates a new [`AccountBalance`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the balance currencies are inconsistent, or if `total` does
    /// not equal `locked` + `free`.
    #[must_use]
    pub fn new(total: Money, locked: Money, free: Money) -> Self {
        Self::new_checked(total, locked, free).expect(FAILED)
    }

    /// Returns the currency of the balance.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.total.currency
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_valid() {
        let balance = AccountBalance::new(
            Money::from("100 USD"),
            Money::from("25 USD"),
            Money::from("75 USD"),
        );
        assert_eq!(balance.currency(), Currency::USD());
    }

    #[rstest]
    fn test_new_checked_inconsistent_total_errors() {
        let result = AccountBalance::new_checked(
            Money::from("100 USD"),
            Money::from("50 USD"),
            Money::from("75 USD"),
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn test_new_checked_currency_mismatch_errors() {
        let result = AccountBalance::new_checked(
            Money::from("100 USD"),
            Money::from("25 AUD"),
            Money::from("75 USD"),
        );
        assert!(result.is_err());
    }
}
