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

//! Account variants for the trading domain model.
//!
//! Margin versus cash capability is modeled as an enum discriminant rather
//! than subclassing; the risk checks branch once on the variant.

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    enums::AccountType,
    identifiers::AccountId,
    types::{AccountBalance, Currency, Money},
};

/// An account with unleveraged cash assets only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    /// The account ID.
    pub id: AccountId,
    /// The base currency for single-currency accounts (`None` for multi-currency).
    pub base_currency: Option<Currency>,
    balances: AHashMap<Currency, AccountBalance>,
}

impl CashAccount {
    /// Creates a new [`CashAccount`] instance.
    #[must_use]
    pub fn new(
        id: AccountId,
        balances: Vec<AccountBalance>,
        base_currency: Option<Currency>,
    ) -> Self {
        let balances = balances
            .into_iter()
            .map(|balance| (balance.currency(), balance))
            .collect();
        Self {
            id,
            base_currency,
            balances,
        }
    }

    /// Returns the balance for the given currency (or the base currency when `None`).
    #[must_use]
    pub fn balance(&self, currency: Option<Currency>) -> Option<&AccountBalance> {
        let currency = currency.or(self.base_currency)?;
        self.balances.get(&currency)
    }

    /// Returns the total balance for the given currency.
    #[must_use]
    pub fn balance_total(&self, currency: Option<Currency>) -> Option<Money> {
        self.balance(currency).map(|balance| balance.total)
    }

    /// Returns the locked balance for the given currency.
    #[must_use]
    pub fn balance_locked(&self, currency: Option<Currency>) -> Option<Money> {
        self.balance(currency).map(|balance| balance.locked)
    }

    /// Returns the free balance for the given currency.
    #[must_use]
    pub fn balance_free(&self, currency: Option<Currency>) -> Option<Money> {
        self.balance(currency).map(|balance| balance.free)
    }
}

/// An account which facilitates trading on margin, using account assets as collateral.
///
/// Pre-trade balance risk controls for margin accounts are owned by the margin
/// calculation engine, not by this core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarginAccount {
    /// The account ID.
    pub id: AccountId,
    /// The base currency for the account.
    pub base_currency: Option<Currency>,
}

impl MarginAccount {
    /// Creates a new [`MarginAccount`] instance.
    #[must_use]
    pub const fn new(id: AccountId, base_currency: Option<Currency>) -> Self {
        Self { id, base_currency }
    }
}

/// A closed set of account variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AccountAny {
    /// A cash account.
    Cash(CashAccount),
    /// A margin account.
    Margin(MarginAccount),
}

impl AccountAny {
    /// Returns the account ID.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        match self {
            Self::Cash(cash) => cash.id,
            Self::Margin(margin) => margin.id,
        }
    }

    /// Returns the account type discriminant.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        match self {
            Self::Cash(_) => AccountType::Cash,
            Self::Margin(_) => AccountType::Margin,
        }
    }
}
