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

//! Account stubs for testing.

use rstest::fixture;

use crate::{
    accounts::{CashAccount, MarginAccount},
    identifiers::AccountId,
    types::{AccountBalance, Currency, Money},
};

#[fixture]
pub fn cash_account_million_usd() -> CashAccount {
    CashAccount::new(
        AccountId::from("SIM-001"),
        vec![AccountBalance::new(
            Money::from("1000000 USD"),
            Money::from("0 USD"),
            Money::from("1000000 USD"),
        )],
        Some(Currency::USD()),
    )
}

#[fixture]
pub fn cash_account_multi() -> CashAccount {
    CashAccount::new(
        AccountId::from("BINANCE-001"),
        vec![
            AccountBalance::new(
                Money::from("10 BTC"),
                Money::from("0 BTC"),
                Money::from("10 BTC"),
            ),
            AccountBalance::new(
                Money::from("20 ETH"),
                Money::from("0 ETH"),
                Money::from("20 ETH"),
            ),
        ],
        None, // multi currency account
    )
}

#[fixture]
pub fn margin_account() -> MarginAccount {
    MarginAccount::new(AccountId::from("SIM-001"), Some(Currency::USD()))
}
