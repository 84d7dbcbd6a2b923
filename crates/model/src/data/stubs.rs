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

//! Market data stubs for testing.

use rstest::fixture;
use sentinel_core::UnixNanos;

use crate::{
    data::{QuoteTick, TradeTick},
    enums::AggressorSide,
    identifiers::{InstrumentId, TradeId},
    types::{Price, Quantity},
};

#[fixture]
pub fn quote_audusd() -> QuoteTick {
    QuoteTick::new(
        InstrumentId::from("AUD/USD.SIM"),
        Price::from("0.80000"),
        Price::from("0.80010"),
        Quantity::from("100000"),
        Quantity::from("100000"),
        UnixNanos::default(),
        UnixNanos::default(),
    )
}

#[fixture]
pub fn trade_audusd() -> TradeTick {
    TradeTick::new(
        InstrumentId::from("AUD/USD.SIM"),
        Price::from("0.80005"),
        Quantity::from("100000"),
        AggressorSide::Buyer,
        TradeId::from("T-123456"),
        UnixNanos::default(),
        UnixNanos::default(),
    )
}

#[fixture]
pub fn quote_ethusdt() -> QuoteTick {
    QuoteTick::new(
        InstrumentId::from("ETH/USDT.BINANCE"),
        Price::from("1500.00"),
        Price::from("1500.10"),
        Quantity::from("10.000"),
        Quantity::from("10.000"),
        UnixNanos::default(),
        UnixNanos::default(),
    )
}
