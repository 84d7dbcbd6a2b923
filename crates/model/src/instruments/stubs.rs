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

//! Instrument stubs for testing.

use rstest::fixture;
use sentinel_core::UnixNanos;

use crate::{
    enums::InstrumentClass,
    identifiers::{InstrumentId, Symbol, Venue},
    instruments::Instrument,
    types::{Currency, Price, Quantity},
};

/// Creates a default FX currency pair instrument from a symbol such as "AUD/USD".
///
/// # Panics
///
/// Panics if `symbol` is not of the form "{base}/{quote}" with known currencies.
#[must_use]
pub fn default_fx_ccy(symbol: Symbol, venue: Option<Venue>) -> Instrument {
    let target_venue = venue.unwrap_or(Venue::from("SIM"));
    let instrument_id = InstrumentId::new(symbol, target_venue);
    let (base, quote) = symbol
        .as_str()
        .split_once('/')
        .expect("FX symbol requires '/' separator");
    let price_precision = if quote == "JPY" { 3 } else { 5 };
    let price_increment = Price::from(if quote == "JPY" { "0.001" } else { "0.00001" });
    Instrument::new(
        instrument_id,
        symbol,
        InstrumentClass::Fx,
        Some(Currency::from(base)),
        Currency::from(quote),
        price_precision,
        0,
        price_increment,
        Quantity::from("1"),
        Some(Quantity::from("1000")),
        Some(Quantity::from("1000000")),
        None,
        None,
        None,
        None,
        UnixNanos::default(),
    )
}

#[fixture]
pub fn audusd_sim() -> Instrument {
    default_fx_ccy(Symbol::from("AUD/USD"), Some(Venue::from("SIM")))
}

#[fixture]
pub fn gbpusd_sim() -> Instrument {
    default_fx_ccy(Symbol::from("GBP/USD"), Some(Venue::from("SIM")))
}

#[fixture]
pub fn ethusdt_binance() -> Instrument {
    Instrument::new(
        InstrumentId::from("ETH/USDT.BINANCE"),
        Symbol::from("ETHUSDT"),
        InstrumentClass::Spot,
        Some(Currency::ETH()),
        Currency::USDT(),
        2,
        3,
        Price::from("0.01"),
        Quantity::from("0.001"),
        Some(Quantity::from("0.001")),
        Some(Quantity::from("10000")),
        Some(Price::from("0.01")),
        Some(Price::from("1000000.00")),
        None,
        None,
        UnixNanos::default(),
    )
}

#[fixture]
pub fn spy_call_option() -> Instrument {
    Instrument::new(
        InstrumentId::from("SPY450C.XCBO"),
        Symbol::from("SPY450C"),
        InstrumentClass::Option,
        None,
        Currency::USD(),
        2,
        0,
        Price::from("0.01"),
        Quantity::from("1"),
        Some(Quantity::from("1")),
        None,
        None,
        None,
        None,
        None,
        UnixNanos::default(),
    )
}
