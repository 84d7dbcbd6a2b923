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

//! Instrument definitions for the trading domain model.

#[cfg(any(test, feature = "stubs"))]
pub mod stubs;

use std::fmt::Display;

use rust_decimal::Decimal;
use sentinel_core::{UnixNanos, correctness::FAILED};
use serde::{Deserialize, Serialize};

use crate::{
    enums::InstrumentClass,
    identifiers::{InstrumentId, Symbol},
    types::{Currency, Money, Price, Quantity},
};

/// Represents a tradable instrument definition.
///
/// Read-only to the risk path; provides the precision, bound, and notional
/// metadata the pre-trade checks validate against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// The instrument ID.
    pub id: InstrumentId,
    /// The raw/local symbol for the instrument on the venue.
    pub raw_symbol: Symbol,
    /// The instrument class.
    pub instrument_class: InstrumentClass,
    /// The base currency, when the instrument is quoted against another asset.
    pub base_currency: Option<Currency>,
    /// The quote currency of the instrument.
    pub quote_currency: Currency,
    /// The decimal precision of prices for the instrument.
    pub price_precision: u8,
    /// The decimal precision of trade sizes for the instrument.
    pub size_precision: u8,
    /// The minimum price increment (tick size).
    pub price_increment: Price,
    /// The minimum size increment.
    pub size_increment: Quantity,
    /// The minimum order quantity, when constrained.
    pub min_quantity: Option<Quantity>,
    /// The maximum order quantity, when constrained.
    pub max_quantity: Option<Quantity>,
    /// The minimum order price, when constrained.
    pub min_price: Option<Price>,
    /// The maximum order price, when constrained.
    pub max_price: Option<Price>,
    /// The minimum order notional value, when constrained.
    pub min_notional: Option<Money>,
    /// The maximum order notional value, when constrained.
    pub max_notional: Option<Money>,
    /// UNIX timestamp (nanoseconds) when the definition was initialized.
    pub ts_init: UnixNanos,
}

impl Instrument {
    /// Creates a new [`Instrument`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the increment precisions are inconsistent with the
    /// declared price/size precisions.
    #[allow(clippy::too_many_arguments)]
    pub fn new_checked(
        id: InstrumentId,
        raw_symbol: Symbol,
        instrument_class: InstrumentClass,
        base_currency: Option<Currency>,
        quote_currency: Currency,
        price_precision: u8,
        size_precision: u8,
        price_increment: Price,
        size_increment: Quantity,
        min_quantity: Option<Quantity>,
        max_quantity: Option<Quantity>,
        min_price: Option<Price>,
        max_price: Option<Price>,
        min_notional: Option<Money>,
        max_notional: Option<Money>,
        ts_init: UnixNanos,
    ) -> anyhow::Result<Self> {
        if price_increment.precision != price_precision {
            anyhow::bail!(
                "invalid `price_increment` precision {} for instrument {id} with price precision {price_precision}",
                price_increment.precision,
            );
        }
        if size_increment.precision != size_precision {
            anyhow::bail!(
                "invalid `size_increment` precision {} for instrument {id} with size precision {size_precision}",
                size_increment.precision,
            );
        }
        Ok(Self {
            id,
            raw_symbol,
            instrument_class,
            base_currency,
            quote_currency,
            price_precision,
            size_precision,
            price_increment,
            size_increment,
            min_quantity,
            max_quantity,
            min_price,
            max_price,
            min_notional,
            max_notional,
            ts_init,
        })
    }

    /// Creates a new [`Instrument`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the parameters are invalid.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: InstrumentId,
        raw_symbol: Symbol,
        instrument_class: InstrumentClass,
        base_currency: Option<Currency>,
        quote_currency: Currency,
        price_precision: u8,
        size_precision: u8,
        price_increment: Price,
        size_increment: Quantity,
        min_quantity: Option<Quantity>,
        max_quantity: Option<Quantity>,
        min_price: Option<Price>,
        max_price: Option<Price>,
        min_notional: Option<Money>,
        max_notional: Option<Money>,
        ts_init: UnixNanos,
    ) -> Self {
        Self::new_checked(
            id,
            raw_symbol,
            instrument_class,
            base_currency,
            quote_currency,
            price_precision,
            size_precision,
            price_increment,
            size_increment,
            min_quantity,
            max_quantity,
            min_price,
            max_price,
            min_notional,
            max_notional,
            ts_init,
        )
        .expect(FAILED)
    }

    /// Returns whether the instrument is a foreign exchange currency pair.
    #[must_use]
    pub fn is_currency_pair(&self) -> bool {
        self.instrument_class == InstrumentClass::Fx
    }

    /// Returns whether the instrument is an options contract.
    #[must_use]
    pub fn is_option(&self) -> bool {
        self.instrument_class == InstrumentClass::Option
    }

    /// Calculates the notional value of the given quantity at the given price,
    /// denominated in the quote currency.
    #[must_use]
    pub fn notional_value(&self, quantity: Quantity, price: Price) -> Money {
        Money::new(
            quantity.as_decimal() * price.as_decimal(),
            self.quote_currency,
        )
    }

    /// Creates a [`Price`] with the instrument's price precision.
    #[must_use]
    pub fn make_price(&self, value: Decimal) -> Price {
        Price::new(value, self.price_precision)
    }

    /// Creates a [`Quantity`] with the instrument's size precision.
    #[must_use]
    pub fn make_qty(&self, value: Decimal) -> Quantity {
        Quantity::new(value, self.size_precision)
    }
}

impl Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, class={}, quote={})",
            stringify!(Instrument),
            self.id,
            self.instrument_class,
            self.quote_currency,
        )
    }
}
