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

//! Net-direction portfolio queries over cached positions.
//!
//! The full portfolio (PnL, exposures, margin) is an external concern; the
//! risk path only consults the net direction per instrument for the REDUCING
//! trading-state gate.

use std::{cell::RefCell, rc::Rc};

use rust_decimal::Decimal;
use sentinel_model::identifiers::InstrumentId;

use crate::cache::Cache;

/// Provides net-direction queries over the positions held in the cache.
#[derive(Debug)]
pub struct Portfolio {
    cache: Rc<RefCell<Cache>>,
}

impl Portfolio {
    /// Creates a new [`Portfolio`] instance.
    #[must_use]
    pub const fn new(cache: Rc<RefCell<Cache>>) -> Self {
        Self { cache }
    }

    /// Returns the net signed position quantity for the given `instrument_id`.
    #[must_use]
    pub fn net_position(&self, instrument_id: &InstrumentId) -> Decimal {
        let cache = self.cache.borrow();
        cache
            .positions_for_instrument(instrument_id)
            .iter()
            .map(|position| position.signed_decimal_qty())
            .sum()
    }

    /// Returns whether the portfolio is net long the given `instrument_id`.
    #[must_use]
    pub fn is_net_long(&self, instrument_id: &InstrumentId) -> bool {
        self.net_position(instrument_id) > Decimal::ZERO
    }

    /// Returns whether the portfolio is net short the given `instrument_id`.
    #[must_use]
    pub fn is_net_short(&self, instrument_id: &InstrumentId) -> bool {
        self.net_position(instrument_id) < Decimal::ZERO
    }

    /// Returns whether the portfolio is completely flat the given `instrument_id`.
    #[must_use]
    pub fn is_flat(&self, instrument_id: &InstrumentId) -> bool {
        self.net_position(instrument_id).is_zero()
    }
}
