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

//! Represents a position in a market.

use std::fmt::Display;

use rust_decimal::Decimal;
use sentinel_core::UnixNanos;
use serde::{Deserialize, Serialize};

use crate::{
    enums::PositionSide,
    identifiers::{InstrumentId, PositionId},
    types::Quantity,
};

/// Represents a position in a market, referenced (never owned) by the risk path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The position ID.
    pub id: PositionId,
    /// The instrument ID associated with the position.
    pub instrument_id: InstrumentId,
    /// The current position side.
    pub side: PositionSide,
    /// The current absolute position quantity.
    pub quantity: Quantity,
    /// UNIX timestamp (nanoseconds) when the position was initialized.
    pub ts_init: UnixNanos,
}

impl Position {
    /// Creates a new [`Position`] instance.
    #[must_use]
    pub const fn new(
        id: PositionId,
        instrument_id: InstrumentId,
        side: PositionSide,
        quantity: Quantity,
        ts_init: UnixNanos,
    ) -> Self {
        Self {
            id,
            instrument_id,
            side,
            quantity,
            ts_init,
        }
    }

    /// Returns the signed position quantity (negative when short, zero when flat).
    #[must_use]
    pub fn signed_decimal_qty(&self) -> Decimal {
        match self.side {
            PositionSide::Flat => Decimal::ZERO,
            PositionSide::Long => self.quantity.as_decimal(),
            PositionSide::Short => -self.quantity.as_decimal(),
        }
    }

    /// Returns whether the position side is LONG.
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.side == PositionSide::Long
    }

    /// Returns whether the position side is SHORT.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.side == PositionSide::Short
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, instrument_id={}, side={}, quantity={})",
            stringify!(Position),
            self.id,
            self.instrument_id,
            self.side,
            self.quantity,
        )
    }
}
