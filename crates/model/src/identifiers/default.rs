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

//! Default implementations for identifiers, primarily used by builders and tests.

use crate::identifiers::{
    AccountId, ClientId, ClientOrderId, InstrumentId, OrderListId, PositionId, StrategyId, Symbol,
    TradeId, TraderId, Venue, VenueOrderId,
};

impl Default for TraderId {
    fn default() -> Self {
        Self::from("TRADER-000")
    }
}

impl Default for StrategyId {
    fn default() -> Self {
        Self::from("S-001")
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::from("SIM")
    }
}

impl Default for ClientOrderId {
    fn default() -> Self {
        Self::from("O-19700101-000000-001-001-1")
    }
}

impl Default for VenueOrderId {
    fn default() -> Self {
        Self::from("001")
    }
}

impl Default for OrderListId {
    fn default() -> Self {
        Self::from("OL-001")
    }
}

impl Default for PositionId {
    fn default() -> Self {
        Self::from("P-001")
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::from("SIM-001")
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::from("1")
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self::from("AUD/USD")
    }
}

impl Default for Venue {
    fn default() -> Self {
        Self::from("SIM")
    }
}

impl Default for InstrumentId {
    fn default() -> Self {
        Self::new(Symbol::default(), Venue::default())
    }
}
