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

//! Order events emitted by the risk engine.

pub mod cancel_rejected;
pub mod denied;
pub mod modify_rejected;

use std::fmt::Display;

use sentinel_core::{UUID4, UnixNanos};
use serde::{Deserialize, Serialize};
use ustr::Ustr;

use crate::identifiers::{ClientOrderId, InstrumentId, StrategyId, TraderId};

// Re-exports
pub use crate::events::order::{
    cancel_rejected::OrderCancelRejected, denied::OrderDenied, modify_rejected::OrderModifyRejected,
};

/// A closed set of order event variants produced on the risk path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEventAny {
    /// An order was denied by the risk engine.
    Denied(OrderDenied),
    /// A modify command was rejected.
    ModifyRejected(OrderModifyRejected),
    /// A cancel command was rejected.
    CancelRejected(OrderCancelRejected),
}

impl OrderEventAny {
    /// Returns the event ID.
    #[must_use]
    pub const fn event_id(&self) -> UUID4 {
        match self {
            Self::Denied(event) => event.event_id,
            Self::ModifyRejected(event) => event.event_id,
            Self::CancelRejected(event) => event.event_id,
        }
    }

    /// Returns the trader ID associated with the event.
    #[must_use]
    pub const fn trader_id(&self) -> TraderId {
        match self {
            Self::Denied(event) => event.trader_id,
            Self::ModifyRejected(event) => event.trader_id,
            Self::CancelRejected(event) => event.trader_id,
        }
    }

    /// Returns the strategy ID associated with the event.
    #[must_use]
    pub const fn strategy_id(&self) -> StrategyId {
        match self {
            Self::Denied(event) => event.strategy_id,
            Self::ModifyRejected(event) => event.strategy_id,
            Self::CancelRejected(event) => event.strategy_id,
        }
    }

    /// Returns the instrument ID associated with the event.
    #[must_use]
    pub const fn instrument_id(&self) -> InstrumentId {
        match self {
            Self::Denied(event) => event.instrument_id,
            Self::ModifyRejected(event) => event.instrument_id,
            Self::CancelRejected(event) => event.instrument_id,
        }
    }

    /// Returns the client order ID associated with the event.
    #[must_use]
    pub const fn client_order_id(&self) -> ClientOrderId {
        match self {
            Self::Denied(event) => event.client_order_id,
            Self::ModifyRejected(event) => event.client_order_id,
            Self::CancelRejected(event) => event.client_order_id,
        }
    }

    /// Returns the reason string carried by the event.
    #[must_use]
    pub const fn reason(&self) -> Ustr {
        match self {
            Self::Denied(event) => event.reason,
            Self::ModifyRejected(event) => event.reason,
            Self::CancelRejected(event) => event.reason,
        }
    }

    /// Returns the UNIX timestamp (nanoseconds) when the event occurred.
    #[must_use]
    pub const fn ts_event(&self) -> UnixNanos {
        match self {
            Self::Denied(event) => event.ts_event,
            Self::ModifyRejected(event) => event.ts_event,
            Self::CancelRejected(event) => event.ts_event,
        }
    }
}

impl Display for OrderEventAny {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Denied(event) => write!(f, "{event}"),
            Self::ModifyRejected(event) => write!(f, "{event}"),
            Self::CancelRejected(event) => write!(f, "{event}"),
        }
    }
}
