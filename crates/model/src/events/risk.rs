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

//! Risk events published by the risk engine.

use std::fmt::{Debug, Display};

use sentinel_core::{UUID4, UnixNanos};
use serde::{Deserialize, Serialize};

use crate::{enums::TradingState, identifiers::TraderId};

/// Represents an event where the trading state of a node has changed.
///
/// Published on every accepted trading state transition, carrying a snapshot
/// of the risk engine configuration at the time of the transition.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStateChanged {
    /// The trader ID associated with the event.
    pub trader_id: TraderId,
    /// The trading state which was set.
    pub state: TradingState,
    /// A snapshot of the risk engine configuration at the transition.
    pub config: serde_json::Value,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
    /// UNIX timestamp (nanoseconds) when the event was initialized.
    pub ts_init: UnixNanos,
}

impl TradingStateChanged {
    /// Creates a new [`TradingStateChanged`] instance.
    pub const fn new(
        trader_id: TraderId,
        state: TradingState,
        config: serde_json::Value,
        event_id: UUID4,
        ts_event: UnixNanos,
        ts_init: UnixNanos,
    ) -> Self {
        Self {
            trader_id,
            state,
            config,
            event_id,
            ts_event,
            ts_init,
        }
    }
}

impl Debug for TradingStateChanged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(trader_id={}, state={}, event_id={}, ts_event={}, ts_init={})",
            stringify!(TradingStateChanged),
            self.trader_id,
            self.state,
            self.event_id,
            self.ts_event,
            self.ts_init,
        )
    }
}

impl Display for TradingStateChanged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(trader_id={}, state={})",
            stringify!(TradingStateChanged),
            self.trader_id,
            self.state,
        )
    }
}
