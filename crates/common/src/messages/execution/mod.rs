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

//! Execution command messages routed through the risk engine.

pub mod cancel;
pub mod modify;
pub mod submit;

use std::fmt::Display;

use sentinel_core::UnixNanos;
use sentinel_model::identifiers::{ClientId, InstrumentId, StrategyId, TraderId};
use serde::{Deserialize, Serialize};

// Re-exports
pub use crate::messages::execution::{
    cancel::{CancelAllOrders, CancelOrder},
    modify::ModifyOrder,
    submit::{SubmitOrder, SubmitOrderList},
};

/// A closed set of trading command variants.
///
/// Commands are immutable once constructed; components dispatch on the variant
/// with exhaustive matching.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TradingCommand {
    /// A command to submit a single order.
    SubmitOrder(SubmitOrder),
    /// A command to submit a list of orders.
    SubmitOrderList(SubmitOrderList),
    /// A command to modify an existing order.
    ModifyOrder(ModifyOrder),
    /// A command to cancel an existing order.
    CancelOrder(CancelOrder),
    /// A command to cancel all orders for an instrument.
    CancelAllOrders(CancelAllOrders),
}

impl TradingCommand {
    /// Returns the trader ID associated with the command.
    #[must_use]
    pub const fn trader_id(&self) -> TraderId {
        match self {
            Self::SubmitOrder(command) => command.trader_id,
            Self::SubmitOrderList(command) => command.trader_id,
            Self::ModifyOrder(command) => command.trader_id,
            Self::CancelOrder(command) => command.trader_id,
            Self::CancelAllOrders(command) => command.trader_id,
        }
    }

    /// Returns the client ID associated with the command.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        match self {
            Self::SubmitOrder(command) => command.client_id,
            Self::SubmitOrderList(command) => command.client_id,
            Self::ModifyOrder(command) => command.client_id,
            Self::CancelOrder(command) => command.client_id,
            Self::CancelAllOrders(command) => command.client_id,
        }
    }

    /// Returns the strategy ID associated with the command.
    #[must_use]
    pub const fn strategy_id(&self) -> StrategyId {
        match self {
            Self::SubmitOrder(command) => command.strategy_id,
            Self::SubmitOrderList(command) => command.strategy_id,
            Self::ModifyOrder(command) => command.strategy_id,
            Self::CancelOrder(command) => command.strategy_id,
            Self::CancelAllOrders(command) => command.strategy_id,
        }
    }

    /// Returns the instrument ID associated with the command.
    #[must_use]
    pub const fn instrument_id(&self) -> InstrumentId {
        match self {
            Self::SubmitOrder(command) => command.instrument_id,
            Self::SubmitOrderList(command) => command.instrument_id,
            Self::ModifyOrder(command) => command.instrument_id,
            Self::CancelOrder(command) => command.instrument_id,
            Self::CancelAllOrders(command) => command.instrument_id,
        }
    }

    /// Returns the UNIX timestamp (nanoseconds) when the command was initialized.
    #[must_use]
    pub const fn ts_init(&self) -> UnixNanos {
        match self {
            Self::SubmitOrder(command) => command.ts_init,
            Self::SubmitOrderList(command) => command.ts_init,
            Self::ModifyOrder(command) => command.ts_init,
            Self::CancelOrder(command) => command.ts_init,
            Self::CancelAllOrders(command) => command.ts_init,
        }
    }
}

impl Display for TradingCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitOrder(command) => write!(f, "{command}"),
            Self::SubmitOrderList(command) => write!(f, "{command}"),
            Self::ModifyOrder(command) => write!(f, "{command}"),
            Self::CancelOrder(command) => write!(f, "{command}"),
            Self::CancelAllOrders(command) => write!(f, "{command}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sentinel_core::{UUID4, UnixNanos};
    use sentinel_model::{
        enums::{OrderSide, OrderType},
        identifiers::{ClientId, ClientOrderId, InstrumentId, StrategyId, TraderId},
        orders::OrderTestBuilder,
        types::Quantity,
    };

    use super::*;

    #[rstest]
    fn test_submit_order_display() {
        let order = OrderTestBuilder::new(OrderType::Market)
            .instrument_id(InstrumentId::from("AUD/USD.SIM"))
            .side(OrderSide::Buy)
            .quantity(Quantity::from("100000"))
            .build();
        let command = SubmitOrder::new(
            TraderId::from("TRADER-001"),
            ClientId::from("SIM"),
            StrategyId::from("EMA-CROSS-001"),
            order.instrument_id,
            order.client_order_id,
            order,
            None,
            UUID4::new(),
            UnixNanos::default(),
        )
        .unwrap();

        assert_eq!(
            command.to_string(),
            "SubmitOrder(instrument_id=AUD/USD.SIM, \
            client_order_id=O-19700101-000000-001-001-1, position_id=None)"
        );
        assert_eq!(
            TradingCommand::SubmitOrder(command).instrument_id(),
            InstrumentId::from("AUD/USD.SIM")
        );
    }

    #[rstest]
    fn test_cancel_order_display() {
        let command = CancelOrder::new(
            TraderId::from("TRADER-001"),
            ClientId::from("SIM"),
            StrategyId::from("EMA-CROSS-001"),
            InstrumentId::from("AUD/USD.SIM"),
            ClientOrderId::from("O-19700101-000000-001-001-1"),
            None,
            UUID4::new(),
            UnixNanos::default(),
        )
        .unwrap();

        assert_eq!(
            command.to_string(),
            "CancelOrder(instrument_id=AUD/USD.SIM, \
            client_order_id=O-19700101-000000-001-001-1, venue_order_id=None)"
        );
    }
}
