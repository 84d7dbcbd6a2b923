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

//! Order and order list entities referenced by trading commands.

#[cfg(any(test, feature = "stubs"))]
pub mod builder;

use std::fmt::Display;

use sentinel_core::{UUID4, UnixNanos, correctness::FAILED};
use serde::{Deserialize, Serialize};

use crate::{
    enums::{OrderSide, OrderStatus, OrderType, PositionSide, TimeInForce, TriggerType},
    identifiers::{
        ClientOrderId, InstrumentId, OrderListId, StrategyId, TraderId, VenueOrderId,
    },
    types::{Price, Quantity},
};

#[cfg(any(test, feature = "stubs"))]
pub use crate::orders::builder::OrderTestBuilder;

/// Represents an order in the trading domain.
///
/// The full order lifecycle state machine is owned by the execution engine;
/// this core only ever applies the `INITIALIZED` -> `DENIED` transition.
/// Orders are otherwise immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The trader ID associated with the order.
    pub trader_id: TraderId,
    /// The strategy ID associated with the order.
    pub strategy_id: StrategyId,
    /// The instrument ID associated with the order.
    pub instrument_id: InstrumentId,
    /// The client order ID (assigned by the trading node).
    pub client_order_id: ClientOrderId,
    /// The venue order ID (assigned by the trading venue, if routed).
    pub venue_order_id: Option<VenueOrderId>,
    /// The order list ID when the order belongs to a list.
    pub order_list_id: Option<OrderListId>,
    /// The order side.
    pub side: OrderSide,
    /// The order type.
    pub order_type: OrderType,
    /// The order quantity.
    pub quantity: Quantity,
    /// The order limit price, when applicable to the order type.
    pub price: Option<Price>,
    /// The order stop/trigger price, when applicable to the order type.
    pub trigger_price: Option<Price>,
    /// The order time-in-force.
    pub time_in_force: TimeInForce,
    /// The order expiration, when `time_in_force` is GTD.
    pub expire_time: Option<UnixNanos>,
    /// The emulation trigger; `NO_TRIGGER` when the order is not emulated.
    pub emulation_trigger: TriggerType,
    /// Whether the order may only reduce an existing position.
    pub is_reduce_only: bool,
    status: OrderStatus,
    /// The unique identifier of the order initialization.
    pub init_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the order was initialized.
    pub ts_init: UnixNanos,
}

impl Order {
    /// Creates a new [`Order`] instance in the `INITIALIZED` state.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is not positive, or if `time_in_force`
    /// is GTD without an `expire_time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new_checked(
        trader_id: TraderId,
        strategy_id: StrategyId,
        instrument_id: InstrumentId,
        client_order_id: ClientOrderId,
        order_list_id: Option<OrderListId>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Quantity,
        price: Option<Price>,
        trigger_price: Option<Price>,
        time_in_force: TimeInForce,
        expire_time: Option<UnixNanos>,
        emulation_trigger: TriggerType,
        is_reduce_only: bool,
        init_id: UUID4,
        ts_init: UnixNanos,
    ) -> anyhow::Result<Self> {
        if !quantity.is_positive() {
            anyhow::bail!("invalid `quantity` for order, was {quantity}");
        }
        if time_in_force == TimeInForce::Gtd && expire_time.is_none() {
            anyhow::bail!("invalid order: GTD time in force with no `expire_time`");
        }
        Ok(Self {
            trader_id,
            strategy_id,
            instrument_id,
            client_order_id,
            venue_order_id: None,
            order_list_id,
            side,
            order_type,
            quantity,
            price,
            trigger_price,
            time_in_force,
            expire_time,
            emulation_trigger,
            is_reduce_only,
            status: OrderStatus::Initialized,
            init_id,
            ts_init,
        })
    }

    /// Returns the current order status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Transitions the order to `DENIED`.
    pub fn deny(&mut self) {
        self.status = OrderStatus::Denied;
    }

    /// Returns whether the order side is BUY.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    /// Returns whether the order side is SELL.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        self.side == OrderSide::Sell
    }

    /// Returns whether the order is closed (in a terminal state).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Denied
                | OrderStatus::Rejected
                | OrderStatus::Canceled
                | OrderStatus::Expired
                | OrderStatus::Filled
        )
    }

    /// Returns whether the order carries a non-trivial emulation trigger.
    #[must_use]
    pub fn is_emulated(&self) -> bool {
        self.emulation_trigger != TriggerType::NoTrigger
    }

    /// Returns whether executing the order against the given position would
    /// only ever reduce that position (never increase or reverse it).
    #[must_use]
    pub fn would_reduce_only(&self, position_side: PositionSide, position_quantity: Quantity) -> bool {
        match position_side {
            PositionSide::Flat => false,
            PositionSide::Long => self.is_sell() && self.quantity <= position_quantity,
            PositionSide::Short => self.is_buy() && self.quantity <= position_quantity,
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({} {} {} {}, status={}, client_order_id={})",
            stringify!(Order),
            self.side,
            self.quantity,
            self.instrument_id,
            self.order_type,
            self.status,
            self.client_order_id,
        )
    }
}

/// Represents an ordered sequence of orders sharing a list identifier.
///
/// Duplicate client order ID detection over a list is all-or-nothing: the risk
/// engine denies the entire list before caching any member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderList {
    /// The order list ID.
    pub id: OrderListId,
    /// The instrument ID associated with the list.
    pub instrument_id: InstrumentId,
    /// The strategy ID associated with the list.
    pub strategy_id: StrategyId,
    /// The contained orders, in submission order.
    pub orders: Vec<Order>,
    /// UNIX timestamp (nanoseconds) when the list was initialized.
    pub ts_init: UnixNanos,
}

impl OrderList {
    /// Creates a new [`OrderList`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `orders` is empty or contains an order for a
    /// different instrument.
    pub fn new_checked(
        id: OrderListId,
        instrument_id: InstrumentId,
        strategy_id: StrategyId,
        orders: Vec<Order>,
        ts_init: UnixNanos,
    ) -> anyhow::Result<Self> {
        if orders.is_empty() {
            anyhow::bail!("invalid `orders` for list {id}, was empty");
        }
        for order in &orders {
            if order.instrument_id != instrument_id {
                anyhow::bail!(
                    "invalid order {} for list {id}: instrument {} != {instrument_id}",
                    order.client_order_id,
                    order.instrument_id,
                );
            }
        }
        Ok(Self {
            id,
            instrument_id,
            strategy_id,
            orders,
            ts_init,
        })
    }

    /// Creates a new [`OrderList`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `orders` is empty or contains an order for a different instrument.
    #[must_use]
    pub fn new(
        id: OrderListId,
        instrument_id: InstrumentId,
        strategy_id: StrategyId,
        orders: Vec<Order>,
        ts_init: UnixNanos,
    ) -> Self {
        Self::new_checked(id, instrument_id, strategy_id, orders, ts_init).expect(FAILED)
    }

    /// Returns the first order in the list.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty (construction prevents this).
    #[must_use]
    pub fn first(&self) -> &Order {
        self.orders.first().expect("order list was empty")
    }
}

impl Display for OrderList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(id={}, instrument_id={}, strategy_id={}, orders={})",
            stringify!(OrderList),
            self.id,
            self.instrument_id,
            self.strategy_id,
            self.orders.len(),
        )
    }
}
