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

//! A builder for constructing test orders.

use sentinel_core::{UUID4, UnixNanos};

use crate::{
    enums::{OrderSide, OrderType, TimeInForce, TriggerType},
    identifiers::{ClientOrderId, InstrumentId, OrderListId, StrategyId, TraderId},
    orders::Order,
    types::{Price, Quantity},
};

/// Provides a builder for constructing [`Order`] instances in tests.
#[derive(Clone, Debug)]
pub struct OrderTestBuilder {
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
    reduce_only: bool,
}

impl OrderTestBuilder {
    /// Creates a new [`OrderTestBuilder`] for the given order type.
    #[must_use]
    pub fn new(order_type: OrderType) -> Self {
        Self {
            trader_id: TraderId::from("TRADER-001"),
            strategy_id: StrategyId::from("EMA-CROSS-001"),
            instrument_id: InstrumentId::default(),
            client_order_id: ClientOrderId::default(),
            order_list_id: None,
            side: OrderSide::Buy,
            order_type,
            quantity: Quantity::from("1"),
            price: None,
            trigger_price: None,
            time_in_force: TimeInForce::Gtc,
            expire_time: None,
            emulation_trigger: TriggerType::NoTrigger,
            reduce_only: false,
        }
    }

    #[must_use]
    pub fn trader_id(mut self, trader_id: TraderId) -> Self {
        self.trader_id = trader_id;
        self
    }

    #[must_use]
    pub fn strategy_id(mut self, strategy_id: StrategyId) -> Self {
        self.strategy_id = strategy_id;
        self
    }

    #[must_use]
    pub fn instrument_id(mut self, instrument_id: InstrumentId) -> Self {
        self.instrument_id = instrument_id;
        self
    }

    #[must_use]
    pub fn client_order_id(mut self, client_order_id: ClientOrderId) -> Self {
        self.client_order_id = client_order_id;
        self
    }

    #[must_use]
    pub fn order_list_id(mut self, order_list_id: OrderListId) -> Self {
        self.order_list_id = Some(order_list_id);
        self
    }

    #[must_use]
    pub fn side(mut self, side: OrderSide) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn trigger_price(mut self, trigger_price: Price) -> Self {
        self.trigger_price = Some(trigger_price);
        self
    }

    #[must_use]
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    #[must_use]
    pub fn expire_time(mut self, expire_time: UnixNanos) -> Self {
        self.expire_time = Some(expire_time);
        self
    }

    #[must_use]
    pub fn emulation_trigger(mut self, emulation_trigger: TriggerType) -> Self {
        self.emulation_trigger = emulation_trigger;
        self
    }

    #[must_use]
    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// Builds the [`Order`].
    ///
    /// # Panics
    ///
    /// Panics if the configured parameters are invalid.
    #[must_use]
    pub fn build(&self) -> Order {
        Order::new_checked(
            self.trader_id,
            self.strategy_id,
            self.instrument_id,
            self.client_order_id,
            self.order_list_id,
            self.side,
            self.order_type,
            self.quantity,
            self.price,
            self.trigger_price,
            self.time_in_force,
            self.expire_time,
            self.emulation_trigger,
            self.reduce_only,
            UUID4::new(),
            UnixNanos::default(),
        )
        .expect("invalid order parameters")
    }
}
