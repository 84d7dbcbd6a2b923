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

//! Provides a generic `RiskEngine` for all environments.
//!
//! The engine intercepts every trading command flowing from strategies toward
//! execution, validates it against instrument, account, and operator
//! constraints, applies rate throttling, and either forwards it to the
//! execution engine (or order emulator) or denies it with a reason. Every
//! failure path terminates in a well-formed terminal event; nothing escapes
//! as an error to the caller.

pub mod config;

#[cfg(test)]
mod tests;

use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use config::RiskEngineConfig;
use rust_decimal::Decimal;
use sentinel_common::{
    cache::Cache,
    clock::Clock,
    logging::{CMD, EVT, RECV},
    messages::execution::{
        CancelAllOrders, CancelOrder, ModifyOrder, SubmitOrder, SubmitOrderList, TradingCommand,
    },
    msgbus,
    msgbus::handler::{ShareableMessageHandler, TypedMessageHandler},
    portfolio::Portfolio,
    throttler::{RateLimit, Throttler},
};
use sentinel_core::{
    UUID4,
    correctness::{FAILED, check_predicate_true},
};
use sentinel_model::{
    accounts::AccountAny,
    enums::{OrderSide, OrderStatus, OrderType, TimeInForce, TradingState},
    events::{
        OrderCancelRejected, OrderDenied, OrderEventAny, OrderModifyRejected, TradingStateChanged,
    },
    identifiers::InstrumentId,
    instruments::Instrument,
    orders::{Order, OrderList},
    types::{Money, Price, Quantity},
};
use ustr::Ustr;

/// The endpoint receiving commands which passed all checks.
pub const EXEC_ENGINE_EXECUTE: &str = "ExecEngine.execute";

/// The endpoint receiving denial and rejection events.
pub const EXEC_ENGINE_PROCESS: &str = "ExecEngine.process";

/// The endpoint receiving commands whose order is emulated.
pub const ORDER_EMULATOR_EXECUTE: &str = "OrderEmulator.execute";

/// The endpoint on which the engine receives trading commands.
pub const RISK_ENGINE_EXECUTE: &str = "RiskEngine.execute";

/// The endpoint on which the engine receives order events.
pub const RISK_ENGINE_PROCESS: &str = "RiskEngine.process";

/// The topic on which trading state changes are published.
pub const TOPIC_EVENTS_RISK: &str = "events.risk";

/// A pre-trade risk engine which gates every trading command bound for execution.
///
/// A single logical owner processes all commands: `execute` and `process` are
/// expected to arrive serialized through one command-processing path, so no
/// internal locking is implemented.
pub struct RiskEngine {
    /// The engine clock (injected, testable).
    pub clock: Rc<RefCell<dyn Clock>>,
    /// The shared cache of trading objects.
    pub cache: Rc<RefCell<Cache>>,
    /// The rate throttler for order submissions (dropping policy).
    pub throttled_submit_order: Rc<RefCell<Throttler<TradingCommand>>>,
    /// The rate throttler for order modifications (buffering policy).
    pub throttled_modify_order: Rc<RefCell<Throttler<ModifyOrder>>>,
    portfolio: Portfolio,
    max_notional_per_order: HashMap<InstrumentId, Decimal>,
    trading_state: TradingState,
    command_count: u64,
    event_count: u64,
    config: RiskEngineConfig,
}

impl Debug for RiskEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(RiskEngine))
            .field("trading_state", &self.trading_state)
            .field("command_count", &self.command_count)
            .field("event_count", &self.event_count)
            .finish()
    }
}

impl RiskEngine {
    /// Creates a new [`RiskEngine`] instance.
    #[must_use]
    pub fn new(
        config: RiskEngineConfig,
        portfolio: Portfolio,
        clock: Rc<RefCell<dyn Clock>>,
        cache: Rc<RefCell<Cache>>,
    ) -> Self {
        let throttled_submit_order =
            Self::create_submit_order_throttler(&config, clock.clone(), cache.clone());

        let throttled_modify_order = Self::create_modify_order_throttler(&config, clock.clone());

        let max_notional_per_order = config.max_notional_per_order.clone();

        Self {
            clock,
            cache,
            throttled_submit_order,
            throttled_modify_order,
            portfolio,
            max_notional_per_order,
            trading_state: TradingState::Active,
            command_count: 0,
            event_count: 0,
            config,
        }
    }

    /// Registers the engine's `execute` and `process` endpoints on the message bus.
    pub fn register_endpoints(engine: Rc<RefCell<Self>>) {
        let execute_engine = engine.clone();
        msgbus::register(
            RISK_ENGINE_EXECUTE,
            ShareableMessageHandler(Rc::new(TypedMessageHandler::new(
                Some(RISK_ENGINE_EXECUTE),
                move |command: &TradingCommand| {
                    execute_engine.borrow_mut().execute(command.clone());
                },
            ))),
        );

        let process_engine = engine;
        msgbus::register(
            RISK_ENGINE_PROCESS,
            ShareableMessageHandler(Rc::new(TypedMessageHandler::new(
                Some(RISK_ENGINE_PROCESS),
                move |event: &OrderEventAny| {
                    process_engine.borrow_mut().process(event);
                },
            ))),
        );
    }

    fn create_submit_order_throttler(
        config: &RiskEngineConfig,
        clock: Rc<RefCell<dyn Clock>>,
        cache: Rc<RefCell<Cache>>,
    ) -> Rc<RefCell<Throttler<TradingCommand>>> {
        let success_handler = Box::new(move |command: TradingCommand| {
            msgbus::send(EXEC_ENGINE_EXECUTE, &command);
        }) as Box<dyn Fn(TradingCommand)>;

        let failure_handler = {
            let clock = clock.clone();
            Box::new(move |command: TradingCommand| {
                let reason = "Exceeded MAX_ORDER_SUBMIT_RATE";
                match command {
                    TradingCommand::SubmitOrder(command) => {
                        Self::deny_order_with(&cache, &clock, &command.order, reason);
                    }
                    TradingCommand::SubmitOrderList(command) => {
                        Self::deny_order_list_with(&cache, &clock, &command.order_list, reason);
                    }
                    _ => log::error!("Cannot deny rate limited command: {command}"),
                }
            }) as Box<dyn Fn(TradingCommand)>
        };

        Throttler::new(
            config.max_order_submit,
            clock,
            "ORDER_SUBMIT_THROTTLER".to_string(),
            success_handler,
            Some(failure_handler),
        )
    }

    fn create_modify_order_throttler(
        config: &RiskEngineConfig,
        clock: Rc<RefCell<dyn Clock>>,
    ) -> Rc<RefCell<Throttler<ModifyOrder>>> {
        let success_handler = Box::new(move |command: ModifyOrder| {
            msgbus::send(EXEC_ENGINE_EXECUTE, &TradingCommand::ModifyOrder(command));
        }) as Box<dyn Fn(ModifyOrder)>;

        // No drop handler: over-rate modifies buffer for replay in arrival
        // order once the window frees
        Throttler::new(
            config.max_order_modify,
            clock,
            "ORDER_MODIFY_THROTTLER".to_string(),
            success_handler,
            None,
        )
    }

    // -- COMMANDS --------------------------------------------------------------------------------

    /// Executes the given trading command, incrementing the command counter.
    ///
    /// All failure paths resolve to a denial or rejection event; this method
    /// never returns an error to the caller.
    pub fn execute(&mut self, command: TradingCommand) {
        self.command_count += 1;
        self.handle_command(command);
    }

    /// Processes the given order event, incrementing the event counter.
    ///
    /// Inbound events carry no control-flow effect in this engine; they are
    /// consumed for observability only.
    pub fn process(&mut self, event: &OrderEventAny) {
        self.event_count += 1;
        if self.config.debug {
            log::debug!("{RECV}{EVT} {event:?}");
        }
    }

    /// Sets the trading state, publishing a `TradingStateChanged` event on any change.
    ///
    /// A no-op (with a warning) if `state` equals the current trading state.
    pub fn set_trading_state(&mut self, state: TradingState) {
        if state == self.trading_state {
            log::warn!("No change to trading state: already set to {state}");
            return;
        }

        self.trading_state = state;

        let ts_now = self.clock.borrow().timestamp_ns();
        let config_snapshot = serde_json::to_value(&self.config).unwrap_or_else(|e| {
            log::error!("Cannot serialize risk engine config: {e}");
            serde_json::Value::Null
        });

        let event = TradingStateChanged::new(
            self.config.trader_id,
            state,
            config_snapshot,
            UUID4::new(),
            ts_now,
            ts_now,
        );

        msgbus::publish(TOPIC_EVENTS_RISK, &event);

        log::info!("Trading state set to {state}");
    }

    /// Sets the maximum notional value per order for the given instrument.
    ///
    /// A `new_value` of `None` removes the cap (unlimited).
    ///
    /// # Panics
    ///
    /// Panics if `new_value` is not strictly positive.
    pub fn set_max_notional_per_order(
        &mut self,
        instrument_id: InstrumentId,
        new_value: Option<Decimal>,
    ) {
        match new_value {
            Some(value) => {
                check_predicate_true(
                    value > Decimal::ZERO,
                    "max_notional_per_order value must be positive",
                )
                .expect(FAILED);
                self.max_notional_per_order.insert(instrument_id, value);
            }
            None => {
                self.max_notional_per_order.remove(&instrument_id);
            }
        }

        let new_value_str = new_value.map_or("None".to_string(), |value| value.to_string());
        log::info!("Set MAX_NOTIONAL_PER_ORDER: {instrument_id} {new_value_str}");
    }

    /// Returns the current trading state.
    #[must_use]
    pub const fn trading_state(&self) -> TradingState {
        self.trading_state
    }

    /// Returns the count of commands executed.
    #[must_use]
    pub const fn command_count(&self) -> u64 {
        self.command_count
    }

    /// Returns the count of events processed.
    #[must_use]
    pub const fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Returns the configured maximum order submission rate.
    #[must_use]
    pub const fn max_order_submit_rate(&self) -> RateLimit {
        self.config.max_order_submit
    }

    /// Returns the configured maximum order modification rate.
    #[must_use]
    pub const fn max_order_modify_rate(&self) -> RateLimit {
        self.config.max_order_modify
    }

    /// Returns all configured maximum notional values per order.
    #[must_use]
    pub const fn max_notionals_per_order(&self) -> &HashMap<InstrumentId, Decimal> {
        &self.max_notional_per_order
    }

    /// Returns the maximum notional value per order for the given instrument (if set).
    #[must_use]
    pub fn max_notional_per_order(&self, instrument_id: &InstrumentId) -> Option<Decimal> {
        self.max_notional_per_order.get(instrument_id).copied()
    }

    // -- COMMAND HANDLERS ------------------------------------------------------------------------

    fn handle_command(&mut self, command: TradingCommand) {
        if self.config.debug {
            log::debug!("{CMD}{RECV} {command:?}");
        }

        match command {
            TradingCommand::SubmitOrder(command) => self.handle_submit_order(command),
            TradingCommand::SubmitOrderList(command) => self.handle_submit_order_list(command),
            TradingCommand::ModifyOrder(command) => self.handle_modify_order(command),
            TradingCommand::CancelOrder(command) => self.handle_cancel_order(command),
            TradingCommand::CancelAllOrders(command) => self.handle_cancel_all_orders(command),
        }
    }

    fn handle_submit_order(&self, command: SubmitOrder) {
        let order = &command.order;

        // Orders belonging to a list are checked and cached by the list handler
        if order.order_list_id.is_none() {
            let duplicate = self.cache.borrow().order_exists(&order.client_order_id);
            if duplicate {
                self.deny_order(order, &format!("Duplicate {}", order.client_order_id));
                return; // Denied
            }

            let mut cache = self.cache.borrow_mut();
            if let Err(e) = cache.add_order(order.clone(), command.position_id) {
                log::error!("Cannot add order to cache: {e}");
                return;
            }
        }

        // A reduce-only order must reference a position it can only ever
        // reduce; the reference is resolved even in bypass mode.
        if order.is_reduce_only {
            if let Some(position_id) = command.position_id {
                let position = {
                    let cache = self.cache.borrow();
                    cache
                        .position(&position_id)
                        .map(|position| (position.side, position.quantity))
                };

                match position {
                    Some((position_side, position_quantity)) => {
                        if !self.config.bypass
                            && !order.would_reduce_only(position_side, position_quantity)
                        {
                            self.deny_order(
                                order,
                                &format!("Reduce only order would increase position {position_id}"),
                            );
                            return; // Denied
                        }
                    }
                    None => {
                        self.deny_order(
                            order,
                            &format!("Position {position_id} not found for reduce-only order"),
                        );
                        return; // Denied
                    }
                }
            }
        }

        if self.config.bypass {
            if order.is_emulated() {
                self.send_to_emulator(TradingCommand::SubmitOrder(command));
            } else {
                self.send_to_execution(TradingCommand::SubmitOrder(command));
            }
            return;
        }

        let instrument = {
            let cache = self.cache.borrow();
            cache.instrument(&order.instrument_id).cloned()
        };

        let instrument = match instrument {
            Some(instrument) => instrument,
            None => {
                self.deny_order(
                    order,
                    &format!("Instrument for {} not found", order.instrument_id),
                );
                return; // Denied
            }
        };

        ////////////////////////////////////////////////////////////////////////////////
        // PRE-TRADE ORDER(S) CHECKS
        ////////////////////////////////////////////////////////////////////////////////
        if !self.check_order(&instrument, order) {
            return; // Denied
        }

        if !self.check_orders_risk(&instrument, std::slice::from_ref(order)) {
            return; // Denied
        }

        // The emulator owns its own timing, so emulated orders bypass the throttler
        if command.order.is_emulated() {
            self.send_to_emulator(TradingCommand::SubmitOrder(command));
        } else {
            self.execution_gateway(&instrument, TradingCommand::SubmitOrder(command));
        }
    }

    fn handle_submit_order_list(&self, command: SubmitOrderList) {
        let order_list = &command.order_list;

        // Duplicate client order ID detection is all-or-nothing across the
        // list: any duplicate denies every member before any is cached.
        let duplicate = {
            let cache = self.cache.borrow();
            order_list
                .orders
                .iter()
                .find(|order| cache.order_exists(&order.client_order_id))
                .map(|order| order.client_order_id)
        };
        if let Some(client_order_id) = duplicate {
            self.deny_order_list(order_list, &format!("Duplicate {client_order_id}"));
            return; // Denied
        }

        {
            let mut cache = self.cache.borrow_mut();
            for order in &order_list.orders {
                if let Err(e) = cache.add_order(order.clone(), command.position_id) {
                    log::error!("Cannot add order to cache: {e}");
                }
            }
        }

        if self.config.bypass {
            if order_list.orders.iter().any(Order::is_emulated) {
                self.send_to_emulator(TradingCommand::SubmitOrderList(command));
            } else {
                self.send_to_execution(TradingCommand::SubmitOrderList(command));
            }
            return;
        }

        let instrument = {
            let cache = self.cache.borrow();
            cache.instrument(&command.instrument_id).cloned()
        };

        let instrument = match instrument {
            Some(instrument) => instrument,
            None => {
                self.deny_order_list(
                    order_list,
                    &format!("Instrument for {} not found", command.instrument_id),
                );
                return; // Denied
            }
        };

        ////////////////////////////////////////////////////////////////////////////////
        // PRE-TRADE ORDER(S) CHECKS
        ////////////////////////////////////////////////////////////////////////////////
        for order in &order_list.orders {
            if !self.check_order(&instrument, order) {
                return; // Denied
            }
        }

        // A risk failure anywhere in the list denies every member
        if !self.check_orders_risk(&instrument, &order_list.orders) {
            self.deny_order_list(order_list, &format!("OrderList {} DENIED", order_list.id));
            return; // Denied
        }

        if order_list.orders.iter().any(Order::is_emulated) {
            self.send_to_emulator(TradingCommand::SubmitOrderList(command));
        } else {
            self.execution_gateway(&instrument, TradingCommand::SubmitOrderList(command));
        }
    }

    fn handle_modify_order(&self, command: ModifyOrder) {
        ////////////////////////////////////////////////////////////////////////////////
        // VALIDATE COMMAND
        ////////////////////////////////////////////////////////////////////////////////
        let order = {
            let cache = self.cache.borrow();
            cache.order(&command.client_order_id).cloned()
        };

        let order = match order {
            Some(order) => order,
            None => {
                log::error!(
                    "ModifyOrder DENIED: Order with command.client_order_id: {} not found",
                    command.client_order_id
                );
                return;
            }
        };

        if order.is_closed() {
            self.reject_modify_order(
                &order,
                &format!(
                    "Order with command.client_order_id: {} already closed",
                    command.client_order_id
                ),
            );
            return; // Denied
        }
        if order.status() == OrderStatus::PendingCancel {
            self.reject_modify_order(
                &order,
                &format!(
                    "Order with command.client_order_id: {} is already pending cancel",
                    command.client_order_id
                ),
            );
            return; // Denied
        }
        if self.config.deny_modify_pending_update && order.status() == OrderStatus::PendingUpdate {
            self.reject_modify_order(
                &order,
                &format!(
                    "Order with command.client_order_id: {} is already pending update",
                    command.client_order_id
                ),
            );
            return; // Denied
        }

        let instrument = {
            let cache = self.cache.borrow();
            cache.instrument(&command.instrument_id).cloned()
        };

        let instrument = match instrument {
            Some(instrument) => instrument,
            None => {
                self.reject_modify_order(
                    &order,
                    &format!("Instrument for {} not found", command.instrument_id),
                );
                return; // Denied
            }
        };

        // Check price
        if let Some(risk_msg) = self.check_price(&instrument, command.price) {
            self.reject_modify_order(&order, &risk_msg);
            return; // Denied
        }

        // Check trigger
        if let Some(risk_msg) = self.check_price(&instrument, command.trigger_price) {
            self.reject_modify_order(&order, &format!("trigger {risk_msg}"));
            return; // Denied
        }

        // Check quantity
        if let Some(risk_msg) = self.check_quantity(&instrument, command.quantity) {
            self.reject_modify_order(&order, &risk_msg);
            return; // Denied
        }

        // Check trading state
        match self.trading_state {
            TradingState::Halted => {
                self.reject_modify_order(&order, "TradingState is HALTED: Cannot modify order");
                return; // Denied
            }
            TradingState::Reducing => {
                if let Some(quantity) = command.quantity {
                    if quantity > order.quantity
                        && ((order.is_buy() && self.portfolio.is_net_long(&instrument.id))
                            || (order.is_sell() && self.portfolio.is_net_short(&instrument.id)))
                    {
                        self.reject_modify_order(
                            &order,
                            &format!(
                                "TradingState is REDUCING and update will increase exposure {}",
                                instrument.id
                            ),
                        );
                        return; // Denied
                    }
                }
            }
            TradingState::Active => {}
        }

        if order.is_emulated() {
            self.send_to_emulator(TradingCommand::ModifyOrder(command));
        } else {
            self.throttled_modify_order.borrow_mut().send(command);
        }
    }

    fn handle_cancel_order(&self, command: CancelOrder) {
        let order = {
            let cache = self.cache.borrow();
            cache.order(&command.client_order_id).cloned()
        };

        let order = match order {
            Some(order) => order,
            None => {
                self.reject_cancel_order(
                    &command,
                    &format!(
                        "Order with command.client_order_id: {} not found",
                        command.client_order_id
                    ),
                );
                return; // Denied
            }
        };

        if order.is_closed() {
            self.reject_cancel_order(
                &command,
                &format!(
                    "Order with command.client_order_id: {} already closed",
                    command.client_order_id
                ),
            );
            return; // Denied
        }
        if order.status() == OrderStatus::PendingCancel {
            self.reject_cancel_order(
                &command,
                &format!(
                    "Order with command.client_order_id: {} is already pending cancel",
                    command.client_order_id
                ),
            );
            return; // Denied
        }

        // Canceling is always safe to allow through: no risk checks, no throttling
        if order.is_emulated() {
            self.send_to_emulator(TradingCommand::CancelOrder(command));
        } else {
            self.send_to_execution(TradingCommand::CancelOrder(command));
        }
    }

    fn handle_cancel_all_orders(&self, command: CancelAllOrders) {
        // Canceling is always safe to allow through: no risk checks, no throttling
        self.send_to_execution(TradingCommand::CancelAllOrders(command));
    }

    // -- PRE-TRADE CHECKS ------------------------------------------------------------------------

    fn check_order(&self, instrument: &Instrument, order: &Order) -> bool {
        ////////////////////////////////////////////////////////////////////////////////
        // VALIDATION CHECKS
        ////////////////////////////////////////////////////////////////////////////////
        if order.time_in_force == TimeInForce::Gtd {
            // SAFETY: GTD guarantees an expire time
            let expire_time = order.expire_time.unwrap();
            if expire_time <= self.clock.borrow().timestamp_ns() {
                self.deny_order(
                    order,
                    &format!("GTD {} already past", expire_time.to_rfc3339()),
                );
                return false; // Denied
            }
        }

        if !self.check_order_price(instrument, order) || !self.check_order_quantity(instrument, order)
        {
            return false; // Denied
        }

        true
    }

    fn check_order_price(&self, instrument: &Instrument, order: &Order) -> bool {
        ////////////////////////////////////////////////////////////////////////////////
        // CHECK PRICE
        ////////////////////////////////////////////////////////////////////////////////
        if order.price.is_some() {
            if let Some(risk_msg) = self.check_price(instrument, order.price) {
                self.deny_order(order, &risk_msg);
                return false; // Denied
            }
        }

        ////////////////////////////////////////////////////////////////////////////////
        // CHECK TRIGGER
        ////////////////////////////////////////////////////////////////////////////////
        if order.trigger_price.is_some() {
            if let Some(risk_msg) = self.check_price(instrument, order.trigger_price) {
                self.deny_order(order, &format!("trigger {risk_msg}"));
                return false; // Denied
            }
        }

        true
    }

    fn check_order_quantity(&self, instrument: &Instrument, order: &Order) -> bool {
        if let Some(risk_msg) = self.check_quantity(instrument, Some(order.quantity)) {
            self.deny_order(order, &risk_msg);
            return false; // Denied
        }

        true
    }

    fn check_orders_risk(&self, instrument: &Instrument, orders: &[Order]) -> bool {
        ////////////////////////////////////////////////////////////////////////////////
        // RISK CHECKS
        ////////////////////////////////////////////////////////////////////////////////
        let max_notional_setting = self.max_notional_per_order.get(&instrument.id).copied();

        // Get account for risk checks
        let account = {
            let cache = self.cache.borrow();
            cache.account_for_venue(&instrument.id.venue).cloned()
        };

        let account = match account {
            Some(account) => account,
            None => {
                log::debug!("Cannot find account for venue {}", instrument.id.venue);
                return true; // TODO: Temporary early return until handling routing/multiple venues
            }
        };
        let cash_account = match account {
            AccountAny::Cash(cash_account) => cash_account,
            AccountAny::Margin(_) => return true, // TODO: Determine risk controls for margin
        };

        let mut last_px: Option<Price> = None;
        let mut cum_notional_buy: Option<Money> = None;
        let mut cum_notional_sell: Option<Money> = None;

        for order in orders {
            // Determine the price the order would be assessed at
            last_px = match order.order_type {
                OrderType::Market | OrderType::MarketToLimit => {
                    if last_px.is_none() {
                        let cache = self.cache.borrow();
                        if let Some(quote) = cache.quote(&instrument.id) {
                            match order.side {
                                OrderSide::Buy => Some(quote.ask_price),
                                OrderSide::Sell => Some(quote.bid_price),
                            }
                        } else if let Some(trade) = cache.trade(&instrument.id) {
                            Some(trade.price)
                        } else {
                            log::warn!(
                                "Cannot check MARKET order risk: no prices for {}",
                                instrument.id
                            );
                            continue; // Cannot assess (not a denial)
                        }
                    } else {
                        last_px
                    }
                }
                OrderType::StopMarket | OrderType::MarketIfTouched => order.trigger_price,
                OrderType::TrailingStopMarket | OrderType::TrailingStopLimit => {
                    if order.trigger_price.is_none() {
                        log::warn!(
                            "Cannot check {} order risk: no trigger price was set",
                            order.order_type
                        );
                        continue; // Cannot assess (not a denial)
                    }
                    order.trigger_price
                }
                _ => order.price,
            };

            let price = match last_px {
                Some(price) => price,
                None => {
                    log::error!("Cannot check order risk: no price available");
                    continue;
                }
            };

            let mut notional = instrument.notional_value(order.quantity, price);
            let mut max_notional =
                max_notional_setting.map(|value| Money::new(value, instrument.quote_currency));

            // Selling a currency pair delivers the base currency, so the
            // exposure is expressed in base units with 1/price as the
            // exchange rate, and the configured cap converted to match.
            let mut spend_currency = instrument.quote_currency;
            if instrument.is_currency_pair() && order.side == OrderSide::Sell {
                if let Some(base_currency) = instrument.base_currency {
                    spend_currency = base_currency;
                    notional = Money::new(order.quantity.as_decimal(), base_currency);
                    max_notional = max_notional_setting
                        .map(|value| Money::new(value / price.as_decimal(), base_currency));
                }
            }

            if self.config.debug {
                log::debug!("Notional: {notional}");
            }

            // Check MAX notional per order limit
            if let Some(max_notional) = max_notional {
                if notional > max_notional {
                    self.deny_order(
                        order,
                        &format!(
                            "NOTIONAL_EXCEEDS_MAX_PER_ORDER: max_notional={max_notional}, notional={notional}"
                        ),
                    );
                    return false; // Denied
                }
            }

            // Check MIN notional instrument limit
            if let Some(min_notional) = instrument.min_notional {
                if notional.currency == min_notional.currency && notional < min_notional {
                    self.deny_order(
                        order,
                        &format!(
                            "NOTIONAL_LESS_THAN_MIN_FOR_INSTRUMENT: min_notional={min_notional}, notional={notional}"
                        ),
                    );
                    return false; // Denied
                }
            }

            // Check MAX notional instrument limit
            if let Some(instrument_max_notional) = instrument.max_notional {
                if notional.currency == instrument_max_notional.currency
                    && notional > instrument_max_notional
                {
                    self.deny_order(
                        order,
                        &format!(
                            "NOTIONAL_GREATER_THAN_MAX_FOR_INSTRUMENT: max_notional={instrument_max_notional}, notional={notional}"
                        ),
                    );
                    return false; // Denied
                }
            }

            let free = cash_account.balance_free(Some(spend_currency));
            if self.config.debug {
                log::debug!("Free cash: {free:?}");
            }

            // Check the notional against the free balance (cash accounts only)
            if let Some(free) = free {
                if notional > free {
                    self.deny_order(
                        order,
                        &format!("NOTIONAL_EXCEEDS_FREE_BALANCE: free={free}, notional={notional}"),
                    );
                    return false; // Denied
                }
            }

            // Track cumulative notional per side across the batch
            match order.side {
                OrderSide::Buy => {
                    let cum_notional = match cum_notional_buy {
                        Some(cum_notional) => cum_notional + notional,
                        None => notional,
                    };
                    cum_notional_buy = Some(cum_notional);

                    if self.config.debug {
                        log::debug!("Cumulative notional BUY: {cum_notional}");
                    }

                    if let Some(free) = free {
                        if cum_notional >= free {
                            self.deny_order(
                                order,
                                &format!(
                                    "CUM_NOTIONAL_EXCEEDS_FREE_BALANCE: free={free}, cum_notional={cum_notional}"
                                ),
                            );
                            return false; // Denied
                        }
                    }
                }
                OrderSide::Sell => {
                    let cum_notional = match cum_notional_sell {
                        Some(cum_notional) => cum_notional + notional,
                        None => notional,
                    };
                    cum_notional_sell = Some(cum_notional);

                    if self.config.debug {
                        log::debug!("Cumulative notional SELL: {cum_notional}");
                    }

                    if let Some(free) = free {
                        if cum_notional >= free {
                            self.deny_order(
                                order,
                                &format!(
                                    "CUM_NOTIONAL_EXCEEDS_FREE_BALANCE: free={free}, cum_notional={cum_notional}"
                                ),
                            );
                            return false; // Denied
                        }
                    }
                }
            }
        }

        true // Passed
    }

    fn check_price(&self, instrument: &Instrument, price: Option<Price>) -> Option<String> {
        let price = price?;

        if price.precision > instrument.price_precision {
            return Some(format!(
                "price {} invalid (precision {} > {})",
                price, price.precision, instrument.price_precision
            ));
        }

        if !instrument.is_option() && !price.is_positive() {
            return Some(format!("price {price} invalid (<= 0)"));
        }

        None
    }

    fn check_quantity(&self, instrument: &Instrument, quantity: Option<Quantity>) -> Option<String> {
        let quantity = quantity?;

        // Check precision
        if quantity.precision > instrument.size_precision {
            return Some(format!(
                "quantity {} invalid (precision {} > {})",
                quantity, quantity.precision, instrument.size_precision
            ));
        }

        // Check maximum quantity
        if let Some(max_quantity) = instrument.max_quantity {
            if quantity > max_quantity {
                return Some(format!(
                    "quantity {quantity} invalid (> maximum trade size of {max_quantity})"
                ));
            }
        }

        // Check minimum quantity
        if let Some(min_quantity) = instrument.min_quantity {
            if quantity < min_quantity {
                return Some(format!(
                    "quantity {quantity} invalid (< minimum trade size of {min_quantity})"
                ));
            }
        }

        None
    }

    // -- DENIALS ---------------------------------------------------------------------------------

    fn deny_order(&self, order: &Order, reason: &str) {
        Self::deny_order_with(&self.cache, &self.clock, order, reason);
    }

    fn deny_order_list(&self, order_list: &OrderList, reason: &str) {
        Self::deny_order_list_with(&self.cache, &self.clock, order_list, reason);
    }

    /// Denies the order: idempotent per order, and guarantees the denied order
    /// is present in the cache so it remains queryable.
    fn deny_order_with(
        cache: &Rc<RefCell<Cache>>,
        clock: &Rc<RefCell<dyn Clock>>,
        order: &Order,
        reason: &str,
    ) {
        log::warn!(
            "SubmitOrder for {} DENIED: {}",
            order.client_order_id,
            reason
        );

        let denied = {
            let mut cache = cache.borrow_mut();

            // Resolve the authoritative copy of this order: the cached entry
            // when it is the same initialization, otherwise the given copy
            // (a duplicate submission must not touch the original's state).
            let status = cache
                .order(&order.client_order_id)
                .filter(|cached| cached.init_id == order.init_id)
                .map_or(order.status(), Order::status);

            if status != OrderStatus::Initialized {
                return;
            }

            if !cache.order_exists(&order.client_order_id) {
                if let Err(e) = cache.add_order(order.clone(), None) {
                    log::error!("Cannot add order to cache: {e}");
                }
            }

            if let Some(cached) = cache.order_mut(&order.client_order_id) {
                if cached.init_id == order.init_id {
                    cached.deny();
                }
            }

            let ts_now = clock.borrow().timestamp_ns();
            OrderEventAny::Denied(OrderDenied::new(
                order.trader_id,
                order.strategy_id,
                order.instrument_id,
                order.client_order_id,
                Ustr::from(reason),
                UUID4::new(),
                ts_now,
                ts_now,
            ))
        };

        msgbus::send(EXEC_ENGINE_PROCESS, &denied);
    }

    fn deny_order_list_with(
        cache: &Rc<RefCell<Cache>>,
        clock: &Rc<RefCell<dyn Clock>>,
        order_list: &OrderList,
        reason: &str,
    ) {
        for order in &order_list.orders {
            if !order.is_closed() {
                Self::deny_order_with(cache, clock, order, reason);
            }
        }
    }

    fn reject_modify_order(&self, order: &Order, reason: &str) {
        log::warn!(
            "ModifyOrder for {} REJECTED: {}",
            order.client_order_id,
            reason
        );

        let ts_now = self.clock.borrow().timestamp_ns();
        let rejected = OrderEventAny::ModifyRejected(OrderModifyRejected::new(
            order.trader_id,
            order.strategy_id,
            order.instrument_id,
            order.client_order_id,
            Ustr::from(reason),
            UUID4::new(),
            ts_now,
            ts_now,
            order.venue_order_id,
            None,
        ));

        msgbus::send(EXEC_ENGINE_PROCESS, &rejected);
    }

    fn reject_cancel_order(&self, command: &CancelOrder, reason: &str) {
        log::warn!(
            "CancelOrder for {} REJECTED: {}",
            command.client_order_id,
            reason
        );

        let ts_now = self.clock.borrow().timestamp_ns();
        let rejected = OrderEventAny::CancelRejected(OrderCancelRejected::new(
            command.trader_id,
            command.strategy_id,
            command.instrument_id,
            command.client_order_id,
            Ustr::from(reason),
            UUID4::new(),
            ts_now,
            ts_now,
            command.venue_order_id,
            None,
        ));

        msgbus::send(EXEC_ENGINE_PROCESS, &rejected);
    }

    // -- EGRESS ----------------------------------------------------------------------------------

    /// Applies trading-state gating, then forwards the command to the order
    /// submit throttler.
    fn execution_gateway(&self, instrument: &Instrument, command: TradingCommand) {
        match self.trading_state {
            TradingState::Halted => {
                match command {
                    TradingCommand::SubmitOrder(command) => {
                        self.deny_order(
                            &command.order,
                            "TradingState is HALTED: Cannot submit order",
                        );
                    }
                    TradingCommand::SubmitOrderList(command) => {
                        self.deny_order_list(
                            &command.order_list,
                            "TradingState is HALTED: Cannot submit order list",
                        );
                    }
                    _ => {}
                }
                return; // Denied
            }
            TradingState::Reducing => match &command {
                TradingCommand::SubmitOrder(submit_order) => {
                    let order = &submit_order.order;
                    if order.is_buy() && self.portfolio.is_net_long(&instrument.id) {
                        self.deny_order(
                            order,
                            &format!(
                                "BUY when TradingState is REDUCING and LONG {}",
                                instrument.id
                            ),
                        );
                        return; // Denied
                    }
                    if order.is_sell() && self.portfolio.is_net_short(&instrument.id) {
                        self.deny_order(
                            order,
                            &format!(
                                "SELL when TradingState is REDUCING and SHORT {}",
                                instrument.id
                            ),
                        );
                        return; // Denied
                    }
                }
                TradingCommand::SubmitOrderList(submit_order_list) => {
                    let order_list = &submit_order_list.order_list;
                    for order in &order_list.orders {
                        if order.is_buy() && self.portfolio.is_net_long(&instrument.id) {
                            self.deny_order_list(
                                order_list,
                                &format!(
                                    "BUY when TradingState is REDUCING and LONG {}",
                                    instrument.id
                                ),
                            );
                            return; // Denied
                        }
                        if order.is_sell() && self.portfolio.is_net_short(&instrument.id) {
                            self.deny_order_list(
                                order_list,
                                &format!(
                                    "SELL when TradingState is REDUCING and SHORT {}",
                                    instrument.id
                                ),
                            );
                            return; // Denied
                        }
                    }
                }
                _ => {}
            },
            TradingState::Active => {}
        }

        self.throttled_submit_order.borrow_mut().send(command);
    }

    fn send_to_execution(&self, command: TradingCommand) {
        msgbus::send(EXEC_ENGINE_EXECUTE, &command);
    }

    fn send_to_emulator(&self, command: TradingCommand) {
        msgbus::send(ORDER_EMULATOR_EXECUTE, &command);
    }
}
