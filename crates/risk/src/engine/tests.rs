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

use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use rust_decimal_macros::dec;
use sentinel_common::{
    cache::Cache,
    clock::{Clock, TestClock},
    messages::execution::{CancelOrder, ModifyOrder, SubmitOrder, SubmitOrderList, TradingCommand},
    msgbus::{
        self,
        handler::ShareableMessageHandler,
        stubs::{get_message_saving_handler, get_saved_messages},
    },
    portfolio::Portfolio,
    throttler::RateLimit,
};
use sentinel_core::{UUID4, UnixNanos};
use sentinel_model::{
    accounts::{
        AccountAny, CashAccount,
        stubs::{cash_account_million_usd, margin_account},
    },
    data::stubs::quote_audusd,
    enums::{OrderSide, OrderStatus, OrderType, PositionSide, TimeInForce, TradingState, TriggerType},
    events::{OrderDenied, OrderEventAny, TradingStateChanged},
    identifiers::{ClientId, ClientOrderId, InstrumentId, OrderListId, PositionId},
    instruments::{
        Instrument,
        stubs::{audusd_sim, ethusdt_binance, spy_call_option},
    },
    orders::{Order, OrderList, OrderTestBuilder},
    position::Position,
    types::{AccountBalance, Currency, Money, Price, Quantity},
};
use ustr::Ustr;

use super::{
    EXEC_ENGINE_EXECUTE, EXEC_ENGINE_PROCESS, ORDER_EMULATOR_EXECUTE, RiskEngine,
    TOPIC_EVENTS_RISK, config::RiskEngineConfig,
};

// -- HELPERS -------------------------------------------------------------------------------------

fn register_process_handler() -> ShareableMessageHandler {
    let handler =
        get_message_saving_handler::<OrderEventAny>(Some(Ustr::from(EXEC_ENGINE_PROCESS)));
    msgbus::register(EXEC_ENGINE_PROCESS, handler.clone());
    handler
}

fn register_execute_handler() -> ShareableMessageHandler {
    let handler =
        get_message_saving_handler::<TradingCommand>(Some(Ustr::from(EXEC_ENGINE_EXECUTE)));
    msgbus::register(EXEC_ENGINE_EXECUTE, handler.clone());
    handler
}

fn register_emulator_handler() -> ShareableMessageHandler {
    let handler =
        get_message_saving_handler::<TradingCommand>(Some(Ustr::from(ORDER_EMULATOR_EXECUTE)));
    msgbus::register(ORDER_EMULATOR_EXECUTE, handler.clone());
    handler
}

fn register_risk_event_handler() -> ShareableMessageHandler {
    let handler = get_message_saving_handler::<TradingStateChanged>(Some(Ustr::from(
        "events.risk.collector",
    )));
    msgbus::subscribe(format!("{TOPIC_EVENTS_RISK}*"), handler.clone());
    handler
}

fn saved_events(handler: &ShareableMessageHandler) -> Vec<OrderEventAny> {
    get_saved_messages::<OrderEventAny>(handler.clone())
}

fn saved_commands(handler: &ShareableMessageHandler) -> Vec<TradingCommand> {
    get_saved_messages::<TradingCommand>(handler.clone())
}

fn cash_account_with_usd(free: &str) -> CashAccount {
    let total: Money = format!("{free} USD").parse().unwrap();
    CashAccount::new(
        sentinel_model::identifiers::AccountId::from("SIM-001"),
        vec![AccountBalance::new(total, Money::from("0 USD"), total)],
        Some(Currency::USD()),
    )
}

fn audusd_cache(instrument: &Instrument) -> Rc<RefCell<Cache>> {
    let mut cache = Cache::default();
    cache.add_instrument(instrument.clone()).unwrap();
    cache
        .add_account(AccountAny::Cash(cash_account_million_usd()))
        .unwrap();
    cache.add_quote(quote_audusd()).unwrap();
    Rc::new(RefCell::new(cache))
}

fn get_risk_engine(
    cache: Rc<RefCell<Cache>>,
    clock: Rc<RefCell<TestClock>>,
    config: Option<RiskEngineConfig>,
) -> RiskEngine {
    let config = config.unwrap_or_else(|| RiskEngineConfig {
        debug: true,
        ..Default::default()
    });
    let portfolio = Portfolio::new(cache.clone());
    let clock: Rc<RefCell<dyn Clock>> = clock;
    RiskEngine::new(config, portfolio, clock, cache)
}

fn submit_order_command(order: &Order, position_id: Option<PositionId>) -> SubmitOrder {
    SubmitOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        order.clone(),
        position_id,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap()
}

fn submit_order_list_command(order_list: &OrderList) -> SubmitOrderList {
    SubmitOrderList::new(
        order_list.first().trader_id,
        ClientId::from("SIM"),
        order_list.strategy_id,
        order_list.instrument_id,
        order_list.clone(),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap()
}

fn limit_order_audusd(instrument: &Instrument, client_order_id: &str, side: OrderSide) -> Order {
    OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(instrument.id)
        .client_order_id(ClientOrderId::from(client_order_id))
        .side(side)
        .price(Price::from("0.80000"))
        .quantity(Quantity::from("100000"))
        .build()
}

#[fixture]
fn clock() -> Rc<RefCell<TestClock>> {
    Rc::new(RefCell::new(TestClock::new()))
}

// -- STATE AND CONFIGURATION -----------------------------------------------------------------

#[rstest]
fn test_trading_state_after_instantiation_returns_active(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    assert_eq!(risk_engine.trading_state(), TradingState::Active);
    assert_eq!(risk_engine.command_count(), 0);
    assert_eq!(risk_engine.event_count(), 0);
}

#[rstest]
fn test_set_trading_state_when_no_change_publishes_nothing(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let risk_event_handler = register_risk_event_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    risk_engine.set_trading_state(TradingState::Active);

    let events = get_saved_messages::<TradingStateChanged>(risk_event_handler);
    assert!(events.is_empty());
    assert_eq!(risk_engine.trading_state(), TradingState::Active);
}

#[rstest]
fn test_set_trading_state_changes_value_and_publishes_event(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let risk_event_handler = register_risk_event_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    risk_engine.set_trading_state(TradingState::Halted);

    let events = get_saved_messages::<TradingStateChanged>(risk_event_handler);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].state, TradingState::Halted);
    assert_eq!(events[0].config["bypass"], serde_json::Value::Bool(false));
    assert_eq!(risk_engine.trading_state(), TradingState::Halted);
}

#[rstest]
fn test_max_order_submit_rate_when_no_config_returns_100_per_second(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    assert_eq!(
        risk_engine.max_order_submit_rate(),
        RateLimit::new(100, 1_000_000_000)
    );
    assert_eq!(
        risk_engine.max_order_modify_rate(),
        RateLimit::new(100, 1_000_000_000)
    );
}

#[rstest]
fn test_set_max_notional_per_order_changes_setting(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    assert!(risk_engine.max_notionals_per_order().is_empty());
    assert_eq!(risk_engine.max_notional_per_order(&audusd_sim.id), None);

    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1000000)));
    assert_eq!(
        risk_engine.max_notional_per_order(&audusd_sim.id),
        Some(dec!(1000000))
    );

    // Overwrites the prior value
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(500000)));
    assert_eq!(
        risk_engine.max_notional_per_order(&audusd_sim.id),
        Some(dec!(500000))
    );

    // `None` removes the cap
    risk_engine.set_max_notional_per_order(audusd_sim.id, None);
    assert_eq!(risk_engine.max_notional_per_order(&audusd_sim.id), None);
}

#[rstest]
#[should_panic]
fn test_set_max_notional_per_order_with_negative_value_panics(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(-1)));
}

#[rstest]
fn test_process_event_increments_event_count(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let event = OrderEventAny::Denied(OrderDenied::default());
    risk_engine.process(&event);

    assert_eq!(risk_engine.event_count(), 1);
}

// -- SUBMIT ORDER --------------------------------------------------------------------------------

#[rstest]
fn test_submit_order_with_default_settings_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert_eq!(risk_engine.command_count(), 1);
    assert!(saved_events(&process_handler).is_empty());
    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], TradingCommand::SubmitOrder(_)));
}

#[rstest]
fn test_submit_order_when_duplicate_id_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    let mut risk_engine = get_risk_engine(cache.clone(), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    let command = TradingCommand::SubmitOrder(submit_order_command(&order, None));

    risk_engine.execute(command.clone());
    risk_engine.execute(command);

    // Exactly one order cached, one forward, one denial
    assert_eq!(cache.borrow().order_count(), 1);
    assert_eq!(saved_commands(&execute_handler).len(), 1);
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("Duplicate"));
}

#[rstest]
fn test_submit_order_when_instrument_not_in_cache_then_denies(clock: Rc<RefCell<TestClock>>) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    let mut risk_engine = get_risk_engine(cache, clock, None);

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(InstrumentId::from("AUD/USD.SIM"))
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_commands(&execute_handler).is_empty());
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("Instrument for AUD/USD.SIM not found")
    );
}

#[rstest]
fn test_submit_order_when_invalid_price_precision_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    // AUD/USD price precision is 5 - a 6dp limit price is invalid
    let order = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .price(Price::from("0.800001"))
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("precision 6 > 5"));
}

#[rstest]
fn test_submit_order_when_invalid_negative_price_and_not_option_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .price(Price::from("-0.80000"))
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("invalid (<= 0)"));
}

#[rstest]
fn test_submit_order_when_zero_price_on_option_passes_price_check(
    spy_call_option: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    cache.borrow_mut().add_instrument(spy_call_option.clone()).unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    // Options may carry zero premium economics
    let order = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(spy_call_option.id)
        .side(OrderSide::Buy)
        .price(Price::from("0.00"))
        .quantity(Quantity::from("1"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_invalid_trigger_price_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::StopMarket)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .trigger_price(Price::from("0.800001"))
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().starts_with("trigger"));
}

#[rstest]
fn test_submit_order_when_invalid_quantity_precision_then_denies(
    ethusdt_binance: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    cache.borrow_mut().add_instrument(ethusdt_binance.clone()).unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    // ETH/USDT size precision is 3 - a 4dp quantity is invalid
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(ethusdt_binance.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("1.0001"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("precision 4 > 3"));
}

#[rstest]
fn test_submit_order_when_quantity_exceeds_maximum_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("2000000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("> maximum trade size of 1000000")
    );
}

#[rstest]
fn test_submit_order_when_quantity_less_than_minimum_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("< minimum trade size of 1000")
    );
}

#[rstest]
fn test_submit_order_when_gtd_expire_time_already_past_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .price(Price::from("0.80000"))
        .quantity(Quantity::from("100000"))
        .time_in_force(TimeInForce::Gtd)
        .expire_time(UnixNanos::default())
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("already past"));
}

// -- REDUCE-ONLY ---------------------------------------------------------------------------------

#[rstest]
fn test_submit_order_when_position_id_not_in_cache_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Sell)
        .quantity(Quantity::from("100000"))
        .reduce_only(true)
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(
        &order,
        Some(PositionId::from("P-404")),
    )));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("Position P-404 not found for reduce-only order")
    );
}

#[rstest]
fn test_submit_order_when_reduce_only_would_increase_position_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let cache = audusd_cache(&audusd_sim);
    cache
        .borrow_mut()
        .add_position(Position::new(
            PositionId::from("P-001"),
            audusd_sim.id,
            PositionSide::Long,
            Quantity::from("100000"),
            UnixNanos::default(),
        ))
        .unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    // A BUY against a LONG position can never reduce it
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("50000"))
        .reduce_only(true)
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(
        &order,
        Some(PositionId::from("P-001")),
    )));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("Reduce only order would increase position P-001")
    );
}

#[rstest]
fn test_submit_order_when_reduce_only_reduces_position_then_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    cache
        .borrow_mut()
        .add_position(Position::new(
            PositionId::from("P-001"),
            audusd_sim.id,
            PositionSide::Long,
            Quantity::from("100000"),
            UnixNanos::default(),
        ))
        .unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Sell)
        .quantity(Quantity::from("50000"))
        .reduce_only(true)
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(
        &order,
        Some(PositionId::from("P-001")),
    )));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

// -- NOTIONAL AND BALANCE RISK -------------------------------------------------------------------

#[rstest]
fn test_submit_order_when_market_order_and_over_max_notional_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1000)));

    // Assessed at the ask (0.80010): notional 8001 USD > 1000 USD cap
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("10000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("NOTIONAL_EXCEEDS_MAX_PER_ORDER")
    );
}

#[rstest]
fn test_submit_order_when_under_max_notional_then_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1000)));

    // Assessed at the ask (0.80010): notional 800.10 USD <= 1000 USD cap
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("1000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_market_order_and_no_market_then_skips_risk_assessment(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    {
        let mut cache = cache.borrow_mut();
        cache.add_instrument(audusd_sim.clone()).unwrap();
        cache
            .add_account(AccountAny::Cash(cash_account_million_usd()))
            .unwrap();
        // No quote or trade for the instrument
    }
    let mut risk_engine = get_risk_engine(cache, clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1)));

    // Unassessable risk is not a denial
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_notional_exceeds_free_balance_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    {
        let mut cache = cache.borrow_mut();
        cache.add_instrument(audusd_sim.clone()).unwrap();
        cache
            .add_account(AccountAny::Cash(cash_account_with_usd("1000")))
            .unwrap();
        cache.add_quote(quote_audusd()).unwrap();
    }
    let mut risk_engine = get_risk_engine(cache, clock, None);

    // Notional 8001 USD > 1000 USD free
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("10000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(
        events[0]
            .reason()
            .as_str()
            .contains("NOTIONAL_EXCEEDS_FREE_BALANCE")
    );
}

#[rstest]
fn test_submit_order_when_selling_currency_pair_converts_max_notional_to_base(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1000)));

    // Selling delivers AUD: exposure 100,000 AUD against a converted cap of
    // 1000 / 0.80000 = 1250 AUD
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Sell)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    let reason = events[0].reason();
    assert!(reason.as_str().contains("NOTIONAL_EXCEEDS_MAX_PER_ORDER"));
    assert!(reason.as_str().contains("AUD"));
}

#[rstest]
fn test_submit_order_when_margin_account_skips_balance_risk(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    {
        let mut cache = cache.borrow_mut();
        cache.add_instrument(audusd_sim.clone()).unwrap();
        cache
            .add_account(AccountAny::Margin(margin_account()))
            .unwrap();
        cache.add_quote(quote_audusd()).unwrap();
    }
    let mut risk_engine = get_risk_engine(cache, clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1)));

    // Margin risk is controlled elsewhere; the batched risk check passes
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_no_account_for_venue_skips_risk_check(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = Rc::new(RefCell::new(Cache::default()));
    {
        let mut cache = cache.borrow_mut();
        cache.add_instrument(audusd_sim.clone()).unwrap();
        cache.add_quote(quote_audusd()).unwrap();
        // No account registered for venue SIM
    }
    let mut risk_engine = get_risk_engine(cache, clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1)));

    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

// -- TRADING STATE GATING ------------------------------------------------------------------------

#[rstest]
fn test_submit_order_when_trading_halted_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    risk_engine.set_trading_state(TradingState::Halted);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_commands(&execute_handler).is_empty());
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("HALTED"));
}

#[rstest]
fn test_submit_order_list_when_trading_halted_then_denies_all(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    risk_engine.set_trading_state(TradingState::Halted);

    let entry = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    let take_profit =
        limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-2", OrderSide::Sell);
    let order_list = OrderList::new(
        OrderListId::from("OL-001"),
        audusd_sim.id,
        entry.strategy_id,
        vec![entry, take_profit],
        UnixNanos::default(),
    );
    risk_engine.execute(TradingCommand::SubmitOrderList(submit_order_list_command(
        &order_list,
    )));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 2);
    for event in events {
        assert!(event.reason().as_str().contains("HALTED"));
    }
}

#[rstest]
fn test_submit_order_when_reducing_and_buy_order_adds_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    cache
        .borrow_mut()
        .add_position(Position::new(
            PositionId::from("P-001"),
            audusd_sim.id,
            PositionSide::Long,
            Quantity::from("100000"),
            UnixNanos::default(),
        ))
        .unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    risk_engine.set_trading_state(TradingState::Reducing); // <-- allow reducing orders only

    let buy_order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&buy_order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("REDUCING"));

    // A SELL for the same instrument reduces the net long and passes
    let sell_order =
        limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-2", OrderSide::Sell);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&sell_order, None)));

    assert_eq!(saved_events(&process_handler).len(), 1);
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_reducing_and_sell_order_adds_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    cache
        .borrow_mut()
        .add_position(Position::new(
            PositionId::from("P-001"),
            audusd_sim.id,
            PositionSide::Short,
            Quantity::from("100000"),
            UnixNanos::default(),
        ))
        .unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    risk_engine.set_trading_state(TradingState::Reducing);

    let sell_order =
        limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Sell);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&sell_order, None)));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("REDUCING"));

    let buy_order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-2", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&buy_order, None)));

    assert_eq!(saved_events(&process_handler).len(), 1);
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

// -- RATE LIMITING -------------------------------------------------------------------------------

#[rstest]
fn test_submit_order_exceeding_max_submit_rate_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let config = RiskEngineConfig {
        max_order_submit: "2/00:00:01".parse().unwrap(),
        debug: true,
        ..Default::default()
    };
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock.clone(), Some(config));

    for i in 1..=3 {
        let order = limit_order_audusd(
            &audusd_sim,
            &format!("O-19700101-000000-001-001-{i}"),
            OrderSide::Buy,
        );
        risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));
    }

    // Two forwarded within the window, the third denied
    assert_eq!(saved_commands(&execute_handler).len(), 2);
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].reason().as_str(),
        "Exceeded MAX_ORDER_SUBMIT_RATE"
    );

    // After the interval elapses a fourth submission succeeds
    let events = clock
        .borrow_mut()
        .advance_time(UnixNanos::from(1_000_000_000), true);
    let handlers = clock.borrow().match_handlers(events);
    for handler in handlers {
        handler.run();
    }

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-4", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert_eq!(saved_commands(&execute_handler).len(), 3);
    assert_eq!(saved_events(&process_handler).len(), 1);
}

#[rstest]
fn test_modify_order_exceeding_max_modify_rate_buffers_until_window_frees(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let config = RiskEngineConfig {
        max_order_modify: "1/00:00:01".parse().unwrap(),
        debug: true,
        ..Default::default()
    };
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock.clone(), Some(config));

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    for price in ["0.80010", "0.80020"] {
        let modify = ModifyOrder::new(
            order.trader_id,
            ClientId::from("SIM"),
            order.strategy_id,
            order.instrument_id,
            order.client_order_id,
            None,
            None,
            Some(Price::from(price)),
            None,
            UUID4::new(),
            UnixNanos::default(),
        )
        .unwrap();
        risk_engine.execute(TradingCommand::ModifyOrder(modify));
    }

    // Submit + first modify forwarded; the second modify buffers rather than
    // drops (losing it would leave the caller's intent unresolved)
    assert_eq!(saved_commands(&execute_handler).len(), 2);
    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(risk_engine.throttled_modify_order.borrow().qsize(), 1);

    // Once the interval elapses the buffered modify replays in arrival order
    let events = clock
        .borrow_mut()
        .advance_time(UnixNanos::from(1_000_000_000), true);
    let handlers = clock.borrow().match_handlers(events);
    for handler in handlers {
        handler.run();
    }

    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 3);
    match &commands[2] {
        TradingCommand::ModifyOrder(modify) => {
            assert_eq!(modify.price, Some(Price::from("0.80020")));
        }
        _ => panic!("expected a ModifyOrder command"),
    }
    assert_eq!(risk_engine.throttled_modify_order.borrow().qsize(), 0);
}

// -- DENIAL MECHANICS ----------------------------------------------------------------------------

#[rstest]
fn test_deny_order_is_idempotent_per_order(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let cache = audusd_cache(&audusd_sim);
    let risk_engine = get_risk_engine(cache.clone(), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);

    risk_engine.deny_order(&order, "DENIED FOR TEST");
    risk_engine.deny_order(&order, "DENIED FOR TEST");

    // The second denial is a no-op: the order is no longer INITIALIZED
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);

    // The denied order is guaranteed queryable from the cache
    let cache = cache.borrow();
    assert_eq!(cache.order_count(), 1);
    assert_eq!(
        cache.order(&order.client_order_id).unwrap().status(),
        OrderStatus::Denied
    );
}

// -- ORDER LISTS ---------------------------------------------------------------------------------

#[rstest]
fn test_submit_order_list_with_default_settings_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    let mut risk_engine = get_risk_engine(cache.clone(), clock, None);

    let entry = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    let take_profit =
        limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-2", OrderSide::Sell);
    let order_list = OrderList::new(
        OrderListId::from("OL-001"),
        audusd_sim.id,
        entry.strategy_id,
        vec![entry, take_profit],
        UnixNanos::default(),
    );
    risk_engine.execute(TradingCommand::SubmitOrderList(submit_order_list_command(
        &order_list,
    )));

    assert!(saved_events(&process_handler).is_empty());
    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], TradingCommand::SubmitOrderList(_)));
    assert_eq!(cache.borrow().order_count(), 2);
}

#[rstest]
fn test_submit_order_list_with_duplicate_id_denies_whole_list_before_caching(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    let mut risk_engine = get_risk_engine(cache.clone(), clock, None);

    // Seed the cache with an order taking the first ID
    let existing =
        limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&existing, None)));
    assert_eq!(saved_commands(&execute_handler).len(), 1);

    let list_id = OrderListId::from("OL-001");
    let duplicate = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .client_order_id(ClientOrderId::from("O-19700101-000000-001-001-1"))
        .order_list_id(list_id)
        .side(OrderSide::Buy)
        .price(Price::from("0.80000"))
        .quantity(Quantity::from("100000"))
        .build();
    let sibling = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .client_order_id(ClientOrderId::from("O-19700101-000000-001-001-2"))
        .order_list_id(list_id)
        .side(OrderSide::Sell)
        .price(Price::from("0.80000"))
        .quantity(Quantity::from("100000"))
        .build();
    let order_list = OrderList::new(
        list_id,
        audusd_sim.id,
        duplicate.strategy_id,
        vec![duplicate, sibling],
        UnixNanos::default(),
    );
    risk_engine.execute(TradingCommand::SubmitOrderList(submit_order_list_command(
        &order_list,
    )));

    // Whole list denied before any member is cached as a live order; the
    // denial mechanics still record the denied sibling so it stays queryable
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 2);
    for event in events {
        assert!(event.reason().as_str().contains("Duplicate"));
    }
    let cache = cache.borrow();
    assert_eq!(cache.order_count(), 2);
    assert_eq!(
        cache
            .order(&ClientOrderId::from("O-19700101-000000-001-001-1"))
            .unwrap()
            .status(),
        OrderStatus::Initialized // <-- the original order is untouched
    );
    assert_eq!(
        cache
            .order(&ClientOrderId::from("O-19700101-000000-001-001-2"))
            .unwrap()
            .status(),
        OrderStatus::Denied
    );
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_list_when_risk_check_fails_denies_all_members(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let cache = audusd_cache(&audusd_sim);
    let mut risk_engine = get_risk_engine(cache.clone(), clock, None);
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1000)));

    let list_id = OrderListId::from("OL-001");
    let build_member = |suffix: u32, quantity: &str| {
        OrderTestBuilder::new(OrderType::Limit)
            .instrument_id(audusd_sim.id)
            .client_order_id(ClientOrderId::from(
                format!("O-19700101-000000-001-001-{suffix}").as_str(),
            ))
            .order_list_id(list_id)
            .side(OrderSide::Buy)
            .price(Price::from("0.80000"))
            .quantity(Quantity::from(quantity))
            .build()
    };

    // The second member breaches the notional cap (8000 USD > 1000 USD)
    let order1 = build_member(1, "1000");
    let order2 = build_member(2, "10000");
    let order3 = build_member(3, "1000");
    let order_list = OrderList::new(
        list_id,
        audusd_sim.id,
        order1.strategy_id,
        vec![order1, order2, order3],
        UnixNanos::default(),
    );
    risk_engine.execute(TradingCommand::SubmitOrderList(submit_order_list_command(
        &order_list,
    )));

    // All three members are denied: the second with the specific reason,
    // the other two with the list-level reason
    assert!(saved_commands(&execute_handler).is_empty());
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 3);
    let reasons: Vec<String> = events
        .iter()
        .map(|event| event.reason().as_str().to_string())
        .collect();
    assert_eq!(
        reasons
            .iter()
            .filter(|reason| reason.contains("NOTIONAL_EXCEEDS_MAX_PER_ORDER"))
            .count(),
        1
    );
    assert_eq!(
        reasons
            .iter()
            .filter(|reason| reason.contains("OrderList OL-001 DENIED"))
            .count(),
        2
    );

    let cache = cache.borrow();
    for suffix in 1..=3 {
        let client_order_id =
            ClientOrderId::from(format!("O-19700101-000000-001-001-{suffix}").as_str());
        assert_eq!(
            cache.order(&client_order_id).unwrap().status(),
            OrderStatus::Denied
        );
    }
}

#[rstest]
fn test_submit_order_list_when_cumulative_notional_exceeds_free_balance_then_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    // Each order alone is within the free balance (600,000 USD < 1,000,000 USD),
    // but the batch accumulates 1,200,000 USD of BUY exposure
    let list_id = OrderListId::from("OL-001");
    let build_member = |suffix: u32| {
        OrderTestBuilder::new(OrderType::Limit)
            .instrument_id(audusd_sim.id)
            .client_order_id(ClientOrderId::from(
                format!("O-19700101-000000-001-001-{suffix}").as_str(),
            ))
            .order_list_id(list_id)
            .side(OrderSide::Buy)
            .price(Price::from("0.80000"))
            .quantity(Quantity::from("750000"))
            .build()
    };

    let order_list = OrderList::new(
        list_id,
        audusd_sim.id,
        build_member(1).strategy_id,
        vec![build_member(1), build_member(2)],
        UnixNanos::default(),
    );
    risk_engine.execute(TradingCommand::SubmitOrderList(submit_order_list_command(
        &order_list,
    )));

    assert!(saved_commands(&execute_handler).is_empty());
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 2);
    assert!(
        events
            .iter()
            .any(|event| event
                .reason()
                .as_str()
                .contains("CUM_NOTIONAL_EXCEEDS_FREE_BALANCE"))
    );
}

// -- BYPASS --------------------------------------------------------------------------------------

#[rstest]
fn test_submit_order_when_risk_bypassed_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let config = RiskEngineConfig {
        bypass: true, // <-- bypassing pre-trade risk checks
        debug: true,
        ..Default::default()
    };
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, Some(config));
    risk_engine.set_max_notional_per_order(audusd_sim.id, Some(dec!(1)));

    // Would breach the notional cap under normal mode
    let order = OrderTestBuilder::new(OrderType::Market)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .quantity(Quantity::from("100000"))
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert_eq!(saved_commands(&execute_handler).len(), 1);
}

#[rstest]
fn test_submit_order_when_risk_bypassed_duplicate_id_still_denies(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let config = RiskEngineConfig {
        bypass: true,
        debug: true,
        ..Default::default()
    };
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, Some(config));

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    let command = TradingCommand::SubmitOrder(submit_order_command(&order, None));
    risk_engine.execute(command.clone());
    risk_engine.execute(command);

    assert_eq!(saved_commands(&execute_handler).len(), 1);
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(events[0].reason().as_str().contains("Duplicate"));
}

// -- EMULATION ROUTING ---------------------------------------------------------------------------

#[rstest]
fn test_submit_order_with_emulation_trigger_sends_to_emulator(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let emulator_handler = register_emulator_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = OrderTestBuilder::new(OrderType::Limit)
        .instrument_id(audusd_sim.id)
        .side(OrderSide::Buy)
        .price(Price::from("0.80000"))
        .quantity(Quantity::from("100000"))
        .emulation_trigger(TriggerType::BidAsk)
        .build();
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    assert!(saved_events(&process_handler).is_empty());
    assert!(saved_commands(&execute_handler).is_empty());
    assert_eq!(saved_commands(&emulator_handler).len(), 1);
}

// -- MODIFY ORDER --------------------------------------------------------------------------------

#[rstest]
fn test_modify_order_with_default_settings_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let modify = ModifyOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        Some(Quantity::from("50000")),
        Some(Price::from("0.80010")),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    assert!(saved_events(&process_handler).is_empty());
    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[1], TradingCommand::ModifyOrder(_)));
}

#[rstest]
fn test_modify_order_when_no_order_found_emits_nothing(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let modify = ModifyOrder::new(
        sentinel_model::identifiers::TraderId::from("TRADER-001"),
        ClientId::from("SIM"),
        sentinel_model::identifiers::StrategyId::from("EMA-CROSS-001"),
        audusd_sim.id,
        ClientOrderId::from("O-UNKNOWN-1"),
        None,
        None,
        Some(Price::from("0.80010")),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    // There is no well-formed order to deny: logged and dropped
    assert!(saved_events(&process_handler).is_empty());
    assert!(saved_commands(&execute_handler).is_empty());
}

#[rstest]
fn test_modify_order_when_already_closed_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.deny_order(&order, "DENIED FOR TEST"); // <-- order now closed

    let modify = ModifyOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        None,
        Some(Price::from("0.80010")),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 2); // denial + modify rejection
    assert!(matches!(events[1], OrderEventAny::ModifyRejected(_)));
    assert!(events[1].reason().as_str().contains("already closed"));
}

#[rstest]
fn test_modify_order_when_invalid_price_precision_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    let modify = ModifyOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        None,
        Some(Price::from("0.800001")),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    assert_eq!(saved_commands(&execute_handler).len(), 1); // only the submit
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], OrderEventAny::ModifyRejected(_)));
    assert!(events[0].reason().as_str().contains("precision 6 > 5"));
}

#[rstest]
fn test_modify_order_when_trading_halted_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    risk_engine.set_trading_state(TradingState::Halted);

    let modify = ModifyOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        Some(Quantity::from("50000")),
        None,
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], OrderEventAny::ModifyRejected(_)));
    assert!(events[0].reason().as_str().contains("HALTED"));
}

#[rstest]
fn test_modify_order_when_reducing_and_quantity_increase_adds_exposure_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let cache = audusd_cache(&audusd_sim);
    cache
        .borrow_mut()
        .add_position(Position::new(
            PositionId::from("P-001"),
            audusd_sim.id,
            PositionSide::Long,
            Quantity::from("100000"),
            UnixNanos::default(),
        ))
        .unwrap();
    let mut risk_engine = get_risk_engine(cache, clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    risk_engine.set_trading_state(TradingState::Reducing);

    // A quantity increase on a BUY while net long grows exposure
    let modify = ModifyOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        Some(Quantity::from("200000")),
        None,
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::ModifyOrder(modify));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], OrderEventAny::ModifyRejected(_)));
    assert!(events[0].reason().as_str().contains("REDUCING"));
}

// -- CANCEL ORDER --------------------------------------------------------------------------------

#[rstest]
fn test_cancel_order_when_order_does_not_exist_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let cancel = CancelOrder::new(
        sentinel_model::identifiers::TraderId::from("TRADER-001"),
        ClientId::from("SIM"),
        sentinel_model::identifiers::StrategyId::from("EMA-CROSS-001"),
        audusd_sim.id,
        ClientOrderId::from("O-UNKNOWN-1"),
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::CancelOrder(cancel));

    assert!(saved_commands(&execute_handler).is_empty());
    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], OrderEventAny::CancelRejected(_)));
    assert!(events[0].reason().as_str().contains("not found"));
}

#[rstest]
fn test_cancel_order_when_already_closed_then_rejects(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.deny_order(&order, "DENIED FOR TEST"); // <-- order now closed

    let cancel = CancelOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::CancelOrder(cancel));

    let events = saved_events(&process_handler);
    assert_eq!(events.len(), 2); // denial + cancel rejection
    assert!(matches!(events[1], OrderEventAny::CancelRejected(_)));
    assert!(events[1].reason().as_str().contains("already closed"));
}

#[rstest]
fn test_cancel_order_with_default_settings_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let process_handler = register_process_handler();
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let order = limit_order_audusd(&audusd_sim, "O-19700101-000000-001-001-1", OrderSide::Buy);
    risk_engine.execute(TradingCommand::SubmitOrder(submit_order_command(&order, None)));

    risk_engine.set_trading_state(TradingState::Halted); // <-- cancels still pass when halted

    let cancel = CancelOrder::new(
        order.trader_id,
        ClientId::from("SIM"),
        order.strategy_id,
        order.instrument_id,
        order.client_order_id,
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::CancelOrder(cancel));

    assert!(saved_events(&process_handler).is_empty());
    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[1], TradingCommand::CancelOrder(_)));
}

#[rstest]
fn test_cancel_all_orders_sends_to_execution(
    audusd_sim: Instrument,
    clock: Rc<RefCell<TestClock>>,
) {
    let execute_handler = register_execute_handler();
    let mut risk_engine = get_risk_engine(audusd_cache(&audusd_sim), clock, None);

    let cancel_all = sentinel_common::messages::execution::CancelAllOrders::new(
        sentinel_model::identifiers::TraderId::from("TRADER-001"),
        ClientId::from("SIM"),
        sentinel_model::identifiers::StrategyId::from("EMA-CROSS-001"),
        audusd_sim.id,
        None,
        UUID4::new(),
        UnixNanos::default(),
    )
    .unwrap();
    risk_engine.execute(TradingCommand::CancelAllOrders(cancel_all));

    let commands = saved_commands(&execute_handler);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], TradingCommand::CancelAllOrders(_)));
}
