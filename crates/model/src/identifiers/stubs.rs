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

//! Identifier stubs for testing.

use rstest::fixture;
use sentinel_core::UUID4;

use crate::identifiers::{
    AccountId, ClientId, ClientOrderId, InstrumentId, OrderListId, PositionId, StrategyId,
    TraderId, VenueOrderId,
};

#[fixture]
pub fn trader_id() -> TraderId {
    TraderId::from("TRADER-001")
}

#[fixture]
pub fn strategy_id_ema_cross() -> StrategyId {
    StrategyId::from("EMA-CROSS-001")
}

#[fixture]
pub fn client_id_binance() -> ClientId {
    ClientId::from("BINANCE")
}

#[fixture]
pub fn client_order_id() -> ClientOrderId {
    ClientOrderId::from("O-19700101-000000-001-001-1")
}

#[fixture]
pub fn venue_order_id() -> VenueOrderId {
    VenueOrderId::from("001")
}

#[fixture]
pub fn order_list_id() -> OrderListId {
    OrderListId::from("OL-001")
}

#[fixture]
pub fn position_id() -> PositionId {
    PositionId::from("P-001")
}

#[fixture]
pub fn account_id() -> AccountId {
    AccountId::from("SIM-001")
}

#[fixture]
pub fn instrument_id_audusd_sim() -> InstrumentId {
    InstrumentId::from("AUD/USD.SIM")
}

#[fixture]
pub fn uuid4() -> UUID4 {
    UUID4::new()
}
