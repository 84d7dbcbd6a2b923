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

//! An in-memory cache of trading objects, consumed by the risk path as a set
//! of synchronous query interfaces.
//!
//! The cache is owned by the node kernel and shared with components via
//! `Rc<RefCell<Cache>>`; all access is serialized on the owning thread.

use ahash::AHashMap;
use sentinel_model::{
    accounts::AccountAny,
    data::{QuoteTick, TradeTick},
    identifiers::{AccountId, ClientOrderId, InstrumentId, PositionId, Venue},
    instruments::Instrument,
    orders::Order,
    position::Position,
};

/// An in-memory cache of orders, positions, instruments, accounts, and market data.
#[derive(Debug, Default)]
pub struct Cache {
    instruments: AHashMap<InstrumentId, Instrument>,
    orders: AHashMap<ClientOrderId, Order>,
    index_order_position: AHashMap<ClientOrderId, PositionId>,
    positions: AHashMap<PositionId, Position>,
    accounts: AHashMap<AccountId, AccountAny>,
    index_venue_account: AHashMap<Venue, AccountId>,
    quotes: AHashMap<InstrumentId, QuoteTick>,
    trades: AHashMap<InstrumentId, TradeTick>,
}

impl Cache {
    /// Creates a new empty [`Cache`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- INSTRUMENTS -----------------------------------------------------------------------------

    /// Adds the `instrument` to the cache, replacing any existing definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the instrument cannot be added (infallible in-memory).
    pub fn add_instrument(&mut self, instrument: Instrument) -> anyhow::Result<()> {
        self.instruments.insert(instrument.id, instrument);
        Ok(())
    }

    /// Returns the instrument with the given `instrument_id` (if found).
    #[must_use]
    pub fn instrument(&self, instrument_id: &InstrumentId) -> Option<&Instrument> {
        self.instruments.get(instrument_id)
    }

    // -- ORDERS ----------------------------------------------------------------------------------

    /// Adds the `order` to the cache, indexed against the given `position_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if an order with the same client order ID is already cached.
    pub fn add_order(&mut self, order: Order, position_id: Option<PositionId>) -> anyhow::Result<()> {
        let client_order_id = order.client_order_id;
        if self.orders.contains_key(&client_order_id) {
            anyhow::bail!("Order {client_order_id} already exists in the cache");
        }
        if let Some(position_id) = position_id {
            self.index_order_position.insert(client_order_id, position_id);
        }
        self.orders.insert(client_order_id, order);
        Ok(())
    }

    /// Returns whether an order with the given `client_order_id` exists.
    #[must_use]
    pub fn order_exists(&self, client_order_id: &ClientOrderId) -> bool {
        self.orders.contains_key(client_order_id)
    }

    /// Returns the order with the given `client_order_id` (if found).
    #[must_use]
    pub fn order(&self, client_order_id: &ClientOrderId) -> Option<&Order> {
        self.orders.get(client_order_id)
    }

    /// Returns a mutable reference to the order with the given `client_order_id` (if found).
    #[must_use]
    pub fn order_mut(&mut self, client_order_id: &ClientOrderId) -> Option<&mut Order> {
        self.orders.get_mut(client_order_id)
    }

    /// Returns the total count of cached orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Returns the position ID indexed for the given `client_order_id` (if any).
    #[must_use]
    pub fn position_id_for_order(&self, client_order_id: &ClientOrderId) -> Option<&PositionId> {
        self.index_order_position.get(client_order_id)
    }

    // -- POSITIONS -------------------------------------------------------------------------------

    /// Adds the `position` to the cache, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the position cannot be added (infallible in-memory).
    pub fn add_position(&mut self, position: Position) -> anyhow::Result<()> {
        self.positions.insert(position.id, position);
        Ok(())
    }

    /// Returns the position with the given `position_id` (if found).
    #[must_use]
    pub fn position(&self, position_id: &PositionId) -> Option<&Position> {
        self.positions.get(position_id)
    }

    /// Returns all cached positions for the given `instrument_id`.
    #[must_use]
    pub fn positions_for_instrument(&self, instrument_id: &InstrumentId) -> Vec<&Position> {
        self.positions
            .values()
            .filter(|position| &position.instrument_id == instrument_id)
            .collect()
    }

    // -- ACCOUNTS --------------------------------------------------------------------------------

    /// Adds the `account` to the cache, indexed by the issuer portion of its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account ID has no issuer portion.
    pub fn add_account(&mut self, account: AccountAny) -> anyhow::Result<()> {
        let account_id = account.id();
        let issuer = account_id
            .as_str()
            .split_once('-')
            .map(|(issuer, _)| issuer)
            .ok_or_else(|| anyhow::anyhow!("Account ID {account_id} has no issuer portion"))?;
        self.index_venue_account
            .insert(Venue::new(issuer), account_id);
        self.accounts.insert(account_id, account);
        Ok(())
    }

    /// Returns the account registered for the given `venue` (if found).
    #[must_use]
    pub fn account_for_venue(&self, venue: &Venue) -> Option<&AccountAny> {
        self.index_venue_account
            .get(venue)
            .and_then(|account_id| self.accounts.get(account_id))
    }

    // -- MARKET DATA -----------------------------------------------------------------------------

    /// Adds the `quote` tick to the cache, replacing any previous quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the quote cannot be added (infallible in-memory).
    pub fn add_quote(&mut self, quote: QuoteTick) -> anyhow::Result<()> {
        self.quotes.insert(quote.instrument_id, quote);
        Ok(())
    }

    /// Returns the latest quote tick for the given `instrument_id` (if any).
    #[must_use]
    pub fn quote(&self, instrument_id: &InstrumentId) -> Option<&QuoteTick> {
        self.quotes.get(instrument_id)
    }

    /// Adds the `trade` tick to the cache, replacing any previous trade.
    ///
    /// # Errors
    ///
    /// Returns an error if the trade cannot be added (infallible in-memory).
    pub fn add_trade(&mut self, trade: TradeTick) -> anyhow::Result<()> {
        self.trades.insert(trade.instrument_id, trade);
        Ok(())
    }

    /// Returns the latest trade tick for the given `instrument_id` (if any).
    #[must_use]
    pub fn trade(&self, instrument_id: &InstrumentId) -> Option<&TradeTick> {
        self.trades.get(instrument_id)
    }

    /// Resets the cache by clearing all state.
    pub fn reset(&mut self) {
        self.instruments.clear();
        self.orders.clear();
        self.index_order_position.clear();
        self.positions.clear();
        self.accounts.clear();
        self.index_venue_account.clear();
        self.quotes.clear();
        self.trades.clear();
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use sentinel_model::{
        accounts::{AccountAny, stubs::cash_account_million_usd},
        data::stubs::quote_audusd,
        enums::{OrderSide, OrderType, PositionSide},
        identifiers::{InstrumentId, PositionId, Venue},
        instruments::stubs::audusd_sim,
        orders::OrderTestBuilder,
        position::Position,
        types::Quantity,
    };
    use sentinel_core::UnixNanos;

    use super::*;

    #[rstest]
    fn test_add_order_rejects_duplicate_client_order_id() {
        let mut cache = Cache::default();
        let order = OrderTestBuilder::new(OrderType::Market)
            .side(OrderSide::Buy)
            .quantity(Quantity::from("100000"))
            .build();

        cache.add_order(order.clone(), None).unwrap();
        assert!(cache.order_exists(&order.client_order_id));
        assert!(cache.add_order(order.clone(), None).is_err());
        assert_eq!(cache.order_count(), 1);
    }

    #[rstest]
    fn test_order_position_index() {
        let mut cache = Cache::default();
        let order = OrderTestBuilder::new(OrderType::Market)
            .side(OrderSide::Buy)
            .quantity(Quantity::from("100000"))
            .build();
        let position_id = PositionId::from("P-001");

        cache.add_order(order.clone(), Some(position_id)).unwrap();
        assert_eq!(
            cache.position_id_for_order(&order.client_order_id),
            Some(&position_id)
        );
    }

    #[rstest]
    fn test_account_for_venue() {
        let mut cache = Cache::default();
        cache
            .add_account(AccountAny::Cash(cash_account_million_usd()))
            .unwrap();

        assert!(cache.account_for_venue(&Venue::from("SIM")).is_some());
        assert!(cache.account_for_venue(&Venue::from("BINANCE")).is_none());
    }

    #[rstest]
    fn test_positions_for_instrument() {
        let mut cache = Cache::default();
        let instrument_id = InstrumentId::from("AUD/USD.SIM");
        cache
            .add_position(Position::new(
                PositionId::from("P-001"),
                instrument_id,
                PositionSide::Long,
                Quantity::from("100000"),
                UnixNanos::default(),
            ))
            .unwrap();
        cache
            .add_position(Position::new(
                PositionId::from("P-002"),
                InstrumentId::from("GBP/USD.SIM"),
                PositionSide::Short,
                Quantity::from("50000"),
                UnixNanos::default(),
            ))
            .unwrap();

        assert_eq!(cache.positions_for_instrument(&instrument_id).len(), 1);
    }

    #[rstest]
    fn test_market_data_round_trip() {
        let mut cache = Cache::default();
        let instrument = audusd_sim();
        let quote = quote_audusd();
        cache.add_instrument(instrument.clone()).unwrap();
        cache.add_quote(quote).unwrap();

        assert_eq!(cache.instrument(&instrument.id), Some(&instrument));
        assert_eq!(cache.quote(&instrument.id), Some(&quote));
        assert!(cache.trade(&instrument.id).is_none());
    }
}
