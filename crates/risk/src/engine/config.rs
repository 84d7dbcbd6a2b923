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

//! Provides a configuration for `RiskEngine` instances.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sentinel_common::throttler::RateLimit;
use sentinel_model::identifiers::{InstrumentId, TraderId};
use serde::{Deserialize, Serialize};

/// Configuration for `RiskEngine` instances.
///
/// Rate limits may be parsed from `"<limit>/HH:MM:SS"` strings via
/// [`RateLimit::from_str`](std::str::FromStr); invalid strings fail fast at
/// configuration time, before the engine accepts any commands.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskEngineConfig {
    /// The trader ID associated with the engine.
    pub trader_id: TraderId,
    /// Whether to bypass pre-trade risk checks for submissions (backtest/test only).
    pub bypass: bool,
    /// The rate limit for order submissions.
    pub max_order_submit: RateLimit,
    /// The rate limit for order modifications.
    pub max_order_modify: RateLimit,
    /// The maximum notional value per order keyed by instrument ID.
    pub max_notional_per_order: HashMap<InstrumentId, Decimal>,
    /// Whether a modify against an order already pending update is rejected outright.
    pub deny_modify_pending_update: bool,
    /// Whether to log additional debug information (no behavioral effect).
    pub debug: bool,
}

impl Default for RiskEngineConfig {
    /// Creates a new default [`RiskEngineConfig`] instance, with both rates at
    /// 100 per second.
    fn default() -> Self {
        Self {
            trader_id: TraderId::default(),
            bypass: false,
            max_order_submit: RateLimit::default_rate(),
            max_order_modify: RateLimit::default_rate(),
            max_notional_per_order: HashMap::new(),
            deny_modify_pending_update: true,
            debug: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use sentinel_core::datetime::NANOSECONDS_IN_SECOND;

    use super::*;

    #[rstest]
    fn test_default_rates_are_100_per_second() {
        let config = RiskEngineConfig::default();
        assert!(!config.bypass);
        assert!(config.deny_modify_pending_update);
        assert_eq!(
            config.max_order_submit,
            RateLimit::new(100, NANOSECONDS_IN_SECOND)
        );
        assert_eq!(
            config.max_order_modify,
            RateLimit::new(100, NANOSECONDS_IN_SECOND)
        );
        assert!(config.max_notional_per_order.is_empty());
    }

    #[rstest]
    fn test_config_from_rate_strings() {
        let config = RiskEngineConfig {
            max_order_submit: "5/00:00:01".parse().unwrap(),
            max_order_modify: "2/00:00:01".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(config.max_order_submit, RateLimit::new(5, NANOSECONDS_IN_SECOND));
        assert_eq!(config.max_order_modify, RateLimit::new(2, NANOSECONDS_IN_SECOND));
    }

    #[rstest]
    fn test_config_snapshot_serializes() {
        let mut config = RiskEngineConfig::default();
        config
            .max_notional_per_order
            .insert(InstrumentId::from("AUD/USD.SIM"), dec!(1000000));

        let snapshot = serde_json::to_value(&config).unwrap();
        assert_eq!(snapshot["bypass"], serde_json::Value::Bool(false));
        assert!(snapshot["max_notional_per_order"]["AUD/USD.SIM"].is_number());
    }
}
