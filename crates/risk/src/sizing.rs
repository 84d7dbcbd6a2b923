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

//! Position sizing calculation functions.
//!
//! All rate and ratio inputs are arbitrary-precision decimals; no binary
//! floating point enters the multi-step computation.

use rust_decimal::Decimal;
use sentinel_model::{
    instruments::Instrument,
    types::{Money, Price, Quantity},
};

/// Calculates an order quantity which risks a fixed fraction of account equity
/// between the entry and stop-loss prices.
///
/// The raw size is capped by `hard_limit` (when given), partitioned into
/// `units` equal tranches, rounded down to the nearest `unit_batch_size`
/// multiple (when positive), and finally capped at the instrument's maximum
/// trade size (when constrained).
///
/// A zero `exchange_rate`, zero risk distance, zero `units`, or non-positive
/// equity yields a zero quantity rather than a division error.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn calculate_fixed_risk_position_size(
    instrument: &Instrument,
    entry: Price,
    stop_loss: Price,
    equity: Money,
    risk: Decimal,
    commission_rate: Decimal,
    exchange_rate: Decimal,
    hard_limit: Option<Decimal>,
    unit_batch_size: Decimal,
    units: usize,
) -> Quantity {
    if exchange_rate.is_zero() || units == 0 {
        return instrument.make_qty(Decimal::ZERO);
    }

    let risk_points = calculate_risk_ticks(entry, stop_loss, instrument);
    let risk_money = calculate_riskable_money(equity.as_decimal(), risk, commission_rate);

    if risk_points <= Decimal::ZERO {
        return instrument.make_qty(Decimal::ZERO);
    }

    let mut position_size =
        ((risk_money / exchange_rate) / risk_points) / instrument.price_increment.as_decimal();

    if let Some(hard_limit) = hard_limit {
        position_size = position_size.min(hard_limit);
    }

    let mut position_size_batched = (position_size / Decimal::from(units)).max(Decimal::ZERO);

    if unit_batch_size > Decimal::ZERO {
        position_size_batched = (position_size_batched / unit_batch_size).floor() * unit_batch_size;
    }

    let final_size = match instrument.max_quantity {
        Some(max_quantity) => position_size_batched.min(max_quantity.as_decimal()),
        None => position_size_batched,
    };

    instrument.make_qty(final_size)
}

// Helper functions
fn calculate_risk_ticks(entry: Price, stop_loss: Price, instrument: &Instrument) -> Decimal {
    (entry.as_decimal() - stop_loss.as_decimal()).abs() / instrument.price_increment.as_decimal()
}

fn calculate_riskable_money(equity: Decimal, risk: Decimal, commission_rate: Decimal) -> Decimal {
    if equity <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let risk_money = equity * risk;
    let commission = risk_money * commission_rate * Decimal::TWO; // (round turn)

    risk_money - commission
}
