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

//! Represents a price in a market.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use sentinel_core::correctness::FAILED;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The maximum supported decimal precision for prices.
pub const PRICE_MAX_PRECISION: u8 = 16;

/// Represents a price in a market, backed by an arbitrary-precision decimal.
///
/// The number of decimal places may vary; for certain asset classes a price
/// may be negative (e.g. options economics), so no sign constraint is imposed
/// here - positivity rules are enforced by the pre-trade checks where they
/// apply.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Price {
    value: Decimal,
    /// The decimal precision of the price.
    pub precision: u8,
}

impl Price {
    /// Creates a new [`Price`] instance.
    ///
    /// The `value` is quantized to `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns an error if `precision` exceeds [`PRICE_MAX_PRECISION`].
    pub fn new_checked(value: Decimal, precision: u8) -> anyhow::Result<Self> {
        if precision > PRICE_MAX_PRECISION {
            anyhow::bail!(
                "invalid `precision` exceeded maximum {PRICE_MAX_PRECISION}, was {precision}"
            );
        }
        Ok(Self {
            value: value.round_dp(u32::from(precision)),
            precision,
        })
    }

    /// Creates a new [`Price`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `precision` exceeds [`PRICE_MAX_PRECISION`].
    #[must_use]
    pub fn new(value: Decimal, precision: u8) -> Self {
        Self::new_checked(value, precision).expect(FAILED)
    }

    /// Creates a new [`Price`] instance with a value of zero.
    #[must_use]
    pub fn zero(precision: u8) -> Self {
        Self::new(Decimal::ZERO, precision)
    }

    /// Returns the value as a `Decimal`.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns whether the price is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl FromStr for Price {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s
            .parse()
            .map_err(|e| anyhow::anyhow!("Error parsing `Price` from '{s}': {e}"))?;
        let precision = u8::try_from(value.scale())?;
        Self::new_checked(value, precision)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl Debug for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Price))
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.precision as usize, self.value)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value_str: &str = Deserialize::deserialize(deserializer)?;
        Self::from_str(value_str).map_err(serde::de::Error::custom)
    }
}
