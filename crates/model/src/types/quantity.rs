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

//! Represents a quantity with a non-negative value.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use sentinel_core::correctness::FAILED;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The maximum supported decimal precision for quantities.
pub const QUANTITY_MAX_PRECISION: u8 = 16;

/// Represents a quantity with a non-negative value, backed by an
/// arbitrary-precision decimal.
///
/// Capable of storing either a whole number (no decimal places) of "shares"
/// (instruments denominated in whole units), or a decimal (instruments
/// denominated in fractional units).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Quantity {
    value: Decimal,
    /// The decimal precision of the quantity.
    pub precision: u8,
}

impl Quantity {
    /// Creates a new [`Quantity`] instance.
    ///
    /// The `value` is quantized to `precision` decimal places.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is negative or `precision` exceeds
    /// [`QUANTITY_MAX_PRECISION`].
    pub fn new_checked(value: Decimal, precision: u8) -> anyhow::Result<Self> {
        if precision > QUANTITY_MAX_PRECISION {
            anyhow::bail!(
                "invalid `precision` exceeded maximum {QUANTITY_MAX_PRECISION}, was {precision}"
            );
        }
        if value < Decimal::ZERO {
            anyhow::bail!("invalid `value` negative, was {value}");
        }
        Ok(Self {
            value: value.round_dp(u32::from(precision)),
            precision,
        })
    }

    /// Creates a new [`Quantity`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative or `precision` exceeds [`QUANTITY_MAX_PRECISION`].
    #[must_use]
    pub fn new(value: Decimal, precision: u8) -> Self {
        Self::new_checked(value, precision).expect(FAILED)
    }

    /// Creates a new [`Quantity`] instance with a value of zero.
    #[must_use]
    pub fn zero(precision: u8) -> Self {
        Self::new(Decimal::ZERO, precision)
    }

    /// Returns the value as a `Decimal`.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns whether the quantity is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Returns whether the quantity is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl FromStr for Quantity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s
            .parse()
            .map_err(|e| anyhow::anyhow!("Error parsing `Quantity` from '{s}': {e}"))?;
        let precision = u8::try_from(value.scale())?;
        Self::new_checked(value, precision)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect(FAILED)
    }
}

impl Debug for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(Quantity))
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.*}", self.precision as usize, self.value)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value_str: &str = Deserialize::deserialize(deserializer)?;
        Self::from_str(value_str).map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    fn test_from_str_infers_precision() {
        let quantity = Quantity::from("0.001");
        assert_eq!(quantity.precision, 3);
        assert_eq!(quantity.as_decimal(), dec!(0.001));
    }

    #[rstest]
    fn test_negative_value_errors() {
        assert!(Quantity::new_checked(dec!(-1), 0).is_err());
    }

    #[rstest]
    fn test_zero() {
        let quantity = Quantity::zero(0);
        assert!(quantity.is_zero());
        assert!(!quantity.is_positive());
    }

    #[rstest]
    fn test_ordering() {
        assert!(Quantity::from("2") > Quantity::from("1.5"));
        assert_eq!(Quantity::from("1"), Quantity::from("1.0"));
    }
}
