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

//! Represents a medium of exchange in a specified denomination.

use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ustr::Ustr;

use crate::enums::CurrencyType;

/// Represents a medium of exchange in a specified denomination with a fixed
/// decimal precision.
#[repr(C)]
#[derive(Clone, Copy, Eq)]
pub struct Currency {
    /// The currency code (ISO 4217 for fiat).
    pub code: Ustr,
    /// The decimal precision of the currency.
    pub precision: u8,
    /// The general type of the currency.
    pub currency_type: CurrencyType,
}

macro_rules! define_currency {
    ($func:ident, $code:literal, $precision:literal, $currency_type:ident) => {
        #[allow(non_snake_case)]
        #[must_use]
        pub fn $func() -> Self {
            Self {
                code: Ustr::from($code),
                precision: $precision,
                currency_type: CurrencyType::$currency_type,
            }
        }
    };
}

impl Currency {
    /// Creates a new [`Currency`] instance.
    #[must_use]
    pub fn new<T: AsRef<str>>(code: T, precision: u8, currency_type: CurrencyType) -> Self {
        Self {
            code: Ustr::from(code.as_ref()),
            precision,
            currency_type,
        }
    }

    /// Returns whether the currency is a fiat currency.
    #[must_use]
    pub fn is_fiat(&self) -> bool {
        self.currency_type == CurrencyType::Fiat
    }

    /// Returns whether the currency is a cryptocurrency.
    #[must_use]
    pub fn is_crypto(&self) -> bool {
        self.currency_type == CurrencyType::Crypto
    }

    define_currency!(AUD, "AUD", 2, Fiat);
    define_currency!(EUR, "EUR", 2, Fiat);
    define_currency!(GBP, "GBP", 2, Fiat);
    define_currency!(JPY, "JPY", 0, Fiat);
    define_currency!(USD, "USD", 2, Fiat);
    define_currency!(BTC, "BTC", 8, Crypto);
    define_currency!(ETH, "ETH", 8, Crypto);
    define_currency!(USDT, "USDT", 8, Crypto);
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUD" => Ok(Self::AUD()),
            "EUR" => Ok(Self::EUR()),
            "GBP" => Ok(Self::GBP()),
            "JPY" => Ok(Self::JPY()),
            "USD" => Ok(Self::USD()),
            "BTC" => Ok(Self::BTC()),
            "ETH" => Ok(Self::ETH()),
            "USDT" => Ok(Self::USDT()),
            _ => anyhow::bail!("unknown currency code '{s}'"),
        }
    }
}

impl From<&str> for Currency {
    fn from(value: &str) -> Self {
        Self::from_str(value).expect("invalid currency code")
    }
}

impl Debug for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}(code={}, precision={}, currency_type={})",
            stringify!(Currency),
            self.code,
            self.precision,
            self.currency_type,
        )
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.code.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: &str = Deserialize::deserialize(deserializer)?;
        Self::from_str(code).map_err(serde::de::Error::custom)
    }
}
