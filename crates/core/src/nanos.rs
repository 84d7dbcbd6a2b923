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

//! A UNIX epoch timestamp with nanosecond precision.

use std::{
    fmt::Display,
    ops::{Add, AddAssign},
    str::FromStr,
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Represents a timestamp in nanoseconds since the UNIX epoch.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnixNanos(u64);

impl UnixNanos {
    /// Creates a new [`UnixNanos`] instance.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value as `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the underlying value as `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Returns the underlying value as `f64`.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Returns the timestamp as a timezone-aware `DateTime<Utc>`.
    #[must_use]
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.as_i64())
    }

    /// Returns the timestamp formatted as an ISO 8601 (RFC 3339) string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.to_datetime_utc()
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    /// Returns the result of subtracting `other`, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> u64 {
        self.0.saturating_sub(other.0)
    }
}

impl Display for UnixNanos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UnixNanos {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<UnixNanos> for u64 {
    fn from(value: UnixNanos) -> Self {
        value.0
    }
}

impl FromStr for UnixNanos {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl Add<u64> for UnixNanos {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<u64> for UnixNanos {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl PartialEq<u64> for UnixNanos {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_and_accessors() {
        let nanos = UnixNanos::new(123_456_789);
        assert_eq!(nanos.as_u64(), 123_456_789);
        assert_eq!(nanos.as_i64(), 123_456_789);
    }

    #[rstest]
    fn test_add_u64() {
        let nanos = UnixNanos::from(100) + 50;
        assert_eq!(nanos, UnixNanos::from(150));
    }

    #[rstest]
    fn test_saturating_sub() {
        let later = UnixNanos::from(100);
        let earlier = UnixNanos::from(30);
        assert_eq!(later.saturating_sub(earlier), 70);
        assert_eq!(earlier.saturating_sub(later), 0);
    }

    #[rstest]
    fn test_to_rfc3339_at_epoch() {
        assert_eq!(
            UnixNanos::default().to_rfc3339(),
            "1970-01-01T00:00:00.000000000Z"
        );
    }

    #[rstest]
    fn test_from_str() {
        let nanos: UnixNanos = "1000000000".parse().unwrap();
        assert_eq!(nanos.as_u64(), 1_000_000_000);
        assert!("not-a-number".parse::<UnixNanos>().is_err());
    }
}
