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

//! Datetime constants and conversion functions.

/// The number of nanoseconds in one second.
pub const NANOSECONDS_IN_SECOND: u64 = 1_000_000_000;

/// The number of nanoseconds in one millisecond.
pub const NANOSECONDS_IN_MILLISECOND: u64 = 1_000_000;

/// The number of nanoseconds in one microsecond.
pub const NANOSECONDS_IN_MICROSECOND: u64 = 1_000;

/// Converts seconds to nanoseconds (ns).
#[inline]
#[must_use]
pub const fn secs_to_nanos(secs: u64) -> u64 {
    secs * NANOSECONDS_IN_SECOND
}

/// Converts milliseconds to nanoseconds (ns).
#[inline]
#[must_use]
pub const fn millis_to_nanos(millis: u64) -> u64 {
    millis * NANOSECONDS_IN_MILLISECOND
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0)]
    #[case(1, NANOSECONDS_IN_SECOND)]
    #[case(2, 2_000_000_000)]
    fn test_secs_to_nanos(#[case] secs: u64, #[case] expected: u64) {
        assert_eq!(secs_to_nanos(secs), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, NANOSECONDS_IN_MILLISECOND)]
    #[case(250, 250_000_000)]
    fn test_millis_to_nanos(#[case] millis: u64, #[case] expected: u64) {
        assert_eq!(millis_to_nanos(millis), expected);
    }
}
