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

//! An injectable clock abstraction with a deterministic test implementation.
//!
//! Components never read wall-clock time directly; all timestamps and timers
//! come through a [`Clock`] so tests can simulate elapsed time exactly.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
};

use sentinel_core::{UUID4, UnixNanos, correctness::check_valid_string};
use ustr::Ustr;

use crate::timer::{TimeEvent, TimeEventCallback, TimeEventHandler};

/// Represents a type of clock.
///
/// # Notes
///
/// An active timer is one which has not yet fired.
pub trait Clock: Debug {
    /// Returns the current UNIX timestamp in nanoseconds (ns).
    fn timestamp_ns(&self) -> UnixNanos;

    /// Returns the names of active timers in the clock.
    fn timer_names(&self) -> Vec<&str>;

    /// Returns the count of active timers in the clock.
    fn timer_count(&self) -> usize;

    /// Returns whether a timer with `name` is active in the clock.
    fn timer_exists(&self, name: &str) -> bool;

    /// Registers a default event handler for the clock. If a timer does not
    /// have an event handler, then this handler is used.
    fn register_default_handler(&mut self, callback: TimeEventCallback);

    /// Sets a timer to alert at the specified time. The optional callback is
    /// used to handle the generated event.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is invalid, or no callback can be resolved
    /// for the alert.
    fn set_time_alert_ns(
        &mut self,
        name: &str,
        alert_time_ns: UnixNanos,
        callback: Option<TimeEventCallback>,
        allow_past: Option<bool>,
    ) -> anyhow::Result<()>;

    /// Cancels the timer with `name`.
    fn cancel_timer(&mut self, name: &str);

    /// Cancels all timers.
    fn cancel_timers(&mut self);

    /// Resets the clock by clearing its internal state.
    fn reset(&mut self);
}

/// A static test clock.
///
/// Stores the current timestamp internally which can be advanced; alert timers
/// fire deterministically as the clock is advanced.
#[derive(Debug, Default)]
pub struct TestClock {
    time: UnixNanos,
    // Use btree map to ensure stable ordering when scanning for timers in `advance_time`
    timers: BTreeMap<Ustr, UnixNanos>,
    default_callback: Option<TimeEventCallback>,
    callbacks: HashMap<Ustr, TimeEventCallback>,
}

impl TestClock {
    /// Creates a new [`TestClock`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the internal clock time to `to_time_ns`.
    pub fn set_time(&mut self, to_time_ns: UnixNanos) {
        self.time = to_time_ns;
    }

    /// Advances the internal clock to `to_time_ns` and optionally sets the
    /// clock to that time, returning any [`TimeEvent`]s generated by timers
    /// which fired during the advance (in firing order).
    ///
    /// # Panics
    ///
    /// Panics if `to_time_ns` is less than the current internal clock time.
    pub fn advance_time(&mut self, to_time_ns: UnixNanos, set_time: bool) -> Vec<TimeEvent> {
        // Time should be non-decreasing
        assert!(
            to_time_ns >= self.time,
            "`to_time_ns` {to_time_ns} was < `self.time` {}",
            self.time,
        );

        if set_time {
            self.time = to_time_ns;
        }

        let fired: Vec<(Ustr, UnixNanos)> = self
            .timers
            .iter()
            .filter(|(_, alert_ts)| **alert_ts <= to_time_ns)
            .map(|(name, alert_ts)| (*name, *alert_ts))
            .collect();

        let mut events: Vec<TimeEvent> = Vec::with_capacity(fired.len());
        for (name, alert_ts) in fired {
            self.timers.remove(&name);
            events.push(TimeEvent::new(name, UUID4::new(), alert_ts, alert_ts));
        }

        events.sort_by(|a, b| a.ts_event.cmp(&b.ts_event));
        events
    }

    /// Matches [`TimeEvent`]s with their corresponding handlers from the
    /// internal callback registry, falling back to the default callback.
    ///
    /// # Panics
    ///
    /// Panics if an event has no registered callback and no default callback is set.
    #[must_use]
    pub fn match_handlers(&self, events: Vec<TimeEvent>) -> Vec<TimeEventHandler> {
        events
            .into_iter()
            .map(|event| {
                let callback = self.callbacks.get(&event.name).cloned().unwrap_or_else(|| {
                    self.default_callback
                        .clone()
                        .expect("Default callback should exist")
                });
                TimeEventHandler::new(event, callback)
            })
            .collect()
    }
}

impl Clock for TestClock {
    fn timestamp_ns(&self) -> UnixNanos {
        self.time
    }

    fn timer_names(&self) -> Vec<&str> {
        self.timers.keys().map(Ustr::as_str).collect()
    }

    fn timer_count(&self) -> usize {
        self.timers.len()
    }

    fn timer_exists(&self, name: &str) -> bool {
        self.timers.contains_key(&Ustr::from(name))
    }

    fn register_default_handler(&mut self, callback: TimeEventCallback) {
        self.default_callback = Some(callback);
    }

    fn set_time_alert_ns(
        &mut self,
        name: &str,
        alert_time_ns: UnixNanos,
        callback: Option<TimeEventCallback>,
        allow_past: Option<bool>,
    ) -> anyhow::Result<()> {
        check_valid_string(name, stringify!(name))?;

        let name = Ustr::from(name);
        let allow_past = allow_past.unwrap_or(true);

        if callback.is_none()
            && !self.callbacks.contains_key(&name)
            && self.default_callback.is_none()
        {
            anyhow::bail!("No callbacks provided");
        }

        if let Some(callback) = callback {
            self.callbacks.insert(name, callback);
        }

        // This allows reusing a time alert without updating the callback
        self.cancel_timer(name.as_str());

        let mut alert_time_ns = alert_time_ns;
        if alert_time_ns < self.time {
            if allow_past {
                alert_time_ns = self.time;
            } else {
                anyhow::bail!(
                    "Timer '{name}' alert time {alert_time_ns} was in the past (current time is {})",
                    self.time,
                );
            }
        }

        self.timers.insert(name, alert_time_ns);
        Ok(())
    }

    fn cancel_timer(&mut self, name: &str) {
        self.timers.remove(&Ustr::from(name));
    }

    fn cancel_timers(&mut self) {
        self.timers.clear();
    }

    fn reset(&mut self) {
        self.time = UnixNanos::default();
        self.timers.clear();
        self.callbacks.clear();
    }
}
