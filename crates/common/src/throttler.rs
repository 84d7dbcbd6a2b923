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

//! Message throttling and rate limiting functionality.
//!
//! The throttler admits messages while the trailing interval has capacity and
//! otherwise either drops them (when a drop handler is configured) or buffers
//! them for replay in arrival order once the window permits.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt::Debug,
    rc::{Rc, Weak},
    str::FromStr,
};

use sentinel_core::{
    UnixNanos,
    correctness::{FAILED, check_positive_u64, check_positive_usize},
    datetime::{NANOSECONDS_IN_SECOND, secs_to_nanos},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ustr::Ustr;

use crate::{
    clock::Clock,
    timer::{TimeEvent, TimeEventCallback},
};

/// Represents a throttling limit per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// The maximum number of messages within the interval.
    pub limit: usize,
    /// The trailing interval in nanoseconds.
    pub interval_ns: u64,
}

/// The error type for parsing a [`RateLimit`] from a rate string.
#[derive(Debug, Error)]
#[error("invalid rate limit string '{0}', expected '<limit>/HH:MM:SS'")]
pub struct RateLimitParseError(String);

impl RateLimit {
    /// Creates a new [`RateLimit`] instance.
    #[must_use]
    pub const fn new(limit: usize, interval_ns: u64) -> Self {
        Self { limit, interval_ns }
    }

    /// Creates a new [`RateLimit`] instance with a rate of 100 per second.
    #[must_use]
    pub const fn default_rate() -> Self {
        Self::new(100, NANOSECONDS_IN_SECOND)
    }
}

impl FromStr for RateLimit {
    type Err = RateLimitParseError;

    /// Parses a rate string of the form `"<limit>/HH:MM:SS"`, e.g. `"100/00:00:01"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || RateLimitParseError(s.to_string());

        let (limit_part, interval_part) = s.split_once('/').ok_or_else(error)?;
        let limit: usize = limit_part.trim().parse().map_err(|_| error())?;

        let fields: Vec<&str> = interval_part.trim().split(':').collect();
        if fields.len() != 3 {
            return Err(error());
        }
        let hours: u64 = fields[0].parse().map_err(|_| error())?;
        let minutes: u64 = fields[1].parse().map_err(|_| error())?;
        let seconds: u64 = fields[2].parse().map_err(|_| error())?;
        let interval_ns = secs_to_nanos(hours * 3600 + minutes * 60 + seconds);

        if limit == 0 || interval_ns == 0 {
            return Err(error());
        }

        Ok(Self::new(limit, interval_ns))
    }
}

/// Throttler rate limits messages by dropping or buffering them.
///
/// Messages of type `T` are passed to the `output_send` callback when
/// admitted, or to the `output_drop` callback when rejected (dropping
/// policy); with no drop callback the throttler buffers rejected messages
/// and replays them in arrival order as the window frees (buffering policy).
pub struct Throttler<T> {
    /// The number of messages received.
    pub recv_count: usize,
    /// The number of messages sent.
    pub sent_count: usize,
    /// Whether the throttler is currently limiting the message rate.
    pub is_limiting: bool,
    /// The maximum number of messages that can be sent within the interval.
    pub limit: usize,
    /// The buffer of messages to be sent.
    pub buffer: VecDeque<T>,
    /// The timestamps of the sent messages.
    pub timestamps: VecDeque<UnixNanos>,
    /// The clock used to keep track of time.
    pub clock: Rc<RefCell<dyn Clock>>,
    interval: u64,
    timer_name: Ustr,
    output_send: Box<dyn Fn(T)>,
    output_drop: Option<Box<dyn Fn(T)>>,
    self_ref: Weak<RefCell<Self>>,
}

impl<T> Debug for Throttler<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Throttler))
            .field("recv_count", &self.recv_count)
            .field("sent_count", &self.sent_count)
            .field("is_limiting", &self.is_limiting)
            .field("limit", &self.limit)
            .field("buffer", &self.buffer)
            .field("timestamps", &self.timestamps)
            .field("interval", &self.interval)
            .field("timer_name", &self.timer_name)
            .finish()
    }
}

impl<T: 'static> Throttler<T> {
    /// Creates a new shared [`Throttler`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate limit is zero or the interval is not positive.
    pub fn new_checked(
        rate: RateLimit,
        clock: Rc<RefCell<dyn Clock>>,
        timer_name: String,
        output_send: Box<dyn Fn(T)>,
        output_drop: Option<Box<dyn Fn(T)>>,
    ) -> anyhow::Result<Rc<RefCell<Self>>> {
        check_positive_usize(rate.limit, stringify!(rate.limit))?;
        check_positive_u64(rate.interval_ns, stringify!(rate.interval_ns))?;

        let throttler = Rc::new(RefCell::new(Self {
            recv_count: 0,
            sent_count: 0,
            is_limiting: false,
            limit: rate.limit,
            buffer: VecDeque::new(),
            timestamps: VecDeque::with_capacity(rate.limit),
            clock,
            interval: rate.interval_ns,
            timer_name: Ustr::from(&timer_name),
            output_send,
            output_drop,
            self_ref: Weak::new(),
        }));
        throttler.borrow_mut().self_ref = Rc::downgrade(&throttler);
        Ok(throttler)
    }

    /// Creates a new shared [`Throttler`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the rate limit is zero or the interval is not positive.
    #[must_use]
    pub fn new(
        rate: RateLimit,
        clock: Rc<RefCell<dyn Clock>>,
        timer_name: String,
        output_send: Box<dyn Fn(T)>,
        output_drop: Option<Box<dyn Fn(T)>>,
    ) -> Rc<RefCell<Self>> {
        Self::new_checked(rate, clock, timer_name, output_send, output_drop).expect(FAILED)
    }

    /// Returns the configured trailing interval in nanoseconds.
    #[must_use]
    pub const fn interval_ns(&self) -> u64 {
        self.interval
    }

    /// Sends `msg` through the throttler: admitted immediately when the
    /// trailing window has capacity, otherwise dropped or buffered per the
    /// configured policy.
    pub fn send(&mut self, msg: T) {
        self.recv_count += 1;

        if self.is_limiting || self.delta_next() > 0 {
            self.limit_msg(msg);
        } else {
            self.send_msg(msg);
        }
    }

    /// Time delta in nanoseconds until the next message can be sent.
    #[must_use]
    pub fn delta_next(&self) -> u64 {
        match self.timestamps.get(self.limit - 1) {
            Some(ts) => {
                let diff = self.clock.borrow().timestamp_ns().saturating_sub(*ts);
                self.interval.saturating_sub(diff)
            }
            None => 0,
        }
    }

    /// Resets the throttler which clears internal state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.recv_count = 0;
        self.sent_count = 0;
        self.is_limiting = false;
        self.timestamps.clear();
    }

    /// Fractional value of the rate limit consumed in the current interval.
    #[must_use]
    pub fn used(&self) -> f64 {
        if self.timestamps.is_empty() {
            return 0.0;
        }

        let now = self.clock.borrow().timestamp_ns().as_i64();
        let interval_start = now - self.interval as i64;

        let messages_in_current_interval = self
            .timestamps
            .iter()
            .take_while(|ts| ts.as_i64() > interval_start)
            .count();

        (messages_in_current_interval as f64) / (self.limit as f64)
    }

    /// Number of messages queued in the buffer.
    #[must_use]
    pub fn qsize(&self) -> usize {
        self.buffer.len()
    }

    fn send_msg(&mut self, msg: T) {
        let now = self.clock.borrow().timestamp_ns();

        if self.timestamps.len() >= self.limit {
            self.timestamps.pop_back();
        }
        self.timestamps.push_front(now);

        self.sent_count += 1;
        (self.output_send)(msg);
    }

    fn limit_msg(&mut self, msg: T) {
        let callback = if self.output_drop.is_none() {
            self.buffer.push_front(msg);
            log::debug!("Buffering {}", self.buffer.len());
            self.process_callback()
        } else {
            log::debug!("Dropping");
            if let Some(drop) = &self.output_drop {
                drop(msg);
            }
            self.resume_callback()
        };
        if !self.is_limiting {
            log::debug!("Limiting");
            self.set_timer(callback);
            self.is_limiting = true;
        }
    }

    /// Sets a time alert to fire once the window frees.
    ///
    /// # Panics
    ///
    /// Panics if setting the time alert on the internal clock fails.
    fn set_timer(&mut self, callback: TimeEventCallback) {
        let delta = self.delta_next();
        let mut clock = self.clock.borrow_mut();
        if clock.timer_exists(self.timer_name.as_str()) {
            clock.cancel_timer(self.timer_name.as_str());
        }
        let alert_ts = clock.timestamp_ns() + delta;

        clock
            .set_time_alert_ns(self.timer_name.as_str(), alert_ts, Some(callback), None)
            .expect(FAILED);
    }

    fn process_callback(&self) -> TimeEventCallback {
        let throttler = self.self_ref.clone();
        TimeEventCallback::from(move |_event: TimeEvent| {
            if let Some(throttler) = throttler.upgrade() {
                Throttler::process_buffer(&throttler);
            }
        })
    }

    fn resume_callback(&self) -> TimeEventCallback {
        let throttler = self.self_ref.clone();
        TimeEventCallback::from(move |_event: TimeEvent| {
            if let Some(throttler) = throttler.upgrade() {
                throttler.borrow_mut().is_limiting = false;
            }
        })
    }

    /// Replays buffered messages in arrival order while the window permits;
    /// re-arms the timer when the limit is hit with messages still buffered.
    fn process_buffer(throttler: &Rc<RefCell<Self>>) {
        let mut throttler = throttler.borrow_mut();
        while let Some(msg) = throttler.buffer.pop_back() {
            throttler.send_msg(msg);

            if !throttler.buffer.is_empty() && throttler.delta_next() > 0 {
                throttler.is_limiting = true;
                let callback = throttler.process_callback();
                throttler.set_timer(callback);
                return;
            }
        }

        throttler.is_limiting = false;
    }
}
