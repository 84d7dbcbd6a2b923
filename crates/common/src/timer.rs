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

//! Time events and their handlers, generated by clock timers.

use std::{fmt::Debug, rc::Rc};

use sentinel_core::{UUID4, UnixNanos};
use ustr::Ustr;

/// Represents a time event occurring at the event timestamp.
#[derive(Clone, Debug)]
pub struct TimeEvent {
    /// The event name (the timer which generated the event).
    pub name: Ustr,
    /// The unique identifier for the event.
    pub event_id: UUID4,
    /// UNIX timestamp (nanoseconds) when the event occurred.
    pub ts_event: UnixNanos,
    /// UNIX timestamp (nanoseconds) when the event was initialized.
    pub ts_init: UnixNanos,
}

impl TimeEvent {
    /// Creates a new [`TimeEvent`] instance.
    #[must_use]
    pub const fn new(name: Ustr, event_id: UUID4, ts_event: UnixNanos, ts_init: UnixNanos) -> Self {
        Self {
            name,
            event_id,
            ts_event,
            ts_init,
        }
    }
}

/// A callback to be invoked when a time event fires.
#[derive(Clone)]
pub struct TimeEventCallback(Rc<dyn Fn(TimeEvent)>);

impl TimeEventCallback {
    /// Invokes the callback with the given `event`.
    pub fn call(&self, event: TimeEvent) {
        (self.0)(event);
    }
}

impl<F: Fn(TimeEvent) + 'static> From<F> for TimeEventCallback {
    fn from(value: F) -> Self {
        Self(Rc::new(value))
    }
}

impl Debug for TimeEventCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(TimeEventCallback)).finish()
    }
}

/// A time event paired with its handling callback.
#[derive(Clone, Debug)]
pub struct TimeEventHandler {
    /// The time event.
    pub event: TimeEvent,
    /// The callback to handle the event.
    pub callback: TimeEventCallback,
}

impl TimeEventHandler {
    /// Creates a new [`TimeEventHandler`] instance.
    #[must_use]
    pub const fn new(event: TimeEvent, callback: TimeEventCallback) -> Self {
        Self { event, callback }
    }

    /// Runs the handler, invoking the callback with the event.
    pub fn run(self) {
        self.callback.call(self.event);
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use rstest::rstest;
    use ustr::Ustr;

    use super::*;

    #[rstest]
    fn test_handler_runs_callback() {
        let fired: Rc<RefCell<Vec<Ustr>>> = Rc::new(RefCell::new(Vec::new()));
        let fired_clone = fired.clone();
        let callback = TimeEventCallback::from(move |event: TimeEvent| {
            fired_clone.borrow_mut().push(event.name);
        });

        let event = TimeEvent::new(
            Ustr::from("TEST_TIMER"),
            UUID4::new(),
            UnixNanos::from(1),
            UnixNanos::from(1),
        );
        TimeEventHandler::new(event, callback).run();

        assert_eq!(fired.borrow().as_slice(), &[Ustr::from("TEST_TIMER")]);
    }
}
