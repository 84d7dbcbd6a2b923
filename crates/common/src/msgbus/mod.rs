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

//! A common in-memory `MessageBus` supporting multiple messaging patterns:
//!
//! - Point-to-Point (named endpoints)
//! - Pub/Sub (wildcard topic patterns)
//!
//! The bus is thread-local: all components of a trading node share one bus on
//! one owning thread, per the single-owner concurrency model.

pub mod handler;
pub mod stubs;

use std::{any::Any, cell::RefCell};

use handler::ShareableMessageHandler;
use indexmap::IndexMap;
use ustr::Ustr;

/// An in-memory message bus.
#[derive(Default)]
pub struct MessageBus {
    /// The registered endpoints, in registration order.
    endpoints: IndexMap<Ustr, ShareableMessageHandler>,
    /// The topic subscriptions, in subscription order.
    subscriptions: Vec<Subscription>,
}

#[derive(Clone, Debug)]
struct Subscription {
    pattern: Ustr,
    handler: ShareableMessageHandler,
}

impl std::fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(MessageBus))
            .field("endpoints", &self.endpoints.keys().collect::<Vec<_>>())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

thread_local! {
    static MESSAGE_BUS: RefCell<MessageBus> = RefCell::new(MessageBus::default());
}

/// Registers the `handler` for the `endpoint` address, replacing any existing handler.
pub fn register<T: AsRef<str>>(endpoint: T, handler: ShareableMessageHandler) {
    let endpoint = Ustr::from(endpoint.as_ref());

    log::debug!(
        "Registering endpoint '{endpoint}' with handler ID {}",
        handler.0.id(),
    );

    MESSAGE_BUS.with_borrow_mut(|msgbus| {
        // Updates value if key already exists
        msgbus.endpoints.insert(endpoint, handler);
    });
}

/// Deregisters the handler for the `endpoint` address.
pub fn deregister<T: AsRef<str>>(endpoint: T) {
    let endpoint = Ustr::from(endpoint.as_ref());

    log::debug!("Deregistering endpoint '{endpoint}'");

    MESSAGE_BUS.with_borrow_mut(|msgbus| {
        msgbus.endpoints.shift_remove(&endpoint);
    });
}

/// Returns whether a handler is registered for the `endpoint` address.
#[must_use]
pub fn is_registered<T: AsRef<str>>(endpoint: T) -> bool {
    let endpoint = Ustr::from(endpoint.as_ref());
    MESSAGE_BUS.with_borrow(|msgbus| msgbus.endpoints.contains_key(&endpoint))
}

/// Sends the `message` to the handler registered for the `endpoint` address (if any).
pub fn send<T: AsRef<str>>(endpoint: T, message: &dyn Any) {
    let endpoint = Ustr::from(endpoint.as_ref());
    let handler =
        MESSAGE_BUS.with_borrow(|msgbus| msgbus.endpoints.get(&endpoint).cloned());
    if let Some(handler) = handler {
        handler.0.handle(message);
    }
}

/// Subscribes the `handler` to the `pattern`.
///
/// Patterns match topics literally, with `*` matching any sequence of
/// characters and `?` matching any single character.
pub fn subscribe<T: AsRef<str>>(pattern: T, handler: ShareableMessageHandler) {
    let pattern = Ustr::from(pattern.as_ref());

    log::debug!(
        "Subscribing handler ID {} for pattern '{pattern}'",
        handler.0.id(),
    );

    MESSAGE_BUS.with_borrow_mut(|msgbus| {
        msgbus.subscriptions.push(Subscription { pattern, handler });
    });
}

/// Unsubscribes the handler with `handler_id` from the `pattern`.
pub fn unsubscribe<T: AsRef<str>>(pattern: T, handler_id: Ustr) {
    let pattern = Ustr::from(pattern.as_ref());

    MESSAGE_BUS.with_borrow_mut(|msgbus| {
        msgbus
            .subscriptions
            .retain(|sub| !(sub.pattern == pattern && sub.handler.0.id() == handler_id));
    });
}

/// Publishes the `message` to all handlers subscribed to a pattern matching `topic`.
pub fn publish<T: AsRef<str>>(topic: T, message: &dyn Any) {
    let topic = topic.as_ref();
    log::trace!("Publishing topic '{topic}'");

    let matching: Vec<ShareableMessageHandler> = MESSAGE_BUS.with_borrow(|msgbus| {
        msgbus
            .subscriptions
            .iter()
            .filter(|sub| is_matching(topic, sub.pattern.as_str()))
            .map(|sub| sub.handler.clone())
            .collect()
    });

    for handler in matching {
        handler.0.handle(message);
    }
}

/// Returns whether the `topic` matches the `pattern`.
///
/// The pattern may contain `*` (any sequence of characters) and `?` (any
/// single character); all other characters match literally.
#[must_use]
pub fn is_matching(topic: &str, pattern: &str) -> bool {
    let topic: Vec<char> = topic.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    is_matching_recursive(&topic, &pattern)
}

fn is_matching_recursive(topic: &[char], pattern: &[char]) -> bool {
    match (topic.first(), pattern.first()) {
        (_, None) => topic.is_empty(),
        (_, Some('*')) => {
            is_matching_recursive(topic, &pattern[1..])
                || (!topic.is_empty() && is_matching_recursive(&topic[1..], pattern))
        }
        (Some(_), Some('?')) => is_matching_recursive(&topic[1..], &pattern[1..]),
        (Some(t), Some(p)) => t == p && is_matching_recursive(&topic[1..], &pattern[1..]),
        (None, Some(_)) => false,
    }
}
