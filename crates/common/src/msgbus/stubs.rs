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

//! Message bus stubs for testing.

use std::{any::Any, cell::RefCell, rc::Rc};

use sentinel_core::UUID4;
use ustr::Ustr;

use crate::msgbus::handler::{MessageHandler, ShareableMessageHandler};

/// A handler which saves every message of type `T` it receives.
pub struct MessageSavingHandler<T> {
    id: Ustr,
    messages: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + 'static> MessageHandler for MessageSavingHandler<T> {
    fn id(&self) -> Ustr {
        self.id
    }

    fn handle(&self, message: &dyn Any) {
        match message.downcast_ref::<T>() {
            Some(message) => self.messages.borrow_mut().push(message.clone()),
            None => panic!("MessageSavingHandler: unexpected message type"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creates a message saving handler for messages of type `T`.
#[must_use]
pub fn get_message_saving_handler<T: Clone + 'static>(id: Option<Ustr>) -> ShareableMessageHandler {
    let id = id.unwrap_or_else(|| Ustr::from(&UUID4::new().to_string()));
    ShareableMessageHandler(Rc::new(MessageSavingHandler::<T> {
        id,
        messages: Rc::new(RefCell::new(Vec::new())),
    }))
}

/// Returns the messages saved by a [`MessageSavingHandler`].
///
/// # Panics
///
/// Panics if `handler` is not a `MessageSavingHandler<T>`.
#[must_use]
pub fn get_saved_messages<T: Clone + 'static>(handler: ShareableMessageHandler) -> Vec<T> {
    let handler = handler
        .0
        .as_any()
        .downcast_ref::<MessageSavingHandler<T>>()
        .expect("handler was not a MessageSavingHandler of the expected type");
    handler.messages.borrow().clone()
}
