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

//! Logging message prefixes used by system components.
//!
//! Components log through the standard `log` facade; the hosting environment
//! installs whichever logger implementation it requires.

/// The receive arrow prefix for inbound messages.
pub const RECV: &str = "<--";

/// The send arrow prefix for outbound messages.
pub const SEND: &str = "-->";

/// The command message prefix.
pub const CMD: &str = "[CMD]";

/// The event message prefix.
pub const EVT: &str = "[EVT]";
