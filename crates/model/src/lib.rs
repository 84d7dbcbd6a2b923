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

//! The trading domain model for the Sentinel risk engine.
//!
//! The `sentinel-model` crate defines the value types, identifiers, entities,
//! and events which flow through the pre-trade risk path:
//!
//! - Identifiers such as `TraderId`, `InstrumentId`, and `ClientOrderId`.
//! - Decimal-backed value types (`Price`, `Quantity`, `Money`, `Currency`).
//! - The `Order` and `OrderList` entities referenced by trading commands.
//! - Instrument definitions with precision and trade-size constraints.
//! - Cash and margin account variants with balance queries.
//! - Market data ticks used for risk assessment pricing.
//! - The order and risk events emitted by the risk engine.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod accounts;
pub mod data;
pub mod enums;
pub mod events;
pub mod identifiers;
pub mod instruments;
pub mod orders;
pub mod position;
pub mod types;
