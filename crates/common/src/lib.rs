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

//! Common components for the Sentinel risk engine.
//!
//! The `sentinel-common` crate provides the shared machinery the risk path is
//! built on:
//!
//! - An injectable `Clock` trait with a deterministic `TestClock`.
//! - An in-process `MessageBus` supporting point-to-point and pub/sub patterns.
//! - The `Cache` of orders, instruments, positions, accounts, and market data.
//! - Net-direction portfolio queries.
//! - A generic message `Throttler` with buffering and dropping policies.
//! - The execution command messages routed through the risk engine.

#![warn(rustc::all)]
#![deny(nonstandard_style)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cache;
pub mod clock;
pub mod logging;
pub mod messages;
pub mod msgbus;
pub mod portfolio;
pub mod throttler;
pub mod timer;
