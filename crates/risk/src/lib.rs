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

//! Core pre-trade risk management machinery for the Sentinel trading engine.
//!
//! The `sentinel-risk` crate provides the gatekeeper component sitting between
//! strategies and execution:
//!
//! - The [`engine::RiskEngine`] which validates every trading command against
//!   instrument, account, and operator-configured constraints, applies rate
//!   throttling, and either forwards the command to execution or denies it
//!   with a reason.
//! - Position sizing calculation functions sharing the engine's decimal
//!   discipline.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod engine;
pub mod sizing;
