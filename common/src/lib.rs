// Copyright 2026 Tribal Policy Intelligence Team
// This file is part of the packet orchestration subsystem.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

#![forbid(unsafe_code)]
#![deny(dead_code)]

//! Shared data model, error taxonomy, and ambient utilities for the packet
//! orchestration subsystem. Every other crate in the workspace depends on
//! this one; it depends on nothing else in the workspace.

pub mod alias;
pub mod award;
pub mod bill;
pub mod config;
pub mod confidence;
pub mod context;
pub mod critique;
pub mod error;
pub mod fiscal;
pub mod hazard;
pub mod program;
pub mod tribe;
pub mod us_states;
pub mod util;
pub mod variant;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use error::{PacketError, Result};
