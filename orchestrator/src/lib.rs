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

#![deny(dead_code)]

//! Award Populator, Relevance Filter, Confidence Scorer, Packet
//! Orchestrator, Document Builder, and Quality Gate -- everything that
//! turns loaded data plus a Tribal registry into written, gated office
//! documents.

pub mod awards;
pub mod confidence;
pub mod coverage;
pub mod document;
pub mod error;
pub mod logger;
pub mod orchestrator;
pub mod quality_gate;
pub mod relevance;

pub use coverage::CoverageReport;
pub use error::{OrchestratorError, Result};
pub use orchestrator::{run_packet_generation, RunInputs};
