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

use std::io;
use thiserror::Error;

pub type Result<T, E = PacketError> = std::result::Result<T, E>;

/// Root error taxonomy for the packet orchestration subsystem, matching the
/// categories in the error handling design: data integrity is fatal at load
/// time, transport and match-miss are survivable, coverage gaps lower
/// confidence rather than aborting, and gate failures withhold a document
/// without aborting the run.
#[derive(Debug, Error)]
pub enum PacketError {
	#[error(transparent)]
	Io(#[from] io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Csv(#[from] csv::Error),

	/// Schema violation, missing required field, duplicate id, malformed
	/// code. Fails loud at load time; the entire run aborts.
	#[error("data integrity error in {artifact}: {detail}")]
	DataIntegrity { artifact: String, detail: String },

	/// Upstream API failure after retries exhausted the circuit breaker.
	#[error("transport error fetching {program_number}/{fiscal_year}: {detail}")]
	Transport { program_number: String, fiscal_year: i32, detail: String },

	/// A recipient name could not be resolved to a Tribe. Not fatal: logged
	/// into the top-unmatched report and the award is dropped from the
	/// per-Tribe cache, but preserved in the coverage report.
	#[error("could not match recipient '{recipient}' to a tribe")]
	MatchMiss { recipient: String },

	/// A Tribe has no awards / no hazard data / no delegation. Survivable;
	/// the affected section renders with an explanatory note and lowered
	/// confidence.
	#[error("coverage gap for tribe {tribe_id}: {detail}")]
	CoverageGap { tribe_id: String, detail: String },

	/// An automated check or a critic emitted a blocker. The document is
	/// not written.
	#[error("quality gate failure for {tribe_id}/{variant}: {detail}")]
	GateFailure { tribe_id: String, variant: String, detail: String },

	/// An artifact larger than the configured size guard was rejected
	/// before parsing.
	#[error("artifact {path} exceeds size guard of {limit_bytes} bytes")]
	ArtifactTooLarge { path: String, limit_bytes: u64 },

	#[error("geospatial error: {0}")]
	Geo(String),

	#[error("document build error: {0}")]
	Document(String),
}

impl PacketError {
	/// Coarse category used to populate the coverage report and to pick the
	/// process exit code in `packet-cli`.
	pub fn category(&self) -> &'static str {
		match self {
			PacketError::DataIntegrity { .. } => "data-integrity",
			PacketError::Transport { .. } => "transport",
			PacketError::MatchMiss { .. } => "match-miss",
			PacketError::CoverageGap { .. } => "coverage-gap",
			PacketError::GateFailure { .. } => "gate-failure",
			PacketError::ArtifactTooLarge { .. } => "data-integrity",
			PacketError::Io(_) => "io",
			PacketError::Json(_) => "data-integrity",
			PacketError::Csv(_) => "data-integrity",
			PacketError::Geo(_) => "data-integrity",
			PacketError::Document(_) => "gate-failure",
		}
	}
}
