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

use thiserror::Error;

pub type Result<T, E = OrchestratorError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum OrchestratorError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("transport error fetching {program_number}/{fiscal_year}: {detail}")]
	Transport { program_number: String, fiscal_year: i32, detail: String },

	#[error("circuit breaker open for {program_number}/{fiscal_year}")]
	CircuitOpen { program_number: String, fiscal_year: i32 },

	#[error("document build error: {0}")]
	Document(String),

	#[error("quality gate failure for {tribe_id}/{variant}: {detail}")]
	GateFailure { tribe_id: String, variant: String, detail: String },
}

impl From<OrchestratorError> for packet_common::error::PacketError {
	fn from(e: OrchestratorError) -> Self {
		match e {
			OrchestratorError::Transport { program_number, fiscal_year, detail } => {
				packet_common::error::PacketError::Transport { program_number, fiscal_year, detail }
			}
			OrchestratorError::CircuitOpen { program_number, fiscal_year } => {
				packet_common::error::PacketError::Transport {
					program_number,
					fiscal_year,
					detail: "circuit breaker open".to_string(),
				}
			}
			OrchestratorError::Document(detail) => packet_common::error::PacketError::Document(detail),
			OrchestratorError::GateFailure { tribe_id, variant, detail } => {
				packet_common::error::PacketError::GateFailure { tribe_id, variant, detail }
			}
			OrchestratorError::Io(e) => packet_common::error::PacketError::Io(e),
			OrchestratorError::Json(e) => packet_common::error::PacketError::Json(e),
		}
	}
}
