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

pub type Result<T, E = GeoError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GeoError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("shapefile error: {0}")]
	Shapefile(#[from] shapefile::Error),

	#[error("CRS projection error: {0}")]
	Proj(#[from] proj::ProjCreateError),

	#[error("coordinate transform error: {0}")]
	Transform(#[from] proj::ProjError),

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error("feature {feature_id} missing required attribute '{attribute}'")]
	MissingAttribute { feature_id: String, attribute: String },

	#[error("tribal area {0} has zero total area after projection")]
	ZeroArea(String),
}

impl From<GeoError> for packet_common::error::PacketError {
	fn from(e: GeoError) -> Self {
		packet_common::error::PacketError::Geo(e.to_string())
	}
}
