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

use serde::{Deserialize, Serialize};

/// Data domains the confidence scorer evaluates independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceDomain {
	Identity,
	Delegation,
	Funding,
	Hazard,
	Intel,
}

/// Display-only categorical confidence. Numeric scores are computed
/// internally but never surfaced past this boundary -- Tribal Leaders see
/// interpretable levels, not false-precision numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
	High,
	Medium,
	Low,
}

impl std::fmt::Display for ConfidenceLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ConfidenceLevel::High => "HIGH",
			ConfidenceLevel::Medium => "MEDIUM",
			ConfidenceLevel::Low => "LOW",
		};
		write!(f, "{}", s)
	}
}

/// Bucket a composite 0.0-1.0 weighted score into a display level.
pub fn bucket(composite: f64) -> ConfidenceLevel {
	if composite >= 0.80 {
		ConfidenceLevel::High
	} else if composite >= 0.50 {
		ConfidenceLevel::Medium
	} else {
		ConfidenceLevel::Low
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bucket_boundaries() {
		assert_eq!(bucket(0.80), ConfidenceLevel::High);
		assert_eq!(bucket(0.79), ConfidenceLevel::Medium);
		assert_eq!(bucket(0.50), ConfidenceLevel::Medium);
		assert_eq!(bucket(0.49), ConfidenceLevel::Low);
	}
}
