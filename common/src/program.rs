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

/// Continued-implementation status. `status_modifier` is the fixed bump
/// or penalty applied to relevance scoring; secure, well-funded programs
/// should not crowd out at-risk ones a Tribe needs to be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramStatus {
	Secure,
	Stable,
	StableButVulnerable,
	AtRisk,
	Uncertain,
	Flagged,
	Terminated,
}

impl ProgramStatus {
	/// Additive modifier in the relevance score, roughly proportional to
	/// how time-sensitive it is for a Tribe to know about this program
	/// right now. Terminated programs are never excluded outright (a
	/// Tribe may still need the wind-down facts) but rank lowest.
	pub fn relevance_modifier(&self) -> f64 {
		match self {
			ProgramStatus::AtRisk => 1.0,
			ProgramStatus::Flagged => 0.9,
			ProgramStatus::Uncertain => 0.6,
			ProgramStatus::StableButVulnerable => 0.4,
			ProgramStatus::Stable => 0.2,
			ProgramStatus::Secure => 0.1,
			ProgramStatus::Terminated => 0.0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
	Direct,
	Competitive,
	FormulaBased,
	SetAside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingType {
	Grant,
	Loan,
	CooperativeAgreement,
	DirectService,
	TaxCredit,
}

/// A federal program in the inventory, as defined in the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
	pub program_id: String,
	pub name: String,
	pub agency: String,
	pub program_number: String,
	/// Continued-implementation score, 0-100.
	pub ci_score: f64,
	pub status: ProgramStatus,
	#[serde(default)]
	pub hazard_tags: Vec<String>,
	#[serde(default)]
	pub ecoregion_tags: Vec<String>,
	pub access_type: AccessType,
	pub funding_type: FundingType,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn terminated_never_outranks_at_risk() {
		assert!(ProgramStatus::AtRisk.relevance_modifier() > ProgramStatus::Terminated.relevance_modifier());
	}
}
