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

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chamber {
	Senate,
	House,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legislator {
	pub bioguide_id: String,
	pub name: String,
	pub chamber: Chamber,
	pub state: String,
	#[serde(default)]
	pub district: Option<u32>,
	pub party: String,
	#[serde(default)]
	pub committees: Vec<String>,
}

/// A Tribe's congressional delegation, derived from geographic overlap
/// with state/district plus the at-large rule for Alaska (a single
/// at-large House district covers the entire state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TribeDelegation {
	pub tribe_id: String,
	pub legislators: Vec<Legislator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
	Funding,
	Authorization,
	Administration,
	Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
	Critical,
	High,
	Medium,
	Low,
}

/// A tracked piece of federal legislation relevant to at least one
/// program in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
	/// `{congress}-{type}-{number}`, e.g. `118-hr-1234`.
	pub bill_id: String,
	pub title: String,
	pub status: String,
	pub sponsor_bioguide_id: String,
	#[serde(default)]
	pub cosponsor_bioguide_ids: Vec<String>,
	#[serde(default)]
	pub referred_committees: Vec<String>,
	pub relevance_score: f64,
	pub affected_programs: Vec<String>,
	pub impact_type: ImpactType,
	pub urgency: Urgency,
	pub last_action: String,
	pub last_action_date: NaiveDate,
}

impl Bill {
	/// True if this bill touches any of `program_ids` and at least one of
	/// `delegation`'s bioguide ids sponsored, cosponsored, or sits on a
	/// committee it was referred to -- the filter the Packet Orchestrator
	/// applies before including a bill in a Tribe's context.
	pub fn relevant_to(&self, program_ids: &[String], delegation_bioguide_ids: &[String]) -> bool {
		let touches_program = self.affected_programs.iter().any(|p| program_ids.contains(p));
		let touches_delegation = delegation_bioguide_ids.contains(&self.sponsor_bioguide_id)
			|| self.cosponsor_bioguide_ids.iter().any(|c| delegation_bioguide_ids.contains(c));
		touches_program || touches_delegation
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_bill() -> Bill {
		Bill {
			bill_id: "118-hr-1234".into(),
			title: "Test Act".into(),
			status: "introduced".into(),
			sponsor_bioguide_id: "S000001".into(),
			cosponsor_bioguide_ids: vec![],
			referred_committees: vec![],
			relevance_score: 0.8,
			affected_programs: vec!["93.999".into()],
			impact_type: ImpactType::Funding,
			urgency: Urgency::High,
			last_action: "Referred to committee".into(),
			last_action_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
		}
	}

	#[test]
	fn relevant_via_program_match() {
		let bill = sample_bill();
		assert!(bill.relevant_to(&["93.999".to_string()], &[]));
	}

	#[test]
	fn irrelevant_when_neither_matches() {
		let bill = sample_bill();
		assert!(!bill.relevant_to(&["00.000".to_string()], &["X000000".to_string()]));
	}
}
