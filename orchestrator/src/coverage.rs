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

//! The run-level coverage report: what got written, what failed, and why.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::awards::AwardCoverage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TribeFailure {
	pub tribe_id: String,
	pub variant: String,
	pub category: String,
	pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageReport {
	pub total_tribes: u32,
	pub tribes_with_awards: u32,
	pub tribes_with_hazard_data: u32,
	pub documents_written: u32,
	pub documents_failed: u32,
	pub failures_by_category: BTreeMap<String, u32>,
	pub tribe_failures: Vec<TribeFailure>,
	pub top_unmatched_recipients: Vec<(String, f64)>,
	pub consortium_award_count: u32,
	pub consortium_obligation_total: f64,
	pub tribes_not_attempted: Vec<String>,
}

impl CoverageReport {
	pub fn new(total_tribes: u32, award_coverage: &AwardCoverage, tribes_with_hazard_data: u32) -> Self {
		Self {
			total_tribes,
			tribes_with_awards: award_coverage.tribes_with_awards,
			tribes_with_hazard_data,
			top_unmatched_recipients: award_coverage
				.top_unmatched
				.iter()
				.map(|u| (u.recipient_name.clone(), u.obligation))
				.collect(),
			consortium_award_count: award_coverage.consortium_count,
			consortium_obligation_total: award_coverage.consortium_obligation_total,
			..Default::default()
		}
	}

	pub fn record_success(&mut self) {
		self.documents_written += 1;
	}

	pub fn record_failure(&mut self, tribe_id: &str, variant: &str, category: &str, detail: &str) {
		self.documents_failed += 1;
		*self.failures_by_category.entry(category.to_string()).or_insert(0) += 1;
		self.tribe_failures.push(TribeFailure {
			tribe_id: tribe_id.to_string(),
			variant: variant.to_string(),
			category: category.to_string(),
			detail: detail.to_string(),
		});
	}

	pub fn record_not_attempted(&mut self, tribe_id: &str) {
		self.tribes_not_attempted.push(tribe_id.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_failure_buckets_by_category() {
		let mut report = CoverageReport::default();
		report.record_failure("tribe_a", "B", "gate-failure", "blocker");
		report.record_failure("tribe_b", "B", "gate-failure", "blocker");
		assert_eq!(report.failures_by_category["gate-failure"], 2);
		assert_eq!(report.documents_failed, 2);
	}
}
