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

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fiscal::window_midpoint;

/// A single federal award as received from the (out-of-scope) scraper
/// collaborator, with the fiscal-year tag injected by the Award Populator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardRecord {
	pub award_id: Option<String>,
	pub recipient_name: String,
	#[serde(default)]
	pub recipient_state: Option<String>,
	pub obligation: f64,
	pub fiscal_year: i32,
	pub program_number: String,
	pub start_date: Option<NaiveDate>,
	#[serde(default)]
	pub description: String,
	pub awarding_agency: String,
}

impl AwardRecord {
	/// Composite fallback key used for deduplication when `award_id` is
	/// absent: recipient name, program number, obligation, and start date
	/// concatenated verbatim (start date renders as an empty string when
	/// absent, which is still deterministic and stable across runs).
	pub fn dedup_key(&self) -> String {
		match &self.award_id {
			Some(id) => id.clone(),
			None => format!(
				"{}||{}||{}||{}",
				self.recipient_name,
				self.program_number,
				self.obligation,
				self.start_date.map(|d| d.to_string()).unwrap_or_default(),
			),
		}
	}
}

/// Coarse trend label derived from comparing the two halves of a Tribe's
/// award window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
	Increasing,
	Decreasing,
	Stable,
	New,
	None,
}

impl std::fmt::Display for Trend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Trend::Increasing => "increasing",
			Trend::Decreasing => "decreasing",
			Trend::Stable => "stable",
			Trend::New => "new",
			Trend::None => "none",
		};
		write!(f, "{}", s)
	}
}

/// Derive the trend label by splitting the fiscal-year window at its
/// midpoint and comparing the two halves' obligation sums. Ratio bands:
/// >1.15x is increasing, <0.85x is decreasing, otherwise stable. Zero
/// total is `None`; a zero first half with positive second half is `New`.
/// Both halves zero with a positive total is treated as `Stable` (the
/// only way this happens is a single-fiscal-year window, where the first
/// half is empty by construction).
pub fn trend_label(per_year: &BTreeMap<String, f64>, start_fy: i32, end_fy: i32) -> Trend {
	let total: f64 = per_year.values().sum();
	if total <= 0.0 {
		return Trend::None;
	}
	let mid = window_midpoint(start_fy, end_fy);
	let (first_half, second_half): (f64, f64) = per_year.iter().fold((0.0, 0.0), |(f, s), (fy, amount)| {
		let fy: i32 = fy.parse().unwrap_or(start_fy);
		if fy < mid {
			(f + amount, s)
		} else {
			(f, s + amount)
		}
	});

	if first_half <= 0.0 {
		return if second_half > 0.0 { Trend::New } else { Trend::Stable };
	}

	let ratio = second_half / first_half;
	if ratio > 1.15 {
		Trend::Increasing
	} else if ratio < 0.85 {
		Trend::Decreasing
	} else {
		Trend::Stable
	}
}

/// Summary of obligations and count for one program number within a
/// Tribe's award cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ProgramSummary {
	pub count: u32,
	pub total: f64,
}

/// Per-Tribe award cache: the flat, deduplicated, matched award list plus
/// derived summaries. One file per Tribe, regenerated whole per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TribeAwardCache {
	pub tribe_id: String,
	pub tribe_name: String,
	pub fiscal_year_start: i32,
	pub fiscal_year_end: i32,
	pub awards: Vec<AwardRecord>,
	pub total_obligation: f64,
	pub count: u32,
	pub per_program: BTreeMap<String, ProgramSummary>,
	pub per_year: BTreeMap<String, f64>,
	pub trend: Trend,
	/// Non-placeholder explanatory note for Tribes with zero matched
	/// awards; `None` once the Tribe has at least one award.
	#[serde(default)]
	pub first_time_applicant_note: Option<String>,
}

impl TribeAwardCache {
	/// Build a cache from a matched, deduplicated award list for a single
	/// Tribe. `fiscal_year_start`/`end` describe the window the populator
	/// queried, independent of which years actually produced awards.
	pub fn build(
		tribe_id: &str,
		tribe_name: &str,
		fiscal_year_start: i32,
		fiscal_year_end: i32,
		mut awards: Vec<AwardRecord>,
	) -> Self {
		awards.sort_by(|a, b| a.dedup_key().cmp(&b.dedup_key()));

		let mut per_program: BTreeMap<String, ProgramSummary> = BTreeMap::new();
		let mut per_year: BTreeMap<String, f64> = BTreeMap::new();
		let mut total_obligation = 0.0;

		for award in &awards {
			total_obligation += award.obligation;
			let entry = per_program.entry(award.program_number.clone()).or_default();
			entry.count += 1;
			entry.total += award.obligation;
			*per_year.entry(award.fiscal_year.to_string()).or_insert(0.0) += award.obligation;
		}

		let trend = trend_label(&per_year, fiscal_year_start, fiscal_year_end);
		let count = awards.len() as u32;
		let first_time_applicant_note = if count == 0 {
			Some(format!(
				"{} has no recorded federal award history in the fiscal year {}-{} window covered by this packet. \
				 This reflects the absence of a matched award in the current data, not an assessment of eligibility.",
				tribe_name, fiscal_year_start, fiscal_year_end
			))
		} else {
			None
		};

		Self {
			tribe_id: tribe_id.to_string(),
			tribe_name: tribe_name.to_string(),
			fiscal_year_start,
			fiscal_year_end,
			awards,
			total_obligation,
			count,
			per_program,
			per_year,
			trend,
			first_time_applicant_note,
		}
	}
}
