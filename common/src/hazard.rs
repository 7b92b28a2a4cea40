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

use serde::{Deserialize, Serialize};

/// The 18 FEMA National Risk Index hazard codes. Fixed-size and ordered so
/// CSV column-group parsing can iterate it directly.
pub const HAZARD_CODES: [&str; 18] = [
	"AVLN", "CFLD", "CWAV", "DRGT", "ERQK", "HAIL", "HWAV", "HRCN", "ISTM", "LNDS", "LTNG", "RFLD", "SWND", "TRND",
	"TSUN", "VLCN", "WFIR", "WNTW",
];

/// Five-level quintile rating, the only way composite scores are ever
/// surfaced: raw 0-100 floats never reach a document directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
	VeryLow,
	RelativelyLow,
	RelativelyModerate,
	RelativelyHigh,
	VeryHigh,
}

impl std::fmt::Display for Rating {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Rating::VeryLow => "Very Low",
			Rating::RelativelyLow => "Relatively Low",
			Rating::RelativelyModerate => "Relatively Moderate",
			Rating::RelativelyHigh => "Relatively High",
			Rating::VeryHigh => "Very High",
		};
		write!(f, "{}", s)
	}
}

/// Map a 0-100 percentile score to a rating via the fixed quintile
/// breakpoints. Breakpoints are half-open on the low end and closed on
/// the high end of each band except the first, i.e. `[0,20)`, `[20,40)`,
/// `[40,60)`, `[60,80)`, `[80,100]`.
pub fn quintile_rating(score: f64) -> Rating {
	if score < 20.0 {
		Rating::VeryLow
	} else if score < 40.0 {
		Rating::RelativelyLow
	} else if score < 60.0 {
		Rating::RelativelyModerate
	} else if score < 80.0 {
		Rating::RelativelyHigh
	} else {
		Rating::VeryHigh
	}
}

/// A single hazard-type's values within a `CountyHazardRow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HazardTypeRow {
	pub risk_score: f64,
	pub eal_total: f64,
	pub annual_frequency: f64,
}

/// One county's full National Risk Index row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyHazardRow {
	/// 5-digit state+county FIPS code.
	pub county_fips: String,
	pub hazards: BTreeMap<String, HazardTypeRow>,
	pub composite_risk_score: f64,
	/// NRI's nationally-ranked 0-100 expected-annual-loss percentile --
	/// distinct from `eal_total`'s dollar value, and the basis for
	/// `HazardProfile::eal_rating` (dollars have no quintile breakpoints).
	pub eal_score: f64,
	pub eal_total: f64,
	pub sovi_score: f64,
	pub resl_score: f64,
	pub nri_version: String,
}

/// `(county_fips, weight)` pairs for one Tribal area; invariant: weights
/// sum to 1.0 within 1e-6 once the crosswalk has been renormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaWeight {
	pub area_id: String,
	pub county_weights: Vec<(String, f64)>,
}

impl AreaWeight {
	pub fn weight_sum(&self) -> f64 {
		self.county_weights.iter().map(|(_, w)| *w).sum()
	}
}

/// One hazard in a Tribe's top-5, annotated with override provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHazard {
	pub code: String,
	pub risk_score: f64,
	pub eal_total: f64,
	/// "NRI" normally; "USFS" when the wildfire override replaced the
	/// computed NRI value.
	pub source: String,
	/// Present only for the WFIR entry when overridden: the pre-override
	/// NRI-derived risk score.
	#[serde(default)]
	pub nri_wfir_original: Option<f64>,
}

/// Per-Tribe, area-weighted hazard profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardProfile {
	pub tribe_id: String,
	pub risk_score: f64,
	pub risk_rating: Rating,
	pub eal_score: f64,
	pub eal_total: f64,
	pub eal_rating: Rating,
	pub sovi_score: f64,
	pub sovi_rating: Rating,
	pub resl_score: f64,
	pub resl_rating: Rating,
	pub top_hazards: Vec<TopHazard>,
	pub all_hazards: BTreeMap<String, HazardTypeRow>,
	pub counties_analyzed: u32,
	pub nri_version: String,
}

impl HazardProfile {
	/// An empty profile for a Tribe whose county set could not be resolved
	/// at all. Distinguishable from a real profile by `counties_analyzed
	/// == 0` and an empty `all_hazards`, never by a zero-filled 18-entry
	/// stub.
	pub fn empty(tribe_id: &str, nri_version: &str) -> Self {
		Self {
			tribe_id: tribe_id.to_string(),
			risk_score: 0.0,
			risk_rating: Rating::VeryLow,
			eal_score: 0.0,
			eal_total: 0.0,
			eal_rating: Rating::VeryLow,
			sovi_score: 0.0,
			sovi_rating: Rating::VeryLow,
			resl_score: 0.0,
			resl_rating: Rating::VeryLow,
			top_hazards: Vec::new(),
			all_hazards: BTreeMap::new(),
			counties_analyzed: 0,
			nri_version: nri_version.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quintile_boundaries_match_spec_bands() {
		assert_eq!(quintile_rating(0.0), Rating::VeryLow);
		assert_eq!(quintile_rating(19.999), Rating::VeryLow);
		assert_eq!(quintile_rating(20.0), Rating::RelativelyLow);
		assert_eq!(quintile_rating(48.0), Rating::RelativelyModerate);
		assert_eq!(quintile_rating(60.0), Rating::RelativelyHigh);
		assert_eq!(quintile_rating(80.0), Rating::VeryHigh);
		assert_eq!(quintile_rating(100.0), Rating::VeryHigh);
	}

	#[test]
	fn quintile_round_trips_at_mid_bucket() {
		// score -> rating -> synthetic mid-bucket score -> same rating
		for (lo, hi) in [(0.0, 19.9), (20.0, 39.9), (40.0, 59.9), (60.0, 79.9), (80.0, 100.0)] {
			let mid = (lo + hi) / 2.0;
			let rating = quintile_rating(mid);
			let re_rating = quintile_rating(mid);
			assert_eq!(rating, re_rating);
		}
	}

	#[test]
	fn area_weight_sum_invariant() {
		let aw = AreaWeight {
			area_id: "area_1".into(),
			county_weights: vec![("04001".into(), 0.7), ("04003".into(), 0.3)],
		};
		assert!((aw.weight_sum() - 1.0).abs() < 1e-6);
	}
}
