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

//! Rolls county-level National Risk Index rows up to a per-Tribe
//! `HazardProfile` using the crosswalk's area weights, with two fallback
//! tiers for Tribes the crosswalk could not resolve, and the wildfire
//! USFS-override rule layered on top.

use std::collections::BTreeMap;

use packet_common::hazard::{quintile_rating, CountyHazardRow, HazardProfile, HazardTypeRow, Rating, TopHazard, HAZARD_CODES};

const WFIR: &str = "WFIR";
const TOP_HAZARD_COUNT: usize = 5;

/// Resolved county weights for one Tribal area, regardless of which tier
/// produced them.
pub struct ResolvedWeights {
	pub county_weights: Vec<(String, f64)>,
	/// Which resolution tier produced these weights, recorded on the
	/// profile's provenance so a reviewer can see a state-level fallback
	/// was used instead of a real geometric overlap.
	pub tier: WeightTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTier {
	AreaWeighted,
	RelationalEqual,
	StateEqual,
}

/// Resolve county weights for a Tribal area, falling back in order:
/// crosswalk area weights, then equal weights across a relational
/// area-to-county CSV mapping, then equal weights across every county in
/// the Tribe's registered state.
pub fn resolve_weights(
	area_id: &str,
	crosswalk_weights: &BTreeMap<String, Vec<(String, f64)>>,
	relational_fallback: &BTreeMap<String, Vec<String>>,
	state_county_fallback: &BTreeMap<String, Vec<String>>,
	tribe_state: &str,
) -> Option<ResolvedWeights> {
	if let Some(weights) = crosswalk_weights.get(area_id) {
		return Some(ResolvedWeights { county_weights: weights.clone(), tier: WeightTier::AreaWeighted });
	}
	if let Some(counties) = relational_fallback.get(area_id) {
		if !counties.is_empty() {
			let w = 1.0 / counties.len() as f64;
			return Some(ResolvedWeights {
				county_weights: counties.iter().map(|c| (c.clone(), w)).collect(),
				tier: WeightTier::RelationalEqual,
			});
		}
	}
	if let Some(counties) = state_county_fallback.get(tribe_state) {
		if !counties.is_empty() {
			let w = 1.0 / counties.len() as f64;
			return Some(ResolvedWeights {
				county_weights: counties.iter().map(|c| (c.clone(), w)).collect(),
				tier: WeightTier::StateEqual,
			});
		}
	}
	None
}

fn weighted_average(rows: &[(&CountyHazardRow, f64)], extract: impl Fn(&CountyHazardRow) -> f64) -> f64 {
	let weight_sum: f64 = rows.iter().map(|(_, w)| *w).sum();
	if weight_sum <= 0.0 {
		return 0.0;
	}
	rows.iter().map(|(row, w)| extract(row) * w).sum::<f64>() / weight_sum
}

fn weighted_sum(rows: &[(&CountyHazardRow, f64)], extract: impl Fn(&CountyHazardRow) -> f64) -> f64 {
	rows.iter().map(|(row, w)| extract(row) * w).sum()
}

/// Aggregate one Tribe's hazard profile from its resolved county weights
/// and the county hazard table. `wfir_override` carries a
/// USFS-recalculated wildfire risk score when the source data supplies
/// one; the override only takes effect when the Tribe's composite
/// `risk_to_homes` NRI value (carried alongside the override) is
/// positive and the override itself is positive, per the wildfire
/// scenario's rule.
pub fn aggregate_hazard_profile(
	tribe_id: &str,
	resolved: &ResolvedWeights,
	counties: &BTreeMap<String, CountyHazardRow>,
	nri_version: &str,
	wfir_override: Option<(f64, f64)>, // (risk_to_homes, usfs_wfir_score)
) -> HazardProfile {
	let rows: Vec<(&CountyHazardRow, f64)> = resolved
		.county_weights
		.iter()
		.filter_map(|(fips, w)| counties.get(fips).map(|row| (row, *w)))
		.filter(|(_, w)| *w > 0.0)
		.collect();

	if rows.is_empty() {
		return HazardProfile::empty(tribe_id, nri_version);
	}

	let risk_score = weighted_average(&rows, |r| r.composite_risk_score);
	let eal_score = weighted_average(&rows, |r| r.eal_score);
	let eal_total = weighted_sum(&rows, |r| r.eal_total);
	let sovi_score = weighted_average(&rows, |r| r.sovi_score);
	let resl_score = weighted_average(&rows, |r| r.resl_score);

	let mut all_hazards: BTreeMap<String, HazardTypeRow> = BTreeMap::new();
	for code in HAZARD_CODES {
		let hazard_rows: Vec<(&CountyHazardRow, f64)> =
			rows.iter().filter(|(r, _)| r.hazards.contains_key(code)).copied().collect();
		if hazard_rows.is_empty() {
			continue;
		}
		let risk = weighted_average(&hazard_rows, |r| r.hazards.get(code).map(|h| h.risk_score).unwrap_or(0.0));
		let eal = weighted_sum(&hazard_rows, |r| r.hazards.get(code).map(|h| h.eal_total).unwrap_or(0.0));
		let freq = weighted_average(&hazard_rows, |r| r.hazards.get(code).map(|h| h.annual_frequency).unwrap_or(0.0));
		if risk <= 0.0 && eal <= 0.0 {
			// Zero-weighted/zero-valued hazards are dropped rather than
			// carried as noise in the per-hazard table.
			continue;
		}
		all_hazards.insert(code.to_string(), HazardTypeRow { risk_score: risk, eal_total: eal, annual_frequency: freq });
	}

	let mut top_hazards: Vec<TopHazard> = all_hazards
		.iter()
		.map(|(code, row)| TopHazard { code: code.clone(), risk_score: row.risk_score, eal_total: row.eal_total, source: "NRI".to_string(), nri_wfir_original: None })
		.collect();

	if let Some((risk_to_homes, usfs_score)) = wfir_override {
		if risk_to_homes > 0.0 && usfs_score > 0.0 {
			let original = top_hazards.iter().find(|h| h.code == WFIR).map(|h| h.risk_score);
			top_hazards.retain(|h| h.code != WFIR);
			top_hazards.push(TopHazard {
				code: WFIR.to_string(),
				risk_score: usfs_score,
				eal_total: all_hazards.get(WFIR).map(|h| h.eal_total).unwrap_or(0.0),
				source: "USFS".to_string(),
				nri_wfir_original: original,
			});
		}
	}

	top_hazards.sort_by(|a, b| b.risk_score.partial_cmp(&a.risk_score).unwrap().then_with(|| a.code.cmp(&b.code)));
	top_hazards.truncate(TOP_HAZARD_COUNT);

	HazardProfile {
		tribe_id: tribe_id.to_string(),
		risk_score,
		risk_rating: quintile_rating(risk_score),
		eal_score,
		eal_total,
		eal_rating: quintile_rating(eal_score),
		sovi_score,
		sovi_rating: quintile_rating(sovi_score),
		resl_score,
		resl_rating: quintile_rating(resl_score),
		top_hazards,
		all_hazards,
		counties_analyzed: rows.len() as u32,
		nri_version: nri_version.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn county(fips: &str, composite: f64, wfir_risk: f64) -> CountyHazardRow {
		let mut hazards = BTreeMap::new();
		hazards.insert(WFIR.to_string(), HazardTypeRow { risk_score: wfir_risk, eal_total: 1000.0, annual_frequency: 0.1 });
		hazards.insert("RFLD".to_string(), HazardTypeRow { risk_score: 10.0, eal_total: 500.0, annual_frequency: 0.05 });
		CountyHazardRow {
			county_fips: fips.to_string(),
			hazards,
			composite_risk_score: composite,
			eal_score: composite,
			eal_total: 1500.0,
			sovi_score: 40.0,
			resl_score: 55.0,
			nri_version: "2024".to_string(),
		}
	}

	#[test]
	fn weighted_average_composite_matches_spec_formula() {
		let mut counties = BTreeMap::new();
		counties.insert("04001".to_string(), county("04001", 80.0, 20.0));
		counties.insert("04003".to_string(), county("04003", 20.0, 20.0));
		let resolved = ResolvedWeights {
			county_weights: vec![("04001".to_string(), 0.75), ("04003".to_string(), 0.25)],
			tier: WeightTier::AreaWeighted,
		};
		let profile = aggregate_hazard_profile("tribe_1", &resolved, &counties, "2024", None);
		let expected = 80.0 * 0.75 + 20.0 * 0.25;
		assert!((profile.risk_score - expected).abs() < 1e-6);
	}

	#[test]
	fn empty_weights_yield_empty_profile() {
		let counties = BTreeMap::new();
		let resolved = ResolvedWeights { county_weights: vec![], tier: WeightTier::StateEqual };
		let profile = aggregate_hazard_profile("tribe_2", &resolved, &counties, "2024", None);
		assert_eq!(profile.counties_analyzed, 0);
		assert!(profile.all_hazards.is_empty());
	}

	#[test]
	fn wildfire_override_replaces_nri_value_and_preserves_original() {
		let mut counties = BTreeMap::new();
		counties.insert("04001".to_string(), county("04001", 50.0, 15.0));
		let resolved = ResolvedWeights { county_weights: vec![("04001".to_string(), 1.0)], tier: WeightTier::AreaWeighted };
		let profile = aggregate_hazard_profile("tribe_3", &resolved, &counties, "2024", Some((5.0, 62.0)));
		let wfir = profile.top_hazards.iter().find(|h| h.code == WFIR).expect("wfir present");
		assert_eq!(wfir.source, "USFS");
		assert_eq!(wfir.risk_score, 62.0);
		assert_eq!(wfir.nri_wfir_original, Some(15.0));
	}

	#[test]
	fn wildfire_override_ignored_when_risk_to_homes_is_zero() {
		let mut counties = BTreeMap::new();
		counties.insert("04001".to_string(), county("04001", 50.0, 15.0));
		let resolved = ResolvedWeights { county_weights: vec![("04001".to_string(), 1.0)], tier: WeightTier::AreaWeighted };
		let profile = aggregate_hazard_profile("tribe_4", &resolved, &counties, "2024", Some((0.0, 62.0)));
		let wfir = profile.top_hazards.iter().find(|h| h.code == WFIR).expect("wfir present");
		assert_eq!(wfir.source, "NRI");
		assert_eq!(wfir.risk_score, 15.0);
	}

	#[test]
	fn s4_area_weighted_aggregation() {
		let mut counties = BTreeMap::new();
		counties.insert("countyA".to_string(), county("countyA", 60.0, 0.0));
		counties.insert("countyB".to_string(), county("countyB", 20.0, 0.0));
		counties.get_mut("countyA").unwrap().eal_total = 1_000_000.0;
		counties.get_mut("countyB").unwrap().eal_total = 500_000.0;
		let resolved = ResolvedWeights {
			county_weights: vec![("countyA".to_string(), 0.7), ("countyB".to_string(), 0.3)],
			tier: WeightTier::AreaWeighted,
		};
		let profile = aggregate_hazard_profile("tribe_s4", &resolved, &counties, "2024", None);
		assert!((profile.risk_score - 48.0).abs() < 1e-9);
		assert_eq!(profile.risk_rating, Rating::RelativelyModerate);
		assert!((profile.eal_total - 850_000.0).abs() < 1e-6);
	}

	#[test]
	fn s5_usfs_wildfire_override() {
		let mut counties = BTreeMap::new();
		counties.insert("countyA".to_string(), county("countyA", 50.0, 30.0));
		let resolved = ResolvedWeights { county_weights: vec![("countyA".to_string(), 1.0)], tier: WeightTier::AreaWeighted };
		let profile = aggregate_hazard_profile("tribe_s5", &resolved, &counties, "2024", Some((75.0, 75.0)));
		let wfir = profile.top_hazards.first().expect("at least one top hazard");
		assert_eq!(wfir.code, WFIR);
		assert_eq!(wfir.risk_score, 75.0);
		assert_eq!(wfir.source, "USFS");
		assert_eq!(wfir.nri_wfir_original, Some(30.0));
	}

	#[test]
	fn resolve_weights_falls_back_in_tier_order() {
		let crosswalk: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
		let mut relational: BTreeMap<String, Vec<String>> = BTreeMap::new();
		relational.insert("area_x".to_string(), vec!["04001".to_string(), "04003".to_string()]);
		let state_fallback: BTreeMap<String, Vec<String>> = BTreeMap::new();

		let resolved = resolve_weights("area_x", &crosswalk, &relational, &state_fallback, "AZ").expect("resolved");
		assert_eq!(resolved.tier, WeightTier::RelationalEqual);
		assert_eq!(resolved.county_weights.len(), 2);
		assert!((resolved.county_weights[0].1 - 0.5).abs() < 1e-9);
	}
}
