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

//! Area-weighted Tribal-area/county crosswalk. Area in a geographic CRS
//! (lat/lon) is meaningless, and a single equal-area CRS distorts either
//! Alaska or CONUS beyond usability, so Alaska and CONUS are projected
//! and intersected independently, then the results are concatenated.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use geo::{Area, BooleanOps};
use geo_types::{Coord, MultiPolygon};
use packet_common::hazard::AreaWeight;
use proj::Proj;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::shapefile_load::{load_polygon_features, Feature, FieldNames};

const ALASKA_STATE_FIPS: &str = "02";
const GEOGRAPHIC_CRS: &str = "EPSG:4326";
const ALASKA_EQUAL_AREA_CRS: &str = "EPSG:3338";
const CONUS_EQUAL_AREA_CRS: &str = "EPSG:5070";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswalkMetadata {
	pub build_timestamp: DateTime<Utc>,
	pub tribal_area_source: String,
	pub county_source: String,
	pub min_overlap_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crosswalk {
	pub metadata: CrosswalkMetadata,
	pub area_weights: BTreeMap<String, AreaWeight>,
	/// Tribal areas that retained zero counties after the sliver filter;
	/// fallback candidates for the hazard aggregator's relational-CSV or
	/// state-equal-weight path.
	pub zero_coverage_area_ids: Vec<String>,
}

fn reproject(mp: &MultiPolygon<f64>, proj: &Proj) -> Result<MultiPolygon<f64>> {
	use geo::MapCoordsInPlace;
	let mut out = mp.clone();
	let mut transform_err = None;
	out.map_coords_in_place(|c| match proj.convert((c.x, c.y)) {
		Ok((x, y)) => Coord { x, y },
		Err(e) => {
			transform_err.get_or_insert(e);
			c
		}
	});
	if let Some(e) = transform_err {
		return Err(e.into());
	}
	Ok(out)
}

struct Partition {
	tribal: Vec<Feature>,
	counties: Vec<Feature>,
	crs: &'static str,
}

fn partition_by_alaska(tribal: Vec<Feature>, counties: Vec<Feature>) -> (Partition, Partition) {
	let (ak_tribal, conus_tribal): (Vec<_>, Vec<_>) = tribal.into_iter().partition(|f| f.state_fips == ALASKA_STATE_FIPS);
	let (ak_counties, conus_counties): (Vec<_>, Vec<_>) =
		counties.into_iter().partition(|f| f.state_fips == ALASKA_STATE_FIPS);
	(
		Partition { tribal: ak_tribal, counties: ak_counties, crs: ALASKA_EQUAL_AREA_CRS },
		Partition { tribal: conus_tribal, counties: conus_counties, crs: CONUS_EQUAL_AREA_CRS },
	)
}

fn process_partition(
	partition: Partition,
	sliver_filter_fraction: f64,
) -> Result<(BTreeMap<String, AreaWeight>, Vec<String>)> {
	let mut weights = BTreeMap::new();
	let mut zero_coverage = Vec::new();

	if partition.tribal.is_empty() {
		return Ok((weights, zero_coverage));
	}

	let proj = Proj::new_known_crs(GEOGRAPHIC_CRS, partition.crs, None)?;

	let projected_counties: Vec<(String, MultiPolygon<f64>)> = partition
		.counties
		.iter()
		.map(|c| Ok((c.id.clone(), reproject(&c.geometry, &proj)?)))
		.collect::<Result<Vec<_>>>()?;

	for tribal_feature in &partition.tribal {
		let tribal_geom = reproject(&tribal_feature.geometry, &proj)?;
		let tribal_area_total = tribal_geom.unsigned_area();
		if tribal_area_total <= 0.0 {
			zero_coverage.push(tribal_feature.id.clone());
			continue;
		}

		let mut raw: Vec<(String, f64)> = Vec::new();
		for (county_fips, county_geom) in &projected_counties {
			let intersection = tribal_geom.intersection(county_geom);
			let intersection_area = intersection.unsigned_area();
			if intersection_area <= 0.0 {
				continue;
			}
			let raw_weight = intersection_area / tribal_area_total;
			if raw_weight < sliver_filter_fraction {
				continue;
			}
			raw.push((county_fips.clone(), raw_weight));
		}

		if raw.is_empty() {
			zero_coverage.push(tribal_feature.id.clone());
			continue;
		}

		let sum: f64 = raw.iter().map(|(_, w)| *w).sum();
		let renormalized: Vec<(String, f64)> = raw.into_iter().map(|(fips, w)| (fips, w / sum)).collect();

		weights.insert(tribal_feature.id.clone(), AreaWeight { area_id: tribal_feature.id.clone(), county_weights: renormalized });
	}

	Ok((weights, zero_coverage))
}

/// Build the full crosswalk from a Tribal-area shapefile and a county
/// shapefile. `min_overlap_pct` is recorded in the metadata verbatim
/// (expected to equal `sliver_filter_fraction * 100`).
pub fn build_crosswalk(
	tribal_area_path: &Path,
	county_path: &Path,
	tribal_fields: &FieldNames,
	county_fields: &FieldNames,
	sliver_filter_fraction: f64,
	now: DateTime<Utc>,
) -> Result<Crosswalk> {
	let tribal = load_polygon_features(tribal_area_path, tribal_fields)?;
	let counties = load_polygon_features(county_path, county_fields)?;

	let (alaska, conus) = partition_by_alaska(tribal, counties);

	let (alaska_weights, mut zero_coverage) = process_partition(alaska, sliver_filter_fraction)?;
	let (conus_weights, conus_zero) = process_partition(conus, sliver_filter_fraction)?;
	zero_coverage.extend(conus_zero);

	let mut area_weights = alaska_weights;
	area_weights.extend(conus_weights);

	Ok(Crosswalk {
		metadata: CrosswalkMetadata {
			build_timestamp: now,
			tribal_area_source: tribal_area_path.display().to_string(),
			county_source: county_path.display().to_string(),
			min_overlap_pct: sliver_filter_fraction * 100.0,
		},
		area_weights,
		zero_coverage_area_ids: zero_coverage,
	})
}
