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

//! Shapefile ingestion: turns `shapefile::Polygon` records plus their
//! dbase attribute table into `(id, state_fips, geo_types::MultiPolygon)`
//! triples the crosswalk builder can project and intersect.

use dbase::FieldValue;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{dbase, Shape};

use crate::error::{GeoError, Result};

/// A loaded polygon feature with the two attributes the crosswalk cares
/// about.
pub struct Feature {
	pub id: String,
	pub state_fips: String,
	pub geometry: MultiPolygon<f64>,
}

/// Which dbase columns carry the feature id and the 2-digit state FIPS
/// code, since shapefile schemas vary by source.
pub struct FieldNames<'a> {
	pub id_field: &'a str,
	pub state_fips_field: &'a str,
}

/// shapefile's `PolygonRing` already classifies rings as `Outer`/`Inner`
/// by winding order; an `Outer` ring starts a new `geo_types::Polygon`
/// and every following `Inner` ring until the next `Outer` becomes one of
/// its holes, matching the shapefile spec's required ring ordering.
fn shape_to_multipolygon(shape: &shapefile::Polygon) -> MultiPolygon<f64> {
	let mut polygons: Vec<Polygon<f64>> = Vec::new();
	let mut current_exterior: Option<LineString<f64>> = None;
	let mut current_holes: Vec<LineString<f64>> = Vec::new();

	let flush = |exterior: &mut Option<LineString<f64>>, holes: &mut Vec<LineString<f64>>, out: &mut Vec<Polygon<f64>>| {
		if let Some(ext) = exterior.take() {
			out.push(Polygon::new(ext, std::mem::take(holes)));
		}
	};

	for ring in shape.rings() {
		let coords: Vec<Coord<f64>> = ring.points().iter().map(|p| Coord { x: p.x, y: p.y }).collect();
		let line = LineString::new(coords);
		match ring {
			shapefile::PolygonRing::Outer(_) => {
				flush(&mut current_exterior, &mut current_holes, &mut polygons);
				current_exterior = Some(line);
			}
			shapefile::PolygonRing::Inner(_) => {
				current_holes.push(line);
			}
		}
	}
	flush(&mut current_exterior, &mut current_holes, &mut polygons);

	MultiPolygon::new(polygons)
}

fn field_to_string(value: &FieldValue) -> String {
	match value {
		FieldValue::Character(Some(s)) => s.trim().to_string(),
		FieldValue::Character(None) => String::new(),
		FieldValue::Numeric(Some(n)) => format!("{:02}", *n as i64),
		FieldValue::Numeric(None) => String::new(),
		other => format!("{:?}", other),
	}
}

/// Load every polygon feature from `path`, pulling `id` and `state_fips`
/// from the named dbase columns. Non-polygon shapes are skipped (the
/// Tribal-area and county layers are polygon-only by contract).
pub fn load_polygon_features(path: &std::path::Path, fields: &FieldNames) -> Result<Vec<Feature>> {
	let mut reader = shapefile::Reader::from_path(path)?;
	let mut out = Vec::new();

	for shape_record in reader.iter_shapes_and_records() {
		let (shape, record) = shape_record?;
		let polygon = match shape {
			Shape::Polygon(p) => p,
			_ => continue,
		};

		let id = record
			.get(fields.id_field)
			.map(field_to_string)
			.ok_or_else(|| GeoError::MissingAttribute {
				feature_id: "<unknown>".to_string(),
				attribute: fields.id_field.to_string(),
			})?;
		let state_fips = record
			.get(fields.state_fips_field)
			.map(field_to_string)
			.ok_or_else(|| GeoError::MissingAttribute { feature_id: id.clone(), attribute: fields.state_fips_field.to_string() })?;

		out.push(Feature { id, state_fips, geometry: shape_to_multipolygon(&polygon) });
	}

	Ok(out)
}
