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

#![forbid(unsafe_code)]
#![deny(dead_code)]

//! Area-weighted Tribal-area/county crosswalk, and the hazard aggregator
//! built on top of it, that together turn raw shapefiles and National
//! Risk Index CSV rows into a per-Tribe `HazardProfile`.

pub mod crosswalk;
pub mod error;
pub mod hazard_aggregator;
pub mod shapefile_load;

pub use crosswalk::{build_crosswalk, Crosswalk, CrosswalkMetadata};
pub use error::{GeoError, Result};
pub use hazard_aggregator::{aggregate_hazard_profile, resolve_weights, ResolvedWeights, WeightTier};
pub use shapefile_load::{load_polygon_features, Feature, FieldNames};
