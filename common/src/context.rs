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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::award::AwardRecord;
use crate::bill::{Bill, TribeDelegation};
use crate::confidence::{ConfidenceDomain, ConfidenceLevel};
use crate::hazard::HazardProfile;
use crate::program::Program;
use crate::tribe::Tribe;
use crate::variant::DocumentVariant;

/// When an artifact was generated and how authoritative its source is;
/// the two inputs the Confidence Scorer needs per domain, besides
/// presence/absence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMeta {
	pub generated_at: DateTime<Utc>,
	pub source_weight: f64,
}

/// Fully assembled, immutable context for one (Tribe, variant) pair.
/// Built fresh on every invocation; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TribePacketContext {
	pub tribe: Tribe,
	pub variant: DocumentVariant,
	pub delegation: Option<TribeDelegation>,
	pub selected_programs: Vec<Program>,
	pub awards: Vec<AwardRecord>,
	pub total_obligation: f64,
	pub hazard_profile: Option<HazardProfile>,
	pub relevant_bills: Vec<Bill>,
	pub section_confidence: BTreeMap<ConfidenceDomain, ConfidenceLevel>,
	pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMetaSet {
	#[serde(default)]
	pub identity: Option<ArtifactMeta>,
	#[serde(default)]
	pub delegation: Option<ArtifactMeta>,
	#[serde(default)]
	pub funding: Option<ArtifactMeta>,
	#[serde(default)]
	pub hazard: Option<ArtifactMeta>,
	#[serde(default)]
	pub intel: Option<ArtifactMeta>,
}
