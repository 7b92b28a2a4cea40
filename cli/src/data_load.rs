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

//! Minimal artifact loading from `--data-dir`. There is no scraper or
//! config-file collaborator in this workspace; this module reads whatever
//! those out-of-scope collaborators would already have produced on disk.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use packet_common::award::TribeAwardCache;
use packet_common::bill::{Bill, TribeDelegation};
use packet_common::context::SourceMetaSet;
use packet_common::hazard::HazardProfile;
use packet_common::program::Program;
use packet_common::util::read_size_guarded;

fn load_required<T: DeserializeOwned>(path: &Path, guard_bytes: u64) -> Result<T> {
	let raw = read_size_guarded(path, guard_bytes).with_context(|| format!("reading {}", path.display()))?;
	serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn load_optional<T: Default + DeserializeOwned>(path: &Path, guard_bytes: u64) -> Result<T> {
	if !path.exists() {
		return Ok(T::default());
	}
	load_required(path, guard_bytes)
}

/// Everything `packet_orchestrator::RunInputs` needs, read fresh from disk.
pub struct LoadedArtifacts {
	pub registry: packet_registry::TribalRegistry,
	pub programs: Vec<Program>,
	pub bills: Vec<Bill>,
	pub delegations: BTreeMap<String, TribeDelegation>,
	pub hazard_profiles: BTreeMap<String, HazardProfile>,
	pub award_caches: BTreeMap<String, TribeAwardCache>,
	pub source_meta: BTreeMap<String, SourceMetaSet>,
}

/// `tribal_registry.json` and `programs.json` are hard dependencies -- a
/// packet can't be generated without Tribes or a program inventory. Every
/// other artifact represents an out-of-scope collaborator's output and is
/// treated as empty when absent rather than a load failure.
pub fn load_all(data_dir: &Path, guard_bytes: u64) -> Result<LoadedArtifacts> {
	let registry = packet_registry::TribalRegistry::load(&data_dir.join("tribal_registry.json"), guard_bytes)
		.with_context(|| format!("loading Tribal registry from {}", data_dir.display()))?;
	let programs: Vec<Program> = load_required(&data_dir.join("programs.json"), guard_bytes)
		.with_context(|| format!("loading program inventory from {}", data_dir.display()))?;

	let bills: Vec<Bill> = load_optional(&data_dir.join("bills.json"), guard_bytes)?;
	let delegations: BTreeMap<String, TribeDelegation> = load_optional(&data_dir.join("delegations.json"), guard_bytes)?;
	let hazard_profiles: BTreeMap<String, HazardProfile> = load_optional(&data_dir.join("hazard_profiles.json"), guard_bytes)?;
	let award_caches: BTreeMap<String, TribeAwardCache> = load_optional(&data_dir.join("award_caches.json"), guard_bytes)?;
	let source_meta: BTreeMap<String, SourceMetaSet> = load_optional(&data_dir.join("source_meta.json"), guard_bytes)?;

	Ok(LoadedArtifacts { registry, programs, bills, delegations, hazard_profiles, award_caches, source_meta })
}
