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

//! Loads and indexes the 592-Tribe registry. Treated as ground truth once
//! built: nothing downstream mutates it.

use std::collections::BTreeMap;
use std::path::Path;

use packet_common::error::{PacketError, Result};
use packet_common::tribe::Tribe;
use packet_common::us_states::is_valid_state_code;
use packet_common::util::read_size_guarded;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RegistryFile {
	#[allow(dead_code)]
	metadata: serde_json::Value,
	tribes: Vec<Tribe>,
}

/// O(1) lookup by id, with a secondary state index. Immutable after
/// `load`.
#[derive(Debug, Clone)]
pub struct TribalRegistry {
	by_id: BTreeMap<String, Tribe>,
	by_state: BTreeMap<String, Vec<String>>,
}

impl TribalRegistry {
	/// Load, validate, and index the registry JSON at `path`. Size-guards
	/// the read at `size_guard_bytes`. Fails with `DataIntegrity` when any
	/// record is missing `tribe_id`/`name`/`states`, when a state code is
	/// not a valid two-letter code, or when ids collide.
	pub fn load(path: &Path, size_guard_bytes: u64) -> Result<Self> {
		let raw = read_size_guarded(path, size_guard_bytes)?;
		let file: RegistryFile = serde_json::from_str(&raw)?;
		Self::from_tribes(file.tribes)
	}

	pub fn from_tribes(tribes: Vec<Tribe>) -> Result<Self> {
		let mut by_id = BTreeMap::new();
		let mut by_state: BTreeMap<String, Vec<String>> = BTreeMap::new();

		for tribe in tribes {
			if tribe.tribe_id.trim().is_empty() {
				return Err(PacketError::DataIntegrity {
					artifact: "tribal_registry".into(),
					detail: "record missing tribe_id".into(),
				});
			}
			if tribe.name.trim().is_empty() {
				return Err(PacketError::DataIntegrity {
					artifact: "tribal_registry".into(),
					detail: format!("tribe {} missing name", tribe.tribe_id),
				});
			}
			if tribe.states.is_empty() {
				return Err(PacketError::DataIntegrity {
					artifact: "tribal_registry".into(),
					detail: format!("tribe {} has no states", tribe.tribe_id),
				});
			}
			for state in &tribe.states {
				if !is_valid_state_code(state) {
					return Err(PacketError::DataIntegrity {
						artifact: "tribal_registry".into(),
						detail: format!("tribe {} has invalid state code '{}'", tribe.tribe_id, state),
					});
				}
			}
			if by_id.contains_key(&tribe.tribe_id) {
				return Err(PacketError::DataIntegrity {
					artifact: "tribal_registry".into(),
					detail: format!("duplicate tribe_id '{}'", tribe.tribe_id),
				});
			}

			for state in &tribe.states {
				by_state.entry(state.clone()).or_default().push(tribe.tribe_id.clone());
			}
			by_id.insert(tribe.tribe_id.clone(), tribe);
		}

		Ok(Self { by_id, by_state })
	}

	pub fn get(&self, tribe_id: &str) -> Option<&Tribe> {
		self.by_id.get(tribe_id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Tribe> {
		self.by_id.values()
	}

	/// Tribe ids, lexicographically sorted -- the stable enumeration
	/// order the orchestrator's determinism guarantee relies on.
	pub fn sorted_ids(&self) -> Vec<&str> {
		self.by_id.keys().map(|s| s.as_str()).collect()
	}

	pub fn tribes_in_state(&self, state: &str) -> &[String] {
		self.by_state.get(state).map(|v| v.as_slice()).unwrap_or(&[])
	}

	pub fn len(&self) -> usize {
		self.by_id.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_id.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::test_util::tribe;

	#[test]
	fn rejects_duplicate_ids() {
		let tribes = vec![tribe("t1", "Alpha", &["AZ"]), tribe("t1", "Beta", &["NM"])];
		let err = TribalRegistry::from_tribes(tribes).unwrap_err();
		assert!(matches!(err, PacketError::DataIntegrity { .. }));
	}

	#[test]
	fn rejects_invalid_state_code() {
		let mut t = tribe("t1", "Alpha", &["AZ"]);
		t.states.insert("ARIZONA".into());
		let err = TribalRegistry::from_tribes(vec![t]).unwrap_err();
		assert!(matches!(err, PacketError::DataIntegrity { .. }));
	}

	#[test]
	fn sorted_ids_is_lexicographic() {
		let tribes = vec![tribe("t3", "C", &["AZ"]), tribe("t1", "A", &["NM"]), tribe("t2", "B", &["UT"])];
		let reg = TribalRegistry::from_tribes(tribes).unwrap();
		assert_eq!(reg.sorted_ids(), vec!["t1", "t2", "t3"]);
	}

	#[test]
	fn state_index_groups_by_state() {
		let tribes = vec![tribe("t1", "A", &["AZ", "NM"]), tribe("t2", "B", &["AZ"])];
		let reg = TribalRegistry::from_tribes(tribes).unwrap();
		assert_eq!(reg.tribes_in_state("AZ").len(), 2);
		assert_eq!(reg.tribes_in_state("NM").len(), 1);
		assert_eq!(reg.tribes_in_state("WA").len(), 0);
	}
}
