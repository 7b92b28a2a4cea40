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

/// Curated mapping from normalized recipient strings to tribe ids, plus a
/// filtered housing-authority sub-map (housing authorities are frequently
/// the recipient of record instead of the Tribe itself). Injectively
/// keyed: every normalized key is unique and maps to exactly one tribe
/// id, but many keys may point at the same Tribe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AliasMap {
	pub aliases: BTreeMap<String, String>,
	#[serde(default)]
	pub housing_authority_aliases: BTreeMap<String, String>,
}

impl AliasMap {
	/// Direct O(1) lookup on an already-normalized key, checking the
	/// housing-authority sub-map as a fallback.
	pub fn lookup(&self, normalized: &str) -> Option<&str> {
		self.aliases
			.get(normalized)
			.or_else(|| self.housing_authority_aliases.get(normalized))
			.map(|s| s.as_str())
	}
}
