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

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A federally recognized Tribal Nation. Immutable once loaded from the
/// registry: every consumer downstream treats this as ground truth and
/// never mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tribe {
	pub tribe_id: String,
	pub name: String,
	#[serde(default)]
	pub alternate_names: Vec<String>,
	pub states: BTreeSet<String>,
	#[serde(default)]
	pub ecoregion: Option<String>,
	#[serde(default)]
	pub area_id: Option<String>,
}

impl Tribe {
	/// All names a fuzzy comparison should be scored against: the
	/// canonical name followed by every alternate.
	pub fn all_names(&self) -> impl Iterator<Item = &str> {
		std::iter::once(self.name.as_str()).chain(self.alternate_names.iter().map(|s| s.as_str()))
	}

	/// True if `state` (a two-letter code) is one of this Tribe's member
	/// states. This is the primary defense against confusing
	/// similarly-named Tribes across state lines.
	pub fn has_state(&self, state: &str) -> bool {
		self.states.iter().any(|s| s.eq_ignore_ascii_case(state))
	}
}
