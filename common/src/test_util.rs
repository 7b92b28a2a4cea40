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

//! Fixture builders shared by every crate's test suite. Kept out of
//! `#[cfg(test)]` so downstream crates (`packet-registry`, `packet-geo`,
//! `packet-orchestrator`) can depend on it as a dev-dependency without
//! duplicating synthetic Tribe/county data.

use std::collections::BTreeSet;

use crate::tribe::Tribe;

pub fn tribe(id: &str, name: &str, states: &[&str]) -> Tribe {
	Tribe {
		tribe_id: id.to_string(),
		name: name.to_string(),
		alternate_names: Vec::new(),
		states: states.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
		ecoregion: None,
		area_id: None,
	}
}

pub fn tribe_with_area(id: &str, name: &str, states: &[&str], area_id: &str) -> Tribe {
	let mut t = tribe(id, name, states);
	t.area_id = Some(area_id.to_string());
	t
}
