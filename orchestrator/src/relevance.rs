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

//! Selects the 8-12 programs that appear in a Tribe's documents, scored
//! from hazard alignment, ecoregion alignment, award history, program
//! status, and a fixed program weight.

use std::collections::BTreeMap;

use packet_common::award::ProgramSummary;
use packet_common::hazard::HazardProfile;
use packet_common::program::Program;
use packet_common::tribe::Tribe;

const HAZARD_ALIGNMENT_WEIGHT: f64 = 0.35;
const ECOREGION_ALIGNMENT_WEIGHT: f64 = 0.15;
const AWARD_HISTORY_WEIGHT: f64 = 0.20;
const STATUS_MODIFIER_WEIGHT: f64 = 0.20;
const PROGRAM_WEIGHT_WEIGHT: f64 = 0.10;

/// Alignment with the Tribe's top hazards, scaled by the hazard's rank:
/// a program tagged against the #1 hazard scores higher than one tagged
/// only against the #5 hazard.
fn hazard_alignment(program: &Program, profile: Option<&HazardProfile>) -> f64 {
	let Some(profile) = profile else { return 0.0 };
	profile
		.top_hazards
		.iter()
		.enumerate()
		.filter(|(_, h)| program.hazard_tags.iter().any(|tag| tag.eq_ignore_ascii_case(&h.code)))
		.map(|(rank, _)| 1.0 - (rank as f64 * 0.15))
		.fold(0.0_f64, f64::max)
}

fn ecoregion_alignment(program: &Program, tribe: &Tribe) -> f64 {
	match &tribe.ecoregion {
		Some(eco) if program.ecoregion_tags.iter().any(|tag| tag.eq_ignore_ascii_case(eco)) => 1.0,
		_ => 0.0,
	}
}

fn award_history_presence(program: &Program, per_program: &BTreeMap<String, ProgramSummary>) -> f64 {
	if per_program.get(&program.program_number).map(|s| s.count > 0).unwrap_or(false) {
		1.0
	} else {
		0.0
	}
}

/// Relevance score for one candidate program, 0.0-1.0-ish (the sum of
/// weighted [0,1] components; not itself bounded to exactly 1.0 since
/// weights sum to 1.0 and every component is already 0-1).
pub fn relevance_score(
	program: &Program,
	tribe: &Tribe,
	hazard_profile: Option<&HazardProfile>,
	per_program: &BTreeMap<String, ProgramSummary>,
) -> f64 {
	HAZARD_ALIGNMENT_WEIGHT * hazard_alignment(program, hazard_profile)
		+ ECOREGION_ALIGNMENT_WEIGHT * ecoregion_alignment(program, tribe)
		+ AWARD_HISTORY_WEIGHT * award_history_presence(program, per_program)
		+ STATUS_MODIFIER_WEIGHT * program.status.relevance_modifier()
		+ PROGRAM_WEIGHT_WEIGHT * (program.ci_score / 100.0)
}

/// Select between `target_min` and `target_max` programs for one Tribe,
/// sorted descending by relevance score with lexicographic program-id
/// tie-break. Never pads below `target_min` with zero-relevance programs.
pub fn select_programs(
	candidates: &[Program],
	tribe: &Tribe,
	hazard_profile: Option<&HazardProfile>,
	per_program: &BTreeMap<String, ProgramSummary>,
	target_min: usize,
	target_max: usize,
) -> Vec<Program> {
	let mut scored: Vec<(f64, &Program)> =
		candidates.iter().map(|p| (relevance_score(p, tribe, hazard_profile, per_program), p)).collect();

	scored.sort_by(|(score_a, a), (score_b, b)| {
		score_b.partial_cmp(score_a).unwrap().then_with(|| a.program_id.cmp(&b.program_id))
	});

	let non_zero_count = scored.iter().filter(|(s, _)| *s > 0.0).count();
	let take = if non_zero_count < target_min { non_zero_count } else { target_max.min(scored.len()) };

	scored.into_iter().take(take).map(|(_, p)| p.clone()).collect()
}
