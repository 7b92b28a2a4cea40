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

//! Critic review and conflict resolution. A critic reviews a rendered
//! document against one concern (accuracy, tone, audience fit, structure,
//! copy) and may emit zero or more critiques, or fail to complete at all
//! (a transient review-service error). The gate requires at least three
//! of the five to complete before it will render any verdict.

use std::collections::BTreeMap;

use packet_common::critique::{ConflictResolution, Critique, Severity};

use crate::document::RenderedDocument;

pub const EXPECTED_CRITIC_COUNT: u32 = 5;
pub const MIN_COMPLETED_CRITICS: u32 = 3;

/// A completed critic pass, or `None` if the critic failed to return a
/// result at all (distinct from returning zero critiques, which is a
/// normal clean pass).
pub type CriticOutcome = Option<Vec<Critique>>;

pub struct CriticSpec {
	pub name: &'static str,
	pub priority: u8,
}

/// The five fixed critic roles, in priority order (1 = accuracy, highest
/// priority, through 5 = copy, lowest).
pub fn critic_roster() -> [CriticSpec; 5] {
	[
		CriticSpec { name: "accuracy", priority: 1 },
		CriticSpec { name: "audience_fit", priority: 2 },
		CriticSpec { name: "structure", priority: 3 },
		CriticSpec { name: "tone", priority: 4 },
		CriticSpec { name: "copy", priority: 5 },
	]
}

/// Heuristic stand-ins for the five critic roles, each scanning the
/// rendered plain text for a narrow signal its role owns. A critic
/// returns `None` only when it cannot evaluate the document at all; an
/// empty `Vec` is a clean pass.
pub fn run_builtin_critic(name: &str, rendered: &RenderedDocument) -> CriticOutcome {
	match name {
		"accuracy" => Some(review_accuracy(rendered)),
		"audience_fit" => Some(review_audience_fit(rendered)),
		"structure" => Some(review_structure(rendered)),
		"tone" => Some(review_tone(rendered)),
		"copy" => Some(review_copy(rendered)),
		_ => None,
	}
}

fn review_accuracy(rendered: &RenderedDocument) -> Vec<Critique> {
	let mut out = Vec::new();
	if rendered.plain_text.contains("$0.00") && rendered.sections_rendered.iter().any(|c| format!("{c:?}") == "ProgramSummary") {
		out.push(Critique {
			critic_name: "accuracy".into(),
			section: "ProgramSummary".into(),
			severity: Severity::Major,
			recommendation: "verify zero-dollar obligation figure before distribution".into(),
			priority: 1,
		});
	}
	out
}

fn review_audience_fit(_rendered: &RenderedDocument) -> Vec<Critique> {
	Vec::new()
}

fn review_structure(rendered: &RenderedDocument) -> Vec<Critique> {
	let mut out = Vec::new();
	if rendered.sections_rendered.is_empty() {
		out.push(Critique {
			critic_name: "structure".into(),
			section: "document".into(),
			severity: Severity::Blocker,
			recommendation: "document has no rendered sections".into(),
			priority: 3,
		});
	}
	out
}

fn review_tone(_rendered: &RenderedDocument) -> Vec<Critique> {
	Vec::new()
}

fn review_copy(rendered: &RenderedDocument) -> Vec<Critique> {
	let mut out = Vec::new();
	if rendered.plain_text.contains("  ") {
		out.push(Critique {
			critic_name: "copy".into(),
			section: "document".into(),
			severity: Severity::Minor,
			recommendation: "collapse doubled whitespace".into(),
			priority: 5,
		});
	}
	out
}

/// Resolve contradictory critiques landing on the same section: the
/// critique from the lower-priority-number critic wins; ties broken
/// lexicographically by critic name. Returns the surviving (winning)
/// critique per section plus a trace of what lost and why.
pub fn resolve_conflicts(critiques: Vec<Critique>) -> (Vec<Critique>, Vec<ConflictResolution>) {
	let mut by_section: BTreeMap<String, Vec<Critique>> = BTreeMap::new();
	for critique in critiques {
		by_section.entry(critique.section.clone()).or_default().push(critique);
	}

	let mut winners = Vec::new();
	let mut conflicts = Vec::new();

	for (section, mut group) in by_section {
		group.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.critic_name.cmp(&b.critic_name)));
		let winner = group.remove(0);
		for loser in &group {
			conflicts.push(ConflictResolution {
				section: section.clone(),
				winning_critic: winner.critic_name.clone(),
				losing_critic: loser.critic_name.clone(),
				reason: if loser.priority != winner.priority {
					format!("priority {} outranks priority {}", winner.priority, loser.priority)
				} else {
					"lexicographic tiebreak on critic name".to_string()
				},
			});
		}
		winners.push(winner);
	}

	(winners, conflicts)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn critique(name: &str, section: &str, priority: u8, severity: Severity) -> Critique {
		Critique { critic_name: name.into(), section: section.into(), severity, recommendation: "r".into(), priority }
	}

	#[test]
	fn lower_priority_number_wins_conflict() {
		let critiques = vec![critique("copy", "ProgramSummary", 5, Severity::Minor), critique("accuracy", "ProgramSummary", 1, Severity::Major)];
		let (winners, conflicts) = resolve_conflicts(critiques);
		assert_eq!(winners.len(), 1);
		assert_eq!(winners[0].critic_name, "accuracy");
		assert_eq!(conflicts.len(), 1);
		assert_eq!(conflicts[0].losing_critic, "copy");
	}

	#[test]
	fn equal_priority_breaks_lexicographically() {
		let critiques = vec![critique("zeta", "Timing", 2, Severity::Minor), critique("alpha", "Timing", 2, Severity::Minor)];
		let (winners, _) = resolve_conflicts(critiques);
		assert_eq!(winners[0].critic_name, "alpha");
	}

	#[test]
	fn distinct_sections_do_not_conflict() {
		let critiques = vec![critique("accuracy", "ProgramSummary", 1, Severity::Major), critique("copy", "Timing", 5, Severity::Minor)];
		let (winners, conflicts) = resolve_conflicts(critiques);
		assert_eq!(winners.len(), 2);
		assert!(conflicts.is_empty());
	}

	#[test]
	fn structure_critic_blocks_on_empty_document() {
		let rendered = RenderedDocument { bytes: vec![], plain_text: String::new(), page_count_estimate: 1, sections_rendered: vec![], used_style_names: vec![] };
		let findings = review_structure(&rendered);
		assert_eq!(findings.len(), 1);
		assert_eq!(findings[0].severity, Severity::Blocker);
	}
}
