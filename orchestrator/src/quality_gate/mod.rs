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

//! The Quality Gate: automated checks plus critic review, combined into
//! one pass/fail verdict before any document reaches disk.

mod checks;
mod critics;

use packet_common::critique::{QualityGateResult, Severity};
use packet_common::variant::{DocumentVariant, VariantConfig};

use crate::document::RenderedDocument;

pub use critics::{critic_roster, run_builtin_critic, CriticOutcome, EXPECTED_CRITIC_COUNT, MIN_COMPLETED_CRITICS};

/// Run every automated check plus the critic panel against one rendered
/// document and return the combined verdict. A document passes only when
/// every automated check passes, at least three of five critics
/// completed, and no surviving (post-conflict-resolution) critique is
/// blocker severity.
pub fn run_quality_gate(rendered: &RenderedDocument, variant: DocumentVariant, config: &VariantConfig) -> QualityGateResult {
	let automated_checks = vec![
		checks::air_gap_sweep(rendered),
		checks::placeholder_detection(rendered),
		checks::audience_leakage(rendered, variant, config),
		checks::page_budget(rendered, config),
		checks::structural_checks(rendered, config),
	];
	let failing_checks: Vec<String> = automated_checks.iter().filter(|c| !c.passed).map(|c| c.check_name.clone()).collect();

	let mut all_critiques = Vec::new();
	let mut critics_completed = 0u32;
	for spec in critic_roster() {
		if let Some(critiques) = run_builtin_critic(spec.name, rendered) {
			critics_completed += 1;
			all_critiques.extend(critiques);
		}
	}

	let (winners, conflicts) = critics::resolve_conflicts(all_critiques);

	let blocker_count = winners.iter().filter(|c| c.severity == Severity::Blocker).count() as u32;
	let major_count = winners.iter().filter(|c| c.severity == Severity::Major).count() as u32;
	let minor_count = winners.iter().filter(|c| c.severity == Severity::Minor).count() as u32;

	let enough_critics = critics_completed >= MIN_COMPLETED_CRITICS;
	let passed = failing_checks.is_empty() && enough_critics && blocker_count == 0;

	QualityGateResult {
		passed,
		critics_completed,
		blocker_count,
		major_count,
		minor_count,
		automated_checks,
		failing_checks,
		conflicts,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::variant::ContentCategory;

	fn clean_document() -> RenderedDocument {
		RenderedDocument {
			bytes: vec![],
			plain_text: "Example Tribe — tribal-leadership\nProgram Summary\n1 selected program(s) cover $12K.".to_string(),
			page_count_estimate: 5,
			sections_rendered: vec![ContentCategory::ProgramSummary, ContentCategory::DelegationFacts, ContentCategory::BillStatus, ContentCategory::HazardOverview, ContentCategory::Strategy, ContentCategory::TalkingPoints, ContentCategory::PoliticalFraming, ContentCategory::Timing],
			used_style_names: vec!["heading1".into(), "body".into()],
		}
	}

	#[test]
	fn clean_document_passes_the_gate() {
		let rendered = clean_document();
		let config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let result = run_quality_gate(&rendered, DocumentVariant::TribalInternal, &config);
		assert!(result.passed, "{result:?}");
		assert_eq!(result.critics_completed, EXPECTED_CRITIC_COUNT);
		assert_eq!(result.blocker_count, 0);
	}

	#[test]
	fn placeholder_text_fails_the_gate() {
		let mut rendered = clean_document();
		rendered.plain_text.push_str(" TBD pending further review.");
		let config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let result = run_quality_gate(&rendered, DocumentVariant::TribalInternal, &config);
		assert!(!result.passed);
		assert!(result.failing_checks.contains(&"placeholder_detection".to_string()));
	}

	#[test]
	fn empty_document_trips_structure_blocker() {
		let rendered = RenderedDocument { bytes: vec![], plain_text: String::new(), page_count_estimate: 1, sections_rendered: vec![], used_style_names: vec![] };
		let config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let result = run_quality_gate(&rendered, DocumentVariant::TribalInternal, &config);
		assert!(!result.passed);
		assert_eq!(result.blocker_count, 1);
	}

	#[test]
	fn audience_leak_fails_congressional_but_not_internal() {
		let mut rendered = clean_document();
		rendered.plain_text.push_str(" This strategic talking point is for the chief of staff only.");
		let b_config = VariantConfig::defaults(DocumentVariant::Congressional);
		let b_result = run_quality_gate(&rendered, DocumentVariant::Congressional, &b_config);
		assert!(!b_result.passed);

		let a_config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let a_result = run_quality_gate(&rendered, DocumentVariant::TribalInternal, &a_config);
		assert!(a_result.failing_checks.iter().all(|c| c != "audience_leakage"));
	}
}
