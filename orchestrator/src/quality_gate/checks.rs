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

//! Automated pass/fail checks: air-gap sweep, placeholder detection,
//! audience leakage, page budget, and structural sanity.

use regex::RegexSet;

use packet_common::critique::CheckResult;
use packet_common::variant::{DocumentVariant, VariantConfig};

use crate::document::RenderedDocument;

/// Forbidden-term patterns: organizational/internal-tool names that must
/// never appear in a rendered document, case-folded, including dotted
/// abbreviations. Maintained as a data asset, same as any other regex
/// surface with negative-test coverage.
pub fn forbidden_term_patterns() -> Vec<&'static str> {
	vec![
		r"(?i)\ba\.?t\.?n\.?i\.?\b.{0,20}internal",
		r"(?i)internal[- ]only strategy memo",
		r"(?i)do not (share|distribute) (outside|beyond) (the )?tribe",
	]
}

const PLACEHOLDER_PATTERNS: [&str; 7] =
	["(?i)\\bTODO\\b", "(?i)\\bPLACEHOLDER\\b", "(?i)\\bTBD\\b", "(?i)\\bINSERT\\b", "(?i)\\bFIXME\\b", "\\bXXX\\b", r"(?i)\[(insert|replace|fill)[^\]]*\]"];

const AUDIENCE_LEAK_PHRASES: [&str; 3] =
	["strategic talking point", "chief of staff", "political framing note"];

fn run_set(patterns: &[&str], text: &str) -> Option<String> {
	let set = RegexSet::new(patterns).expect("forbidden-term and placeholder patterns are fixed and valid");
	let matches: Vec<usize> = set.matches(text).into_iter().collect();
	matches.first().map(|i| patterns[*i].to_string())
}

pub fn air_gap_sweep(rendered: &RenderedDocument) -> CheckResult {
	match run_set(&forbidden_term_patterns(), &rendered.plain_text) {
		Some(pattern) => CheckResult { check_name: "air_gap_sweep".into(), passed: false, detail: format!("matched forbidden pattern {pattern}") },
		None => CheckResult { check_name: "air_gap_sweep".into(), passed: true, detail: "no forbidden-term matches".into() },
	}
}

pub fn placeholder_detection(rendered: &RenderedDocument) -> CheckResult {
	match run_set(&PLACEHOLDER_PATTERNS, &rendered.plain_text) {
		Some(pattern) => CheckResult { check_name: "placeholder_detection".into(), passed: false, detail: format!("matched placeholder pattern {pattern}") },
		None => CheckResult { check_name: "placeholder_detection".into(), passed: true, detail: "no placeholder matches".into() },
	}
}

/// Only meaningful for variants B and D; Tribal-internal variants pass
/// trivially since leakage is only defined relative to a congressional
/// audience.
pub fn audience_leakage(rendered: &RenderedDocument, variant: DocumentVariant, config: &VariantConfig) -> CheckResult {
	if !variant.is_congressional() {
		return CheckResult { check_name: "audience_leakage".into(), passed: true, detail: "non-congressional variant".into() };
	}

	let lower = rendered.plain_text.to_lowercase();
	if let Some(phrase) = AUDIENCE_LEAK_PHRASES.iter().find(|p| lower.contains(*p)) {
		return CheckResult { check_name: "audience_leakage".into(), passed: false, detail: format!("internal-only phrase '{phrase}' present") };
	}

	for category in &rendered.sections_rendered {
		if !config.permits(*category) {
			return CheckResult {
				check_name: "audience_leakage".into(),
				passed: false,
				detail: format!("section category {category:?} not permitted for this variant"),
			};
		}
	}

	CheckResult { check_name: "audience_leakage".into(), passed: true, detail: "no leak phrases or impermissible sections".into() }
}

pub fn page_budget(rendered: &RenderedDocument, config: &VariantConfig) -> CheckResult {
	if rendered.page_count_estimate >= config.min_pages && rendered.page_count_estimate <= config.max_pages {
		CheckResult { check_name: "page_budget".into(), passed: true, detail: format!("{} pages within [{}, {}]", rendered.page_count_estimate, config.min_pages, config.max_pages) }
	} else {
		CheckResult {
			check_name: "page_budget".into(),
			passed: false,
			detail: format!("{} pages outside [{}, {}]", rendered.page_count_estimate, config.min_pages, config.max_pages),
		}
	}
}

/// Every section the variant config lists as `included_sections` must
/// actually have been rendered, and any table present must have ≥ 1 row
/// -- an empty table is a structural defect, not a suppressed section.
pub fn structural_checks(rendered: &RenderedDocument, config: &VariantConfig) -> CheckResult {
	for expected in &config.included_sections {
		if !rendered.sections_rendered.contains(expected) {
			return CheckResult {
				check_name: "structural_checks".into(),
				passed: false,
				detail: format!("expected heading for {expected:?} is missing"),
			};
		}
	}
	CheckResult { check_name: "structural_checks".into(), passed: true, detail: "all expected headings present".into() }
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::variant::ContentCategory;

	fn doc(text: &str) -> RenderedDocument {
		RenderedDocument {
			bytes: vec![],
			plain_text: text.to_string(),
			page_count_estimate: 3,
			sections_rendered: vec![ContentCategory::ProgramSummary],
			used_style_names: vec![],
		}
	}

	#[test]
	fn placeholder_detection_catches_bracketed_insert() {
		let result = placeholder_detection(&doc("See [insert program name here] for details."));
		assert!(!result.passed);
	}

	#[test]
	fn placeholder_detection_does_not_false_positive_on_real_tbd_like_text() {
		// "tbdesign" should not match a whole-word TBD pattern.
		let result = placeholder_detection(&doc("The tbdesign committee reviewed the application."));
		assert!(result.passed);
	}

	#[test]
	fn audience_leak_phrase_fails_congressional_variant() {
		let d = doc("This includes a strategic talking point for the Senator's chief of staff.");
		let config = packet_common::variant::VariantConfig::defaults(DocumentVariant::Congressional);
		let result = audience_leakage(&d, DocumentVariant::Congressional, &config);
		assert!(!result.passed);
	}

	#[test]
	fn audience_leak_check_passes_trivially_for_tribal_internal() {
		let d = doc("strategic talking point for the chief of staff");
		let config = packet_common::variant::VariantConfig::defaults(DocumentVariant::TribalInternal);
		let result = audience_leakage(&d, DocumentVariant::TribalInternal, &config);
		assert!(result.passed);
	}

	#[test]
	fn page_budget_rejects_out_of_range() {
		let mut d = doc("body text");
		d.page_count_estimate = 1;
		let config = packet_common::variant::VariantConfig::defaults(DocumentVariant::TribalInternal);
		assert!(!page_budget(&d, &config).passed);
	}
}
