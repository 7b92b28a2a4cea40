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

//! The two-tier recipient-to-Tribe matcher: a curated alias lookup
//! followed by a scored fuzzy fallback with state validation. Ordered and
//! deterministic -- re-running the same input always yields the same
//! outcome.

use packet_common::alias::AliasMap;
use packet_common::us_states::is_valid_state_code;
use packet_common::util::normalize_recipient_name;

use crate::registry::TribalRegistry;

/// Substrings that identify an inter-Tribal organization rather than a
/// single Tribe. Checked case-insensitively against the normalized name.
const CONSORTIUM_MARKERS: [&str; 4] = ["inter tribal", "consortium", "council of", "intertribal"];

/// The outcome of a match attempt, distinguishing "no match" from
/// "recognized as a consortium award" so the Award Populator can log the
/// two cases separately in the coverage report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
	Matched(String),
	Consortium,
	NoMatch,
}

impl MatchOutcome {
	pub fn tribe_id(&self) -> Option<&str> {
		match self {
			MatchOutcome::Matched(id) => Some(id.as_str()),
			_ => None,
		}
	}
}

fn is_consortium(normalized: &str) -> bool {
	CONSORTIUM_MARKERS.iter().any(|marker| normalized.contains(marker))
}

fn sorted_tokens(s: &str) -> String {
	let mut tokens: Vec<&str> = s.split_whitespace().collect();
	tokens.sort_unstable();
	tokens.join(" ")
}

/// Token-sort ratio, 0-100: sort the whitespace tokens of both strings,
/// then score normalized-Levenshtein similarity on the sorted forms. This
/// makes "Navajo Nation" and "Nation Navajo" score identically, which is
/// the point -- federal recipient names reorder words constantly.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
	let ta = sorted_tokens(a);
	let tb = sorted_tokens(b);
	strsim::normalized_levenshtein(&ta, &tb) * 100.0
}

/// Resolve a raw recipient name (and optional two-letter recipient state)
/// to a tribe id, or `NoMatch`/`Consortium`.
pub fn match_recipient(
	registry: &TribalRegistry,
	aliases: &AliasMap,
	recipient_name: &str,
	recipient_state: Option<&str>,
	threshold: f64,
) -> MatchOutcome {
	let normalized = normalize_recipient_name(recipient_name);
	if normalized.is_empty() {
		return MatchOutcome::NoMatch;
	}

	if is_consortium(&normalized) {
		return MatchOutcome::Consortium;
	}

	// Tier 1: curated alias lookup, O(1).
	if let Some(tribe_id) = aliases.lookup(&normalized) {
		return MatchOutcome::Matched(tribe_id.to_string());
	}

	// Tier 2: fuzzy fallback against every Tribe's canonical + alternate
	// names, keeping the best score per Tribe.
	let state_filter = recipient_state.filter(|s| is_valid_state_code(s));

	let mut best: Option<(f64, &str)> = None;
	for tribe in registry.iter() {
		let score =
			tribe.all_names().map(|name| token_sort_ratio(&normalized, &normalize_recipient_name(name))).fold(0.0, f64::max);

		if score < threshold {
			continue;
		}
		if let Some(state) = state_filter {
			if !tribe.has_state(state) {
				continue;
			}
		}

		best = match best {
			None => Some((score, tribe.tribe_id.as_str())),
			Some((best_score, best_id)) => {
				if score > best_score || (score == best_score && tribe.tribe_id.as_str() < best_id) {
					Some((score, tribe.tribe_id.as_str()))
				} else {
					Some((best_score, best_id))
				}
			}
		};
	}

	match best {
		Some((_, tribe_id)) => MatchOutcome::Matched(tribe_id.to_string()),
		None => MatchOutcome::NoMatch,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::test_util::tribe;
	use std::collections::BTreeMap;

	fn registry() -> TribalRegistry {
		let mut muckleshoot = tribe("tribe_muckleshoot", "Muckleshoot Indian Tribe", &["WA"]);
		muckleshoot.alternate_names = vec!["Muckleshoot Tribe".into()];
		let seneca = tribe("tribe_seneca", "Seneca Nation of Indians", &["NY"]);
		let navajo = tribe("tribe_navajo", "The Navajo Nation", &["AZ", "NM", "UT"]);
		TribalRegistry::from_tribes(vec![muckleshoot, seneca, navajo]).unwrap()
	}

	fn aliases() -> AliasMap {
		let mut aliases = BTreeMap::new();
		aliases.insert("the navajo nation".to_string(), "tribe_navajo".to_string());
		AliasMap { aliases, housing_authority_aliases: BTreeMap::new() }
	}

	#[test]
	fn s1_alias_table_hit() {
		let outcome = match_recipient(&registry(), &aliases(), "THE NAVAJO NATION", Some("AZ"), 85.0);
		assert_eq!(outcome, MatchOutcome::Matched("tribe_navajo".to_string()));
	}

	#[test]
	fn s2_fuzzy_fallback_with_state_filter() {
		let outcome =
			match_recipient(&registry(), &aliases(), "MUCKLESHOOT INDIAN TRIBE", Some("WA"), 85.0);
		assert_eq!(outcome, MatchOutcome::Matched("tribe_muckleshoot".to_string()));
	}

	#[test]
	fn s3_cross_tribe_false_positive_rejected() {
		let outcome = match_recipient(&registry(), &aliases(), "Seneca-Cayuga Nation", Some("OK"), 85.0);
		assert_eq!(outcome, MatchOutcome::NoMatch);
	}

	#[test]
	fn state_mismatch_rejects_even_high_score() {
		// Exact name match but wrong state must still be rejected.
		let outcome = match_recipient(&registry(), &aliases(), "Seneca Nation of Indians", Some("CA"), 85.0);
		assert_eq!(outcome, MatchOutcome::NoMatch);
	}

	#[test]
	fn unknown_state_code_does_not_filter() {
		let outcome =
			match_recipient(&registry(), &aliases(), "Seneca Nation of Indians", Some("ZZ"), 85.0);
		assert_eq!(outcome, MatchOutcome::Matched("tribe_seneca".to_string()));
	}

	#[test]
	fn consortium_names_never_match() {
		let outcome = match_recipient(&registry(), &aliases(), "Inter Tribal Council of Arizona", None, 85.0);
		assert_eq!(outcome, MatchOutcome::Consortium);
	}

	#[test]
	fn empty_input_is_no_match() {
		let outcome = match_recipient(&registry(), &aliases(), "   ", None, 85.0);
		assert_eq!(outcome, MatchOutcome::NoMatch);
	}

	#[test]
	fn score_exactly_at_threshold_is_accepted() {
		assert!(token_sort_ratio("muckleshoot indian tribe", "muckleshoot indian tribe") >= 85.0);
	}

	#[test]
	fn tie_break_is_lexicographic_tribe_id() {
		let a = tribe("tribe_b", "Example Tribe", &["AZ"]);
		let b = tribe("tribe_a", "Example Tribe", &["AZ"]);
		let reg = TribalRegistry::from_tribes(vec![a, b]).unwrap();
		let outcome = match_recipient(&reg, &AliasMap::default(), "Example Tribe", Some("AZ"), 85.0);
		assert_eq!(outcome, MatchOutcome::Matched("tribe_a".to_string()));
	}
}
