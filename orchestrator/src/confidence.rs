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

//! Per-domain confidence scoring: presence × source weight × recency
//! decay, composited per section and bucketed to a display-only level.
//! Numeric scores never cross the `bucket()` boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use packet_common::confidence::{bucket, ConfidenceDomain, ConfidenceLevel};
use packet_common::context::ArtifactMeta;

/// Source-weight bands from the authoritative-source hierarchy. Callers
/// pick a concrete value within the documented band; these constants mark
/// the low end of each band for callers that want a conservative default.
pub mod source_weight {
	pub const FEDERAL_AUTHORITATIVE: f64 = 0.95;
	pub const AUTHORITATIVE_GEOGRAPHIC: f64 = 0.85;
	pub const CACHED_PROCESSED: f64 = 0.70;
	pub const INFERRED: f64 = 0.50;
}

/// Multiplicative freshness decay: halves every `half_life_days`.
fn decay(age_days: f64, half_life_days: f64) -> f64 {
	0.5_f64.powf(age_days / half_life_days)
}

/// Raw 0.0-1.0 domain score: zero when the source is absent, otherwise
/// `source_weight * decay(age)`.
pub fn domain_score(meta: Option<&ArtifactMeta>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
	let Some(meta) = meta else { return 0.0 };
	let age_days = (now - meta.generated_at).num_seconds() as f64 / 86_400.0;
	(meta.source_weight * decay(age_days.max(0.0), half_life_days)).clamp(0.0, 1.0)
}

/// Per-domain display level, derived by bucketing the raw domain score
/// directly -- a domain's own badge uses the same HIGH/MEDIUM/LOW bucket
/// as a section composite.
pub fn domain_level(meta: Option<&ArtifactMeta>, now: DateTime<Utc>, half_life_days: f64) -> ConfidenceLevel {
	bucket(domain_score(meta, now, half_life_days))
}

/// Composite confidence for a section that depends on several domains,
/// each contributing `(domain, weight)`. Weights need not sum to 1.0;
/// the composite is the weighted average of domain scores, normalized by
/// the weight sum, then bucketed.
pub fn section_confidence(
	domain_scores: &BTreeMap<ConfidenceDomain, f64>,
	weights: &[(ConfidenceDomain, f64)],
) -> ConfidenceLevel {
	let weight_sum: f64 = weights.iter().map(|(_, w)| *w).sum();
	if weight_sum <= 0.0 {
		return ConfidenceLevel::Low;
	}
	let composite: f64 =
		weights.iter().map(|(domain, w)| domain_scores.get(domain).copied().unwrap_or(0.0) * w).sum::<f64>() / weight_sum;
	bucket(composite)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn meta(days_ago: i64, weight: f64) -> ArtifactMeta {
		ArtifactMeta { generated_at: Utc::now() - chrono::Duration::days(days_ago), source_weight: weight }
	}

	#[test]
	fn absent_source_scores_zero() {
		assert_eq!(domain_score(None, Utc::now(), 69.0), 0.0);
	}

	#[test]
	fn fresh_authoritative_source_is_high() {
		let m = meta(0, source_weight::FEDERAL_AUTHORITATIVE);
		assert_eq!(domain_level(Some(&m), Utc::now(), 69.0), ConfidenceLevel::High);
	}

	#[test]
	fn stale_source_decays_below_high() {
		let m = meta(400, source_weight::FEDERAL_AUTHORITATIVE);
		let score = domain_score(Some(&m), Utc::now(), 69.0);
		assert!(score < 0.80);
	}

	#[test]
	fn zero_award_tribe_has_high_identity_low_funding() {
		let mut scores = BTreeMap::new();
		scores.insert(ConfidenceDomain::Identity, 1.0);
		scores.insert(ConfidenceDomain::Funding, 0.0);
		let identity = section_confidence(&scores, &[(ConfidenceDomain::Identity, 1.0)]);
		let funding = section_confidence(&scores, &[(ConfidenceDomain::Funding, 1.0)]);
		assert_eq!(identity, ConfidenceLevel::High);
		assert_eq!(funding, ConfidenceLevel::Low);
	}
}
