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

//! Explicit run configuration. Full config-file loading lives in an
//! out-of-scope collaborator; this struct only carries the numeric knobs
//! the spec fixes by value, so they have one definition instead of being
//! scattered as magic numbers through the pipeline.

/// Maximum size, in bytes, of any single JSON artifact read from disk.
pub const ARTIFACT_SIZE_GUARD_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum pages fetched per (program, fiscal_year) pagination request.
pub const MAX_PAGES_PER_REQUEST: u32 = 100;

/// Maximum records implied by `MAX_PAGES_PER_REQUEST` at 100 records/page.
pub const MAX_RECORDS_PER_REQUEST: u32 = MAX_PAGES_PER_REQUEST * 100;

/// Minimum delay, in milliseconds, enforced between paginated federal API
/// calls to respect upstream rate limits.
pub const INTER_REQUEST_DELAY_MS: u64 = 300;

/// Consecutive transport failures before the circuit breaker OPENs.
pub const CIRCUIT_BREAKER_THRESHOLD: u32 = 3;

/// Seconds the circuit breaker stays OPEN before a HALF_OPEN probe.
pub const CIRCUIT_BREAKER_COOLDOWN_SECS: u64 = 60;

/// Default network request timeout, in seconds.
pub const NETWORK_TIMEOUT_SECS: u64 = 60;

/// Token-sort-ratio acceptance threshold for the fuzzy matcher (0-100).
pub const FUZZY_MATCH_THRESHOLD: f64 = 85.0;

/// Area-weight crosswalk sliver filter: entries below this fraction of a
/// Tribal area's total are dropped before renormalization.
pub const SLIVER_FILTER_FRACTION: f64 = 0.01;

/// Confidence decay half-life, in days.
pub const CONFIDENCE_HALF_LIFE_DAYS: f64 = 69.0;

/// Inclusive program-count target range for the relevance filter.
pub const RELEVANCE_TARGET_MIN: usize = 8;
pub const RELEVANCE_TARGET_MAX: usize = 12;

/// Calendar month (1-12) on which the federal fiscal year begins. The
/// fiscal year FY(n) runs from October 1 of year n-1 through September 30
/// of year n; no string literal fiscal years are used anywhere else in the
/// pipeline, all arithmetic is derived from this constant.
pub const FISCAL_YEAR_START_MONTH: u32 = 10;

/// Tunable knobs gathered into one struct so call sites can override them
/// (e.g. from CLI flags) without threading individual constants around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
	pub artifact_size_guard_bytes: u64,
	pub max_pages_per_request: u32,
	pub inter_request_delay_ms: u64,
	pub circuit_breaker_threshold: u32,
	pub circuit_breaker_cooldown_secs: u64,
	pub network_timeout_secs: u64,
	pub fuzzy_match_threshold: f64,
	pub sliver_filter_fraction: f64,
	pub confidence_half_life_days: f64,
	pub relevance_target_min: usize,
	pub relevance_target_max: usize,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			artifact_size_guard_bytes: ARTIFACT_SIZE_GUARD_BYTES,
			max_pages_per_request: MAX_PAGES_PER_REQUEST,
			inter_request_delay_ms: INTER_REQUEST_DELAY_MS,
			circuit_breaker_threshold: CIRCUIT_BREAKER_THRESHOLD,
			circuit_breaker_cooldown_secs: CIRCUIT_BREAKER_COOLDOWN_SECS,
			network_timeout_secs: NETWORK_TIMEOUT_SECS,
			fuzzy_match_threshold: FUZZY_MATCH_THRESHOLD,
			sliver_filter_fraction: SLIVER_FILTER_FRACTION,
			confidence_half_life_days: CONFIDENCE_HALF_LIFE_DAYS,
			relevance_target_min: RELEVANCE_TARGET_MIN,
			relevance_target_max: RELEVANCE_TARGET_MAX,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_matches_spec_constants() {
		let cfg = RunConfig::default();
		assert_eq!(cfg.fuzzy_match_threshold, 85.0);
		assert_eq!(cfg.relevance_target_min, 8);
		assert_eq!(cfg.relevance_target_max, 12);
		assert_eq!(cfg.circuit_breaker_threshold, 3);
	}
}
