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

//! Fetches federal award data per `(program_number, fiscal_year)` pair
//! through an external transport, dedupes, matches recipients to Tribes,
//! and emits one `TribeAwardCache` per Tribe.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use packet_common::award::{AwardRecord, TribeAwardCache};
use packet_common::config::RunConfig;
use packet_registry::{match_recipient, MatchOutcome, TribalRegistry};
use packet_common::alias::AliasMap;

use crate::error::{OrchestratorError, Result};

/// One page of award records from the transport collaborator.
#[derive(Debug, Clone)]
pub struct AwardPage {
	pub records: Vec<AwardRecord>,
	pub has_next: bool,
}

/// The external scraper/transport boundary. Implementations live outside
/// this workspace in production; tests supply an in-memory fake.
#[async_trait]
pub trait AwardTransport: Send + Sync {
	async fn fetch_page(&self, program_number: &str, fiscal_year: i32, page: u32) -> Result<AwardPage>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakerState {
	Closed,
	Open,
	HalfOpen,
}

/// Per-(program, year) circuit breaker: OPENs after `threshold` consecutive
/// failures, recovers via a single HALF_OPEN probe after `cooldown`.
struct CircuitBreaker {
	state: BreakerState,
	consecutive_failures: u32,
	threshold: u32,
	cooldown: Duration,
	opened_at: Option<Instant>,
}

impl CircuitBreaker {
	fn new(threshold: u32, cooldown_secs: u64) -> Self {
		Self { state: BreakerState::Closed, consecutive_failures: 0, threshold, cooldown: Duration::from_secs(cooldown_secs), opened_at: None }
	}

	fn allow_request(&mut self) -> bool {
		match self.state {
			BreakerState::Closed => true,
			BreakerState::Open => {
				if self.opened_at.map(|t| t.elapsed() >= self.cooldown).unwrap_or(false) {
					self.state = BreakerState::HalfOpen;
					true
				} else {
					false
				}
			}
			BreakerState::HalfOpen => true,
		}
	}

	fn record_success(&mut self) {
		self.state = BreakerState::Closed;
		self.consecutive_failures = 0;
		self.opened_at = None;
	}

	fn record_failure(&mut self) {
		self.consecutive_failures += 1;
		if self.state == BreakerState::HalfOpen || self.consecutive_failures >= self.threshold {
			self.state = BreakerState::Open;
			self.opened_at = Some(Instant::now());
		}
	}
}

/// A (program, year) slice that never completed, surfaced in the coverage
/// report rather than aborting the whole run.
#[derive(Debug, Clone)]
pub struct IncompleteSlice {
	pub program_number: String,
	pub fiscal_year: i32,
	pub detail: String,
}

#[derive(Debug, Clone)]
pub struct UnmatchedRecipient {
	pub recipient_name: String,
	pub obligation: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AwardCoverage {
	pub tribes_with_awards: u32,
	pub top_unmatched: Vec<UnmatchedRecipient>,
	pub consortium_obligation_total: f64,
	pub consortium_count: u32,
	pub incomplete_slices: Vec<IncompleteSlice>,
	pub truncated_slices: Vec<(String, i32)>,
}

async fn fetch_program_year(
	transport: &dyn AwardTransport,
	breaker: &mut CircuitBreaker,
	program_number: &str,
	fiscal_year: i32,
	config: &RunConfig,
) -> Result<(Vec<AwardRecord>, bool)> {
	let mut records = Vec::new();
	let mut page = 0u32;
	let mut truncated = false;

	loop {
		if !breaker.allow_request() {
			return Err(OrchestratorError::CircuitOpen { program_number: program_number.to_string(), fiscal_year });
		}
		if page >= config.max_pages_per_request {
			truncated = true;
			break;
		}

		match fetch_page_with_retry(transport, breaker, program_number, fiscal_year, page, config).await {
			Ok(response) => {
				records.extend(response.records.into_iter().map(|mut r| {
					r.fiscal_year = fiscal_year;
					r
				}));
				if !response.has_next {
					break;
				}
				page += 1;
				async_std::task::sleep(Duration::from_millis(config.inter_request_delay_ms)).await;
			}
			Err(e) => return Err(e),
		}
	}

	Ok((records, truncated))
}

/// Retries a single page fetch with exponential backoff (base
/// `inter_request_delay_ms`, doubling each attempt), feeding every failure
/// to the breaker. Gives up once the breaker itself refuses the next
/// attempt -- i.e. once it has tripped OPEN after `threshold` consecutive
/// failures -- surfacing the last transport error rather than retrying
/// forever.
async fn fetch_page_with_retry(
	transport: &dyn AwardTransport,
	breaker: &mut CircuitBreaker,
	program_number: &str,
	fiscal_year: i32,
	page: u32,
	config: &RunConfig,
) -> Result<AwardPage> {
	let mut attempt = 0u32;
	loop {
		match transport.fetch_page(program_number, fiscal_year, page).await {
			Ok(response) => {
				breaker.record_success();
				return Ok(response);
			}
			Err(e) => {
				breaker.record_failure();
				if !breaker.allow_request() {
					return Err(e);
				}
				let backoff_ms = config.inter_request_delay_ms.saturating_mul(1u64 << attempt.min(5));
				async_std::task::sleep(Duration::from_millis(backoff_ms)).await;
				attempt += 1;
			}
		}
	}
}

/// Run the populator across every `(program_number, fiscal_year)` pair,
/// dedupe, match, and group by Tribe. Returns the per-Tribe caches plus a
/// coverage summary; individual slice failures are recorded rather than
/// aborting the run.
pub async fn populate_awards(
	transport: &dyn AwardTransport,
	registry: &TribalRegistry,
	aliases: &AliasMap,
	program_years: &[(String, i32)],
	fiscal_year_start: i32,
	fiscal_year_end: i32,
	config: &RunConfig,
) -> (BTreeMap<String, TribeAwardCache>, AwardCoverage) {
	let mut all_records: Vec<AwardRecord> = Vec::new();
	let mut coverage = AwardCoverage::default();

	for (program_number, fiscal_year) in program_years {
		let mut breaker = CircuitBreaker::new(config.circuit_breaker_threshold, config.circuit_breaker_cooldown_secs);
		match fetch_program_year(transport, &mut breaker, program_number, *fiscal_year, config).await {
			Ok((records, truncated)) => {
				if truncated {
					coverage.truncated_slices.push((program_number.clone(), *fiscal_year));
				}
				all_records.extend(records);
			}
			Err(e) => {
				coverage.incomplete_slices.push(IncompleteSlice {
					program_number: program_number.clone(),
					fiscal_year: *fiscal_year,
					detail: e.to_string(),
				});
			}
		}
	}

	// Dedup by award id, falling back to the composite key.
	let mut seen = std::collections::BTreeSet::new();
	let mut deduped = Vec::with_capacity(all_records.len());
	for record in all_records {
		let key = record.dedup_key();
		if seen.insert(key) {
			deduped.push(record);
		}
	}

	let mut by_tribe: BTreeMap<String, Vec<AwardRecord>> = BTreeMap::new();
	let mut unmatched = Vec::new();

	for record in deduped {
		let outcome = match_recipient(
			registry,
			aliases,
			&record.recipient_name,
			record.recipient_state.as_deref(),
			config.fuzzy_match_threshold,
		);
		match outcome {
			MatchOutcome::Matched(tribe_id) => {
				by_tribe.entry(tribe_id).or_default().push(record);
			}
			MatchOutcome::Consortium => {
				coverage.consortium_count += 1;
				coverage.consortium_obligation_total += record.obligation;
			}
			MatchOutcome::NoMatch => {
				unmatched.push(UnmatchedRecipient { recipient_name: record.recipient_name.clone(), obligation: record.obligation });
			}
		}
	}

	unmatched.sort_by(|a, b| b.obligation.partial_cmp(&a.obligation).unwrap().then_with(|| a.recipient_name.cmp(&b.recipient_name)));
	unmatched.truncate(20);
	coverage.top_unmatched = unmatched;

	let mut caches = BTreeMap::new();
	for tribe_id in registry.sorted_ids() {
		let tribe = registry.get(tribe_id).expect("sorted_ids only yields ids present in the registry");
		let awards = by_tribe.remove(tribe_id).unwrap_or_default();
		if !awards.is_empty() {
			coverage.tribes_with_awards += 1;
		}
		let cache = TribeAwardCache::build(tribe_id, &tribe.name, fiscal_year_start, fiscal_year_end, awards);
		caches.insert(tribe_id.to_string(), cache);
	}

	(caches, coverage)
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::test_util::tribe;
	use std::sync::atomic::{AtomicU32, Ordering};
	use std::sync::Mutex;

	struct FakeTransport {
		pages: Mutex<Vec<AwardPage>>,
		calls: AtomicU32,
	}

	#[async_trait]
	impl AwardTransport for FakeTransport {
		async fn fetch_page(&self, _program_number: &str, _fiscal_year: i32, page: u32) -> Result<AwardPage> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			let pages = self.pages.lock().unwrap();
			Ok(pages.get(page as usize).cloned().unwrap_or(AwardPage { records: vec![], has_next: false }))
		}
	}

	/// Fails every request, so it can drive the retry-then-trip path through
	/// the real call chain rather than exercising the breaker in isolation.
	struct AlwaysFailingTransport {
		calls: AtomicU32,
	}

	#[async_trait]
	impl AwardTransport for AlwaysFailingTransport {
		async fn fetch_page(&self, program_number: &str, fiscal_year: i32, _page: u32) -> Result<AwardPage> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Err(OrchestratorError::Transport { program_number: program_number.to_string(), fiscal_year, detail: "connection reset".to_string() })
		}
	}

	fn award(name: &str, state: &str, obligation: f64) -> AwardRecord {
		AwardRecord {
			award_id: Some(format!("a-{name}-{obligation}")),
			recipient_name: name.to_string(),
			recipient_state: Some(state.to_string()),
			obligation,
			fiscal_year: 0,
			program_number: "93.999".to_string(),
			start_date: None,
			description: String::new(),
			awarding_agency: "HUD".to_string(),
		}
	}

	fn registry() -> TribalRegistry {
		TribalRegistry::from_tribes(vec![tribe("tribe_navajo", "The Navajo Nation", &["AZ", "NM", "UT"])]).unwrap()
	}

	#[async_std::test]
	async fn single_page_matches_and_builds_cache() {
		let transport = FakeTransport {
			pages: Mutex::new(vec![AwardPage { records: vec![award("The Navajo Nation", "AZ", 5000.0)], has_next: false }]),
			calls: AtomicU32::new(0),
		};
		let (caches, coverage) = populate_awards(
			&transport,
			&registry(),
			&AliasMap::default(),
			&[("93.999".to_string(), 2026)],
			2022,
			2026,
			&RunConfig::default(),
		)
		.await;
		assert_eq!(caches["tribe_navajo"].count, 1);
		assert_eq!(coverage.tribes_with_awards, 1);
	}

	#[async_std::test]
	async fn pagination_cap_emits_truncation_without_aborting() {
		let mut config = RunConfig::default();
		config.max_pages_per_request = 2;
		let pages = vec![
			AwardPage { records: vec![award("The Navajo Nation", "AZ", 100.0)], has_next: true },
			AwardPage { records: vec![award("The Navajo Nation", "AZ", 200.0)], has_next: true },
		];
		let transport = FakeTransport { pages: Mutex::new(pages), calls: AtomicU32::new(0) };
		let (caches, coverage) = populate_awards(
			&transport,
			&registry(),
			&AliasMap::default(),
			&[("93.999".to_string(), 2026)],
			2022,
			2026,
			&config,
		)
		.await;
		assert!(!coverage.truncated_slices.is_empty());
		assert_eq!(caches["tribe_navajo"].count, 2);
	}

	#[async_std::test]
	async fn unmatched_recipients_are_tracked_not_dropped_silently() {
		let transport = FakeTransport {
			pages: Mutex::new(vec![AwardPage { records: vec![award("Unknown Org", "ZZ", 999.0)], has_next: false }]),
			calls: AtomicU32::new(0),
		};
		let (_caches, coverage) = populate_awards(
			&transport,
			&registry(),
			&AliasMap::default(),
			&[("93.999".to_string(), 2026)],
			2022,
			2026,
			&RunConfig::default(),
		)
		.await;
		assert_eq!(coverage.top_unmatched.len(), 1);
		assert_eq!(coverage.top_unmatched[0].recipient_name, "Unknown Org");
	}

	#[test]
	fn breaker_opens_after_threshold_then_recovers_half_open() {
		let mut breaker = CircuitBreaker::new(3, 0);
		for _ in 0..3 {
			breaker.record_failure();
		}
		assert_eq!(breaker.state, BreakerState::Open);
		assert!(breaker.allow_request());
		assert_eq!(breaker.state, BreakerState::HalfOpen);
	}

	#[async_std::test]
	async fn repeated_failures_retry_with_backoff_then_trip_the_breaker() {
		let transport = AlwaysFailingTransport { calls: AtomicU32::new(0) };
		let mut breaker = CircuitBreaker::new(3, 60);
		let mut config = RunConfig::default();
		config.inter_request_delay_ms = 1;

		let result = fetch_program_year(&transport, &mut breaker, "93.999", 2026, &config).await;

		assert!(result.is_err());
		assert_eq!(breaker.state, BreakerState::Open);
		// Three calls, not one: the failure path retries through the real
		// fetch_program_year call chain instead of aborting on the first error.
		assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
	}

	#[async_std::test]
	async fn breaker_stays_open_for_the_next_page_within_the_same_slice() {
		let transport = AlwaysFailingTransport { calls: AtomicU32::new(0) };
		let mut breaker = CircuitBreaker::new(1, 60);
		let mut config = RunConfig::default();
		config.inter_request_delay_ms = 1;

		let first = fetch_program_year(&transport, &mut breaker, "93.999", 2026, &config).await;
		assert!(matches!(first, Err(OrchestratorError::Transport { .. })));

		let second = fetch_program_year(&transport, &mut breaker, "93.999", 2026, &config).await;
		assert!(matches!(second, Err(OrchestratorError::CircuitOpen { .. })));
	}
}
