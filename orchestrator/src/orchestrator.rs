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

//! The Packet Orchestrator: assembles one `TribePacketContext` per Tribe,
//! renders every requested variant, runs the quality gate, and writes
//! whatever passes. Deterministic lexicographic Tribe iteration, no
//! shared mutable state between Tribes, so the per-Tribe work fans out
//! over `rayon` with nothing to synchronize.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use packet_common::award::TribeAwardCache;
use packet_common::bill::{Bill, TribeDelegation};
use packet_common::config::RunConfig;
use packet_common::confidence::ConfidenceDomain;
use packet_common::context::{SourceMetaSet, TribePacketContext};
use packet_common::hazard::HazardProfile;
use packet_common::program::Program;
use packet_common::util::write_atomic;
use packet_common::variant::{DocumentVariant, VariantConfig};
use packet_registry::TribalRegistry;
use rayon::prelude::*;

use crate::confidence;
use crate::coverage::CoverageReport;
use crate::document::{render_document, StyleCatalog};
use crate::error::{OrchestratorError, Result};
use crate::quality_gate::run_quality_gate;
use crate::relevance::select_programs;

/// Everything the orchestrator needs that isn't a numeric knob: loaded
/// once per run and treated as read-only ground truth for every Tribe.
pub struct RunInputs<'a> {
	pub registry: &'a TribalRegistry,
	pub award_caches: &'a BTreeMap<String, TribeAwardCache>,
	pub hazard_profiles: &'a BTreeMap<String, HazardProfile>,
	pub delegations: &'a BTreeMap<String, TribeDelegation>,
	pub programs: &'a [Program],
	pub bills: &'a [Bill],
	pub source_meta: &'a BTreeMap<String, SourceMetaSet>,
	pub config: &'a RunConfig,
	pub catalog: &'a StyleCatalog,
	pub now: DateTime<Utc>,
}

fn domain_scores(meta: &SourceMetaSet, now: DateTime<Utc>, half_life_days: f64) -> BTreeMap<ConfidenceDomain, f64> {
	let mut scores = BTreeMap::new();
	scores.insert(ConfidenceDomain::Identity, confidence::domain_score(meta.identity.as_ref(), now, half_life_days));
	scores.insert(ConfidenceDomain::Delegation, confidence::domain_score(meta.delegation.as_ref(), now, half_life_days));
	scores.insert(ConfidenceDomain::Funding, confidence::domain_score(meta.funding.as_ref(), now, half_life_days));
	scores.insert(ConfidenceDomain::Hazard, confidence::domain_score(meta.hazard.as_ref(), now, half_life_days));
	scores.insert(ConfidenceDomain::Intel, confidence::domain_score(meta.intel.as_ref(), now, half_life_days));
	scores
}

/// Build the (variant-agnostic) context shared by every variant rendered
/// for one Tribe. The caller fills in `variant` before rendering.
pub fn build_context(tribe_id: &str, inputs: &RunInputs<'_>) -> Option<TribePacketContext> {
	let tribe = inputs.registry.get(tribe_id)?.clone();

	let default_cache;
	let cache = match inputs.award_caches.get(tribe_id) {
		Some(c) => c,
		None => {
			default_cache = TribeAwardCache::build(tribe_id, &tribe.name, 0, 0, vec![]);
			&default_cache
		}
	};

	let hazard_profile = inputs.hazard_profiles.get(tribe_id).cloned();
	let delegation = inputs.delegations.get(tribe_id).cloned();

	let selected_programs = select_programs(
		inputs.programs,
		&tribe,
		hazard_profile.as_ref(),
		&cache.per_program,
		inputs.config.relevance_target_min,
		inputs.config.relevance_target_max,
	);

	let program_ids: Vec<String> = selected_programs.iter().map(|p| p.program_id.clone()).collect();
	let delegation_bioguide_ids: Vec<String> =
		delegation.as_ref().map(|d| d.legislators.iter().map(|l| l.bioguide_id.clone()).collect()).unwrap_or_default();
	let relevant_bills: Vec<Bill> =
		inputs.bills.iter().filter(|b| b.relevant_to(&program_ids, &delegation_bioguide_ids)).cloned().collect();

	let meta_set = inputs.source_meta.get(tribe_id).cloned().unwrap_or_default();
	let scores = domain_scores(&meta_set, inputs.now, inputs.config.confidence_half_life_days);
	let section_confidence = scores
		.into_iter()
		.map(|(domain, score)| (domain, packet_common::confidence::bucket(score)))
		.collect();

	Some(TribePacketContext {
		tribe,
		variant: DocumentVariant::TribalInternal,
		delegation,
		selected_programs,
		awards: cache.awards.clone(),
		total_obligation: cache.total_obligation,
		hazard_profile,
		relevant_bills,
		section_confidence,
		generated_at: inputs.now,
	})
}

fn output_paths(out_dir: &Path, tribe_id: &str, variant: DocumentVariant) -> (PathBuf, PathBuf) {
	let dir = out_dir.join(tribe_id);
	let code = variant.code();
	(dir.join(format!("packet_{code}.docx")), dir.join(format!("packet_{code}.gate.json")))
}

fn write_gate_result(path: &Path, result: &packet_common::critique::QualityGateResult) -> Result<()> {
	let bytes = serde_json::to_vec_pretty(result)?;
	write_atomic(path, &bytes).map_err(to_orchestrator_err)
}

fn to_orchestrator_err(e: packet_common::error::PacketError) -> OrchestratorError {
	match e {
		packet_common::error::PacketError::Io(io) => OrchestratorError::Io(io),
		other => OrchestratorError::Document(other.to_string()),
	}
}

enum TribeVariantOutcome {
	Written,
	GateFailed { tribe_id: String, variant_code: &'static str, detail: String },
	Errored { tribe_id: String, variant_code: &'static str, detail: String },
	Skipped,
}

fn run_one(tribe_id: &str, variant: DocumentVariant, inputs: &RunInputs<'_>, out_dir: &Path) -> TribeVariantOutcome {
	let Some(mut context) = build_context(tribe_id, inputs) else {
		return TribeVariantOutcome::Skipped;
	};
	context.variant = variant;

	let config = VariantConfig::defaults(variant);
	let rendered = match render_document(&context, &config, inputs.catalog) {
		Ok(r) => r,
		Err(e) => return TribeVariantOutcome::Errored { tribe_id: tribe_id.to_string(), variant_code: variant.code(), detail: e.to_string() },
	};

	let gate_result = run_quality_gate(&rendered, variant, &config);
	let (docx_path, gate_path) = output_paths(out_dir, tribe_id, variant);

	if let Err(e) = write_gate_result(&gate_path, &gate_result) {
		return TribeVariantOutcome::Errored { tribe_id: tribe_id.to_string(), variant_code: variant.code(), detail: e.to_string() };
	}

	if !gate_result.passed {
		let detail = if !gate_result.failing_checks.is_empty() {
			format!("failing checks: {}", gate_result.failing_checks.join(", "))
		} else {
			format!("{} blocker critique(s) unresolved", gate_result.blocker_count)
		};
		return TribeVariantOutcome::GateFailed { tribe_id: tribe_id.to_string(), variant_code: variant.code(), detail };
	}

	match write_atomic(&docx_path, &rendered.bytes).map_err(to_orchestrator_err) {
		Ok(()) => TribeVariantOutcome::Written,
		Err(e) => TribeVariantOutcome::Errored { tribe_id: tribe_id.to_string(), variant_code: variant.code(), detail: e.to_string() },
	}
}

/// Run every requested variant for every Tribe in the registry, in
/// lexicographic Tribe-id order, and write whatever clears the quality
/// gate under `out_dir`. Per-Tribe, per-variant failures are isolated:
/// one Tribe's rendering error never aborts the rest of the run.
pub fn run_packet_generation(inputs: &RunInputs<'_>, variants: &[DocumentVariant], out_dir: &Path) -> CoverageReport {
	let tribe_ids = inputs.registry.sorted_ids();
	let tribes_with_hazard_data = tribe_ids.iter().filter(|id| inputs.hazard_profiles.contains_key(**id)).count() as u32;

	let mut report = CoverageReport::new(tribe_ids.len() as u32, &default_award_coverage(), tribes_with_hazard_data);
	report.tribes_with_awards = inputs.award_caches.values().filter(|c| c.count > 0).count() as u32;

	let jobs: Vec<(&str, DocumentVariant)> = tribe_ids.iter().flat_map(|id| variants.iter().map(move |v| (*id, *v))).collect();

	let outcomes: Vec<TribeVariantOutcome> = jobs.par_iter().map(|(tribe_id, variant)| run_one(tribe_id, *variant, inputs, out_dir)).collect();

	for outcome in outcomes {
		match outcome {
			TribeVariantOutcome::Written => report.record_success(),
			TribeVariantOutcome::GateFailed { tribe_id, variant_code, detail } => {
				report.record_failure(&tribe_id, variant_code, "gate-failure", &detail);
			}
			TribeVariantOutcome::Errored { tribe_id, variant_code, detail } => {
				report.record_failure(&tribe_id, variant_code, "runtime-error", &detail);
			}
			TribeVariantOutcome::Skipped => {}
		}
	}

	report
}

/// Used only to seed `CoverageReport::new`'s unmatched/consortium fields
/// when the orchestrator itself doesn't run the Award Populator in this
/// call (those figures are folded in by the caller from the populator's
/// own `AwardCoverage` beforehand when available).
fn default_award_coverage() -> crate::awards::AwardCoverage {
	crate::awards::AwardCoverage::default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use packet_common::hazard::{HazardTypeRow, Rating, TopHazard};
	use packet_common::program::{AccessType, FundingType, ProgramStatus};
	use packet_common::test_util::tribe;
	use tempfile::tempdir;

	fn program(id: &str, status: ProgramStatus) -> Program {
		Program {
			program_id: id.to_string(),
			name: format!("Program {id}"),
			agency: "HUD".to_string(),
			program_number: format!("93.{id}"),
			ci_score: 50.0,
			status,
			hazard_tags: vec![],
			ecoregion_tags: vec![],
			access_type: AccessType::Direct,
			funding_type: FundingType::Grant,
		}
	}

	fn registry() -> TribalRegistry {
		TribalRegistry::from_tribes(vec![tribe("tribe_alpha", "Alpha Tribe", &["AZ"]), tribe("tribe_beta", "Beta Tribe", &["NM"])]).unwrap()
	}

	fn hazard_profile(tribe_id: &str) -> HazardProfile {
		HazardProfile {
			tribe_id: tribe_id.to_string(),
			risk_score: 48.0,
			risk_rating: Rating::RelativelyModerate,
			eal_score: 35.0,
			eal_total: 850_000.0,
			eal_rating: Rating::RelativelyLow,
			sovi_score: 40.0,
			sovi_rating: Rating::RelativelyModerate,
			resl_score: 55.0,
			resl_rating: Rating::RelativelyModerate,
			top_hazards: vec![TopHazard { code: "RFLD".into(), risk_score: 48.0, eal_total: 850_000.0, source: "NRI".into(), nri_wfir_original: None }],
			all_hazards: BTreeMap::from([("RFLD".to_string(), HazardTypeRow { risk_score: 48.0, eal_total: 850_000.0, annual_frequency: 0.1 })]),
			counties_analyzed: 2,
			nri_version: "2024".to_string(),
		}
	}

	fn base_inputs<'a>(
		award_caches: &'a BTreeMap<String, TribeAwardCache>,
		hazard_profiles: &'a BTreeMap<String, HazardProfile>,
		delegations: &'a BTreeMap<String, TribeDelegation>,
		programs: &'a [Program],
		bills: &'a [Bill],
		source_meta: &'a BTreeMap<String, SourceMetaSet>,
		config: &'a RunConfig,
		catalog: &'a StyleCatalog,
		registry: &'a TribalRegistry,
	) -> RunInputs<'a> {
		RunInputs { registry, award_caches, hazard_profiles, delegations, programs, bills, source_meta, config, catalog, now: Utc::now() }
	}

	#[test]
	fn writes_passing_documents_for_every_tribe_and_variant() {
		let reg = registry();
		let caches = BTreeMap::new();
		let mut hazards = BTreeMap::new();
		hazards.insert("tribe_alpha".to_string(), hazard_profile("tribe_alpha"));
		hazards.insert("tribe_beta".to_string(), hazard_profile("tribe_beta"));
		let delegations = BTreeMap::new();
		let programs: Vec<Program> = (0..10).map(|i| program(&i.to_string(), ProgramStatus::Stable)).collect();
		let bills = vec![];
		let source_meta = BTreeMap::new();
		let config = RunConfig::default();
		let catalog = StyleCatalog::standard();

		let inputs = base_inputs(&caches, &hazards, &delegations, &programs, &bills, &source_meta, &config, &catalog, &reg);
		let dir = tempdir().unwrap();
		let report = run_packet_generation(&inputs, &[DocumentVariant::TribalInternal, DocumentVariant::Congressional], dir.path());

		assert_eq!(report.total_tribes, 2);
		// Every (tribe, variant) job resolves to exactly one of written or
		// failed -- no job silently vanishes.
		assert_eq!(report.documents_written + report.documents_failed, 4);

		let gate_path = dir.path().join("tribe_alpha").join("packet_A.gate.json");
		assert!(gate_path.exists());
		let gate_json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&gate_path).unwrap()).unwrap();
		let docx_path = dir.path().join("tribe_alpha").join("packet_A.docx");
		assert_eq!(docx_path.exists(), gate_json["passed"].as_bool().unwrap());
	}

	/// S6: a variant-B document containing a congressional-staff-only
	/// phrase must fail the quality gate and leave no `.docx` behind, with
	/// the `QualityGateResult` persisted and the failing check enumerated.
	#[test]
	fn s6_audience_leak_blocks_the_congressional_variant_without_writing_a_document() {
		let reg = TribalRegistry::from_tribes(vec![tribe("tribe_leaky", "Leaky Tribe", &["AZ"])]).unwrap();
		let caches = BTreeMap::new();
		let hazards = BTreeMap::new();
		let delegations = BTreeMap::new();
		let programs: Vec<Program> = vec![program("1", ProgramStatus::Stable)];
		let bills = vec![];
		let source_meta = BTreeMap::new();
		let config = RunConfig::default();
		let catalog = StyleCatalog::standard();

		let inputs = base_inputs(&caches, &hazards, &delegations, &programs, &bills, &source_meta, &config, &catalog, &reg);

		// Render directly and inject the leak phrase the way a defective
		// renderer would, then exercise the gate exactly as the
		// orchestrator does for a variant-B document.
		let mut context = build_context("tribe_leaky", &inputs).unwrap();
		context.variant = DocumentVariant::Congressional;
		let variant_config = VariantConfig::defaults(DocumentVariant::Congressional);
		let mut rendered = render_document(&context, &variant_config, &catalog).unwrap();
		rendered.plain_text.push_str(" This is a strategic talking point for the Senator's chief of staff.");

		let gate_result = run_quality_gate(&rendered, DocumentVariant::Congressional, &variant_config);
		assert!(!gate_result.passed);
		assert!(gate_result.failing_checks.contains(&"audience_leakage".to_string()));

		let dir = tempdir().unwrap();
		let (docx_path, gate_path) = output_paths(dir.path(), "tribe_leaky", DocumentVariant::Congressional);
		write_gate_result(&gate_path, &gate_result).unwrap();
		assert!(gate_path.exists());
		assert!(!docx_path.exists());
	}

	#[test]
	fn tribe_with_no_registry_entry_is_skipped_not_errored() {
		let reg = registry();
		let caches = BTreeMap::new();
		let hazards = BTreeMap::new();
		let delegations = BTreeMap::new();
		let programs: Vec<Program> = vec![];
		let bills = vec![];
		let source_meta = BTreeMap::new();
		let config = RunConfig::default();
		let catalog = StyleCatalog::standard();
		let inputs = base_inputs(&caches, &hazards, &delegations, &programs, &bills, &source_meta, &config, &catalog, &reg);
		assert!(build_context("tribe_nonexistent", &inputs).is_none());
	}
}
