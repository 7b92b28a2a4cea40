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

mod cli_opts;
mod data_load;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use chrono::Utc;

use cli_opts::CliOpts;
use packet_common::config::RunConfig;
use packet_common::variant::DocumentVariant;
use packet_orchestrator::document::StyleCatalog;
use packet_orchestrator::{run_packet_generation, CoverageReport, RunInputs};
use packet_registry::TribalRegistry;

/// Data-integrity failure while loading artifacts: Err from `main` maps to
/// exit code 1 via the standard library's `Termination` impl, matching the
/// categories a reviewer would expect from `PacketError::category()`.
fn main() -> Result<ExitCode> {
	let opts = CliOpts::parse();

	packet_orchestrator::logger::init(opts.std_log_level(), log::LevelFilter::Debug, &opts.log_file)
		.context("initializing logger")?;

	if opts.refresh_data {
		bail!("--refresh-data requires the data ingestion collaborator, which this binary does not carry; run that pipeline separately and re-invoke without --refresh-data");
	}

	let config = RunConfig::default();
	let artifacts = data_load::load_all(&opts.data_dir, config.artifact_size_guard_bytes)?;

	let registry = match &opts.tribe {
		None => artifacts.registry,
		Some(tribe_id) => {
			let tribe = artifacts
				.registry
				.get(tribe_id)
				.with_context(|| format!("tribe id '{tribe_id}' is not present in the registry at {}", opts.data_dir.display()))?
				.clone();
			TribalRegistry::from_tribes(vec![tribe])?
		}
	};

	let variants = resolve_variants(&opts.variant)?;

	log::info!(
		"loaded {} tribe(s), {} program(s), {} bill(s); rendering variant(s) {}",
		registry.len(),
		artifacts.programs.len(),
		artifacts.bills.len(),
		variants.iter().map(|v| v.code()).collect::<Vec<_>>().join(","),
	);

	if opts.dry_run {
		println!(
			"dry run: would render {} tribe(s) x {} variant(s) into {}",
			registry.len(),
			variants.len(),
			opts.out_dir.display()
		);
		return Ok(ExitCode::SUCCESS);
	}

	if !opts.report_only && !opts.force && out_dir_has_prior_run(&opts.out_dir)? {
		bail!("{} already holds output from a previous run; pass --force to overwrite it", opts.out_dir.display());
	}

	let catalog = StyleCatalog::standard();
	let inputs = RunInputs {
		registry: &registry,
		award_caches: &artifacts.award_caches,
		hazard_profiles: &artifacts.hazard_profiles,
		delegations: &artifacts.delegations,
		programs: &artifacts.programs,
		bills: &artifacts.bills,
		source_meta: &artifacts.source_meta,
		config: &config,
		catalog: &catalog,
		now: Utc::now(),
	};

	let report = if opts.report_only {
		let scratch = tempfile::tempdir().context("creating scratch directory for --report-only")?;
		run_packet_generation(&inputs, &variants, scratch.path())
	} else {
		run_packet_generation(&inputs, &variants, &opts.out_dir)
	};

	write_coverage_report(&opts.out_dir, &report)?;
	log::info!(
		"run complete: {} written, {} failed across {} tribe(s)",
		report.documents_written,
		report.documents_failed,
		report.total_tribes
	);

	Ok(exit_code_for(&report))
}

fn resolve_variants(requested: &[String]) -> Result<Vec<DocumentVariant>> {
	if requested.is_empty() {
		return Ok(DocumentVariant::all().to_vec());
	}
	requested
		.iter()
		.map(|code| DocumentVariant::parse(code).with_context(|| format!("'{code}' is not a valid variant code (expected A, B, C, or D)")))
		.collect()
}

fn out_dir_has_prior_run(out_dir: &Path) -> Result<bool> {
	match std::fs::read_dir(out_dir) {
		Ok(mut entries) => Ok(entries.next().is_some()),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
		Err(e) => Err(e).with_context(|| format!("checking {}", out_dir.display())),
	}
}

fn write_coverage_report(out_dir: &Path, report: &CoverageReport) -> Result<()> {
	let bytes = serde_json::to_vec_pretty(report)?;
	packet_common::util::write_atomic(&out_dir.join("coverage_report.json"), &bytes)?;
	Ok(())
}

/// 0 on a clean run, 2 when every failure was a withheld document (the
/// quality gate did its job), 3 when any failure was a runtime error the
/// gate never got to evaluate.
fn exit_code_for(report: &CoverageReport) -> ExitCode {
	if report.documents_failed == 0 {
		return ExitCode::SUCCESS;
	}
	if report.failures_by_category.contains_key("runtime-error") {
		ExitCode::from(3)
	} else {
		ExitCode::from(2)
	}
}
