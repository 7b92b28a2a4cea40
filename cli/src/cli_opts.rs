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

//! Command line surface for a single run of the packet orchestrator.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "packet-cli", about = "Generate Tribal policy packet documents from loaded data artifacts.")]
pub struct CliOpts {
	/// Directory holding the loaded data artifacts (tribal_registry.json,
	/// programs.json, bills.json, delegations.json, hazard_profiles.json,
	/// award_caches.json, source_meta.json).
	#[arg(long, default_value = "data")]
	pub data_dir: PathBuf,

	/// Directory documents and gate results are written under, one
	/// subdirectory per Tribe id.
	#[arg(long, default_value = "out")]
	pub out_dir: PathBuf,

	/// File the structured log sink is written to; the colored summary
	/// still goes to stdout regardless of this setting.
	#[arg(long, default_value = "packet-cli.log")]
	pub log_file: PathBuf,

	/// Restrict the run to a single Tribe id. Unknown ids are a usage
	/// error, not a silent no-op.
	#[arg(long)]
	pub tribe: Option<String>,

	/// Restrict the run to one or more variant codes (A, B, C, D). Defaults
	/// to all four when omitted.
	#[arg(long, value_delimiter = ',')]
	pub variant: Vec<String>,

	/// Explicit opt-in to run document generation. Present for parity with
	/// the other invocation modes below; a run with none of
	/// `--dry-run`/`--report-only` set behaves as if this were passed.
	#[arg(long)]
	pub prep_packets: bool,

	/// Load the artifacts and print what would be generated without
	/// rendering or writing anything.
	#[arg(long)]
	pub dry_run: bool,

	/// Proceed even if `out_dir` already holds files from a previous run.
	#[arg(long)]
	pub force: bool,

	/// Run the full pipeline into a scratch directory and persist only the
	/// aggregate coverage report under `out_dir`; no per-Tribe document or
	/// gate-result file is kept.
	#[arg(long)]
	pub report_only: bool,

	/// Re-fetch source data before generating documents. The data
	/// ingestion collaborator this would drive is out of scope for this
	/// binary; the flag is accepted so scripts invoking it fail loudly
	/// instead of silently generating from stale artifacts.
	#[arg(long)]
	pub refresh_data: bool,

	/// Increase log verbosity; may be repeated (`-v`, `-vv`).
	#[arg(short = 'v', long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl CliOpts {
	pub fn std_log_level(&self) -> log::LevelFilter {
		match self.verbose {
			0 => log::LevelFilter::Info,
			1 => log::LevelFilter::Debug,
			_ => log::LevelFilter::Trace,
		}
	}
}
