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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
	Blocker,
	Major,
	Minor,
}

/// One critic's finding against one section of a rendered document.
/// `priority` is fixed per critic (1 = accuracy through 5 = copy) and
/// drives conflict resolution when two critics disagree about the same
/// section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Critique {
	pub critic_name: String,
	pub section: String,
	pub severity: Severity,
	pub recommendation: String,
	pub priority: u8,
}

/// One automated (non-critic) check's pass/fail outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
	pub check_name: String,
	pub passed: bool,
	pub detail: String,
}

/// One entry in the conflict-resolution trace: two critiques on the same
/// section disagreed, and this records which one won and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
	pub section: String,
	pub winning_critic: String,
	pub losing_critic: String,
	pub reason: String,
}

/// The Quality Gate's final verdict, persisted alongside every document
/// regardless of outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGateResult {
	pub passed: bool,
	pub critics_completed: u32,
	pub blocker_count: u32,
	pub major_count: u32,
	pub minor_count: u32,
	pub automated_checks: Vec<CheckResult>,
	pub failing_checks: Vec<String>,
	pub conflicts: Vec<ConflictResolution>,
}
