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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentVariant {
	/// A: full strategy, talking points, timing.
	TribalInternal,
	/// B: program summaries, delegation facts, bill status only.
	Congressional,
	/// C: regional aggregate, internal audience.
	RegionalInternal,
	/// D: regional aggregate, congressional audience.
	RegionalCongressional,
}

impl DocumentVariant {
	pub fn code(&self) -> &'static str {
		match self {
			DocumentVariant::TribalInternal => "A",
			DocumentVariant::Congressional => "B",
			DocumentVariant::RegionalInternal => "C",
			DocumentVariant::RegionalCongressional => "D",
		}
	}

	pub fn all() -> [DocumentVariant; 4] {
		[
			DocumentVariant::TribalInternal,
			DocumentVariant::Congressional,
			DocumentVariant::RegionalInternal,
			DocumentVariant::RegionalCongressional,
		]
	}

	pub fn is_congressional(&self) -> bool {
		matches!(self, DocumentVariant::Congressional | DocumentVariant::RegionalCongressional)
	}

	pub fn is_regional(&self) -> bool {
		matches!(self, DocumentVariant::RegionalInternal | DocumentVariant::RegionalCongressional)
	}

	pub fn parse(code: &str) -> Option<DocumentVariant> {
		match code.to_uppercase().as_str() {
			"A" => Some(DocumentVariant::TribalInternal),
			"B" => Some(DocumentVariant::Congressional),
			"C" => Some(DocumentVariant::RegionalInternal),
			"D" => Some(DocumentVariant::RegionalCongressional),
			_ => None,
		}
	}
}

/// Section identifiers a renderer may emit; used both to drive the
/// Document Builder's section list and to check audience leakage in the
/// Quality Gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentCategory {
	ProgramSummary,
	DelegationFacts,
	BillStatus,
	HazardOverview,
	Strategy,
	TalkingPoints,
	PoliticalFraming,
	Timing,
	RegionalRollup,
}

/// Static per-variant configuration: audience, confidentiality,
/// permitted content, and the page-count band the Quality Gate enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
	pub variant: DocumentVariant,
	pub audience_tag: String,
	pub confidential: bool,
	pub included_sections: Vec<ContentCategory>,
	pub permitted_categories: Vec<ContentCategory>,
	pub min_pages: u32,
	pub max_pages: u32,
}

impl VariantConfig {
	pub fn permits(&self, category: ContentCategory) -> bool {
		self.permitted_categories.contains(&category)
	}

	/// Built-in defaults matching the data model: A includes strategy and
	/// timing and is confidential; B strips all of that; C/D aggregate
	/// across a region and inherit A/B's content rules respectively.
	pub fn defaults(variant: DocumentVariant) -> Self {
		use ContentCategory::*;
		match variant {
			DocumentVariant::TribalInternal => VariantConfig {
				variant,
				audience_tag: "tribal-leadership".into(),
				confidential: true,
				included_sections: vec![
					ProgramSummary,
					DelegationFacts,
					BillStatus,
					HazardOverview,
					Strategy,
					TalkingPoints,
					PoliticalFraming,
					Timing,
				],
				permitted_categories: vec![
					ProgramSummary,
					DelegationFacts,
					BillStatus,
					HazardOverview,
					Strategy,
					TalkingPoints,
					PoliticalFraming,
					Timing,
				],
				min_pages: 4,
				max_pages: 12,
			},
			DocumentVariant::Congressional => VariantConfig {
				variant,
				audience_tag: "congressional-staff".into(),
				confidential: false,
				included_sections: vec![ProgramSummary, DelegationFacts, BillStatus],
				permitted_categories: vec![ProgramSummary, DelegationFacts, BillStatus, HazardOverview],
				min_pages: 2,
				max_pages: 6,
			},
			DocumentVariant::RegionalInternal => VariantConfig {
				variant,
				audience_tag: "regional-leadership".into(),
				confidential: true,
				included_sections: vec![
					RegionalRollup,
					ProgramSummary,
					DelegationFacts,
					BillStatus,
					HazardOverview,
					Strategy,
					TalkingPoints,
				],
				permitted_categories: vec![
					RegionalRollup,
					ProgramSummary,
					DelegationFacts,
					BillStatus,
					HazardOverview,
					Strategy,
					TalkingPoints,
					PoliticalFraming,
					Timing,
				],
				min_pages: 6,
				max_pages: 20,
			},
			DocumentVariant::RegionalCongressional => VariantConfig {
				variant,
				audience_tag: "congressional-staff".into(),
				confidential: false,
				included_sections: vec![RegionalRollup, ProgramSummary, DelegationFacts, BillStatus],
				permitted_categories: vec![RegionalRollup, ProgramSummary, DelegationFacts, BillStatus, HazardOverview],
				min_pages: 4,
				max_pages: 10,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn congressional_variants_forbid_strategy() {
		let b = VariantConfig::defaults(DocumentVariant::Congressional);
		assert!(!b.permits(ContentCategory::Strategy));
		assert!(!b.permits(ContentCategory::TalkingPoints));
		assert!(!b.permits(ContentCategory::PoliticalFraming));

		let d = VariantConfig::defaults(DocumentVariant::RegionalCongressional);
		assert!(!d.permits(ContentCategory::Strategy));
	}

	#[test]
	fn parse_round_trips_with_code() {
		for v in DocumentVariant::all() {
			assert_eq!(DocumentVariant::parse(v.code()), Some(v));
		}
	}
}
