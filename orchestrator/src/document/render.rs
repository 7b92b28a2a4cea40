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

//! Section renderers. No per-Tribe templates: every document is built
//! from the same sequence of renderers, gated by the variant's permitted
//! content categories.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, RunFonts, Table, TableCell, TableRow};
use packet_common::context::TribePacketContext;
use packet_common::variant::{ContentCategory, VariantConfig};

use crate::error::{OrchestratorError, Result};
use super::style::StyleCatalog;

/// Builds a `Run` carrying the named style's font, size (converted to the
/// half-points `docx-rs` expects), color, and weight, and records the name
/// as actually used. Falls back to a plain run if the name isn't in the
/// catalog -- `check_no_orphan_references` below is what turns that into a
/// build error rather than a silently unstyled paragraph.
fn styled_run(catalog: &StyleCatalog, style_name: &str, text: &str, used_style_names: &mut Vec<String>) -> Run {
	used_style_names.push(style_name.to_string());
	let mut run = Run::new().add_text(text.to_string());
	if let Some(style) = catalog.get(style_name) {
		run = run
			.size((style.size_pt * 2.0).round() as usize)
			.color(format!("{:02X}{:02X}{:02X}", style.color.0, style.color.1, style.color.2))
			.fonts(RunFonts::new().ascii(style.font_family.as_str()).hi_ansi(style.font_family.as_str()));
		if style.bold {
			run = run.bold();
		}
	}
	run
}

/// An approximate 500 words/page, the same order of magnitude a typical
/// proportional-font business document runs at. Exact pagination depends
/// on the renderer that eventually lays the `.docx` out; this estimate is
/// what the quality gate's page-budget check operates on.
const WORDS_PER_PAGE: usize = 500;

pub struct RenderedDocument {
	pub bytes: Vec<u8>,
	pub plain_text: String,
	pub page_count_estimate: u32,
	pub sections_rendered: Vec<ContentCategory>,
	pub used_style_names: Vec<String>,
}

fn heading_text(title: &str, confidence_badge: Option<&str>) -> String {
	match confidence_badge {
		Some(badge) => format!("{title} [{badge}]"),
		None => title.to_string(),
	}
}

fn format_dollars(amount: f64) -> String {
	if amount >= 10_000.0 {
		format!("${:.0}K", (amount / 1000.0).round())
	} else {
		format!("${amount:.2}")
	}
}

struct Section {
	category: ContentCategory,
	heading: String,
	paragraphs: Vec<String>,
	table_rows: Vec<Vec<String>>,
}

fn build_sections(context: &TribePacketContext, config: &VariantConfig) -> Vec<Section> {
	use ContentCategory::*;
	let mut sections = Vec::new();

	let badge_for = |domain: packet_common::confidence::ConfidenceDomain| {
		context.section_confidence.get(&domain).map(|l| l.to_string())
	};

	if config.permits(ProgramSummary) {
		let rows: Vec<Vec<String>> = context
			.selected_programs
			.iter()
			.map(|p| vec![p.name.clone(), p.agency.clone(), format!("{:?}", p.status)])
			.collect();
		sections.push(Section {
			category: ProgramSummary,
			heading: heading_text("Program Summary", badge_for(packet_common::confidence::ConfidenceDomain::Funding).as_deref()),
			paragraphs: vec![format!(
				"{} selected program(s) cover {} in recorded federal obligations across {} award(s).",
				context.selected_programs.len(),
				format_dollars(context.total_obligation),
				context.awards.len()
			)],
			table_rows: rows,
		});
	}

	if config.permits(DelegationFacts) {
		let para = match &context.delegation {
			Some(d) if !d.legislators.is_empty() => {
				format!("Congressional delegation: {} legislator(s) on record.", d.legislators.len())
			}
			_ => "No congressional delegation data is available for this Tribe in the current run.".to_string(),
		};
		sections.push(Section {
			category: DelegationFacts,
			heading: heading_text("Delegation Facts", badge_for(packet_common::confidence::ConfidenceDomain::Delegation).as_deref()),
			paragraphs: vec![para],
			table_rows: vec![],
		});
	}

	if config.permits(BillStatus) {
		let rows: Vec<Vec<String>> =
			context.relevant_bills.iter().map(|b| vec![b.bill_id.clone(), b.title.clone(), b.status.clone()]).collect();
		sections.push(Section {
			category: BillStatus,
			heading: heading_text("Bill Status", badge_for(packet_common::confidence::ConfidenceDomain::Intel).as_deref()),
			paragraphs: if rows.is_empty() { vec!["No tracked bills are currently relevant to this Tribe's selected programs.".to_string()] } else { vec![] },
			table_rows: rows,
		});
	}

	if config.permits(HazardOverview) {
		let para = match &context.hazard_profile {
			Some(profile) if profile.counties_analyzed > 0 => format!(
				"Composite risk rating: {}. Expected annual loss: {}. Based on {} counties analyzed.",
				profile.risk_rating,
				format_dollars(profile.eal_total),
				profile.counties_analyzed
			),
			_ => "Hazard data could not be resolved for this Tribe in the current run.".to_string(),
		};
		sections.push(Section {
			category: HazardOverview,
			heading: heading_text("Hazard Overview", badge_for(packet_common::confidence::ConfidenceDomain::Hazard).as_deref()),
			paragraphs: vec![para],
			table_rows: vec![],
		});
	}

	if config.permits(Strategy) {
		sections.push(Section {
			category: Strategy,
			heading: heading_text("Strategic Priorities", None),
			paragraphs: vec![format!(
				"Strategic priorities for {} center on the {} selected program(s) above, weighted by hazard exposure and funding trend.",
				context.tribe.name,
				context.selected_programs.len()
			)],
			table_rows: vec![],
		});
	}

	if config.permits(TalkingPoints) {
		sections.push(Section {
			category: TalkingPoints,
			heading: heading_text("Talking Points", None),
			paragraphs: vec!["Internal talking points for leadership use in direct outreach.".to_string()],
			table_rows: vec![],
		});
	}

	if config.permits(PoliticalFraming) {
		sections.push(Section {
			category: PoliticalFraming,
			heading: heading_text("Political Framing", None),
			paragraphs: vec!["Framing notes for engagement with the Tribe's congressional delegation.".to_string()],
			table_rows: vec![],
		});
	}

	if config.permits(Timing) {
		sections.push(Section {
			category: Timing,
			heading: heading_text("Timing Considerations", None),
			paragraphs: vec!["Upcoming legislative and appropriations deadlines relevant to this Tribe.".to_string()],
			table_rows: vec![],
		});
	}

	if config.permits(RegionalRollup) {
		sections.push(Section {
			category: RegionalRollup,
			heading: heading_text("Regional Rollup", None),
			paragraphs: vec!["Aggregated figures across the Tribes in this region.".to_string()],
			table_rows: vec![],
		});
	}

	sections
}

/// Render one (Tribe, variant) document. Returns the packed `.docx` bytes
/// alongside the plain text the quality gate scans and an estimated page
/// count.
pub fn render_document(
	context: &TribePacketContext,
	config: &VariantConfig,
	catalog: &StyleCatalog,
) -> Result<RenderedDocument> {
	let sections = build_sections(context, config);

	let mut docx = Docx::new();
	let mut plain_text = String::new();
	let mut used_style_names = Vec::new();

	let title = format!("{} — {}", context.tribe.name, config.audience_tag);
	docx = docx.add_paragraph(Paragraph::new().add_run(styled_run(catalog, "heading1", &title, &mut used_style_names)));
	plain_text.push_str(&title);
	plain_text.push('\n');

	for section in &sections {
		docx = docx
			.add_paragraph(Paragraph::new().add_run(styled_run(catalog, "heading2", &section.heading, &mut used_style_names)));
		plain_text.push_str(&section.heading);
		plain_text.push('\n');

		for para in &section.paragraphs {
			docx = docx.add_paragraph(Paragraph::new().add_run(styled_run(catalog, "body", para, &mut used_style_names)));
			plain_text.push_str(para);
			plain_text.push('\n');
		}

		if !section.table_rows.is_empty() {
			let rows: Vec<TableRow> = section
				.table_rows
				.iter()
				.map(|cells| {
					TableRow::new(
						cells
							.iter()
							.map(|cell| {
								plain_text.push_str(cell);
								plain_text.push(' ');
								TableCell::new()
									.add_paragraph(Paragraph::new().add_run(styled_run(catalog, "caption", cell, &mut used_style_names)))
							})
							.collect(),
					)
				})
				.collect();
			docx = docx.add_table(Table::new(rows));
			plain_text.push('\n');
		}
	}

	used_style_names.sort();
	used_style_names.dedup();

	catalog.check_no_orphan_references(used_style_names.iter().map(|s| s.as_str())).map_err(|orphan| {
		OrchestratorError::Document(format!("section renderer referenced unknown style '{orphan}'"))
	})?;

	let mut buffer = Cursor::new(Vec::new());
	docx.build().pack(&mut buffer).map_err(|e| OrchestratorError::Document(format!("docx pack failed: {e:?}")))?;

	let word_count = plain_text.split_whitespace().count();
	let page_count_estimate = ((word_count + WORDS_PER_PAGE - 1) / WORDS_PER_PAGE).max(1) as u32;

	Ok(RenderedDocument {
		bytes: buffer.into_inner(),
		plain_text,
		page_count_estimate,
		sections_rendered: sections.into_iter().map(|s| s.category).collect(),
		used_style_names,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use super::super::style::{NamedStyle, Rgb};
	use chrono::Utc;
	use packet_common::test_util::tribe;
	use packet_common::variant::DocumentVariant;
	use std::collections::BTreeMap;

	fn context(variant: DocumentVariant) -> TribePacketContext {
		TribePacketContext {
			tribe: tribe("tribe_x", "Example Tribe", &["AZ"]),
			variant,
			delegation: None,
			selected_programs: vec![],
			awards: vec![],
			total_obligation: 0.0,
			hazard_profile: None,
			relevant_bills: vec![],
			section_confidence: BTreeMap::new(),
			generated_at: Utc::now(),
		}
	}

	#[test]
	fn variant_b_never_renders_strategy_section() {
		let ctx = context(DocumentVariant::Congressional);
		let config = VariantConfig::defaults(DocumentVariant::Congressional);
		let catalog = StyleCatalog::standard();
		let rendered = render_document(&ctx, &config, &catalog).unwrap();
		assert!(!rendered.sections_rendered.contains(&ContentCategory::Strategy));
		assert!(!rendered.plain_text.contains("Strategic Priorities"));
	}

	#[test]
	fn variant_a_includes_strategy_and_timing() {
		let ctx = context(DocumentVariant::TribalInternal);
		let config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let catalog = StyleCatalog::standard();
		let rendered = render_document(&ctx, &config, &catalog).unwrap();
		assert!(rendered.sections_rendered.contains(&ContentCategory::Strategy));
		assert!(rendered.sections_rendered.contains(&ContentCategory::Timing));
	}

	#[test]
	fn dollar_formatting_rounds_to_thousands_above_ten_k() {
		assert_eq!(format_dollars(12_345.0), "$12K");
		assert_eq!(format_dollars(999.50), "$999.50");
	}

	#[test]
	fn rendered_document_reports_the_catalog_styles_it_actually_applied() {
		let ctx = context(DocumentVariant::TribalInternal);
		let config = VariantConfig::defaults(DocumentVariant::TribalInternal);
		let catalog = StyleCatalog::standard();
		let rendered = render_document(&ctx, &config, &catalog).unwrap();
		assert!(rendered.used_style_names.contains(&"heading1".to_string()));
		assert!(rendered.used_style_names.contains(&"heading2".to_string()));
		assert!(rendered.used_style_names.contains(&"body".to_string()));
		// No table rows are produced for this fixture's empty program list,
		// so "caption" is never applied and must not be reported as used.
		assert!(!rendered.used_style_names.contains(&"caption".to_string()));
	}

	#[test]
	fn styled_run_pulls_size_and_color_from_the_catalog_entry() {
		let mut catalog = StyleCatalog::default();
		catalog
			.register(NamedStyle { name: "body".into(), font_family: "Calibri".into(), size_pt: 10.0, color: Rgb(20, 20, 20), bold: false })
			.unwrap();
		let mut used = Vec::new();
		let run = styled_run(&catalog, "body", "hello", &mut used);
		assert_eq!(used, vec!["body".to_string()]);
		// docx-rs's Run doesn't expose its fields back out; the real proof
		// that size/color/fonts were set is that `run` builds into a
		// document without panicking, exercised by the full-render tests
		// above. This test only pins down that usage is recorded by name.
		let _ = run;
	}
}
