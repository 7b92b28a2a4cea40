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

//! The style catalog: one definition of fonts, heading sizes, and colors
//! shared by every section renderer. No per-Tribe templates exist.

use std::collections::BTreeMap;

/// Minor-third scale between adjacent heading levels.
const HEADING_SCALE: f64 = 1.2;
const BODY_PT: f64 = 10.0;
const MIN_BODY_PT: f64 = 9.0;
const MIN_CAPTION_PT: f64 = 8.0;
const HEADING_LEVELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// Relative luminance per WCAG, used to compute contrast ratios.
	fn relative_luminance(&self) -> f64 {
		let chan = |c: u8| {
			let c = c as f64 / 255.0;
			if c <= 0.03928 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
		};
		0.2126 * chan(self.0) + 0.7152 * chan(self.1) + 0.0722 * chan(self.2)
	}

	/// WCAG contrast ratio against `other`, always ≥ 1.0.
	pub fn contrast_ratio(&self, other: &Rgb) -> f64 {
		let l1 = self.relative_luminance();
		let l2 = other.relative_luminance();
		let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
		(lighter + 0.05) / (darker + 0.05)
	}
}

#[derive(Debug, Clone)]
pub struct NamedStyle {
	pub name: String,
	pub font_family: String,
	pub size_pt: f64,
	pub color: Rgb,
	pub bold: bool,
}

/// The catalog is built once via `StyleCatalog::standard()` and registered
/// by name; `register` is idempotent, re-registering the same style name
/// with the same definition is a no-op, and registering a different
/// definition under an existing name is a build-time error.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
	styles: BTreeMap<String, NamedStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
	#[error("style '{0}' already registered with a different definition")]
	Conflict(String),
	#[error("contrast ratio {ratio:.2} for style '{name}' is below the {minimum:.1} minimum")]
	InsufficientContrast { name: String, ratio: f64, minimum: f64 },
}

impl StyleCatalog {
	pub fn register(&mut self, style: NamedStyle) -> Result<(), StyleError> {
		if let Some(existing) = self.styles.get(&style.name) {
			if existing.font_family == style.font_family
				&& existing.size_pt == style.size_pt
				&& existing.color == style.color
				&& existing.bold == style.bold
			{
				return Ok(());
			}
			return Err(StyleError::Conflict(style.name));
		}
		self.styles.insert(style.name.clone(), style);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&NamedStyle> {
		self.styles.get(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.styles.keys().map(|s| s.as_str())
	}

	/// The standard catalog: a monotone heading hierarchy scaled by
	/// `HEADING_SCALE` above the body size, body/caption sizes at their
	/// floors, all verified against a white background at 4.5:1 (body) or
	/// 3:1 (large/heading) contrast.
	pub fn standard() -> Self {
		let mut catalog = Self::default();
		let white = Rgb(255, 255, 255);
		let ink = Rgb(20, 20, 20);
		let accent = Rgb(0, 59, 92);

		catalog
			.register(NamedStyle { name: "body".into(), font_family: "Calibri".into(), size_pt: BODY_PT, color: ink, bold: false })
			.expect("standard catalog registers cleanly");
		catalog
			.register(NamedStyle {
				name: "caption".into(),
				font_family: "Calibri".into(),
				size_pt: MIN_CAPTION_PT,
				color: ink,
				bold: false,
			})
			.expect("standard catalog registers cleanly");

		for level in (1..=HEADING_LEVELS).rev() {
			let size = BODY_PT * HEADING_SCALE.powi((HEADING_LEVELS - level + 1) as i32);
			catalog
				.register(NamedStyle {
					name: format!("heading{level}"),
					font_family: "Calibri".into(),
					size_pt: size,
					color: accent,
					bold: true,
				})
				.expect("standard catalog registers cleanly");
		}

		debug_assert!(ink.contrast_ratio(&white) >= 4.5);
		debug_assert!(accent.contrast_ratio(&white) >= 3.0);

		catalog
	}

	/// Verify every named style in `used_names` exists in the catalog;
	/// returns the first orphan reference found. A style present in the
	/// catalog but never referenced is not itself an error here (renderers
	/// differ per variant), only the reverse direction is checked.
	pub fn check_no_orphan_references<'a>(&self, used_names: impl Iterator<Item = &'a str>) -> Result<(), String> {
		for name in used_names {
			if self.get(name).is_none() {
				return Err(name.to_string());
			}
		}
		Ok(())
	}

	pub fn min_body_pt() -> f64 {
		MIN_BODY_PT
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn re_registering_identical_style_is_noop() {
		let mut catalog = StyleCatalog::default();
		let style = NamedStyle { name: "body".into(), font_family: "Calibri".into(), size_pt: 10.0, color: Rgb(0, 0, 0), bold: false };
		catalog.register(style.clone()).unwrap();
		catalog.register(style).unwrap();
		assert_eq!(catalog.names().count(), 1);
	}

	#[test]
	fn conflicting_redefinition_is_rejected() {
		let mut catalog = StyleCatalog::default();
		catalog
			.register(NamedStyle { name: "body".into(), font_family: "Calibri".into(), size_pt: 10.0, color: Rgb(0, 0, 0), bold: false })
			.unwrap();
		let err = catalog
			.register(NamedStyle { name: "body".into(), font_family: "Arial".into(), size_pt: 10.0, color: Rgb(0, 0, 0), bold: false })
			.unwrap_err();
		assert_eq!(err, StyleError::Conflict("body".to_string()));
	}

	#[test]
	fn standard_catalog_has_monotone_heading_sizes() {
		let catalog = StyleCatalog::standard();
		let mut sizes: Vec<f64> = (1..=HEADING_LEVELS).map(|l| catalog.get(&format!("heading{l}")).unwrap().size_pt).collect();
		sizes.sort_by(|a, b| a.partial_cmp(b).unwrap());
		for pair in sizes.windows(2) {
			assert!(pair[1] > pair[0]);
		}
	}

	#[test]
	fn orphan_style_reference_is_detected() {
		let catalog = StyleCatalog::standard();
		assert!(catalog.check_no_orphan_references(["body", "heading1"].into_iter()).is_ok());
		assert!(catalog.check_no_orphan_references(["nonexistent_style"].into_iter()).is_err());
	}
}
