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

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{PacketError, Result};

/// Lowercase, collapse internal whitespace runs to a single space, trim,
/// and strip trailing punctuation. Used as the normalization step before
/// any alias-map lookup or fuzzy comparison.
pub fn normalize_recipient_name(raw: &str) -> String {
	let lowered = raw.to_lowercase();
	let collapsed: String = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
	collapsed.trim_end_matches(|c: char| c.is_ascii_punctuation()).trim().to_string()
}

/// Read a file into a `String`, refusing anything larger than `limit_bytes`
/// without reading its contents. Every artifact load in this subsystem
/// goes through this guard.
pub fn read_size_guarded(path: &Path, limit_bytes: u64) -> Result<String> {
	let meta = fs::metadata(path)?;
	if meta.len() > limit_bytes {
		return Err(PacketError::ArtifactTooLarge {
			path: path.display().to_string(),
			limit_bytes,
		});
	}
	let mut file = File::open(path)?;
	let mut buf = String::with_capacity(meta.len() as usize);
	file.read_to_string(&mut buf)?;
	Ok(buf)
}

/// Write `contents` to `path` atomically: write to a temporary sibling
/// file in the same directory, then rename into place. A rename within
/// the same filesystem is atomic, so readers never observe a partial
/// write and a crash mid-write leaves the previous file (or nothing)
/// intact.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
	let dir = path.parent().unwrap_or_else(|| Path::new("."));
	fs::create_dir_all(dir)?;
	let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("artifact");
	let tmp_path = dir.join(format!(".{}.tmp-{}", file_name, std::process::id()));
	{
		let mut tmp = File::create(&tmp_path)?;
		tmp.write_all(contents)?;
		tmp.sync_all()?;
	}
	fs::rename(&tmp_path, path)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn normalize_lowercases_and_collapses_whitespace() {
		assert_eq!(normalize_recipient_name("  THE   Navajo  Nation.  "), "the navajo nation");
	}

	#[test]
	fn normalize_strips_trailing_punctuation_only() {
		assert_eq!(normalize_recipient_name("Muckleshoot Indian Tribe, Inc."), "muckleshoot indian tribe, inc");
	}

	#[test]
	fn size_guard_rejects_oversized_artifact() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("big.json");
		fs::write(&path, vec![b'a'; 128]).unwrap();
		let err = read_size_guarded(&path, 64).unwrap_err();
		assert!(matches!(err, PacketError::ArtifactTooLarge { .. }));
	}

	#[test]
	fn atomic_write_then_read_round_trips() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("out.json");
		write_atomic(&path, b"hello").unwrap();
		assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
		// no leftover temp files
		let leftovers: Vec<_> = fs::read_dir(dir.path())
			.unwrap()
			.filter_map(|e| e.ok())
			.filter(|e| e.file_name().to_string_lossy().contains(".tmp-"))
			.collect();
		assert!(leftovers.is_empty());
	}
}
