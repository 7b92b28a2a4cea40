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

//! Logging init, called once from the CLI entry point. Library code uses
//! the `log` facade only.

use std::io;
use std::path::Path;

use fern::colors::{Color, ColoredLevelConfig};

/// Set up a colored stdout dispatcher plus a plain-text file sink at
/// `log_path`. Quiets a few noisy third-party targets the way the
/// orchestrator's own dependency tree produces chatter.
pub fn init(std_level: log::LevelFilter, file_level: log::LevelFilter, log_path: &Path) -> io::Result<()> {
	let colors = ColoredLevelConfig::new()
		.info(Color::Green)
		.warn(Color::Yellow)
		.error(Color::Red)
		.debug(Color::Blue)
		.trace(Color::Magenta);

	let stdout_dispatcher = fern::Dispatch::new()
		.level_for("packet_orchestrator", std_level)
		.level_for("packet_geo", std_level)
		.level_for("packet_registry", std_level)
		.level_for("proj", log::LevelFilter::Warn)
		.level_for("shapefile", log::LevelFilter::Warn)
		.level_for("", log::LevelFilter::Error)
		.format(move |out, message, record| {
			out.finish(format_args!(
				"{} {} {}",
				chrono::Local::now().format("[%H:%M]"),
				colors.color(record.level()),
				message,
			))
		})
		.chain(fern::Dispatch::new().level(std_level).chain(std::io::stdout()));

	if let Some(parent) = log_path.parent() {
		std::fs::create_dir_all(parent)?;
	}

	let file_dispatcher = fern::Dispatch::new()
		.level(file_level)
		.format(move |out, message, record| {
			out.finish(format_args!(
				"{} [{}][{}] {}",
				chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
				record.target(),
				record.level(),
				message,
			))
		})
		.chain(fern::log_file(log_path)?);

	fern::Dispatch::new().chain(stdout_dispatcher).chain(file_dispatcher).apply().map_err(|e| {
		io::Error::new(io::ErrorKind::Other, format!("logger already initialized: {e}"))
	})?;

	Ok(())
}
