// Copyright 2026 Parliamentary Data Platform Contributors
// This file is part of parl-archive.

// parl-archive is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// parl-archive is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with parl-archive.  If not, see <http://www.gnu.org/licenses/>.

//! Logging setup.

use std::io;

use fern::colors::{Color, ColoredLevelConfig};

/// Initialize the global logger. `default_level` is used for any target
/// not named explicitly; `RUST_LOG` (if set) overrides it for this
/// process's own modules.
pub fn init(default_level: log::LevelFilter) -> io::Result<()> {
	let colors = ColoredLevelConfig::new()
		.info(Color::Green)
		.warn(Color::Yellow)
		.error(Color::Red)
		.debug(Color::Blue)
		.trace(Color::Magenta);

	let own_level = std::env::var("RUST_LOG")
		.ok()
		.and_then(|v| v.parse::<log::LevelFilter>().ok())
		.unwrap_or(default_level);

	fern::Dispatch::new()
		.level(log::LevelFilter::Warn)
		.level_for("parl_archive", own_level)
		.level_for("sqlx", log::LevelFilter::Warn)
		.level_for("tower_http", log::LevelFilter::Info)
		.format(move |out, message, record| {
			out.finish(format_args!(
				"{} {} [{}] {}",
				chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
				colors.color(record.level()),
				record.target(),
				message,
			))
		})
		.chain(std::io::stdout())
		.apply()
		.expect("logger already initialized");
	Ok(())
}
