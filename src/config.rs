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

//! Process configuration, loaded from the environment with an optional
//! TOML override file.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ArchiveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
	Development,
	Test,
	Staging,
	Production,
}

impl Environment {
	/// The in-process counter fallback is only permitted here.
	pub fn allows_in_process_counters(self) -> bool {
		matches!(self, Environment::Development | Environment::Test)
	}

	fn parse(raw: &str) -> Self {
		match raw.to_ascii_lowercase().as_str() {
			"production" | "prod" => Environment::Production,
			"staging" => Environment::Staging,
			"test" | "testing" => Environment::Test,
			_ => Environment::Development,
		}
	}
}

/// Optional TOML overlay; any field present here wins over the
/// corresponding environment variable. A CLI-selected file fills in
/// defaults the environment doesn't set.
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlOverlay {
	database_url: Option<String>,
	redis_url: Option<String>,
	api_key_hmac_secret: Option<String>,
	environment: Option<String>,
	hoc_parliament: Option<i32>,
	hoc_session: Option<i32>,
	hoc_max_concurrency: Option<usize>,
	hoc_min_request_interval_ms: Option<u64>,
	hoc_api_timeout_secs: Option<u64>,
	free_rate_limit_per_minute: Option<u32>,
	paid_rate_limit_per_minute: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub redis_url: Option<String>,
	pub api_key_hmac_secret: Option<String>,
	pub environment: Environment,

	pub hoc_parliament: i32,
	pub hoc_session: i32,
	pub hoc_max_concurrency: usize,
	pub hoc_min_request_interval_ms: u64,
	pub hoc_api_timeout_secs: u64,
	pub hoc_debates_max_sitting: i32,
	pub hoc_debates_lookahead: i32,
	pub hoc_debates_max_missing: i32,
	pub hoc_debate_languages: Vec<String>,
	pub hoc_enabled_pipelines: Vec<String>,

	pub free_rate_limit_per_minute: u32,
	pub paid_rate_limit_per_minute: u32,
}

impl Config {
	/// Load configuration from the environment, optionally overlaid by a
	/// TOML file at `file_path`.
	pub fn load(file_path: Option<&Path>) -> Result<Self> {
		let overlay = match file_path {
			Some(path) => {
				let raw = std::fs::read_to_string(path)
					.map_err(|e| ArchiveError::Configuration(format!("reading {}: {e}", path.display())))?;
				toml::from_str(&raw)
					.map_err(|e| ArchiveError::Configuration(format!("parsing {}: {e}", path.display())))?
			}
			None => TomlOverlay::default(),
		};

		let database_url = overlay
			.database_url
			.or_else(|| std::env::var("DATABASE_URL").ok())
			.ok_or_else(|| ArchiveError::Configuration("DATABASE_URL is required".into()))?;

		let redis_url = overlay.redis_url.or_else(|| std::env::var("REDIS_URL").ok()).filter(|s| !s.is_empty());

		let api_key_hmac_secret = overlay
			.api_key_hmac_secret
			.or_else(|| std::env::var("API_KEY_HMAC_SECRET").ok())
			.filter(|s| !s.is_empty());

		let environment = Environment::parse(
			&overlay.environment.or_else(|| std::env::var("ENVIRONMENT").ok()).unwrap_or_else(|| "development".into()),
		);

		if redis_url.is_none() && !environment.allows_in_process_counters() {
			return Err(ArchiveError::Configuration(
				"REDIS_URL is required outside development/test".into(),
			));
		}

		let hoc_debate_languages = std::env::var("HOC_DEBATE_LANGUAGES")
			.ok()
			.map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
			.unwrap_or_else(|| vec!["en".to_string(), "fr".to_string()]);

		let hoc_enabled_pipelines = std::env::var("HOC_ENABLED_PIPELINES")
			.ok()
			.map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
			.unwrap_or_else(|| {
				["members", "party_standings", "roles", "votes", "petitions", "debates", "expenditures", "bills"]
					.iter()
					.map(|s| s.to_string())
					.collect()
			});

		Ok(Self {
			database_url,
			redis_url,
			api_key_hmac_secret,
			environment,
			hoc_parliament: overlay.hoc_parliament.or_else(|| env_parse("HOC_PARLIAMENT")).unwrap_or(44),
			hoc_session: overlay.hoc_session.or_else(|| env_parse("HOC_SESSION")).unwrap_or(1),
			hoc_max_concurrency: overlay.hoc_max_concurrency.or_else(|| env_parse("HOC_MAX_CONCURRENCY")).unwrap_or(4),
			hoc_min_request_interval_ms: overlay
				.hoc_min_request_interval_ms
				.or_else(|| env_parse("HOC_MIN_REQUEST_INTERVAL_MS"))
				.unwrap_or(250),
			hoc_api_timeout_secs: overlay.hoc_api_timeout_secs.or_else(|| env_parse("HOC_API_TIMEOUT")).unwrap_or(30),
			hoc_debates_max_sitting: env_parse("HOC_DEBATES_MAX_SITTING").unwrap_or(400),
			hoc_debates_lookahead: env_parse("HOC_DEBATES_LOOKAHEAD").unwrap_or(30),
			hoc_debates_max_missing: env_parse("HOC_DEBATES_MAX_MISSING").unwrap_or(20),
			hoc_debate_languages,
			hoc_enabled_pipelines,
			free_rate_limit_per_minute: overlay
				.free_rate_limit_per_minute
				.or_else(|| env_parse("FREE_RATE_LIMIT_PER_MINUTE"))
				.unwrap_or(50),
			paid_rate_limit_per_minute: overlay
				.paid_rate_limit_per_minute
				.or_else(|| env_parse("PAID_RATE_LIMIT_PER_MINUTE"))
				.unwrap_or(500),
		})
	}

	pub fn pipeline_enabled(&self, name: &str) -> bool {
		self.hoc_enabled_pipelines.iter().any(|p| p == name)
	}
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
	std::env::var(key).ok().and_then(|v| v.parse().ok())
}
