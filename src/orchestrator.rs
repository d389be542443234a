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

//! Ingestion orchestrator. Runs the configured subset of pipelines in
//! declared order, isolating failures per pipeline: a pipeline's `Err`
//! becomes `{"error": <message>}` in its own stats slot and never
//! aborts its peers.

use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::config::Config;
use crate::http_client::HttpClient;
use crate::pipelines;

pub type OrchestratorReport = Map<String, Value>;

pub async fn run_enabled(pool: &PgPool, http: &HttpClient, cfg: &Config, only: Option<&[String]>) -> OrchestratorReport {
	let mut report = Map::new();

	for (name, pipeline_fn) in pipelines::ORDER {
		let selected = match only {
			Some(names) => names.iter().any(|n| n == name),
			None => cfg.pipeline_enabled(name),
		};
		if !selected {
			continue;
		}

		log::info!("running pipeline {name}");
		match pipeline_fn(pool, http, cfg).await {
			Ok(stats) => {
				log::info!("pipeline {name} finished: {stats:?}");
				report.insert(name.to_string(), Value::Object(stats));
			}
			Err(e) => {
				log::error!("pipeline {name} failed: {e}");
				let mut error_stats = Map::new();
				error_stats.insert("error".to_string(), Value::String(e.to_string()));
				report.insert(name.to_string(), Value::Object(error_stats));
			}
		}
	}

	report
}
