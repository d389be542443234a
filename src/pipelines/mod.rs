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

//! Ingestion pipelines. Each pipeline is an independent
//! `async fn(&PgPool, &HttpClient, &Config) -> Result<PipelineStats>`,
//! run by the orchestrator in `src/orchestrator.rs`.

pub mod bills;
pub mod debates;
pub mod expenditures;
pub mod members;
pub mod party_standings;
pub mod petitions;
pub mod roles;
pub mod votes;

use serde_json::{Map, Value};
use sqlx::PgPool;

use crate::error::Result;
use crate::http_client::HttpClient;
use crate::config::Config;

pub type PipelineStats = Map<String, Value>;

pub fn stats() -> PipelineStats {
	Map::new()
}

pub fn bump(stats: &mut PipelineStats, key: &str) {
	let entry = stats.entry(key.to_string()).or_insert(Value::from(0));
	if let Value::Number(n) = entry {
		if let Some(i) = n.as_i64() {
			*entry = Value::from(i + 1);
		}
	}
}

pub type PipelineFn =
	for<'a> fn(&'a PgPool, &'a HttpClient, &'a Config) -> futures::future::BoxFuture<'a, Result<PipelineStats>>;

/// Pipelines in the declared execution order.
pub const ORDER: &[(&str, PipelineFn)] = &[
	("members", |pool, http, cfg| Box::pin(members::run(pool, http, cfg))),
	("party_standings", |pool, http, cfg| Box::pin(party_standings::run(pool, http, cfg))),
	("roles", |pool, http, cfg| Box::pin(roles::run(pool, http, cfg))),
	("votes", |pool, http, cfg| Box::pin(votes::run(pool, http, cfg))),
	("petitions", |pool, http, cfg| Box::pin(petitions::run(pool, http, cfg))),
	("debates", |pool, http, cfg| Box::pin(debates::run(pool, http, cfg))),
	("expenditures", |pool, http, cfg| Box::pin(expenditures::run(pool, http, cfg))),
	("bills", |pool, http, cfg| Box::pin(bills::run(pool, http, cfg))),
];
