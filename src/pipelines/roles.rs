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

//! Roles pipeline. The ~340 per-MP fetches are the
//! largest fan-out in the system; they run as a bounded concurrent
//! stream under the HTTP Client Pool's own semaphore rather than a
//! sequential loop.

use std::sync::atomic::{AtomicI64, Ordering};

use futures::stream::{self, StreamExt};
use sqlx::PgPool;

use crate::config::Config;
use crate::db::{representatives, roles as roles_repo};
use crate::decoders::xml_roles;
use crate::error::Result;
use crate::hash::source_hash;
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{stats, PipelineStats};

fn per_mp_url(person_id: i32) -> String {
	format!("https://www.ourcommons.ca/members/en/{person_id}/xml")
}

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let active = representatives::list_active(pool).await?;

	let representatives_count = AtomicI64::new(0);
	let roles_count = AtomicI64::new(0);
	let errors_count = AtomicI64::new(0);

	stream::iter(active)
		.for_each_concurrent(Some(cfg.hoc_max_concurrency.max(1)), |rep| {
			let representatives_count = &representatives_count;
			let roles_count = &roles_count;
			let errors_count = &errors_count;
			async move {
				let url = per_mp_url(rep.hoc_id);
				let result = async {
					let xml = http.fetch(&url, Method::Get, None).await?;
					let decoded = xml_roles::decode(&xml)?;
					let hash = source_hash(&xml);
					roles_repo::replace_all(pool, rep.id, &decoded, &url, &hash).await?;
					Ok::<usize, crate::error::ArchiveError>(decoded.len())
				}
				.await;

				match result {
					Ok(count) => {
						representatives_count.fetch_add(1, Ordering::Relaxed);
						roles_count.fetch_add(count as i64, Ordering::Relaxed);
					}
					Err(_) => {
						errors_count.fetch_add(1, Ordering::Relaxed);
					}
				}
			}
		})
		.await;

	let mut out = stats();
	out.insert("representatives".to_string(), serde_json::Value::from(representatives_count.load(Ordering::Relaxed)));
	out.insert("roles".to_string(), serde_json::Value::from(roles_count.load(Ordering::Relaxed)));
	out.insert("errors".to_string(), serde_json::Value::from(errors_count.load(Ordering::Relaxed)));
	Ok(out)
}
