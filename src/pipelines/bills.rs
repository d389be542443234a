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

//! Bills pipeline.

use sqlx::PgPool;

use crate::config::Config;
use crate::db::bills as bills_repo;
use crate::decoders::bills_json;
use crate::error::Result;
use crate::hash::{canonical_json_hash, unchanged};
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};

fn bills_url(parliament: i32, session: i32) -> String {
	format!("https://www.parl.ca/legisinfo/en/bills/json?parlsession={parliament}-{session}")
}

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();
	let url = bills_url(cfg.hoc_parliament, cfg.hoc_session);
	let json = http.fetch(&url, Method::Get, None).await?;
	let items = bills_json::decode(&json)?;

	let mut tx = pool.begin().await?;
	for (record, raw) in &items {
		let hash = canonical_json_hash(raw);
		let existing = bills_repo::get_by_number(&mut *tx, &record.bill_number).await?;
		if let Some(existing) = &existing {
			if unchanged(Some(&existing.source_hash), &hash) {
				continue;
			}
		}
		bills_repo::upsert(&mut *tx, record, &url, &hash).await?;
		bump(&mut out, "bills");
	}
	tx.commit().await?;

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}
