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

//! Votes pipeline.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{representatives, votes as votes_repo};
use crate::decoders::votes_html;
use crate::error::Result;
use crate::hash::{source_hash, unchanged};
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};

const BASE_URL: &str = "https://www.ourcommons.ca";

fn list_url(parliament: i32, session: i32) -> String {
	format!("{BASE_URL}/members/en/votes?parl={parliament}&session={session}")
}

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();

	let active = representatives::list_active(pool).await?;
	let hoc_id_to_rep: HashMap<i32, i64> = active.into_iter().map(|r| (r.hoc_id, r.id)).collect();

	let list_html = http.fetch(&list_url(cfg.hoc_parliament, cfg.hoc_session), Method::Get, None).await?;
	let rows = votes_html::decode_list(&list_html)?;

	for row in &rows {
		let detail_url =
			if row.detail_href.starts_with("http") { row.detail_href.clone() } else { format!("{BASE_URL}{}", row.detail_href) };

		let fetched = async {
			let detail_html = http.fetch(&detail_url, Method::Get, None).await?;
			let hash = source_hash(&detail_html);
			let detail = votes_html::decode_detail(&detail_html)?;
			Ok::<_, crate::error::ArchiveError>((hash, detail))
		}
		.await;

		let (hash, detail) = match fetched {
			Ok(pair) => pair,
			Err(_) => {
				bump(&mut out, "errors");
				continue;
			}
		};

		let existing = votes_repo::get_by_number(pool, cfg.hoc_parliament, cfg.hoc_session, row.vote_number).await?;
		if let Some(existing) = &existing {
			if unchanged(existing.source_hash.as_deref(), &hash) {
				continue;
			}
		}

		let members: Vec<(crate::types::VoteMemberRecord, Option<i64>)> = detail
			.members
			.iter()
			.map(|m| {
				let representative_id = m.external_id.and_then(|id| hoc_id_to_rep.get(&id).copied());
				(m.clone(), representative_id)
			})
			.collect();

		let mut tx = pool.begin().await?;
		let vote = votes_repo::upsert(
			&mut *tx,
			row,
			Some(&detail),
			Some(cfg.hoc_parliament),
			Some(cfg.hoc_session),
			&detail_url,
			&hash,
		)
		.await?;
		votes_repo::replace_members(&mut *tx, vote.id, &members).await?;
		tx.commit().await?;

		bump(&mut out, "votes");
	}

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}
