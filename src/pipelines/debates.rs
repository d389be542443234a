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

//! Debates pipeline. The incremental-run cap and the cold-start cap
//! are kept distinct: cold start (no prior sitting) scans up to
//! `hoc_debates_max_sitting`;
//! an incremental run scans up to `hoc_debates_max_sitting +
//! hoc_debates_lookahead`.

use sqlx::PgPool;

use crate::config::Config;
use crate::db::debates as debates_repo;
use crate::decoders::hansard_xml;
use crate::error::Result;
use crate::hash::{source_hash, unchanged};
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};
use crate::types::Language;

fn document_url(parliament: i32, session: i32, sitting: i32, language: Language) -> String {
	format!(
		"https://www.ourcommons.ca/Content/House/{parliament}{session}/Debates/{sitting}/HAN{sitting}-{}.XML",
		language.upstream_letter()
	)
}

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();

	let languages: Vec<Language> =
		cfg.hoc_debate_languages.iter().filter_map(|l| match l.as_str() { "en" => Some(Language::En), "fr" => Some(Language::Fr), _ => None }).collect();

	let existing_max = debates_repo::max_sitting(pool, cfg.hoc_parliament, cfg.hoc_session).await?;
	let start_sitting = existing_max.map(|s| s + 1).unwrap_or(1);
	let cap = if existing_max.is_none() { cfg.hoc_debates_max_sitting } else { cfg.hoc_debates_max_sitting + cfg.hoc_debates_lookahead };

	let mut consecutive_missing = 0;
	let mut sitting = start_sitting;
	while sitting <= cap && consecutive_missing < cfg.hoc_debates_max_missing {
		let mut any_found = false;

		for &language in &languages {
			let url = document_url(cfg.hoc_parliament, cfg.hoc_session, sitting, language);
			let xml = match http.fetch(&url, Method::Get, None).await {
				Ok(xml) => xml,
				Err(_) => continue,
			};
			any_found = true;

			let hash = source_hash(&xml);
			let existing = debates_repo::get_by_document_url(pool, &url).await?;
			if let Some(existing) = &existing {
				if unchanged(Some(&existing.source_hash), &hash) {
					continue;
				}
			}

			let decoded = match hansard_xml::decode(&xml) {
				Ok(decoded) => decoded,
				Err(_) => {
					bump(&mut out, "errors");
					continue;
				}
			};

			let mut tx = pool.begin().await?;
			let debate = debates_repo::upsert(
				&mut *tx,
				&decoded,
				language,
				Some(cfg.hoc_parliament),
				Some(cfg.hoc_session),
				Some(sitting),
				&url,
				&hash,
			)
			.await?;
			debates_repo::replace_interventions(&mut *tx, debate.id, &decoded.interventions, language).await?;
			tx.commit().await?;

			bump(&mut out, "debates");
		}

		if any_found {
			consecutive_missing = 0;
		} else {
			consecutive_missing += 1;
		}
		sitting += 1;
	}

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}
