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

//! Petitions pipeline.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{petitions as petitions_repo, representatives};
use crate::decoders::petitions;
use crate::error::Result;
use crate::hash::{source_hash, unchanged};
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};
use crate::types::PetitionDetailRecord;

const SEARCH_URL: &str = "https://www.ourcommons.ca/petitions/en/Petition/SearchAsync";

fn build_form(page: u32) -> String {
	format!(
		"parl=Latest&type=&keyword=&sponsor=&status=&RPP=20&order=Recent&page={page}&category=All&output=&reCaptchaAction=&reCaptchaToken="
	)
}

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();

	let active = representatives::list_active(pool).await?;
	let name_to_hoc_id: HashMap<String, i32> = active.into_iter().map(|r| (r.name.to_lowercase(), r.hoc_id)).collect();

	let first_page = http.fetch(SEARCH_URL, Method::Post, Some(build_form(1))).await?;
	let total = petitions::total_pages(&first_page)?;

	for page in 1..=total {
		let page_json = if page == 1 { first_page.clone() } else { http.fetch(SEARCH_URL, Method::Post, Some(build_form(page))).await? };
		let rows = match petitions::decode_page(&page_json) {
			Ok(rows) => rows,
			Err(_) => {
				bump(&mut out, "errors");
				continue;
			}
		};

		for row in &rows {
			let detail_url = row.detail_href.as_ref().map(|href| format!("https://www.ourcommons.ca/petitions/en/Petition/{href}"));

			let (detail, hash) = match &detail_url {
				Some(url) => match fetch_detail(http, url).await {
					Ok(pair) => pair,
					Err(_) => {
						bump(&mut out, "errors");
						continue;
					}
				},
				None => (PetitionDetailRecord::default(), source_hash(&row.petition_number)),
			};

			let existing = petitions_repo::get_by_number(pool, &row.petition_number).await?;
			if let Some(existing) = &existing {
				if unchanged(existing.source_hash.as_deref(), &hash) {
					continue;
				}
			}

			let mut detail = detail;
			if detail.sponsor_external_id.is_none() {
				if let Some(name) = &row.sponsor_name {
					detail.sponsor_external_id = name_to_hoc_id.get(&name.to_lowercase()).copied();
				}
			}

			petitions_repo::upsert(
				pool,
				row,
				&detail,
				Some(cfg.hoc_parliament),
				Some(cfg.hoc_session),
				detail_url.as_deref().unwrap_or(SEARCH_URL),
				&hash,
			)
			.await?;

			bump(&mut out, "petitions");
		}
	}

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}

async fn fetch_detail(http: &HttpClient, url: &str) -> Result<(PetitionDetailRecord, String)> {
	let html = http.fetch(url, Method::Get, None).await?;
	let hash = source_hash(&html);
	let detail = petitions::decode_detail(&html)?;
	Ok((detail, hash))
}
