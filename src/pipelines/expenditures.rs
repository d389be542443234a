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

//! Expenditures pipeline.

use std::collections::HashMap;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{expenditures as expenditures_repo, representatives};
use crate::decoders::dates::parse_date_range;
use crate::decoders::expenditures_csv;
use crate::error::Result;
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};

const MEMBER_DISCLOSURE_URL: &str = "https://www.ourcommons.ca/ProactiveDisclosure/en/members";
const HOUSE_OFFICER_INDEX_URL: &str = "https://www.ourcommons.ca/Boie/en/reports-and-disclosure";

pub async fn run(pool: &PgPool, http: &HttpClient, _cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();

	if ingest_members(pool, http, &mut out).await.is_err() {
		bump(&mut out, "errors");
	}
	if ingest_house_officers(pool, http, &mut out).await.is_err() {
		bump(&mut out, "errors");
	}

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}

async fn ingest_members(pool: &PgPool, http: &HttpClient, out: &mut PipelineStats) -> Result<()> {
	let active = representatives::list_active(pool).await?;
	let mut by_last_first: HashMap<(String, String), (i64, i32)> = HashMap::new();
	for rep in &active {
		let last = rep.last_name.clone().unwrap_or_default().to_lowercase();
		let first = rep.first_name.clone().unwrap_or_default().to_lowercase();
		if last.is_empty() {
			continue;
		}
		by_last_first.insert((last.clone(), first), (rep.id, rep.hoc_id));
		by_last_first.entry((last, String::new())).or_insert((rep.id, rep.hoc_id));
	}

	let index_html = http.fetch(MEMBER_DISCLOSURE_URL, Method::Get, None).await?;
	let Some((href, period_text)) = expenditures_csv::find_member_csv_link(&index_html) else {
		return Ok(());
	};
	let (Some(period_start), Some(period_end)) = parse_date_range(&period_text) else {
		return Ok(());
	};

	let csv_url = format!("https://www.ourcommons.ca{href}");
	let csv_text = http.fetch(&csv_url, Method::Get, None).await?;
	let records = expenditures_csv::decode_member(&csv_text, (period_start, period_end))?;

	let mut tx = pool.begin().await?;
	expenditures_repo::delete_member_period(&mut *tx, period_start, period_end).await?;
	for record in &records {
		let name_lower = record.member_or_officer.to_lowercase();
		let (representative_id, hoc_id) = match_member_name(&name_lower, &by_last_first);
		expenditures_repo::upsert_member(&mut *tx, record, representative_id, hoc_id, &csv_url).await?;
		bump(out, "member_expenditures");
	}
	tx.commit().await?;
	Ok(())
}

fn match_member_name(name_lower: &str, by_last_first: &HashMap<(String, String), (i64, i32)>) -> (Option<i64>, Option<i32>) {
	let parts: Vec<&str> = name_lower.split(',').map(str::trim).collect();
	let (last, first) = match parts.as_slice() {
		[last, first, ..] => (last.to_string(), first.to_string()),
		[last] => (last.to_string(), String::new()),
		[] => return (None, None),
	};
	by_last_first
		.get(&(last.clone(), first))
		.or_else(|| by_last_first.get(&(last, String::new())))
		.map(|&(rep_id, hoc_id)| (Some(rep_id), Some(hoc_id)))
		.unwrap_or((None, None))
}

async fn ingest_house_officers(pool: &PgPool, http: &HttpClient, out: &mut PipelineStats) -> Result<()> {
	let index_html = http.fetch(HOUSE_OFFICER_INDEX_URL, Method::Get, None).await?;
	let links = expenditures_csv::find_house_officer_csv_links(&index_html);

	for href in links {
		let csv_url = format!("https://www.ourcommons.ca{href}");
		let csv_text = match http.fetch(&csv_url, Method::Get, None).await {
			Ok(text) => text,
			Err(_) => {
				bump(out, "errors");
				continue;
			}
		};
		let records = match expenditures_csv::decode_house_officer(&csv_text) {
			Ok(records) => records,
			Err(_) => {
				bump(out, "errors");
				continue;
			}
		};
		let Some(first) = records.first() else { continue };
		let mut tx = pool.begin().await?;
		expenditures_repo::delete_house_officer_period(&mut *tx, first.period_start, first.period_end).await?;
		for record in &records {
			expenditures_repo::upsert_house_officer(&mut *tx, record, None, &csv_url).await?;
			bump(out, "house_officer_expenditures");
		}
		tx.commit().await?;
	}
	Ok(())
}
