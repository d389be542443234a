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

//! Members pipeline.

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{parties, representatives, ridings};
use crate::decoders::xml_members;
use crate::error::Result;
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};

const MEMBERS_URL: &str = "https://www.ourcommons.ca/Members/en/search/XML";

pub async fn run(pool: &PgPool, http: &HttpClient, _cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();
	let xml = http.fetch(MEMBERS_URL, Method::Get, None).await?;
	let records = xml_members::decode(&xml)?;

	let mut tx = pool.begin().await?;
	for record in &records {
		let party_id = match &record.caucus_short_name {
			Some(name) if !name.is_empty() => {
				let (default_short, default_color) = parties::builtin_metadata(name);
				let party = parties::get_or_create(&mut *tx, name, default_short, default_color).await?;
				Some(party.id)
			}
			_ => None,
		};
		let riding = ridings::get_or_create(&mut *tx, &record.constituency_name, &record.province).await?;

		let existed = representatives::get_by_hoc_id(&mut *tx, record.hoc_id).await?.is_some();
		let photo_url = format!("https://www.ourcommons.ca/Members/en/{}/photo", record.hoc_id);
		let profile_url = format!("https://www.ourcommons.ca/Members/en/{}", record.hoc_id);
		representatives::upsert_by_hoc_id(
			&mut *tx,
			record.hoc_id,
			record.first_name.as_deref(),
			record.last_name.as_deref(),
			&record.name,
			record.honorific.as_deref(),
			record.email.as_deref(),
			record.phone.as_deref(),
			Some(&photo_url),
			Some(&profile_url),
			party_id,
			Some(riding.id),
		)
		.await?;

		bump(&mut out, if existed { "updated" } else { "created" });
	}
	tx.commit().await?;

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}
