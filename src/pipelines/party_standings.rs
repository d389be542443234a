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

//! Party standings pipeline. `as_of_date` is always
//! today; a same-day replay replaces the snapshot in place, but
//! consecutive days accumulate rows. That's the intended contract,
//! not a bug.

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{parties, party_standings};
use crate::decoders::xml_party_standings;
use crate::error::Result;
use crate::http_client::{HttpClient, Method};
use crate::pipelines::{bump, stats, PipelineStats};

const PARTY_STANDINGS_URL: &str = "https://www.ourcommons.ca/Members/en/party-standings/XML";

pub async fn run(pool: &PgPool, http: &HttpClient, cfg: &Config) -> Result<PipelineStats> {
	let mut out = stats();
	let xml = http.fetch(PARTY_STANDINGS_URL, Method::Get, None).await?;
	let records = xml_party_standings::decode(&xml)?;

	let as_of_date = chrono::Utc::now().date_naive();
	let mut tx = pool.begin().await?;
	party_standings::replace_snapshot_for_date(&mut *tx, as_of_date).await?;

	for record in &records {
		let party_id = if record.party_name == "Vacant" {
			None
		} else {
			parties::get_by_name(&mut *tx, &record.party_name).await?.map(|p| p.id)
		};
		party_standings::insert(
			&mut *tx,
			&record.party_name,
			Some(cfg.hoc_parliament),
			Some(cfg.hoc_session),
			Some(as_of_date),
			record.seat_count,
			party_id,
			PARTY_STANDINGS_URL,
		)
		.await?;
		bump(&mut out, "party_standings");
	}
	tx.commit().await?;

	out.entry("errors".to_string()).or_insert(serde_json::Value::from(0));
	Ok(out)
}
