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

//! PartyStanding repository. Each ingestion run replaces the full
//! snapshot for its parliament/session: the upstream feed reports
//! standings as-of now, with no historical index to key an upsert
//! against.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::db::models::PartyStanding;
use crate::error::Result;

pub async fn insert(
	executor: impl PgExecutor<'_>,
	party_name: &str,
	parliament: Option<i32>,
	session: Option<i32>,
	as_of_date: Option<NaiveDate>,
	seat_count: i32,
	party_id: Option<i64>,
	source_url: &str,
) -> Result<PartyStanding> {
	let row = sqlx::query_as::<_, PartyStanding>(
		"INSERT INTO party_standings (party_name, parliament, session, as_of_date, seat_count, party_id, source_url) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7) \
		 RETURNING id, party_name, parliament, session, as_of_date, seat_count, party_id, source_url",
	)
	.bind(party_name)
	.bind(parliament)
	.bind(session)
	.bind(as_of_date)
	.bind(seat_count)
	.bind(party_id)
	.bind(source_url)
	.fetch_one(executor)
	.await?;
	Ok(row)
}

pub async fn latest(executor: impl PgExecutor<'_>) -> Result<Vec<PartyStanding>> {
	let rows = sqlx::query_as::<_, PartyStanding>(
		"SELECT id, party_name, parliament, session, as_of_date, seat_count, party_id, source_url \
		 FROM party_standings WHERE as_of_date = (SELECT MAX(as_of_date) FROM party_standings) \
		 ORDER BY seat_count DESC",
	)
	.fetch_all(executor)
	.await?;
	Ok(rows)
}

/// Deletes every snapshot row for `as_of_date` before a fresh ingestion
/// re-inserts it, avoiding duplicate snapshots on re-runs within the
/// same day.
pub async fn replace_snapshot_for_date(executor: impl PgExecutor<'_>, as_of_date: NaiveDate) -> Result<()> {
	sqlx::query("DELETE FROM party_standings WHERE as_of_date = $1").bind(as_of_date).execute(executor).await?;
	Ok(())
}
