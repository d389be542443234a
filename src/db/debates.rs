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

//! Debate and DebateIntervention repositories. Natural key for a debate
//! is `document_url`; interventions are replaced wholesale
//! per debate since `source_hash` already gates whether re-parsing runs
//! at all.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::{Debate, DebateIntervention};
use crate::error::Result;
use crate::types::{HansardRecord, InterventionRecord, Language};

#[allow(clippy::too_many_arguments)]
pub async fn upsert(
	executor: impl PgExecutor<'_>,
	record: &HansardRecord,
	language: Language,
	parliament: Option<i32>,
	session: Option<i32>,
	sitting: Option<i32>,
	document_url: &str,
	source_hash: &str,
) -> Result<Debate> {
	let debate = sqlx::query_as::<_, Debate>(
		"INSERT INTO debates \
		 (parliament, session, sitting, language, debate_date, volume, number, speaker_name, document_url, source_hash) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
		 ON CONFLICT (document_url) DO UPDATE SET \
		   parliament = EXCLUDED.parliament, session = EXCLUDED.session, sitting = EXCLUDED.sitting, \
		   language = EXCLUDED.language, debate_date = EXCLUDED.debate_date, volume = EXCLUDED.volume, \
		   number = EXCLUDED.number, speaker_name = EXCLUDED.speaker_name, source_hash = EXCLUDED.source_hash \
		 RETURNING id, parliament, session, sitting, language, debate_date, volume, number, speaker_name, \
		   document_url, source_hash",
	)
	.bind(parliament)
	.bind(session)
	.bind(sitting)
	.bind(language.as_str())
	.bind(record.debate_date)
	.bind(&record.volume)
	.bind(&record.number)
	.bind(&record.speaker_name)
	.bind(document_url)
	.bind(source_hash)
	.fetch_one(executor)
	.await?;
	Ok(debate)
}

pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<Debate>> {
	let debate = sqlx::query_as::<_, Debate>(
		"SELECT id, parliament, session, sitting, language, debate_date, volume, number, speaker_name, \
		 document_url, source_hash FROM debates WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(executor)
	.await?;
	Ok(debate)
}

pub async fn get_by_document_url(executor: impl PgExecutor<'_>, document_url: &str) -> Result<Option<Debate>> {
	let debate = sqlx::query_as::<_, Debate>(
		"SELECT id, parliament, session, sitting, language, debate_date, volume, number, speaker_name, \
		 document_url, source_hash FROM debates WHERE document_url = $1",
	)
	.bind(document_url)
	.fetch_optional(executor)
	.await?;
	Ok(debate)
}

pub async fn replace_interventions(
	conn: &mut sqlx::PgConnection,
	debate_id: i64,
	interventions: &[InterventionRecord],
	language: Language,
) -> Result<()> {
	// Takes the connection directly, rather than a generic executor, because
	// the delete and the inserts below must share whatever transaction the
	// caller (the parent debate upsert) is already in, not open their own.
	sqlx::query("DELETE FROM debate_interventions WHERE debate_id = $1").bind(debate_id).execute(&mut *conn).await?;
	for iv in interventions {
		sqlx::query(
			"INSERT INTO debate_interventions \
			 (debate_id, sequence, speaker_name, speaker_affiliation, floor_language, timestamp, \
			  order_of_business, subject_title, intervention_type, text) \
			 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
		)
		.bind(debate_id)
		.bind(iv.sequence)
		.bind(&iv.speaker_name)
		.bind(&iv.speaker_affiliation)
		.bind(language.as_str())
		.bind(&iv.timestamp)
		.bind(&iv.order_of_business)
		.bind(&iv.subject_of_business)
		.bind(&iv.intervention_type)
		.bind(&iv.text)
		.execute(&mut *conn)
		.await?;
	}
	Ok(())
}

/// The highest sitting already ingested for a parliament/session, across
/// both language variants.
pub async fn max_sitting(executor: impl PgExecutor<'_>, parliament: i32, session: i32) -> Result<Option<i32>> {
	let row: (Option<i32>,) =
		sqlx::query_as("SELECT MAX(sitting) FROM debates WHERE parliament = $1 AND session = $2")
			.bind(parliament)
			.bind(session)
			.fetch_one(executor)
			.await?;
	Ok(row.0)
}

pub async fn interventions_for_debate(executor: impl PgExecutor<'_>, debate_id: i64) -> Result<Vec<DebateIntervention>> {
	let rows = sqlx::query_as::<_, DebateIntervention>(
		"SELECT id, debate_id, sequence, speaker_name, speaker_affiliation, floor_language, timestamp, \
		 order_of_business, subject_title, intervention_type, text FROM debate_interventions \
		 WHERE debate_id = $1 ORDER BY sequence",
	)
	.bind(debate_id)
	.fetch_all(executor)
	.await?;
	Ok(rows)
}

pub async fn list(
	executor: impl PgExecutor<'_>,
	parliament: Option<i32>,
	language: Option<&str>,
	page: Page,
) -> Result<ListResult<Debate>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		parliament: Option<i32>,
		session: Option<i32>,
		sitting: Option<i32>,
		language: String,
		debate_date: Option<chrono::NaiveDate>,
		volume: Option<String>,
		number: Option<String>,
		speaker_name: Option<String>,
		document_url: String,
		source_hash: String,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, parliament, session, sitting, language, debate_date, volume, number, speaker_name, \
		 document_url, source_hash, COUNT(*) OVER() AS total FROM debates \
		 WHERE ($1::int IS NULL OR parliament = $1) AND ($2::text IS NULL OR language = $2) \
		 ORDER BY debate_date DESC NULLS LAST, sitting DESC NULLS LAST LIMIT $3 OFFSET $4",
	)
	.bind(parliament)
	.bind(language)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| Debate {
			id: r.id,
			parliament: r.parliament,
			session: r.session,
			sitting: r.sitting,
			language: r.language,
			debate_date: r.debate_date,
			volume: r.volume,
			number: r.number,
			speaker_name: r.speaker_name,
			document_url: r.document_url,
			source_hash: r.source_hash,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
