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

//! Petition repository. Natural key is `petition_number`.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::Petition;
use crate::error::Result;
use crate::types::{PetitionDetailRecord, PetitionListRecord};

#[allow(clippy::too_many_arguments)]
pub async fn upsert(
	executor: impl PgExecutor<'_>,
	list_record: &PetitionListRecord,
	detail: &PetitionDetailRecord,
	parliament: Option<i32>,
	session: Option<i32>,
	source_url: &str,
	source_hash: &str,
) -> Result<Petition> {
	let petition = sqlx::query_as::<_, Petition>(
		"INSERT INTO petitions \
		 (petition_number, title_en, status, presentation_date, closing_date, signatures, sponsor_hoc_id, \
		  sponsor_name, parliament, session, source_url, source_hash) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
		 ON CONFLICT (petition_number) DO UPDATE SET \
		   title_en = EXCLUDED.title_en, status = EXCLUDED.status, \
		   presentation_date = COALESCE(EXCLUDED.presentation_date, petitions.presentation_date), \
		   closing_date = COALESCE(EXCLUDED.closing_date, petitions.closing_date), \
		   signatures = EXCLUDED.signatures, \
		   sponsor_hoc_id = COALESCE(EXCLUDED.sponsor_hoc_id, petitions.sponsor_hoc_id), \
		   sponsor_name = EXCLUDED.sponsor_name, parliament = EXCLUDED.parliament, session = EXCLUDED.session, \
		   source_url = EXCLUDED.source_url, source_hash = EXCLUDED.source_hash \
		 RETURNING id, petition_number, title_en, status, presentation_date, closing_date, signatures, \
		   sponsor_hoc_id, sponsor_name, parliament, session, source_url, source_hash",
	)
	.bind(&list_record.petition_number)
	.bind(&list_record.title)
	.bind(&list_record.status)
	.bind(detail.presentation_date)
	.bind(detail.closing_date)
	.bind(list_record.signatures)
	.bind(detail.sponsor_external_id)
	.bind(&list_record.sponsor_name)
	.bind(parliament)
	.bind(session)
	.bind(source_url)
	.bind(source_hash)
	.fetch_one(executor)
	.await?;
	Ok(petition)
}

pub async fn get_by_number(executor: impl PgExecutor<'_>, petition_number: &str) -> Result<Option<Petition>> {
	let petition = sqlx::query_as::<_, Petition>(
		"SELECT id, petition_number, title_en, status, presentation_date, closing_date, signatures, \
		 sponsor_hoc_id, sponsor_name, parliament, session, source_url, source_hash FROM petitions \
		 WHERE petition_number = $1",
	)
	.bind(petition_number)
	.fetch_optional(executor)
	.await?;
	Ok(petition)
}

pub async fn list(executor: impl PgExecutor<'_>, status: Option<&str>, page: Page) -> Result<ListResult<Petition>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		petition_number: String,
		title_en: String,
		status: Option<String>,
		presentation_date: Option<chrono::NaiveDate>,
		closing_date: Option<chrono::NaiveDate>,
		signatures: Option<i32>,
		sponsor_hoc_id: Option<i32>,
		sponsor_name: Option<String>,
		parliament: Option<i32>,
		session: Option<i32>,
		source_url: Option<String>,
		source_hash: Option<String>,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, petition_number, title_en, status, presentation_date, closing_date, signatures, \
		 sponsor_hoc_id, sponsor_name, parliament, session, source_url, source_hash, COUNT(*) OVER() AS total \
		 FROM petitions WHERE ($1::text IS NULL OR status = $1) \
		 ORDER BY presentation_date DESC NULLS LAST LIMIT $2 OFFSET $3",
	)
	.bind(status)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| Petition {
			id: r.id,
			petition_number: r.petition_number,
			title_en: r.title_en,
			status: r.status,
			presentation_date: r.presentation_date,
			closing_date: r.closing_date,
			signatures: r.signatures,
			sponsor_hoc_id: r.sponsor_hoc_id,
			sponsor_name: r.sponsor_name,
			parliament: r.parliament,
			session: r.session,
			source_url: r.source_url,
			source_hash: r.source_hash,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
