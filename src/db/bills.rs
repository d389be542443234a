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

//! Bill repository. Natural key is `bill_number` within a
//! parliament/session. `source_hash` gates re-writes so an
//! unchanged LEGISinfo item is a no-op.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::Bill;
use crate::error::Result;
use crate::types::BillRecord;

pub async fn get_by_number(executor: impl PgExecutor<'_>, bill_number: &str) -> Result<Option<Bill>> {
	let bill = sqlx::query_as::<_, Bill>(
		"SELECT id, bill_number, parliament, session, legisinfo_id, title_en, title_fr, status, introduced_date, \
		 latest_activity_date, sponsor_name, source_url, source_hash FROM bills WHERE bill_number = $1",
	)
	.bind(bill_number)
	.fetch_optional(executor)
	.await?;
	Ok(bill)
}

pub async fn upsert(
	executor: impl PgExecutor<'_>,
	record: &BillRecord,
	source_url: &str,
	source_hash: &str,
) -> Result<Bill> {
	let bill = sqlx::query_as::<_, Bill>(
		"INSERT INTO bills \
		 (bill_number, parliament, session, legisinfo_id, title_en, title_fr, status, introduced_date, \
		  latest_activity_date, sponsor_name, source_url, source_hash) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
		 ON CONFLICT (bill_number) DO UPDATE SET \
		   parliament = EXCLUDED.parliament, session = EXCLUDED.session, legisinfo_id = EXCLUDED.legisinfo_id, \
		   title_en = EXCLUDED.title_en, title_fr = EXCLUDED.title_fr, status = EXCLUDED.status, \
		   introduced_date = EXCLUDED.introduced_date, latest_activity_date = EXCLUDED.latest_activity_date, \
		   sponsor_name = EXCLUDED.sponsor_name, source_url = EXCLUDED.source_url, source_hash = EXCLUDED.source_hash \
		 RETURNING id, bill_number, parliament, session, legisinfo_id, title_en, title_fr, status, introduced_date, \
		   latest_activity_date, sponsor_name, source_url, source_hash",
	)
	.bind(&record.bill_number)
	.bind(record.parliament)
	.bind(record.session)
	.bind(record.legisinfo_id)
	.bind(&record.title_en)
	.bind(&record.title_fr)
	.bind(&record.status)
	.bind(record.introduced_date)
	.bind(record.latest_activity_date)
	.bind(&record.sponsor_name)
	.bind(source_url)
	.bind(source_hash)
	.fetch_one(executor)
	.await?;
	Ok(bill)
}

pub async fn list(
	executor: impl PgExecutor<'_>,
	parliament: Option<i32>,
	status: Option<&str>,
	page: Page,
) -> Result<ListResult<Bill>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		bill_number: String,
		parliament: Option<i32>,
		session: Option<i32>,
		legisinfo_id: Option<i32>,
		title_en: Option<String>,
		title_fr: Option<String>,
		status: Option<String>,
		introduced_date: Option<chrono::NaiveDate>,
		latest_activity_date: Option<chrono::NaiveDate>,
		sponsor_name: Option<String>,
		source_url: String,
		source_hash: String,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, bill_number, parliament, session, legisinfo_id, title_en, title_fr, status, introduced_date, \
		 latest_activity_date, sponsor_name, source_url, source_hash, COUNT(*) OVER() AS total FROM bills \
		 WHERE ($1::int IS NULL OR parliament = $1) AND ($2::text IS NULL OR status = $2) \
		 ORDER BY introduced_date DESC NULLS LAST LIMIT $3 OFFSET $4",
	)
	.bind(parliament)
	.bind(status)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| Bill {
			id: r.id,
			bill_number: r.bill_number,
			parliament: r.parliament,
			session: r.session,
			legisinfo_id: r.legisinfo_id,
			title_en: r.title_en,
			title_fr: r.title_fr,
			status: r.status,
			introduced_date: r.introduced_date,
			latest_activity_date: r.latest_activity_date,
			sponsor_name: r.sponsor_name,
			source_url: r.source_url,
			source_hash: r.source_hash,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
