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

//! MemberExpenditure and HouseOfficerExpenditure repositories. Natural
//! key is `(member_or_officer, category, period_start, period_end)`;
//! disclosures are re-published per quarter and never revised in
//! place, so upserts on this key are idempotent re-runs.

use chrono::NaiveDate;
use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::{HouseOfficerExpenditure, MemberExpenditure};
use crate::error::Result;
use crate::types::ExpenditureRecord;

/// Deletes every member-expenditure row for `(period_start, period_end)`
/// ahead of a fresh disclosure ingest.
pub async fn delete_member_period(executor: impl PgExecutor<'_>, period_start: NaiveDate, period_end: NaiveDate) -> Result<()> {
	sqlx::query("DELETE FROM member_expenditures WHERE period_start = $1 AND period_end = $2")
		.bind(period_start)
		.bind(period_end)
		.execute(executor)
		.await?;
	Ok(())
}

/// Deletes every house-officer-expenditure row for `(period_start,
/// period_end)`.
pub async fn delete_house_officer_period(executor: impl PgExecutor<'_>, period_start: NaiveDate, period_end: NaiveDate) -> Result<()> {
	sqlx::query("DELETE FROM house_officer_expenditures WHERE period_start = $1 AND period_end = $2")
		.bind(period_start)
		.bind(period_end)
		.execute(executor)
		.await?;
	Ok(())
}

pub async fn upsert_member(
	executor: impl PgExecutor<'_>,
	record: &ExpenditureRecord,
	representative_id: Option<i64>,
	hoc_id: Option<i32>,
	source_url: &str,
) -> Result<MemberExpenditure> {
	let row = sqlx::query_as::<_, MemberExpenditure>(
		"INSERT INTO member_expenditures \
		 (representative_id, hoc_id, member_name, category, amount, period_start, period_end, fiscal_year, source_url) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
		 ON CONFLICT (member_name, category, period_start, period_end) DO UPDATE SET \
		   representative_id = EXCLUDED.representative_id, hoc_id = EXCLUDED.hoc_id, amount = EXCLUDED.amount, \
		   fiscal_year = EXCLUDED.fiscal_year, source_url = EXCLUDED.source_url \
		 RETURNING id, representative_id, hoc_id, member_name, category, amount, period_start, period_end, \
		   fiscal_year, source_url",
	)
	.bind(representative_id)
	.bind(hoc_id)
	.bind(&record.member_or_officer)
	.bind(record.category.as_str())
	.bind(record.amount)
	.bind(record.period_start)
	.bind(record.period_end)
	.bind(&record.fiscal_year)
	.bind(source_url)
	.fetch_one(executor)
	.await?;
	Ok(row)
}

pub async fn upsert_house_officer(
	executor: impl PgExecutor<'_>,
	record: &ExpenditureRecord,
	role_title: Option<&str>,
	source_url: &str,
) -> Result<HouseOfficerExpenditure> {
	let row = sqlx::query_as::<_, HouseOfficerExpenditure>(
		"INSERT INTO house_officer_expenditures \
		 (officer_name, role_title, category, amount, period_start, period_end, fiscal_year, source_url) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
		 ON CONFLICT (officer_name, category, period_start, period_end) DO UPDATE SET \
		   role_title = EXCLUDED.role_title, amount = EXCLUDED.amount, fiscal_year = EXCLUDED.fiscal_year, \
		   source_url = EXCLUDED.source_url \
		 RETURNING id, officer_name, role_title, category, amount, period_start, period_end, fiscal_year, source_url",
	)
	.bind(&record.member_or_officer)
	.bind(role_title)
	.bind(record.category.as_str())
	.bind(record.amount)
	.bind(record.period_start)
	.bind(record.period_end)
	.bind(&record.fiscal_year)
	.bind(source_url)
	.fetch_one(executor)
	.await?;
	Ok(row)
}

pub async fn list_for_member(
	executor: impl PgExecutor<'_>,
	representative_id: i64,
	page: Page,
) -> Result<ListResult<MemberExpenditure>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		representative_id: Option<i64>,
		hoc_id: Option<i32>,
		member_name: String,
		category: String,
		amount: rust_decimal::Decimal,
		period_start: chrono::NaiveDate,
		period_end: chrono::NaiveDate,
		fiscal_year: Option<String>,
		source_url: String,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, representative_id, hoc_id, member_name, category, amount, period_start, period_end, \
		 fiscal_year, source_url, COUNT(*) OVER() AS total FROM member_expenditures \
		 WHERE representative_id = $1 ORDER BY period_start DESC LIMIT $2 OFFSET $3",
	)
	.bind(representative_id)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| MemberExpenditure {
			id: r.id,
			representative_id: r.representative_id,
			hoc_id: r.hoc_id,
			member_name: r.member_name,
			category: r.category,
			amount: r.amount,
			period_start: r.period_start,
			period_end: r.period_end,
			fiscal_year: r.fiscal_year,
			source_url: r.source_url,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}

pub async fn list_house_officers(executor: impl PgExecutor<'_>, page: Page) -> Result<ListResult<HouseOfficerExpenditure>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		officer_name: String,
		role_title: Option<String>,
		category: String,
		amount: rust_decimal::Decimal,
		period_start: chrono::NaiveDate,
		period_end: chrono::NaiveDate,
		fiscal_year: Option<String>,
		source_url: String,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, officer_name, role_title, category, amount, period_start, period_end, fiscal_year, \
		 source_url, COUNT(*) OVER() AS total FROM house_officer_expenditures \
		 ORDER BY period_start DESC LIMIT $1 OFFSET $2",
	)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| HouseOfficerExpenditure {
			id: r.id,
			officer_name: r.officer_name,
			role_title: r.role_title,
			category: r.category,
			amount: r.amount,
			period_start: r.period_start,
			period_end: r.period_end,
			fiscal_year: r.fiscal_year,
			source_url: r.source_url,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
