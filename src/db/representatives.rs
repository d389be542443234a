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

//! Representative repository. Natural key is `hoc_id`.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::Representative;
use crate::error::Result;

pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<Representative>> {
	let rep = sqlx::query_as::<_, Representative>(
		"SELECT id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		 is_active, party_id, riding_id FROM representatives WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(executor)
	.await?;
	Ok(rep)
}

pub async fn get_by_hoc_id(executor: impl PgExecutor<'_>, hoc_id: i32) -> Result<Option<Representative>> {
	let rep = sqlx::query_as::<_, Representative>(
		"SELECT id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		 is_active, party_id, riding_id FROM representatives WHERE hoc_id = $1",
	)
	.bind(hoc_id)
	.fetch_optional(executor)
	.await?;
	Ok(rep)
}

/// The active representative currently linked to a riding, if any.
pub async fn get_by_riding_id(executor: impl PgExecutor<'_>, riding_id: i64) -> Result<Option<Representative>> {
	let rep = sqlx::query_as::<_, Representative>(
		"SELECT id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		 is_active, party_id, riding_id FROM representatives WHERE riding_id = $1 AND is_active = true LIMIT 1",
	)
	.bind(riding_id)
	.fetch_optional(executor)
	.await?;
	Ok(rep)
}

pub async fn list_active(executor: impl PgExecutor<'_>) -> Result<Vec<Representative>> {
	let reps = sqlx::query_as::<_, Representative>(
		"SELECT id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		 is_active, party_id, riding_id FROM representatives WHERE is_active = true",
	)
	.fetch_all(executor)
	.await?;
	Ok(reps)
}

#[allow(clippy::too_many_arguments)]
pub async fn upsert_by_hoc_id(
	executor: impl PgExecutor<'_>,
	hoc_id: i32,
	first_name: Option<&str>,
	last_name: Option<&str>,
	name: &str,
	honorific: Option<&str>,
	email: Option<&str>,
	phone: Option<&str>,
	photo_url: Option<&str>,
	profile_url: Option<&str>,
	party_id: Option<i64>,
	riding_id: Option<i64>,
) -> Result<Representative> {
	let rep = sqlx::query_as::<_, Representative>(
		"INSERT INTO representatives \
		 (hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, is_active, party_id, riding_id) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, true, $10, $11) \
		 ON CONFLICT (hoc_id) DO UPDATE SET \
		   first_name = EXCLUDED.first_name, last_name = EXCLUDED.last_name, name = EXCLUDED.name, \
		   honorific = EXCLUDED.honorific, email = EXCLUDED.email, phone = EXCLUDED.phone, \
		   photo_url = EXCLUDED.photo_url, profile_url = EXCLUDED.profile_url, is_active = true, \
		   party_id = EXCLUDED.party_id, riding_id = EXCLUDED.riding_id \
		 RETURNING id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		   is_active, party_id, riding_id",
	)
	.bind(hoc_id)
	.bind(first_name)
	.bind(last_name)
	.bind(name)
	.bind(honorific)
	.bind(email)
	.bind(phone)
	.bind(photo_url)
	.bind(profile_url)
	.bind(party_id)
	.bind(riding_id)
	.fetch_one(executor)
	.await?;
	Ok(rep)
}

pub async fn list_with_filters(
	executor: impl PgExecutor<'_>,
	party_id: Option<i64>,
	riding_id: Option<i64>,
	page: Page,
) -> Result<ListResult<Representative>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		#[sqlx(flatten)]
		rep: RepRow,
		total: i64,
	}
	#[derive(sqlx::FromRow)]
	struct RepRow {
		id: i64,
		hoc_id: i32,
		first_name: Option<String>,
		last_name: Option<String>,
		name: String,
		honorific: Option<String>,
		email: Option<String>,
		phone: Option<String>,
		photo_url: Option<String>,
		profile_url: Option<String>,
		is_active: bool,
		party_id: Option<i64>,
		riding_id: Option<i64>,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, hoc_id, first_name, last_name, name, honorific, email, phone, photo_url, profile_url, \
		 is_active, party_id, riding_id, COUNT(*) OVER() AS total FROM representatives \
		 WHERE ($1::bigint IS NULL OR party_id = $1) AND ($2::bigint IS NULL OR riding_id = $2) \
		 ORDER BY name LIMIT $3 OFFSET $4",
	)
	.bind(party_id)
	.bind(riding_id)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows
		.into_iter()
		.map(|r| Representative {
			id: r.rep.id,
			hoc_id: r.rep.hoc_id,
			first_name: r.rep.first_name,
			last_name: r.rep.last_name,
			name: r.rep.name,
			honorific: r.rep.honorific,
			email: r.rep.email,
			phone: r.rep.phone,
			photo_url: r.rep.photo_url,
			profile_url: r.rep.profile_url,
			is_active: r.rep.is_active,
			party_id: r.rep.party_id,
			riding_id: r.rep.riding_id,
		})
		.collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
