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

//! Riding repository. Natural key is `(lower(name), lower(province))`.
//! `get_by_point` uses PostGIS's `ST_Contains`, which already excludes
//! boundary points.

use sqlx::PgExecutor;

use crate::db::models::Riding;
use crate::error::Result;

pub async fn get_or_create(executor: impl PgExecutor<'_>, name: &str, province: &str) -> Result<Riding> {
	let riding = sqlx::query_as::<_, Riding>(
		"INSERT INTO ridings (name, province) VALUES ($1, $2) \
		 ON CONFLICT (lower(name), lower(province)) DO UPDATE SET name = EXCLUDED.name \
		 RETURNING id, name, province, fed_number",
	)
	.bind(name)
	.bind(province)
	.fetch_one(executor)
	.await?;
	Ok(riding)
}

pub async fn get(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<Riding>> {
	let riding = sqlx::query_as::<_, Riding>("SELECT id, name, province, fed_number FROM ridings WHERE id = $1")
		.bind(id)
		.fetch_optional(executor)
		.await?;
	Ok(riding)
}

/// `ST_Contains` excludes the polygon boundary, so a point exactly on an
/// edge correctly yields no match.
pub async fn get_by_point(executor: impl PgExecutor<'_>, lat: f64, lng: f64) -> Result<Option<Riding>> {
	let riding = sqlx::query_as::<_, Riding>(
		"SELECT id, name, province, fed_number FROM ridings \
		 WHERE geometry IS NOT NULL AND ST_Contains(geometry, ST_SetSRID(ST_MakePoint($2, $1), 4326)) \
		 LIMIT 1",
	)
	.bind(lat)
	.bind(lng)
	.fetch_optional(executor)
	.await?;
	Ok(riding)
}
