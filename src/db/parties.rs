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

//! Party repository. `name` is unique; `get_or_create` races are
//! tolerated by that constraint.

use sqlx::PgExecutor;

use crate::db::filters::{ListResult, Page};
use crate::db::models::Party;
use crate::error::Result;

/// Built-in colour/short-name mapping for major caucuses.
pub fn builtin_metadata(name: &str) -> (Option<&'static str>, Option<&'static str>) {
	match name {
		"Liberal" => (Some("LPC"), Some("#D71920")),
		"Conservative" => (Some("CPC"), Some("#1A4782")),
		"NDP" => (Some("NDP"), Some("#F37021")),
		"Bloc Québécois" => (Some("BQ"), Some("#33B2CC")),
		"Green Party" => (Some("GPC"), Some("#3D9B35")),
		"Independent" => (Some("Ind."), Some("#808080")),
		_ => (None, None),
	}
}

pub async fn get_by_name(executor: impl PgExecutor<'_>, name: &str) -> Result<Option<Party>> {
	let party = sqlx::query_as::<_, Party>("SELECT id, name, short_name, color FROM parties WHERE name = $1")
		.bind(name)
		.fetch_optional(executor)
		.await?;
	Ok(party)
}

pub async fn get_or_create(executor: impl PgExecutor<'_>, name: &str, short_name: Option<&str>, color: Option<&str>) -> Result<Party> {
	let (default_short, default_color) = builtin_metadata(name);
	let party = sqlx::query_as::<_, Party>(
		"INSERT INTO parties (name, short_name, color) VALUES ($1, $2, $3) \
		 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
		 RETURNING id, name, short_name, color",
	)
	.bind(name)
	.bind(short_name.or(default_short))
	.bind(color.or(default_color))
	.fetch_one(executor)
	.await?;
	Ok(party)
}

pub async fn list(executor: impl PgExecutor<'_>, page: Page) -> Result<ListResult<Party>> {
	#[derive(sqlx::FromRow)]
	struct Row {
		id: i64,
		name: String,
		short_name: Option<String>,
		color: Option<String>,
		total: i64,
	}

	let rows = sqlx::query_as::<_, Row>(
		"SELECT id, name, short_name, color, COUNT(*) OVER() AS total FROM parties ORDER BY name LIMIT $1 OFFSET $2",
	)
	.bind(page.limit)
	.bind(page.offset)
	.fetch_all(executor)
	.await?;

	let total = rows.first().map(|r| r.total).unwrap_or(0);
	let items = rows.into_iter().map(|r| Party { id: r.id, name: r.name, short_name: r.short_name, color: r.color }).collect();
	Ok(ListResult { items, total, limit: page.limit, offset: page.offset })
}
