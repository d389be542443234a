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

//! RepresentativeRole repository. Lifecycle is fully replaced on each
//! ingestion for the representative: there is no
//! natural key to upsert against, since the per-MP roles feed carries
//! no stable id of its own per role entry.

use sqlx::PgPool;

use crate::db::models::RepresentativeRole;
use crate::error::Result;
use crate::types::{RoleRecord, RoleType};

/// Deletes every role row for `representative_id` and inserts `roles` in
/// its place, inside a single transaction.
pub async fn replace_all(pool: &PgPool, representative_id: i64, roles: &[RoleRecord], source_url: &str, source_hash: &str) -> Result<()> {
	let mut tx = pool.begin().await?;
	sqlx::query("DELETE FROM representative_roles WHERE representative_id = $1")
		.bind(representative_id)
		.execute(&mut *tx)
		.await?;

	for role in roles {
		sqlx::query(
			"INSERT INTO representative_roles \
			 (representative_id, role_name, role_type, organization, parliament, session, start_date, end_date, \
			  is_current, source_url, source_hash) \
			 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
		)
		.bind(representative_id)
		.bind(&role.role_name)
		.bind(role.role_type.as_str())
		.bind(&role.organization)
		.bind(role.parliament)
		.bind(role.session)
		.bind(role.start_date)
		.bind(role.end_date)
		.bind(role.is_current())
		.bind(source_url)
		.bind(source_hash)
		.execute(&mut *tx)
		.await?;
	}
	tx.commit().await?;
	Ok(())
}

pub async fn list_for_representative(
	executor: impl sqlx::PgExecutor<'_>,
	representative_id: i64,
) -> Result<Vec<RepresentativeRole>> {
	let roles = sqlx::query_as::<_, RepresentativeRole>(
		"SELECT id, representative_id, role_name, role_type, organization, parliament, session, start_date, \
		 end_date, is_current, source_url, source_hash FROM representative_roles \
		 WHERE representative_id = $1 ORDER BY start_date DESC NULLS LAST",
	)
	.bind(representative_id)
	.fetch_all(executor)
	.await?;
	Ok(roles)
}

pub async fn list_current_by_type(
	executor: impl sqlx::PgExecutor<'_>,
	role_type: RoleType,
) -> Result<Vec<RepresentativeRole>> {
	let roles = sqlx::query_as::<_, RepresentativeRole>(
		"SELECT id, representative_id, role_name, role_type, organization, parliament, session, start_date, \
		 end_date, is_current, source_url, source_hash FROM representative_roles \
		 WHERE role_type = $1 AND is_current = true",
	)
	.bind(role_type.as_str())
	.fetch_all(executor)
	.await?;
	Ok(roles)
}
