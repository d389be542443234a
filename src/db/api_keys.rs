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

//! ApiKey repository. "At most one active key per user" is enforced by
//! the rotation algorithm (deactivate-all, then insert), not a database
//! constraint.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::db::models::ApiKey;
use crate::error::Result;

pub async fn get_by_hash(executor: impl PgExecutor<'_>, key_hash: &str) -> Result<Option<ApiKey>> {
	let key = sqlx::query_as::<_, ApiKey>(
		"SELECT id, user_id, key_prefix, key_hash, active, revoked_at, last_used_at FROM api_keys WHERE key_hash = $1",
	)
	.bind(key_hash)
	.fetch_optional(executor)
	.await?;
	Ok(key)
}

pub async fn get_active_for_user(executor: impl PgExecutor<'_>, user_id: Uuid) -> Result<Option<ApiKey>> {
	let key = sqlx::query_as::<_, ApiKey>(
		"SELECT id, user_id, key_prefix, key_hash, active, revoked_at, last_used_at FROM api_keys \
		 WHERE user_id = $1 AND active = true ORDER BY id DESC LIMIT 1",
	)
	.bind(user_id)
	.fetch_optional(executor)
	.await?;
	Ok(key)
}

pub async fn touch_last_used(executor: impl PgExecutor<'_>, id: Uuid) -> Result<()> {
	sqlx::query("UPDATE api_keys SET last_used_at = now() WHERE id = $1").bind(id).execute(executor).await?;
	Ok(())
}

/// Deactivates every key for `user_id`; the row-lock a caller takes on
/// the user (or on the active key) before calling this, plus this call
/// and the subsequent insert, together serialize concurrent rotations.
pub async fn deactivate_all_for_user(executor: impl PgExecutor<'_>, user_id: Uuid) -> Result<()> {
	sqlx::query("UPDATE api_keys SET active = false, revoked_at = now() WHERE user_id = $1 AND active = true")
		.bind(user_id)
		.execute(executor)
		.await?;
	Ok(())
}

pub async fn create(executor: impl PgExecutor<'_>, user_id: Uuid, key_prefix: &str, key_hash: &str, active: bool) -> Result<ApiKey> {
	let key = sqlx::query_as::<_, ApiKey>(
		"INSERT INTO api_keys (id, user_id, key_prefix, key_hash, active) \
		 VALUES (gen_random_uuid(), $1, $2, $3, $4) \
		 RETURNING id, user_id, key_prefix, key_hash, active, revoked_at, last_used_at",
	)
	.bind(user_id)
	.bind(key_prefix)
	.bind(key_hash)
	.bind(active)
	.fetch_one(executor)
	.await?;
	Ok(key)
}

/// Sets the active flag on the user's current active key, if any; never
/// creates a key — subscription-update webhooks toggle only, they
/// don't mint.
pub async fn set_active_for_user_if_exists(executor: impl PgExecutor<'_>, user_id: Uuid, active: bool) -> Result<()> {
	sqlx::query(
		"UPDATE api_keys SET active = $2, revoked_at = CASE WHEN $2 THEN revoked_at ELSE now() END \
		 WHERE user_id = $1 AND active = true",
	)
	.bind(user_id)
	.bind(active)
	.execute(executor)
	.await?;
	Ok(())
}
