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

//! User repository. Users are created on first sight of
//! `(auth_provider, auth_subject_id)`; `email` is updated in place on
//! subsequent sight if it changed.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::db::models::User;
use crate::error::Result;

pub async fn get_by_id(executor: impl PgExecutor<'_>, id: Uuid) -> Result<Option<User>> {
	let user = sqlx::query_as::<_, User>(
		"SELECT id, auth_provider, auth_subject_id, email, created_at FROM users WHERE id = $1",
	)
	.bind(id)
	.fetch_optional(executor)
	.await?;
	Ok(user)
}

pub async fn get_by_subject(executor: impl PgExecutor<'_>, auth_provider: &str, auth_subject_id: &str) -> Result<Option<User>> {
	let user = sqlx::query_as::<_, User>(
		"SELECT id, auth_provider, auth_subject_id, email, created_at FROM users \
		 WHERE auth_provider = $1 AND auth_subject_id = $2",
	)
	.bind(auth_provider)
	.bind(auth_subject_id)
	.fetch_optional(executor)
	.await?;
	Ok(user)
}

/// Creates the user on first sight, or returns the existing row,
/// updating `email` in place if it has changed.
pub async fn upsert_by_subject(
	executor: impl PgExecutor<'_>,
	auth_provider: &str,
	auth_subject_id: &str,
	email: Option<&str>,
) -> Result<User> {
	let user = sqlx::query_as::<_, User>(
		"INSERT INTO users (id, auth_provider, auth_subject_id, email, created_at) \
		 VALUES (gen_random_uuid(), $1, $2, $3, now()) \
		 ON CONFLICT (auth_provider, auth_subject_id) DO UPDATE \
		 SET email = COALESCE(EXCLUDED.email, users.email) \
		 RETURNING id, auth_provider, auth_subject_id, email, created_at",
	)
	.bind(auth_provider)
	.bind(auth_subject_id)
	.bind(email)
	.fetch_one(executor)
	.await?;
	Ok(user)
}
