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

//! Shared harness for integration tests: a single migrated pool behind
//! a `tokio::sync::OnceCell`, mirroring `substrate-archive`'s
//! `Once`-guarded `test::initialize()` but adapted to tokio's async
//! initialization instead of blocking inside a `Lazy`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Connects to `TEST_DATABASE_URL` and applies migrations exactly once
/// per test binary; every test function shares the resulting pool.
pub async fn pool() -> &'static PgPool {
	POOL.get_or_init(|| async {
		let url = std::env::var("TEST_DATABASE_URL")
			.expect("TEST_DATABASE_URL must be set to run integration tests");
		let pool = PgPoolOptions::new()
			.min_connections(1)
			.max_connections(5)
			.connect(&url)
			.await
			.expect("failed to connect to TEST_DATABASE_URL");
		sqlx::migrate!().run(&pool).await.expect("failed to apply migrations");
		pool
	})
	.await
}

/// A short random suffix so independent test functions sharing one
/// database don't collide on unique natural keys.
pub fn unique_suffix() -> String {
	uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}
