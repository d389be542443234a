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

//! Database connectivity and typed repositories.

pub mod api_keys;
pub mod bills;
pub mod billing;
pub mod debates;
pub mod expenditures;
pub mod filters;
pub mod models;
pub mod parties;
pub mod party_standings;
pub mod petitions;
pub mod representatives;
pub mod ridings;
pub mod roles;
pub mod users;
pub mod votes;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::Result;

/// Runs every migration under `./migrations` against `url`.
pub async fn migrate(pool: &PgPool) -> Result<()> {
	sqlx::migrate!("./migrations").run(pool).await?;
	Ok(())
}

/// Connects a bounded pool.
pub async fn connect(url: &str) -> Result<PgPool> {
	let pool = PgPoolOptions::new()
		.min_connections(2)
		.max_connections(16)
		.idle_timeout(Duration::from_secs(300))
		.connect(url)
		.await?;
	Ok(pool)
}

/// `SELECT 1` health probe used by the `/health` endpoint.
pub async fn ping(pool: &PgPool) -> Result<()> {
	sqlx::query("SELECT 1").execute(pool).await?;
	Ok(())
}
