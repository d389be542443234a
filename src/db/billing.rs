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

//! Billing repository (1:1 with User). The webhook reconciler is the
//! sole writer of this table.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::db::models::Billing;
use crate::error::Result;

pub async fn get_by_user_id(executor: impl PgExecutor<'_>, user_id: Uuid) -> Result<Option<Billing>> {
	let billing = sqlx::query_as::<_, Billing>(
		"SELECT user_id, customer_id, subscription_id, status, price_id, current_period_start, current_period_end \
		 FROM billing WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(executor)
	.await?;
	Ok(billing)
}

pub async fn get_by_customer_id(executor: impl PgExecutor<'_>, customer_id: &str) -> Result<Option<Billing>> {
	let billing = sqlx::query_as::<_, Billing>(
		"SELECT user_id, customer_id, subscription_id, status, price_id, current_period_start, current_period_end \
		 FROM billing WHERE customer_id = $1",
	)
	.bind(customer_id)
	.fetch_optional(executor)
	.await?;
	Ok(billing)
}

/// Overwrites every field; replaying an identical webhook converges to
/// the same state.
#[allow(clippy::too_many_arguments)]
pub async fn upsert(
	executor: impl PgExecutor<'_>,
	user_id: Uuid,
	customer_id: Option<&str>,
	subscription_id: Option<&str>,
	status: Option<&str>,
	price_id: Option<&str>,
	current_period_start: Option<DateTime<Utc>>,
	current_period_end: Option<DateTime<Utc>>,
) -> Result<Billing> {
	let billing = sqlx::query_as::<_, Billing>(
		"INSERT INTO billing (user_id, customer_id, subscription_id, status, price_id, current_period_start, current_period_end) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7) \
		 ON CONFLICT (user_id) DO UPDATE SET \
		   customer_id = EXCLUDED.customer_id, \
		   subscription_id = EXCLUDED.subscription_id, \
		   status = EXCLUDED.status, \
		   price_id = EXCLUDED.price_id, \
		   current_period_start = EXCLUDED.current_period_start, \
		   current_period_end = EXCLUDED.current_period_end \
		 RETURNING user_id, customer_id, subscription_id, status, price_id, current_period_start, current_period_end",
	)
	.bind(user_id)
	.bind(customer_id)
	.bind(subscription_id)
	.bind(status)
	.bind(price_id)
	.bind(current_period_start)
	.bind(current_period_end)
	.fetch_one(executor)
	.await?;
	Ok(billing)
}
