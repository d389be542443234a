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

//! Usage metering hook. Runs after the response is produced; failures
//! here must never change what the client sees, so every counter-store
//! error is logged and swallowed.

use axum::http::StatusCode;
use chrono::Utc;

use crate::access_control::RequestContext;
use crate::counter::CounterStore;

const MIN_TTL_SECONDS: i64 = 60;
const DEFAULT_TTL_SECONDS: i64 = 35 * 86_400;
const GRACE_SECONDS: i64 = 86_400;

/// Increments `usage:{api_key_id}:{floor(period_start)}` when the
/// response was successful. A billing period without a recorded start
/// (no prior webhook has populated one) has no well-defined usage key,
/// so nothing is recorded.
pub async fn record_usage(counters: &dyn CounterStore, ctx: &RequestContext, status: StatusCode) {
	if status.as_u16() >= 400 {
		return;
	}
	let Some(period_start) = ctx.usage_period_start else {
		return;
	};

	let key = format!("usage:{}:{}", ctx.api_key_id, period_start.timestamp());
	match counters.incr(&key).await {
		Ok(count) if count == 1 => {
			let ttl = match ctx.usage_period_end {
				Some(end) => (end.timestamp() - Utc::now().timestamp() + GRACE_SECONDS).max(MIN_TTL_SECONDS),
				None => DEFAULT_TTL_SECONDS,
			};
			if let Err(e) = counters.expire(&key, ttl).await {
				log::warn!("usage metering: failed to set expiry on {key}: {e}");
			}
		}
		Ok(_) => {}
		Err(e) => log::warn!("usage metering: failed to increment {key}: {e}"),
	}
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, Utc};
	use uuid::Uuid;

	use super::*;
	use crate::counter::InProcessCounterStore;

	fn ctx(start: Option<chrono::DateTime<Utc>>, end: Option<chrono::DateTime<Utc>>) -> RequestContext {
		RequestContext { api_key_id: Uuid::new_v4(), usage_period_start: start, usage_period_end: end }
	}

	#[tokio::test]
	async fn successful_response_increments_counter() {
		let store = InProcessCounterStore::new();
		let c = ctx(Some(Utc::now()), Some(Utc::now() + Duration::days(30)));
		record_usage(&store, &c, StatusCode::OK).await;
		record_usage(&store, &c, StatusCode::CREATED).await;
		let key = format!("usage:{}:{}", c.api_key_id, c.usage_period_start.unwrap().timestamp());
		assert_eq!(store.get(&key).await.unwrap(), Some("2".to_string()));
	}

	#[tokio::test]
	async fn error_response_is_not_counted() {
		let store = InProcessCounterStore::new();
		let c = ctx(Some(Utc::now()), None);
		record_usage(&store, &c, StatusCode::NOT_FOUND).await;
		let key = format!("usage:{}:{}", c.api_key_id, c.usage_period_start.unwrap().timestamp());
		assert_eq!(store.get(&key).await.unwrap(), None);
	}

	#[tokio::test]
	async fn missing_period_start_skips_metering() {
		let store = InProcessCounterStore::new();
		let c = ctx(None, None);
		record_usage(&store, &c, StatusCode::OK).await;
		// No key was ever written; nothing to assert against but the absence
		// of a panic and of any tracked key for this api_key_id.
		assert!(store.get(&format!("usage:{}:0", c.api_key_id)).await.unwrap().is_none());
	}
}
