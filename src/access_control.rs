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

//! Access-control middleware: credential extraction, subscription
//! gating, and the tiered sliding-window-free, fixed-window rate
//! limit. Applied to data endpoints only; the health check and the
//! billing webhook are mounted outside this layer.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::{api_keys, billing};
use crate::error::{ArchiveError, Result};
use crate::keys;
use crate::metering;
use crate::state::AppState;

/// Attached to the request by this middleware when a valid, active API
/// key was presented; read by handlers and by the usage-metering hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
	pub api_key_id: Uuid,
	pub usage_period_start: Option<DateTime<Utc>>,
	pub usage_period_end: Option<DateTime<Utc>>,
}

pub async fn middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
	let (mut parts, body) = request.into_parts();

	let outcome = resolve(&state, &parts).await;
	let context = match outcome {
		Ok(context) => context,
		Err(e) => return e.into_response(),
	};

	if let Some(ctx) = context.clone() {
		parts.extensions.insert(ctx);
	}

	let request = Request::from_parts(parts, body);
	let response = next.run(request).await;

	if let Some(ctx) = context {
		metering::record_usage(state.counters.as_ref(), &ctx, response.status()).await;
	}

	response
}

async fn resolve(state: &AppState, parts: &axum::http::request::Parts) -> Result<Option<RequestContext>> {
	let api_key_header =
		parts.headers.get("x-api-key").and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty());

	match api_key_header {
		Some(plaintext) => Ok(Some(resolve_api_key(state, plaintext).await?)),
		None => {
			let ip = client_ip(parts);
			check_rate_limit(state, &format!("ip:{ip}"), state.config.free_rate_limit_per_minute).await?;
			Ok(None)
		}
	}
}

async fn resolve_api_key(state: &AppState, plaintext: &str) -> Result<RequestContext> {
	let secret = state
		.config
		.api_key_hmac_secret
		.as_deref()
		.ok_or_else(|| ArchiveError::Configuration("API_KEY_HMAC_SECRET is required to validate keys".into()))?;

	let key_hash = keys::hash(plaintext, secret)?;
	let api_key = api_keys::get_by_hash(&state.pool, &key_hash).await?.ok_or(ArchiveError::InvalidApiKey)?;

	if !api_key.active {
		return Err(ArchiveError::ApiKeyInactive);
	}

	let owner_billing = billing::get_by_user_id(&state.pool, api_key.user_id).await?;
	let is_active = owner_billing.as_ref().map(|b| b.is_active()).unwrap_or(false);
	if !is_active {
		return Err(ArchiveError::SubscriptionInactive);
	}

	check_rate_limit(state, &format!("key:{}", api_key.id), state.config.paid_rate_limit_per_minute).await?;

	let _ = api_keys::touch_last_used(&state.pool, api_key.id).await;

	let billing = owner_billing.expect("is_active implies billing row exists");
	Ok(RequestContext {
		api_key_id: api_key.id,
		usage_period_start: billing.current_period_start,
		usage_period_end: billing.current_period_end,
	})
}

/// `window = floor(now_unix / 60)`; `INCR` the window counter and set a
/// 60s expiry on its first increment; reject the `N+1`th request in a
/// window where `N` is the configured limit.
async fn check_rate_limit(state: &AppState, identity: &str, limit: u32) -> Result<()> {
	let window = Utc::now().timestamp() / 60;
	let key = format!("ratelimit:{identity}:{window}");
	let count = state.counters.incr(&key).await?;
	if count == 1 {
		state.counters.expire(&key, 60).await?;
	}
	if count > i64::from(limit) {
		return Err(ArchiveError::RateLimited);
	}
	Ok(())
}

/// `X-Forwarded-For`'s first token, else the TCP peer, else `"unknown"`.
fn client_ip(parts: &axum::http::request::Parts) -> String {
	if let Some(forwarded) = parts.headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
		if let Some(first) = forwarded.split(',').next() {
			let trimmed = first.trim();
			if !trimmed.is_empty() {
				return trimmed.to_string();
			}
		}
	}
	parts
		.extensions
		.get::<ConnectInfo<SocketAddr>>()
		.map(|ConnectInfo(addr)| addr.ip().to_string())
		.unwrap_or_else(|| "unknown".to_string())
}
