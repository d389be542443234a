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

//! Scenario 3 and invariants 4/5: the fixed-window rate limit accepts
//! exactly `N` requests per window and rejects the `N+1`th, and tier
//! selection (API key vs IP) picks the limit that matches the
//! credential actually presented.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use parl_archive::auth::UnconfiguredTokenVerifier;
use parl_archive::billing_webhook::NullSubscriptionProvider;
use parl_archive::config::{Config, Environment};
use parl_archive::counter::InProcessCounterStore;
use parl_archive::db::{api_keys, billing, users};
use parl_archive::geocoding::UnconfiguredPostalCodeResolver;
use parl_archive::state::AppState;
use parl_archive::{access_control, keys};
use tower::ServiceExt;

fn base_config(free_limit: u32, paid_limit: u32) -> Config {
	Config {
		database_url: String::new(),
		redis_url: None,
		api_key_hmac_secret: Some("test-secret".to_string()),
		environment: Environment::Test,
		hoc_parliament: 44,
		hoc_session: 1,
		hoc_max_concurrency: 4,
		hoc_min_request_interval_ms: 0,
		hoc_api_timeout_secs: 30,
		hoc_debates_max_sitting: 10,
		hoc_debates_lookahead: 5,
		hoc_debates_max_missing: 5,
		hoc_debate_languages: vec!["en".to_string()],
		hoc_enabled_pipelines: vec![],
		free_rate_limit_per_minute: free_limit,
		paid_rate_limit_per_minute: paid_limit,
	}
}

fn test_router(state: AppState) -> Router {
	Router::new()
		.route("/ping", get(|| async { "ok" }))
		.route_layer(from_fn_with_state(state.clone(), access_control::middleware))
		.with_state(state)
}

async fn send(router: &Router, api_key: Option<&str>, ip: &str) -> StatusCode {
	let mut builder = Request::builder().uri("/ping").header("x-forwarded-for", ip);
	if let Some(key) = api_key {
		builder = builder.header("x-api-key", key);
	}
	let request = builder.body(Body::empty()).unwrap();
	let response = router.clone().oneshot(request).await.unwrap();
	response.status()
}

#[tokio::test]
async fn free_tier_rejects_the_nplus1th_request_in_a_window() {
	let pool = common::pool().await.clone();
	let state = AppState::new(
		pool,
		Arc::new(InProcessCounterStore::new()),
		Arc::new(base_config(3, 500)),
		Arc::new(UnconfiguredTokenVerifier),
		Arc::new(UnconfiguredPostalCodeResolver),
		Arc::new(NullSubscriptionProvider),
	);
	let router = test_router(state);
	let ip = format!("203.0.113.{}", (uuid::Uuid::new_v4().as_u128() % 250) + 1);

	let mut statuses = Vec::new();
	for _ in 0..4 {
		statuses.push(send(&router, None, &ip).await);
	}

	assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 3);
	assert_eq!(statuses.iter().filter(|s| **s == StatusCode::TOO_MANY_REQUESTS).count(), 1);
	assert_eq!(statuses[3], StatusCode::TOO_MANY_REQUESTS, "the 4th request in a 3-limit window must be rejected");
}

#[tokio::test]
async fn a_valid_active_api_key_selects_the_paid_limit_not_the_free_one() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let secret = "test-secret";

	let user = users::upsert_by_subject(pool, "test-provider", &format!("subject-{suffix}"), None).await.unwrap();
	billing::upsert(pool, user.id, Some(&format!("cus_{suffix}")), None, Some("active"), None, None, None).await.unwrap();
	let (plaintext, prefix, hash) = keys::generate(secret).unwrap();
	api_keys::create(pool, user.id, &prefix, &hash, true).await.unwrap();

	// free limit of 1 would reject the 2nd request; paid limit of 2 must not.
	let state = AppState::new(
		pool.clone(),
		Arc::new(InProcessCounterStore::new()),
		Arc::new(base_config(1, 2)),
		Arc::new(UnconfiguredTokenVerifier),
		Arc::new(UnconfiguredPostalCodeResolver),
		Arc::new(NullSubscriptionProvider),
	);
	let router = test_router(state);
	let ip = "198.51.100.7";

	let first = send(&router, Some(&plaintext), ip).await;
	let second = send(&router, Some(&plaintext), ip).await;
	let third = send(&router, Some(&plaintext), ip).await;

	assert_eq!(first, StatusCode::OK);
	assert_eq!(second, StatusCode::OK, "paid limit of 2 must allow a 2nd request that the free limit of 1 would reject");
	assert_eq!(third, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn missing_api_key_falls_through_to_ip_based_free_limit() {
	let state = AppState::new(
		common::pool().await.clone(),
		Arc::new(InProcessCounterStore::new()),
		Arc::new(base_config(1, 500)),
		Arc::new(UnconfiguredTokenVerifier),
		Arc::new(UnconfiguredPostalCodeResolver),
		Arc::new(NullSubscriptionProvider),
	);
	let router = test_router(state);
	let ip = format!("203.0.113.{}", (uuid::Uuid::new_v4().as_u128() % 250) + 1);

	assert_eq!(send(&router, None, &ip).await, StatusCode::OK);
	assert_eq!(send(&router, None, &ip).await, StatusCode::TOO_MANY_REQUESTS, "free limit of 1 must bind the 2nd request");
}
