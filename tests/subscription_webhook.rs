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

//! Scenario 5 and invariant 8: a `customer.subscription.updated`
//! webhook that moves a subscription out of the active set deactivates
//! the user's API key. Also exercises invariant 1 (upsert idempotence)
//! and the `checkout.session.completed` one-shot key mint.

mod common;

use parl_archive::billing_webhook::{self, NullSubscriptionProvider, WebhookEvent};
use parl_archive::counter::{CounterStore, InProcessCounterStore};
use parl_archive::db::{api_keys, billing, users};
use parl_archive::keys;
use serde_json::json;

const SECRET: &str = "test-secret";

fn parse_event(value: serde_json::Value) -> WebhookEvent {
	serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn subscription_cancellation_deactivates_the_active_key() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let customer_id = format!("cus_{suffix}");

	let user = users::upsert_by_subject(pool, "test-provider", &format!("cancel-{suffix}"), None).await.unwrap();
	billing::upsert(pool, user.id, Some(&customer_id), Some("sub_1"), Some("active"), None, None, None).await.unwrap();
	let (_, prefix, hash) = keys::generate(SECRET).unwrap();
	api_keys::create(pool, user.id, &prefix, &hash, true).await.unwrap();

	let counters = InProcessCounterStore::new();
	let event = parse_event(json!({
		"type": "customer.subscription.updated",
		"data": { "object": { "id": "sub_1", "customer": customer_id, "status": "canceled" } },
	}));
	billing_webhook::handle_event(pool, &NullSubscriptionProvider, &counters, SECRET, &event).await.unwrap();

	let refreshed_billing = billing::get_by_user_id(pool, user.id).await.unwrap().unwrap();
	assert_eq!(refreshed_billing.status.as_deref(), Some("canceled"));
	assert!(!refreshed_billing.is_active());

	let refreshed_key = api_keys::get_by_hash(pool, &hash).await.unwrap().unwrap();
	assert!(!refreshed_key.active, "the user's active key must be deactivated once the subscription leaves the active set");
}

#[tokio::test]
async fn replaying_the_same_webhook_converges_to_the_same_state() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();
	let customer_id = format!("cus_{suffix}");

	let user = users::upsert_by_subject(pool, "test-provider", &format!("replay-{suffix}"), None).await.unwrap();
	billing::upsert(pool, user.id, Some(&customer_id), Some("sub_1"), Some("active"), None, None, None).await.unwrap();
	let (_, prefix, hash) = keys::generate(SECRET).unwrap();
	api_keys::create(pool, user.id, &prefix, &hash, true).await.unwrap();

	let counters = InProcessCounterStore::new();
	let event = parse_event(json!({
		"type": "customer.subscription.updated",
		"data": { "object": { "id": "sub_1", "customer": customer_id, "status": "trialing" } },
	}));

	billing_webhook::handle_event(pool, &NullSubscriptionProvider, &counters, SECRET, &event).await.unwrap();
	let first = billing::get_by_user_id(pool, user.id).await.unwrap().unwrap();

	billing_webhook::handle_event(pool, &NullSubscriptionProvider, &counters, SECRET, &event).await.unwrap();
	let second = billing::get_by_user_id(pool, user.id).await.unwrap().unwrap();

	assert_eq!(first.status, second.status);
	assert_eq!(first.price_id, second.price_id);
	assert!(second.is_active());

	let key = api_keys::get_by_hash(pool, &hash).await.unwrap().unwrap();
	assert!(key.active);
}

#[tokio::test]
async fn checkout_completed_mints_a_key_and_stashes_a_one_shot_reveal() {
	let pool = common::pool().await;
	let suffix = common::unique_suffix();

	let user = users::upsert_by_subject(pool, "test-provider", &format!("checkout-{suffix}"), None).await.unwrap();
	assert!(api_keys::get_active_for_user(pool, user.id).await.unwrap().is_none());

	let counters = InProcessCounterStore::new();
	let event = parse_event(json!({
		"type": "checkout.session.completed",
		"data": { "object": { "client_reference_id": user.id.to_string(), "customer": format!("cus_{suffix}") } },
	}));
	billing_webhook::handle_event(pool, &NullSubscriptionProvider, &counters, SECRET, &event).await.unwrap();

	let minted = api_keys::get_active_for_user(pool, user.id).await.unwrap();
	assert!(minted.is_some(), "checkout completion must mint a first key when the user has none");

	let reveal = counters.get(&format!("api_key_reveal:{}", user.id)).await.unwrap();
	assert!(reveal.is_some(), "the plaintext must be stashed once for the caller to retrieve");
}
