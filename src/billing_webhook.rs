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

//! Billing webhook reconciler. The signature/timestamp check on the
//! incoming event is delegated to the provider SDK and happens before
//! this module ever sees the payload; what's left is turning an event
//! into subscription-state and API-key lifecycle updates, idempotently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::counter::CounterStore;
use crate::db::{api_keys, billing};
use crate::error::Result;
use crate::keys;

const API_KEY_REVEAL_TTL_SECONDS: i64 = 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
	#[serde(rename = "type")]
	pub event_type: String,
	pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
	pub object: Value,
}

/// A subscription as reported by the billing provider. `checkout.session.completed`
/// only carries a subscription id; fetching its current status/period is the one
/// provider-SDK round trip this module delegates out.
pub struct SubscriptionSnapshot {
	pub status: Option<String>,
	pub price_id: Option<String>,
	pub current_period_start: Option<DateTime<Utc>>,
	pub current_period_end: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
	async fn retrieve(&self, subscription_id: &str) -> Result<Option<SubscriptionSnapshot>>;
}

/// Production default. The real provider SDK integration is an external
/// collaborator outside this crate's scope; wiring a concrete
/// `SubscriptionProvider` there is a deployment-time concern.
pub struct NullSubscriptionProvider;

#[async_trait]
impl SubscriptionProvider for NullSubscriptionProvider {
	async fn retrieve(&self, _subscription_id: &str) -> Result<Option<SubscriptionSnapshot>> {
		Ok(None)
	}
}

pub async fn handle_event(
	pool: &PgPool,
	provider: &dyn SubscriptionProvider,
	counters: &dyn CounterStore,
	api_key_hmac_secret: &str,
	event: &WebhookEvent,
) -> Result<()> {
	match event.event_type.as_str() {
		"checkout.session.completed" => {
			handle_checkout_completed(pool, provider, counters, api_key_hmac_secret, &event.data.object).await
		}
		"customer.subscription.updated" | "customer.subscription.deleted" => {
			handle_subscription_updated(pool, &event.data.object).await
		}
		_ => Ok(()),
	}
}

async fn handle_checkout_completed(
	pool: &PgPool,
	provider: &dyn SubscriptionProvider,
	counters: &dyn CounterStore,
	api_key_hmac_secret: &str,
	object: &Value,
) -> Result<()> {
	let Some(user_id) = extract_user_id(object) else {
		log::warn!("checkout.session.completed missing client_reference_id/metadata.user_id");
		return Ok(());
	};

	let customer_id = object.get("customer").and_then(Value::as_str);
	let subscription_id = object.get("subscription").and_then(Value::as_str);

	let snapshot = match subscription_id {
		Some(id) => provider.retrieve(id).await?,
		None => None,
	};

	let mut tx = pool.begin().await?;
	let billing_row = billing::upsert(
		&mut *tx,
		user_id,
		customer_id,
		subscription_id,
		snapshot.as_ref().and_then(|s| s.status.as_deref()),
		snapshot.as_ref().and_then(|s| s.price_id.as_deref()),
		snapshot.as_ref().and_then(|s| s.current_period_start),
		snapshot.as_ref().and_then(|s| s.current_period_end),
	)
	.await?;

	let reveal = activate_or_create_api_key(&mut tx, user_id, billing_row.is_active(), api_key_hmac_secret).await?;
	tx.commit().await?;

	if let Some(plaintext) = reveal {
		let reveal_key = format!("api_key_reveal:{user_id}");
		if let Err(e) = counters.set(&reveal_key, &plaintext, Some(API_KEY_REVEAL_TTL_SECONDS)).await {
			log::warn!("failed to stash one-shot api key reveal for {user_id}: {e}");
		}
	}
	Ok(())
}

async fn handle_subscription_updated(pool: &PgPool, object: &Value) -> Result<()> {
	let Some(customer_id) = object.get("customer").and_then(Value::as_str) else {
		log::warn!("subscription webhook missing customer id");
		return Ok(());
	};

	let mut tx = pool.begin().await?;
	let Some(existing) = billing::get_by_customer_id(&mut *tx, customer_id).await? else {
		log::warn!("subscription webhook for unknown customer {customer_id}");
		return Ok(());
	};

	let subscription_id = object.get("id").and_then(Value::as_str);
	let status = object.get("status").and_then(Value::as_str);
	let price_id = extract_price_id(object);
	let period_start = object.get("current_period_start").and_then(Value::as_i64).and_then(timestamp_to_utc);
	let period_end = object.get("current_period_end").and_then(Value::as_i64).and_then(timestamp_to_utc);

	let billing_row =
		billing::upsert(&mut *tx, existing.user_id, customer_id.into(), subscription_id, status, price_id, period_start, period_end)
			.await?;

	api_keys::set_active_for_user_if_exists(&mut *tx, billing_row.user_id, billing_row.is_active()).await?;
	tx.commit().await?;
	Ok(())
}

/// Creates the user's first active key when none exists, returning its
/// plaintext for a one-shot reveal; otherwise only flips the active
/// flag — webhooks never mint a second key for an existing subscriber.
async fn activate_or_create_api_key(
	tx: &mut Transaction<'_, Postgres>,
	user_id: Uuid,
	active: bool,
	api_key_hmac_secret: &str,
) -> Result<Option<String>> {
	match api_keys::get_active_for_user(&mut **tx, user_id).await? {
		Some(_existing) => {
			api_keys::set_active_for_user_if_exists(&mut **tx, user_id, active).await?;
			Ok(None)
		}
		None => {
			let (plaintext, prefix, hash) = keys::generate(api_key_hmac_secret)?;
			api_keys::create(&mut **tx, user_id, &prefix, &hash, active).await?;
			Ok(Some(plaintext))
		}
	}
}

fn extract_user_id(object: &Value) -> Option<Uuid> {
	object
		.get("client_reference_id")
		.and_then(Value::as_str)
		.or_else(|| object.get("metadata").and_then(|m| m.get("user_id")).and_then(Value::as_str))
		.and_then(|s| Uuid::parse_str(s).ok())
}

fn extract_price_id(object: &Value) -> Option<&str> {
	object.get("items").and_then(|i| i.get("data")).and_then(|d| d.get(0)).and_then(|item| item.get("price"))
		.and_then(|p| p.get("id")).and_then(Value::as_str)
}

fn timestamp_to_utc(ts: i64) -> Option<DateTime<Utc>> {
	DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn extract_user_id_prefers_client_reference_id() {
		let object = json!({
			"client_reference_id": "9f3b8b0a-1b3f-4e9a-8f1d-2c3a4b5c6d7e",
			"metadata": { "user_id": "ignored" },
		});
		assert_eq!(extract_user_id(&object), Uuid::parse_str("9f3b8b0a-1b3f-4e9a-8f1d-2c3a4b5c6d7e").ok());
	}

	#[test]
	fn extract_user_id_falls_back_to_metadata() {
		let object = json!({ "metadata": { "user_id": "9f3b8b0a-1b3f-4e9a-8f1d-2c3a4b5c6d7e" } });
		assert_eq!(extract_user_id(&object), Uuid::parse_str("9f3b8b0a-1b3f-4e9a-8f1d-2c3a4b5c6d7e").ok());
	}

	#[test]
	fn extract_price_id_reads_nested_items() {
		let object = json!({ "items": { "data": [ { "price": { "id": "price_123" } } ] } });
		assert_eq!(extract_price_id(&object), Some("price_123"));
	}

	#[test]
	fn timestamp_round_trips_to_utc() {
		let dt = timestamp_to_utc(1_700_000_000).unwrap();
		assert_eq!(dt.timestamp(), 1_700_000_000);
	}
}
