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

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::{self, AuthClaims};
use crate::db::{api_keys, billing, users};
use crate::error::{ArchiveError, Result};
use crate::keys;
use crate::state::AppState;

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthClaims> {
	let token = auth::bearer_token(headers)?;
	state.identity.verify(token).await
}

#[derive(Debug, Serialize)]
pub struct ApiKeyView {
	key_prefix: String,
	masked: String,
	active: bool,
	subscription_active: bool,
}

/// Reports the caller's current key in masked form; it never returns
/// the plaintext, which is only ever revealed once, at creation.
pub async fn get_key(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>> {
	let claims = authenticate(&state, &headers).await?;
	let user = users::get_by_subject(&state.pool, &claims.provider, &claims.subject_id).await?;
	let Some(user) = user else {
		return Ok(Json(json!({ "api_key": null })));
	};

	let key = api_keys::get_active_for_user(&state.pool, user.id).await?;
	let subscription_active = billing::get_by_user_id(&state.pool, user.id).await?.map(|b| b.is_active()).unwrap_or(false);

	let view = key.map(|k| ApiKeyView {
		masked: keys::mask(&k.key_prefix),
		key_prefix: k.key_prefix,
		active: k.active,
		subscription_active,
	});
	Ok(Json(json!({ "api_key": view })))
}

/// Deactivates any existing key and mints a new one, returning its
/// plaintext exactly once; the caller must store it immediately.
pub async fn rotate_key(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>> {
	let claims = authenticate(&state, &headers).await?;
	let secret = state
		.config
		.api_key_hmac_secret
		.as_deref()
		.ok_or_else(|| ArchiveError::Configuration("API_KEY_HMAC_SECRET is required to mint keys".into()))?;

	let mut tx = state.pool.begin().await?;
	let user = users::upsert_by_subject(&mut *tx, &claims.provider, &claims.subject_id, claims.email.as_deref()).await?;
	let subscription_active = billing::get_by_user_id(&mut *tx, user.id).await?.map(|b| b.is_active()).unwrap_or(false);

	api_keys::deactivate_all_for_user(&mut *tx, user.id).await?;
	let (plaintext, prefix, hash) = keys::generate(secret)?;
	let key = api_keys::create(&mut *tx, user.id, &prefix, &hash, subscription_active).await?;
	tx.commit().await?;

	Ok(Json(json!({
		"api_key": plaintext,
		"key_prefix": key.key_prefix,
		"active": key.active,
	})))
}
