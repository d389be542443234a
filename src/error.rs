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

//! Crate-wide error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = ArchiveError> = std::result::Result<T, E>;

/// Errors raised anywhere in the ingestion engine or access-control stack.
#[derive(Debug, Error)]
pub enum ArchiveError {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("migration error: {0}")]
	Migration(#[from] sqlx::migrate::MigrateError),

	#[error("fetch failed for {url}: {cause}")]
	FetchFailed { url: String, cause: String },

	#[error("failed to decode {source}: {cause}")]
	DecodeFailed { source: String, cause: String },

	#[error("counter store error: {0}")]
	CounterStore(String),

	#[error("validation error: {0}")]
	Validation(String),

	#[error("bad request: {0}")]
	BadRequest(String),

	#[error("missing or malformed credential")]
	MissingCredential,

	#[error("invalid API key")]
	InvalidApiKey,

	#[error("API key inactive")]
	ApiKeyInactive,

	#[error("subscription inactive")]
	SubscriptionInactive,

	#[error("not found")]
	NotFound,

	#[error("rate limit exceeded")]
	RateLimited,

	#[error("configuration error: {0}")]
	Configuration(String),
}

impl ArchiveError {
	pub fn fetch_failed(url: impl Into<String>, cause: impl std::fmt::Display) -> Self {
		Self::FetchFailed { url: url.into(), cause: cause.to_string() }
	}

	pub fn decode_failed(source: impl Into<String>, cause: impl std::fmt::Display) -> Self {
		Self::DecodeFailed { source: source.into(), cause: cause.to_string() }
	}
}

/// Maps the API-surface subset of the taxonomy onto HTTP status codes
/// with minimal bodies; no stack traces or provider messages leak.
/// Ingestion-only variants (`FetchFailed`, `DecodeFailed`, `CounterStore`)
/// never reach a handler and fall through to `500` if they ever did.
impl IntoResponse for ArchiveError {
	fn into_response(self) -> Response {
		let (status, detail) = match &self {
			ArchiveError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
			ArchiveError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
			ArchiveError::MissingCredential => (StatusCode::UNAUTHORIZED, "Missing or malformed credential".to_string()),
			ArchiveError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key".to_string()),
			ArchiveError::ApiKeyInactive => (StatusCode::FORBIDDEN, "API key inactive".to_string()),
			ArchiveError::SubscriptionInactive => (StatusCode::FORBIDDEN, "Subscription inactive".to_string()),
			ArchiveError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
			ArchiveError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded".to_string()),
			ArchiveError::Database(e) => {
				log::error!("database error surfaced to API: {e}");
				(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
			}
			other => {
				log::error!("unexpected error surfaced to API: {other}");
				(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
			}
		};
		(status, Json(json!({ "detail": detail }))).into_response()
	}
}
