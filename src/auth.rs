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

//! Bearer-token verification for account/billing endpoints. Checking the
//! token itself is an external identity provider's job; this module
//! only defines the claim shape handlers need and the seam a concrete
//! provider plugs into.

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::error::{ArchiveError, Result};

/// What a verified `Authorization: Bearer` token resolves to.
#[derive(Debug, Clone)]
pub struct AuthClaims {
	pub provider: String,
	pub subject_id: String,
	pub email: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
	async fn verify(&self, bearer_token: &str) -> Result<AuthClaims>;
}

/// Always rejects. The real provider integration (Clerk, Auth0, a JWT
/// verifier keyed off a JWKS endpoint) is a deployment-time concern
/// outside this crate; this stands in until one is wired into `AppState`.
pub struct UnconfiguredTokenVerifier;

#[async_trait]
impl TokenVerifier for UnconfiguredTokenVerifier {
	async fn verify(&self, _bearer_token: &str) -> Result<AuthClaims> {
		Err(ArchiveError::Configuration("no token verifier configured".into()))
	}
}

/// Pulls the bearer token out of the `Authorization` header; missing or
/// malformed → `MissingCredential`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
	let header = headers.get(axum::http::header::AUTHORIZATION).ok_or(ArchiveError::MissingCredential)?;
	let value = header.to_str().map_err(|_| ArchiveError::MissingCredential)?;
	value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty()).ok_or(ArchiveError::MissingCredential)
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	#[test]
	fn extracts_token_from_bearer_header() {
		let mut headers = HeaderMap::new();
		headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
		assert_eq!(bearer_token(&headers).unwrap(), "abc123");
	}

	#[test]
	fn rejects_missing_header() {
		let headers = HeaderMap::new();
		assert!(matches!(bearer_token(&headers), Err(ArchiveError::MissingCredential)));
	}

	#[test]
	fn rejects_non_bearer_scheme() {
		let mut headers = HeaderMap::new();
		headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
		assert!(matches!(bearer_token(&headers), Err(ArchiveError::MissingCredential)));
	}
}
